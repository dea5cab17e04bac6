use pathfinding::prelude::dijkstra_all;
use pretty_assertions::assert_eq;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

use crate::{prelude::*, *};

fn scene(s: &str) -> Scene {
    s.parse().unwrap()
}

fn open_field(w: i32, h: i32, player: IVec2) -> Scene {
    let mut s = String::new();
    for y in 0..h {
        for x in 0..w {
            s.push(if ivec2(x, y) == player { '@' } else { '.' });
        }
        s.push('\n');
    }
    scene(&s)
}

fn update(sight: &mut Sight, scene: &mut Scene) -> Vec<IVec2> {
    let mut redraws = Vec::new();
    sight.update(
        &mut scene.floor,
        &scene.terrain,
        &scene.player,
        &scene.creatures,
        &mut redraws,
    );
    redraws
}

/// Draw the terrain of tiles that match the predicate.
fn show(scene: &Scene, pred: impl Fn(&Tile) -> bool) -> String {
    let dim = scene.floor.dim();
    let mut lines = Vec::new();
    for y in 0..dim.y {
        let line: String = (0..dim.x)
            .map(|x| {
                let p = ivec2(x, y);
                match scene.terrain.get(p) {
                    Some(t) if pred(&scene.floor[p]) => char::from(t),
                    _ => ' ',
                }
            })
            .collect();
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn flagged(floor: &Floor, flag: TileFlags) -> HashSet<IVec2> {
    floor
        .tiles()
        .filter(|(_, t)| t.flags().contains(flag))
        .map(|(p, _)| p)
        .collect()
}

fn members(set: &ActiveTileSet) -> HashSet<IVec2> {
    set.iter().copied().collect()
}

fn assert_consistent(sight: &Sight, floor: &Floor) {
    assert_eq!(members(sight.view()), flagged(floor, TileFlags::VIEW));
    assert_eq!(members(sight.view()).len(), sight.view().len());
    assert_eq!(members(sight.lite()), flagged(floor, TileFlags::LITE));
    let shaded: HashSet<IVec2> = flagged(floor, TileFlags::MONSTER_LIT)
        .union(&flagged(floor, TileFlags::MONSTER_DARK))
        .copied()
        .collect();
    assert_eq!(members(sight.monster_lite()), shaded);

    for (p, t) in floor.tiles() {
        assert!(!t.flags().intersects(TileFlags::SCRATCH), "scratch at {p}");
        assert!(!t.flags().intersects(TileFlags::REDRAW | TileFlags::NOTICE));
        assert!(!t.is_torch_lit() || t.is_in_view(), "light leak at {p}");
        assert!(!(t.is_monster_lit() && t.is_monster_dark()));
    }
}

#[test]
fn single_room() {
    let mut scene = scene(
        "
        .........
        .#######.
        .#.....#.
        .#.....#.
        .#..@..#.
        .#.....#.
        .#.....#.
        .#######.
        .........",
    );
    let mut sight = Sight::default();
    update(&mut sight, &mut scene);

    assert_eq!(
        show(&scene, Tile::is_in_view),
        "
 #######
 #.....#
 #.....#
 #.....#
 #.....#
 #.....#
 #######
"
    );
    assert_consistent(&sight, &scene.floor);
}

#[test]
fn second_view_pass_is_quiet() {
    let mut scene = scene(
        "
        ##############
        #............#
        #..#......#..#
        #.....@......#
        #......##....#
        #..+.........#
        ##############",
    );
    let mut sight = Sight::default();
    let redraws = update(&mut sight, &mut scene);
    assert!(!redraws.is_empty());
    let view = sight.view().to_vec();

    let mut redraws = Vec::new();
    sight.recompute_view(
        &mut scene.floor,
        &scene.terrain,
        &scene.player,
        &mut redraws,
    );
    assert_eq!(redraws, vec![]);
    assert_eq!(sight.view().to_vec(), view);
    assert_consistent(&sight, &scene.floor);
}

#[test]
fn redraw_once_per_tile() {
    let mut scene = open_field(20, 20, ivec2(10, 10));
    scene.player.light_radius = 2;
    let mut sight = Sight::default();
    let redraws = update(&mut sight, &mut scene);

    let unique: HashSet<IVec2> = redraws.iter().copied().collect();
    assert_eq!(unique.len(), redraws.len());
    assert_eq!(unique, members(sight.view()));
}

/// Random cave map with the player in the middle.
#[derive(Clone, Debug)]
struct Cave(String);

impl Arbitrary for Cave {
    fn arbitrary(g: &mut Gen) -> Self {
        const W: i32 = 31;
        let mut s = String::new();
        for y in 0..W {
            for x in 0..W {
                s.push(if (x, y) == (W / 2, W / 2) {
                    '@'
                } else if u8::arbitrary(g) % 4 == 0 {
                    '#'
                } else {
                    '.'
                });
            }
            s.push('\n');
        }
        Cave(s)
    }
}

#[quickcheck]
fn light_stays_in_view(cave: Cave, radius: u8) -> bool {
    let mut scene = scene(&cave.0);
    scene.player.light_radius = (radius % 15) as i32;
    let mut sight = Sight::default();
    update(&mut sight, &mut scene);

    assert_consistent(&sight, &scene.floor);
    scene.floor.is_in_view(scene.player.pos)
        && sight
            .lite()
            .iter()
            .all(|&p| scene.floor.is_in_view(p) && scene.floor[p].is_lit())
}

#[quickcheck]
fn moving_keeps_state_consistent(cave: Cave, moves: Vec<u8>) {
    let mut scene = scene(&cave.0);
    scene.player.light_radius = 3;
    let mut sight = Sight::default();
    update(&mut sight, &mut scene);

    for m in moves.into_iter().take(10) {
        let p = scene.player.pos + DIR_8[m as usize % 8];
        if scene.terrain.is_walkable(p) {
            scene.player.pos = p;
        }
        update(&mut sight, &mut scene);
        assert_consistent(&sight, &scene.floor);
        assert!(scene.floor.is_in_view(scene.player.pos));
    }
}

#[test]
fn light_radius_is_monotonic() {
    let mut scene = open_field(41, 41, ivec2(20, 20));
    let mut sight = Sight::default();

    let mut prev = HashSet::default();
    for r in 0..=14 {
        scene.player.light_radius = r;
        update(&mut sight, &mut scene);
        let lit = members(sight.lite());
        assert!(prev.is_subset(&lit), "radius {r} lost tiles");
        assert_eq!(sight.lite().dropped(), 0);
        prev = lit;
    }
    assert_eq!(sight.view().dropped(), 0);
}

#[test]
fn torch_shape() {
    let mut scene = scene(
        "
        .......
        .......
        ...#...
        ...@...
        .......
        .......
        .......",
    );
    scene.player.light_radius = 2;
    let mut sight = Sight::default();
    update(&mut sight, &mut scene);

    // Wall to the north shades the tiles behind it.
    assert_eq!(
        show(&scene, Tile::is_torch_lit),
        "

 ..#..
 .....
 .....
  ...
"
    );
}

#[test]
fn reduced_view_on_surface() {
    let mut scene = open_field(41, 41, ivec2(20, 20));
    let config = Config {
        reduce_view_in_town: true,
        ..Default::default()
    };
    let mut sight = Sight::new(config.clone());
    update(&mut sight, &mut scene);
    assert!(scene.floor.is_in_view(ivec2(39, 20)));

    let mut scene = open_field(41, 41, ivec2(20, 20));
    scene.floor.env = Environment::surface(true);
    let mut sight = Sight::new(config);
    update(&mut sight, &mut scene);
    assert!(scene.floor.is_in_view(ivec2(30, 20)));
    assert!(!scene.floor.is_in_view(ivec2(31, 20)));
    assert_consistent(&sight, &scene.floor);
}

#[test]
fn truncated_sets_stay_consistent() {
    let mut scene = open_field(11, 11, ivec2(5, 5));
    scene.player.light_radius = 2;
    let mut sight = Sight::new(Config {
        view_capacity: 10,
        lite_capacity: 5,
        ..Default::default()
    });

    for _ in 0..2 {
        update(&mut sight, &mut scene);
        assert_eq!(sight.view().len(), 10);
        assert!(sight.view().dropped() > 0);
        assert!(sight.lite().len() <= 5);
        assert_consistent(&sight, &scene.floor);
    }

    let mut scene = open_field(11, 11, ivec2(5, 5));
    let mut sight = Sight::new(Config {
        view_capacity: 10,
        overflow: Overflow::Grow,
        ..Default::default()
    });
    update(&mut sight, &mut scene);
    assert_eq!(sight.view().len(), 121);
    assert_eq!(sight.view().dropped(), 0);
}

#[test]
fn player_outside_floor_is_ignored() {
    let mut scene = open_field(5, 5, ivec2(2, 2));
    let mut sight = Sight::default();
    update(&mut sight, &mut scene);
    let view = members(sight.view());

    scene.player.pos = ivec2(10, 2);
    let redraws = update(&mut sight, &mut scene);
    assert!(redraws.is_empty());
    assert_eq!(members(sight.view()), view);
}

#[test]
fn dark_room_memory() {
    let mut scene = scene(
        "
        #########
        #.......#
        #.@.....#
        #.......#
        #########",
    );
    scene.player.light_radius = 1;
    let mut sight = Sight::default();
    update(&mut sight, &mut scene);

    // Only torch lit tiles get noticed.
    assert_eq!(
        show(&scene, Tile::is_known),
        "
 ...
 ...
 ...
"
    );
}

#[test]
fn lit_room_memory() {
    let mut scene = scene(
        "
        #########
        #.......#
        #.@.....#
        #.......#
        #########",
    );
    scene.light_up();
    let mut sight = Sight::default();
    update(&mut sight, &mut scene);
    assert!(scene.floor.tiles().all(|(_, t)| t.is_memorized()));

    // Memory is only refreshed when a tile comes into view.
    scene.player.pos = ivec2(6, 2);
    update(&mut sight, &mut scene);
    scene.floor[ivec2(1, 1)].forget();
    update(&mut sight, &mut scene);
    assert!(!scene.floor[ivec2(1, 1)].is_known());
}

#[test]
fn blind_player_learns_nothing() {
    let mut scene = open_field(9, 9, ivec2(4, 4));
    scene.player.light_radius = 2;
    scene.player.blind = true;
    let mut sight = Sight::default();
    update(&mut sight, &mut scene);
    assert!(scene.floor.tiles().all(|(_, t)| !t.is_known()));
}

#[test]
fn darkness_does_not_leak_around_corner() {
    let mut scene = scene(
        "
        ########
        #@.....#
        ######.#
        ######.#
        ######.#
        ######D#
        ######.#
        ########",
    );
    let mut sight = Sight::default();
    update(&mut sight, &mut scene);

    for x in 1..=6 {
        assert!(!scene.floor[ivec2(x, 1)].is_monster_dark(), "{x} darkened");
    }
    assert!(scene.floor[ivec2(6, 2)].is_monster_dark());
    assert!(!scene.floor[ivec2(5, 2)].is_monster_dark());
    assert_consistent(&sight, &scene.floor);
}

#[test]
fn hidden_light_does_not_leak_through_wall() {
    let mut scene = scene(
        "
        .........
        ....@....
        .........
        #########
        .........
        ....L....
        .........",
    );
    let mut sight = Sight::default();
    update(&mut sight, &mut scene);

    assert!(scene.floor.is_in_view(ivec2(4, 3)));
    assert!(sight.monster_lite().is_empty());
    assert_consistent(&sight, &scene.floor);
}

#[test]
fn creature_light() {
    let mut scene = scene(
        "
        #######
        #.....#
        #.@l..#
        #.....#
        #######",
    );
    let mut sight = Sight::default();

    assert_eq!(
        sight.update(
            &mut scene.floor,
            &scene.terrain,
            &scene.player,
            &scene.creatures,
            &mut Vec::new(),
        ),
        Some(true)
    );
    assert!(sight.player_monster_lit());
    assert!(scene.floor.is_lit(ivec2(4, 3)));
    assert!(scene.floor.is_monster_lit(ivec2(2, 2)));
    assert!(scene.floor[ivec2(4, 3)].is_memorized());
    assert!(!scene.floor.is_lit(ivec2(5, 3)));
    assert_consistent(&sight, &scene.floor);

    // Nothing changed.
    let mut redraws = Vec::new();
    assert_eq!(
        sight.update(
            &mut scene.floor,
            &scene.terrain,
            &scene.player,
            &scene.creatures,
            &mut redraws,
        ),
        None
    );
    assert_eq!(redraws, vec![]);

    // Plain auras go out when the creature sleeps.
    scene.creatures[0].awake = false;
    assert_eq!(
        sight.update(
            &mut scene.floor,
            &scene.terrain,
            &scene.player,
            &scene.creatures,
            &mut redraws,
        ),
        Some(false)
    );
    assert!(sight.monster_lite().is_empty());
    assert!(redraws.contains(&ivec2(4, 3)));

    // Self-luminous ones don't.
    scene.creatures[0].aura = Aura::SELF_LIGHT_1;
    update(&mut sight, &mut scene);
    assert!(sight.player_monster_lit());

    // Plain auras are lost in daylight.
    scene.creatures[0].aura = Aura::LIGHT_1;
    scene.creatures[0].awake = true;
    scene.floor.env = Environment::surface(true);
    update(&mut sight, &mut scene);
    assert!(!sight.player_monster_lit());
    scene.floor.env = Environment::surface(false);
    update(&mut sight, &mut scene);
    assert!(sight.player_monster_lit());
}

#[test]
fn light_cancels_darkness() {
    let mut scene = scene(
        "
        #########
        #.......#
        #.@.d.l.#
        #.......#
        #########",
    );
    let mut sight = Sight::default();
    update(&mut sight, &mut scene);

    // Darkness never covers a creature lit tile and light takes over
    // darkened ones, whichever creature comes first.
    let dark = flagged(&scene.floor, TileFlags::MONSTER_DARK);
    let lit = flagged(&scene.floor, TileFlags::MONSTER_LIT);
    assert!(lit.contains(&ivec2(5, 2)));
    assert!(dark.contains(&ivec2(3, 2)));
    assert!(!dark.contains(&ivec2(5, 2)));
    assert_consistent(&sight, &scene.floor);
}

#[test]
fn creature_range_in_dark_zone() {
    let env = Environment {
        perpetual_dark: true,
        ..Default::default()
    };
    let mut scene = Scene::parse("#@............l.....#", env).unwrap();
    let mut sight = Sight::default();
    update(&mut sight, &mut scene);
    assert!(scene.floor.is_in_view(ivec2(14, 0)));
    assert!(sight.monster_lite().is_empty());

    let mut scene = Scene::parse("#@............l.....#", env).unwrap();
    scene.player.see_in_dark = true;
    let mut sight = Sight::default();
    update(&mut sight, &mut scene);
    assert_eq!(
        members(sight.monster_lite()),
        [ivec2(13, 0), ivec2(14, 0), ivec2(15, 0)].into_iter().collect()
    );
}

#[test]
fn flow_on_open_grid() {
    let mut scene = open_field(10, 10, ivec2(5, 5));
    let mut sight = Sight::new(Config {
        flow_depth: 3,
        ..Default::default()
    });
    update(&mut sight, &mut scene);

    let floor = &scene.floor;
    assert_eq!(floor.flow_distance(ivec2(5, 5)), 0);
    assert_eq!(floor.flow_distance(ivec2(5, 6)), 1);
    assert_eq!(floor.flow_cost(ivec2(5, 6)), 1);
    assert_eq!(floor.flow_distance(ivec2(7, 7)), 2);
    assert_eq!(floor.flow_distance(ivec2(5, 8)), 3);
    assert_eq!(floor.flow_distance(ivec2(5, 9)), 0);
    assert_eq!(floor.flow_cost(ivec2(5, 9)), 0);
}

#[test]
fn flow_default_depth() {
    let mut scene = open_field(11, 45, ivec2(5, 5));
    let mut sight = Sight::default();
    update(&mut sight, &mut scene);

    assert_eq!(scene.floor.flow_distance(ivec2(5, 37)), FLOW_DEPTH);
    assert_eq!(scene.floor.flow_distance(ivec2(5, 38)), 0);
}

#[test]
fn flow_matches_shortest_paths() {
    let mut scene = scene(
        "
        ###################
        #.....#...........#
        #.###.#.#######.#.#
        #.#...#.#.....#.#.#
        #.#.###.#.###.#.#.#
        #.#.....#.#@#...#.#
        #.#######.#.#####.#
        #.........#.......#
        ###################",
    );
    let mut sight = Sight::new(Config {
        flow_depth: 20,
        ..Default::default()
    });
    update(&mut sight, &mut scene);

    let terrain = &scene.terrain;
    let paths = dijkstra_all(&scene.player.pos, |&p| {
        DIR_8
            .iter()
            .map(move |&d| p + d)
            .filter(|&q| terrain.is_walkable(q))
            .map(|q| (q, 1u16))
            .collect::<Vec<_>>()
    });

    for p in scene.floor.points() {
        let expected = match paths.get(&p) {
            Some(&(_, d)) if d <= 20 => d,
            _ => 0,
        };
        assert_eq!(scene.floor.flow_distance(p), expected, "at {p}");
        assert_eq!(scene.floor.flow_cost(p), expected, "at {p}");
    }
}

#[test]
fn doors_cost_extra() {
    let mut open = scene("#@....#");
    let mut door = scene("#@.+..#");
    let mut sight = Sight::default();
    update(&mut sight, &mut open);
    let mut sight = Sight::default();
    update(&mut sight, &mut door);

    let p = ivec2(3, 0);
    assert_eq!(door.floor.flow_distance(p), open.floor.flow_distance(p));
    assert!(door.floor.flow_cost(p) >= open.floor.flow_cost(p) + 3);
    // Penalty carries past the door.
    assert_eq!(door.floor.flow_cost(ivec2(5, 0)), 7);
    assert_eq!(open.floor.flow_cost(ivec2(5, 0)), 4);
}

#[test]
fn running_keeps_flow() {
    let mut scene = open_field(12, 12, ivec2(2, 2));
    let mut sight = Sight::default();
    update(&mut sight, &mut scene);

    scene.player.pos = ivec2(3, 2);
    scene.player.running = true;
    update(&mut sight, &mut scene);
    // Still seeded from the starting point of the run.
    assert_eq!(scene.floor.flow_distance(ivec2(3, 2)), 1);

    scene.player.running = false;
    assert!(sight.recompute_flow(
        &mut scene.floor,
        &scene.terrain,
        &scene.player
    ));
    assert_eq!(scene.floor.flow_distance(ivec2(3, 2)), 0);
    assert_eq!(scene.floor.flow_distance(ivec2(2, 2)), 1);
}

#[test]
fn flow_queue_truncation() {
    let mut scene = open_field(15, 15, ivec2(7, 7));
    let config = Config {
        temp_capacity: 1,
        ..Default::default()
    };

    let mut sight = Sight::new(config.clone());
    update(&mut sight, &mut scene);
    // Only the first neighbor of the player was expanded, the tile two
    // steps south can't have been reached from the south neighbor.
    assert_ne!(scene.floor.flow_distance(ivec2(7, 9)), 2);

    let mut scene = open_field(15, 15, ivec2(7, 7));
    let mut sight = Sight::new(Config {
        overflow: Overflow::Grow,
        ..config
    });
    update(&mut sight, &mut scene);
    assert_eq!(scene.floor.flow_distance(ivec2(7, 9)), 2);
    assert_eq!(scene.floor.flow_distance(ivec2(0, 0)), 7);
}

#[test]
fn self_auras_need_darkness() {
    for aura in [Aura::SELF_LIGHT_1, Aura::SELF_DARK_1] {
        let mut scene =
            Scene::parse("#@.l..#", Environment::surface(true)).unwrap();
        scene.creatures[0].aura = aura;
        scene.creatures[0].awake = false;
        let mut sight = Sight::default();
        update(&mut sight, &mut scene);
        assert!(sight.monster_lite().is_empty(), "{aura:?} in daylight");

        scene.floor.env = Environment::surface(false);
        update(&mut sight, &mut scene);
        assert!(!sight.monster_lite().is_empty(), "{aura:?} at night");
    }
}

#[test]
fn dark_zone_shrinks_light() {
    let env = Environment {
        perpetual_dark: true,
        ..Default::default()
    };
    let mut scene = Scene::parse(
        "
        .........
        .........
        .........
        .........
        .@...L...
        .........
        .........
        .........
        .........",
        env,
    )
    .unwrap();
    scene.player.see_in_dark = true;
    let mut sight = Sight::default();
    update(&mut sight, &mut scene);

    let block: HashSet<IVec2> = (3..=5)
        .flat_map(|y| (4..=6).map(move |x| ivec2(x, y)))
        .collect();
    assert_eq!(members(sight.monster_lite()), block);
}

#[test]
fn flow_cost_saturates() {
    let mut scene = scene(&format!("#@{}.#", "+".repeat(16500)));
    let mut sight = Sight::new(Config {
        flow_depth: u16::MAX,
        ..Default::default()
    });
    update(&mut sight, &mut scene);

    let end = ivec2(16502, 0);
    assert_eq!(scene.floor.flow_distance(end), 16501);
    assert_eq!(scene.floor.flow_cost(end), u16::MAX);
}
