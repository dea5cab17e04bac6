use crate::{los, ViewField};

/// Distance bounds for a [`sweep`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Reach {
    /// Sight radius along the axes.
    pub full: i32,
    /// Octagon bound that cuts off the corners of the swept square.
    pub over: i32,
}

impl Reach {
    pub fn new(max_sight: i32) -> Self {
        Reach {
            full: max_sight,
            over: max_sight * 3 / 2,
        }
    }

    /// Cheaper reach with half the sight radius.
    pub fn reduced(max_sight: i32) -> Self {
        Reach {
            full: max_sight / 2,
            over: max_sight * 3 / 4,
        }
    }
}

/// Octants as (primary axis, secondary axis) pairs. Each octant is swept
/// in strips that run parallel to the primary axis and are stacked along
/// the secondary one.
const OCTANTS: [([i32; 2], [i32; 2]); 8] = [
    ([0, 1], [1, 0]),
    ([0, 1], [-1, 0]),
    ([0, -1], [1, 0]),
    ([0, -1], [-1, 0]),
    ([1, 0], [0, 1]),
    ([1, 0], [0, -1]),
    ([-1, 0], [0, 1]),
    ([-1, 0], [0, -1]),
];

fn step(p: [i32; 2], dir: [i32; 2], n: i32) -> [i32; 2] {
    [p[0] + dir[0] * n, p[1] + dir[1] * n]
}

/// Mark every cell visible from `origin` in the field.
///
/// This is an approximation that avoids tracing a line to most cells. The
/// axes and the diagonals are walked first, then the wedges between them
/// are filled strip by strip, classifying each cell from two neighbors in
/// the previous strip. Only cells the neighbor rule can't settle get an
/// exact [`los`] check.
///
/// Visibility is not perfectly symmetric, a cell seen from the origin does
/// not guarantee the origin is seen from the cell.
///
/// Marks left on the field from earlier sweeps are treated as marks from
/// this one, so they must be cleared first.
pub fn sweep(field: &mut impl ViewField, origin: [i32; 2], reach: Reach) {
    debug_assert!(field.contains(origin), "sweep origin outside field");

    field.mark(origin, true);

    let diagonal = reach.full * 2 / 3;
    for &(a, b) in &OCTANTS[..4] {
        walk(field, origin, step(a, b, 1), diagonal);
    }

    // Farthest strip extent that still has unblocked cells, per octant.
    let mut limit = [0; 8];
    for i in (0..8).step_by(2) {
        let d = walk(field, origin, OCTANTS[i].0, reach.full);
        limit[i] = d;
        limit[i + 1] = d;
    }

    for n in 1..=reach.over / 2 {
        // Strip length that keeps the sweep inside the octagon.
        let mut z = (reach.over - n - n).min(reach.full - n);
        while z + n + n / 2 > reach.full {
            z -= 1;
        }

        for (i, &(a, b)) in OCTANTS.iter().enumerate() {
            if n >= limit[i] {
                continue;
            }

            let corner = step(origin, step(a, b, 1), n);
            if !field.contains(corner) || !field.contains(step(corner, a, 1))
            {
                continue;
            }

            let mut k = n;
            for d in 1..=z {
                let p = step(corner, a, d);
                if !field.contains(p) {
                    break;
                }

                let g2 = step(p, a, -1);
                let g1 = step(g2, b, -1);
                if classify(field, origin, p, g1, g2) {
                    if n + d >= limit[i] {
                        break;
                    }
                } else {
                    k = n + d;
                }
            }
            limit[i] = k + 1;
        }
    }
}

/// Walk outwards from origin marking easy cells until the first opaque
/// one. Returns the distance where the walk stopped, or `max + 1` if it was
/// never blocked.
fn walk(
    field: &mut impl ViewField,
    origin: [i32; 2],
    dir: [i32; 2],
    max: i32,
) -> i32 {
    for d in 1..=max {
        let p = step(origin, dir, d);
        if !field.contains(p) {
            return d;
        }
        field.mark(p, true);
        if field.blocks_sight(p) {
            return d;
        }
    }
    max + 1
}

/// Decide the visibility of `p` from its neighbors `g1` (one step back
/// along the diagonal) and `g2` (one step back along the axis).
///
/// Returns true when `p` blocks further sight along its strip.
fn classify(
    field: &mut impl ViewField,
    origin: [i32; 2],
    p: [i32; 2],
    g1: [i32; 2],
    g2: [i32; 2],
) -> bool {
    let f1 = !field.blocks_sight(g1);
    let f2 = !field.blocks_sight(g2);
    if !f1 && !f2 {
        return true;
    }

    let v1 = f1 && field.is_seen(g1);
    let v2 = f2 && field.is_seen(g2);
    if !v1 && !v2 {
        return true;
    }

    let wall = field.blocks_sight(p);
    let z1 = v1 && field.is_easy(g1);
    let z2 = v2 && field.is_easy(g2);

    if z1 && z2 {
        field.mark(p, true);
        return wall;
    }

    // Walls are always marked when a seen neighbor touches them, the traced
    // line doesn't handle them well.
    if z1 || (v1 && v2) || wall || los(&*field, origin, p) {
        field.mark(p, false);
        return wall;
    }

    true
}
