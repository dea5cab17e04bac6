use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use engine::{prelude::*, Config, Environment, Scene, Sight, TerrainQuery};

mod logging;
mod render;

use render::{render, Layer};

#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    #[arg(help = "ASCII map file, `@` is the player")]
    map: PathBuf,

    #[arg(long, help = "IDM config file")]
    config: Option<PathBuf>,

    #[arg(short = 'r', long, default_value_t = 1, help = "Player light radius")]
    light: i32,

    #[arg(long, help = "Permanently light up all rooms")]
    lit: bool,

    #[arg(long, help = "Map is on the surface instead of underground")]
    surface: bool,

    #[arg(long, requires = "surface", help = "Sun is up")]
    day: bool,

    #[arg(long, help = "Map is in a zone of perpetual darkness")]
    dark_zone: bool,

    #[arg(long, help = "Player can see in the dark")]
    see_in_dark: bool,

    #[arg(long, help = "Player is blind")]
    blind: bool,

    #[arg(
        long,
        default_value = "",
        help = "Walk the player with vi keys (hjklyubn) before printing"
    )]
    walk: String,

    #[arg(
        short,
        long,
        value_enum,
        value_delimiter = ',',
        default_value = "view",
        help = "Layers to print"
    )]
    layers: Vec<Layer>,

    #[arg(short, long, help = "Debug logging")]
    verbose: bool,
}

fn step(key: char) -> anyhow::Result<IVec2> {
    Ok(match key {
        'k' => ivec2(0, -1),
        'u' => ivec2(1, -1),
        'l' => ivec2(1, 0),
        'n' => ivec2(1, 1),
        'j' => ivec2(0, 1),
        'b' => ivec2(-1, 1),
        'h' => ivec2(-1, 0),
        'y' => ivec2(-1, -1),
        _ => bail!("bad walk key {key:?}"),
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let env = Environment {
        underground: !args.surface,
        daytime: args.day,
        perpetual_dark: args.dark_zone,
    };
    let mut scene = Scene::parse(&std::fs::read_to_string(&args.map)?, env)?;
    if args.lit {
        scene.light_up();
    }
    scene.player.light_radius = args.light;
    scene.player.see_in_dark = args.see_in_dark;
    scene.player.blind = args.blind;

    let mut sight = Sight::new(config);
    log::debug!("{:?}", sight.config());
    let mut redraws = Vec::new();
    sight.update(
        &mut scene.floor,
        &scene.terrain,
        &scene.player,
        &scene.creatures,
        &mut redraws,
    );
    log::info!("initial pass redrew {} tiles", redraws.len());

    for key in args.walk.chars() {
        let p = scene.player.pos + step(key)?;
        if !scene.terrain.is_walkable(p) {
            log::info!("can't walk into {p}");
            continue;
        }
        scene.player.pos = p;

        redraws.clear();
        let lit = sight.update(
            &mut scene.floor,
            &scene.terrain,
            &scene.player,
            &scene.creatures,
            &mut redraws,
        );
        log::info!("moved to {p}, redrew {} tiles", redraws.len());
        if let Some(lit) = lit {
            log::info!(
                "player {} creature light",
                if lit { "entered" } else { "left" }
            );
        }
    }

    for set in [sight.view(), sight.lite(), sight.monster_lite()] {
        log::debug!(
            "{} set has {} of {} tiles, {} dropped",
            set.name(),
            set.len(),
            set.capacity(),
            set.dropped()
        );
    }

    for (i, &layer) in args.layers.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{layer:?}:");
        println!("{}", render(&scene, layer));
    }

    Ok(())
}
