//! Animated texture preview.
//!
//! Runs the animation systems headless on a JSON texture descriptor:
//! - **bevy_ecs** hosts the texture entity, the frame store and the clock
//! - **configparser** reads tick count and day clock settings from an INI file
//! - the output buffer checksum is logged every few ticks
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --descriptor lava.json --ticks 400
//! ```

use std::path::PathBuf;

use animtex::components::animatedtexture::AnimatedTexture;
use animtex::components::texturebuffer::TextureBuffer;
use animtex::error::Result;
use animtex::events::textureunload::{TextureUnloadedEvent, texture_unloaded_observer};
use animtex::resources::animconfig::TextureDescriptor;
use animtex::resources::framestore::FrameStore;
use animtex::resources::previewconfig::PreviewConfig;
use animtex::resources::worldtime::WorldTime;
use animtex::systems::animation::animate_textures;
use animtex::systems::time::update_world_time;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};

/// Headless preview of interpolated, day-synced texture animations
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// JSON texture descriptor with inline sprite sheets.
    #[arg(long, value_name = "PATH")]
    descriptor: PathBuf,

    /// INI preview settings (default: ./preview.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of ticks to simulate, overriding the config file.
    #[arg(long)]
    ticks: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("Preview failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match cli.config {
        Some(path) => PreviewConfig::with_path(path),
        None => PreviewConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        warn!("Using default preview settings: {e}");
    }
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }

    let descriptor = TextureDescriptor::from_json_file(&cli.descriptor)?;

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    let mut store = FrameStore::default();
    store.load_sheets(&descriptor.sheets)?;
    let bundle = AnimatedTexture::bundle(&descriptor, &store)?;
    world.insert_resource(store);
    world.insert_resource(WorldTime {
        ticks: 0,
        day_time: config.start_day_time,
        natural_cycle: config.natural_cycle,
    });

    let key = descriptor.frames_key.clone();
    let texture = world
        .spawn(bundle.0.with_release(move || info!("Released frames for '{key}'")))
        .insert(bundle.1)
        .id();
    world.add_observer(texture_unloaded_observer);
    world.flush();

    let mut schedule = Schedule::default();
    schedule.add_systems(animate_textures);

    info!(
        "Animating '{}' ({}x{}) for {} ticks",
        descriptor.frames_key, descriptor.width, descriptor.height, config.ticks
    );
    for tick in 1..=config.ticks {
        update_world_time(&mut world, config.day_time_step);
        schedule.run(&mut world);

        if tick % config.sample_every == 0
            && let Some(buffer) = world.get::<TextureBuffer>(texture)
        {
            info!("tick {:>6}: checksum {:016x}", tick, buffer.checksum());
        }
    }

    world.trigger(TextureUnloadedEvent { entity: texture });
    world.flush();

    if let Some(buffer) = world.get::<TextureBuffer>(texture) {
        println!("{:016x}", buffer.checksum());
    }
    Ok(())
}
