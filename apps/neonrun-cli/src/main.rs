use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use neonrun_assets::{AssetSource, DirectoryAssets, NoAssets};
use neonrun_hud::{DebugTextRenderer, RenderView, Renderer, TextHud};
use neonrun_input::ScriptedInput;
use neonrun_kernel::{FixedClock, GameConfig, SimEvent, SimulationLoop};
use neonrun_scene::SceneGraph;
use neonrun_tools::SimInspector;
use neonrun_worldgen::{DecorKind, SeedLayout, WorldGenerator, cosmetic_rng};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "neonrun-cli", about = "Headless driver for the neonrun simulation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, default layout, and default tuning
    Info,
    /// Generate a world and run the simulation headless
    Run {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// Fixed time step in seconds
        #[arg(long, default_value = "0.0166667")]
        dt: f32,
        /// Input script, e.g. "forward+right*30,jump*1,idle*10"
        #[arg(short, long)]
        script: Option<String>,
        /// Game config file (.yaml, .yml, or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Seed for cosmetic randomness (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Directory holding `astronaut.gltf` / `city.gltf`
        #[arg(long)]
        assets: Option<PathBuf>,
    },
    /// Generate a world and print the resulting scene
    Worldgen {
        /// Seed for cosmetic randomness (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Directory holding `astronaut.gltf` / `city.gltf`
        #[arg(long)]
        assets: Option<PathBuf>,
    },
}

fn asset_source(dir: Option<PathBuf>) -> Box<dyn AssetSource> {
    match dir {
        Some(dir) => Box::new(DirectoryAssets::new(dir)),
        None => Box::new(NoAssets),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Info => {
            let layout = SeedLayout::default();
            let config = GameConfig::default();
            println!("neonrun-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "layout: ground={}x{} pickups={} cars={} holograms={} lights={}",
                layout.ground_size,
                layout.ground_size,
                layout.pickups.len(),
                layout.flying_cars,
                layout.holograms,
                layout.city_lights
            );
            for kind in [
                DecorKind::Building,
                DecorKind::Tower,
                DecorKind::Container,
                DecorKind::Sign,
            ] {
                println!("  {}: {}", kind.name(), layout.count(kind));
            }
            let m = &config.movement;
            println!(
                "movement: speed={} jump={} gravity={} friction={}",
                m.speed, m.jump_force, m.gravity, m.friction
            );
            let p = &config.pickups;
            println!(
                "pickups: radius={} score=+{} heal=+{} shoot=+{}",
                p.radius, p.score_reward, p.heal_reward, p.shoot_reward
            );
        }
        Commands::Run {
            ticks,
            dt,
            script,
            config,
            seed,
            assets,
        } => {
            let config = match config {
                Some(path) => GameConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => GameConfig::default(),
            };
            let input = match script {
                Some(s) => ScriptedInput::parse(&s).context("parsing input script")?,
                None => ScriptedInput::default(),
            };

            let layout = SeedLayout::default();
            let assets = asset_source(assets);
            let mut scene = SceneGraph::new();
            let mut rng = cosmetic_rng(seed);
            let world = WorldGenerator::new(&layout, assets.as_ref()).generate(
                &mut scene,
                &mut rng,
                config.spawn,
            );

            let mut sim = SimulationLoop::new(
                config,
                world,
                input,
                scene,
                TextHud::new(),
                FixedClock::new(dt),
            );
            println!("Running {ticks} ticks at dt={dt}");
            sim.start();
            for _ in 0..ticks {
                sim.frame();
                for event in sim.drain_events() {
                    match event {
                        SimEvent::PickupCollected {
                            tick, score, health, ..
                        } => println!("  tick {tick}: pickup collected (score={score}, health={health})"),
                        SimEvent::Shot { tick, score } => println!("  tick {tick}: shot (score={score})"),
                        SimEvent::AnimationChanged { tick, animation } => {
                            println!("  tick {tick}: avatar {}", animation.name())
                        }
                        other => tracing::debug!(?other, "sim event"),
                    }
                }
            }
            sim.stop();

            println!("{}", SimInspector::summary(&sim));
            println!("{}", sim.ui().line());
            for pickup in SimInspector::pickups(&sim) {
                println!("  {pickup}");
            }
            let view = RenderView::from_camera(&sim.camera_transform());
            print!("{}", DebugTextRenderer::new().render(sim.scene(), &view));

            sim.dispose();
            println!("Disposed: scene nodes remaining={}", sim.scene().len());
        }
        Commands::Worldgen { seed, assets } => {
            let layout = SeedLayout::default();
            let assets = asset_source(assets);
            let mut scene = SceneGraph::new();
            let mut rng = cosmetic_rng(seed);
            let config = GameConfig::default();
            let world = WorldGenerator::new(&layout, assets.as_ref()).generate(
                &mut scene,
                &mut rng,
                config.spawn,
            );
            println!(
                "Generated: decor={} lights={} pickups={} city_model={} avatar={}",
                world.decor.len(),
                world.lights.len(),
                world.pickups.len(),
                world.city_model.is_some(),
                world.avatar.is_some()
            );
            print!(
                "{}",
                DebugTextRenderer::new().render(&scene, &RenderView::default())
            );
        }
    }

    Ok(())
}
