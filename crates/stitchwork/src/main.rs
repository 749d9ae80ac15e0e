use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use stitchwork::config::GameConfig;
use stitchwork::render::PixelRenderer;
use stitchwork::scenario::{ScenarioDefinition, ScenarioExecutor, ScenarioExecutorConfig};
use stitchwork::App;
use stitchwork_core::entity::BodyPart;
use stitchwork_core::items::{ItemId, ItemRegistry};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (default: ./stitchwork.ron if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fixed RNG seed for bubble text and room decor
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a RON scenario headlessly and report the checks
    RunScenario {
        file: PathBuf,

        /// Write the execution report here (RON)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Directory for scenario screenshots
        #[arg(long, default_value = "screenshots")]
        screenshot_dir: String,

        /// Skip Screenshot actions
        #[arg(long)]
        no_screenshots: bool,
    },

    /// Simulate idle frames and save the room view as PNG
    Screenshot {
        /// Frames to simulate before capturing
        #[arg(long, default_value = "1")]
        frames: u32,

        #[arg(long, default_value = "screenshots/room.png")]
        output: PathBuf,

        /// Also save the sidebar miniature next to the output
        #[arg(long)]
        sidebar: bool,

        /// Attach a part before simulating (repeatable, e.g. `--unlock legLeft`)
        #[arg(long = "unlock", value_name = "PART")]
        unlock: Vec<BodyPart>,
    },

    /// Print the item catalog with positions for the configured viewport
    ListItems {
        /// Only list these items (repeatable, e.g. `--item toolsTray`)
        #[arg(long = "item", value_name = "ITEM")]
        items: Vec<ItemId>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load_from(path)?,
        None => GameConfig::load()?,
    };
    if args.seed.is_some() {
        config.sim.rng_seed = args.seed;
    }

    let default_level = if config.debug.verbose_logging {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match args.command {
        Command::RunScenario {
            file,
            report,
            screenshot_dir,
            no_screenshots,
        } => run_scenario(&config, &file, report, screenshot_dir, !no_screenshots),
        Command::Screenshot {
            frames,
            output,
            sidebar,
            unlock,
        } => screenshot(&config, frames, &output, sidebar, &unlock),
        Command::ListItems { items } => list_items(&config, &items),
    }
}

fn run_scenario(
    config: &GameConfig,
    file: &Path,
    report_path: Option<PathBuf>,
    screenshot_dir: String,
    capture_screenshots: bool,
) -> anyhow::Result<()> {
    let scenario = ScenarioDefinition::from_file(file)?;
    let mut executor = ScenarioExecutor::with_config(ScenarioExecutorConfig {
        capture_screenshots,
        screenshot_dir,
        width: config.viewport.width,
        height: config.viewport.height,
        verbose: config.debug.verbose_logging,
    });
    let mut app = executor.session(&scenario, &config.sim)?;

    let report = executor.execute_scenario(&scenario, &mut app)?;

    if let Some(path) = report_path {
        report.save_ron(&path)?;
        log::info!("Report written to {}", path.display());
    }
    if !report.passed {
        bail!(
            "Scenario '{}' failed {} check(s)",
            scenario.name,
            report.verification_failures.len()
        );
    }
    Ok(())
}

fn screenshot(
    config: &GameConfig,
    frames: u32,
    output: &Path,
    with_sidebar: bool,
    unlock: &[BodyPart],
) -> anyhow::Result<()> {
    let (width, height) = (config.viewport.width, config.viewport.height);
    let mut app = App::new(width as f32, height as f32, config.sim.clone())?;
    for part in unlock {
        if !app.attach_part(*part) {
            log::warn!("{} is already attached", part.key());
        }
    }
    for _ in 0..frames {
        app.step();
    }

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut renderer = PixelRenderer::new(width as usize, height as usize);
    app.draw(&mut renderer);
    renderer.save_png(output)?;
    log::info!("Saved {}x{} screenshot to {}", width, height, output.display());

    if with_sidebar {
        let (w, h) = stitchwork::sidebar::SIDEBAR_SIZE;
        let mut renderer = PixelRenderer::new(w as usize, h as usize);
        app.draw_sidebar(&mut renderer);
        let path = output.with_file_name(format!(
            "{}_sidebar.png",
            output
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("room")
        ));
        renderer.save_png(&path)?;
        log::info!("Saved sidebar to {}", path.display());
        println!("Parts: {}", app.sidebar().labels().join(", "));
    }
    Ok(())
}

fn list_items(config: &GameConfig, only: &[ItemId]) -> anyhow::Result<()> {
    let app = App::new(
        config.viewport.width as f32,
        config.viewport.height as f32,
        config.sim.clone(),
    )?;
    let state = app.state();
    let room = state.room();

    println!(
        "Room: {} sides, center ({:.0}, {:.0}), radius {:.0}",
        room.vertices().len(),
        room.center().x,
        room.center().y,
        room.radius()
    );
    println!(
        "{:<10} {:<16} {:>8} {:>8} {:>6} {:>6}",
        "KEY", "NAME", "X", "Y", "W", "H"
    );
    let selected = state
        .items
        .iter()
        .filter(|item| only.is_empty() || only.contains(&item.id));
    for item in selected {
        println!(
            "{:<10} {:<16} {:>8.1} {:>8.1} {:>6.0} {:>6.0}",
            item.id.key(),
            item.name,
            item.position.x,
            item.position.y,
            item.size.x,
            item.size.y
        );
    }
    println!("{} items in catalog", ItemRegistry::standard_catalog().len());
    Ok(())
}
