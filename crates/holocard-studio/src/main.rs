mod inspector;
mod snapshot;
mod viewer;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use holocard_engine::device::GpuInit;
use holocard_engine::logging::{init_logging, LoggingConfig};
use holocard_engine::scene::SceneConfig;
use holocard_engine::shading::CardFace;
use holocard_engine::window::{Runtime, RuntimeConfig};

/// Holographic playing card viewer.
#[derive(Debug, Parser)]
#[command(name = "holocard-studio", version)]
struct Cli {
    /// Directory holding the card textures and the model.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Model file, relative to the asset directory.
    #[arg(long, default_value = "king.glb")]
    model: PathBuf,

    /// Skip loading the model (disables the king pass).
    #[arg(long)]
    no_model: bool,

    /// Log filter in env_logger syntax; overrides RUST_LOG.
    #[arg(long)]
    log: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the interactive viewer (default).
    View,
    /// Render one card face on the CPU and write it as PNG.
    Snapshot {
        #[arg(long, value_enum, default_value_t = FaceArg::Front)]
        face: FaceArg,
        #[arg(long, default_value = "card.png")]
        out: PathBuf,
        /// Image width in pixels; height follows the card aspect.
        #[arg(long, default_value_t = 350)]
        width: u32,
    },
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum FaceArg {
    Front,
    Back,
}

impl From<FaceArg> for CardFace {
    fn from(f: FaceArg) -> Self {
        match f {
            FaceArg::Front => CardFace::Front,
            FaceArg::Back => CardFace::Back,
        }
    }
}

impl Cli {
    fn scene_config(&self) -> SceneConfig {
        SceneConfig {
            asset_dir: self.assets.clone(),
            model_file: (!self.no_model).then(|| self.model.clone()),
            ..Default::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..Default::default()
    });

    let scene = cli.scene_config();

    match cli.command.unwrap_or(Command::View) {
        Command::View => {
            log::info!("assets from {}", scene.asset_dir.display());
            let runtime = RuntimeConfig {
                title: viewer::TITLE.to_string(),
                ..Default::default()
            };
            Runtime::run(runtime, GpuInit::default(), viewer::Viewer::new(scene)?)
        }
        Command::Snapshot { face, out, width } => snapshot::run(&scene, face.into(), &out, width),
    }
}
