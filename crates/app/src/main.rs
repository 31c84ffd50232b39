use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use doppler_tree_core::render::headless::{HeadlessDocument, HeadlessHandle};
use doppler_tree_core::{pipeline, BandwidthSample, DopplerTree, LeafDescriptor};
use tokio::sync::mpsc;
use tokio::time;
use tracing_subscriber::EnvFilter;

/// Built-in three-leaf dataset so the demo runs without any asset files.
const SAMPLE_DATA: &str = r##"[
    {"id": "#leaf1", "leftRotateParams": [-18, 120, 40], "rightRotateParams": [18, 120, 40]},
    {"id": "#leaf2", "leftRotateParams": [-12, 90, 64], "rightRotateParams": [12, 90, 64]},
    {"id": "#leaf3", "leftRotateParams": [-20, 150, 80], "rightRotateParams": [20, 150, 80]}
]"##;

#[tokio::main]
async fn main() -> doppler_tree_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { data } => run_demo(data.as_deref()).await,
        Commands::Validate { data } => run_validate(&data),
    }
}

/// Drives two scripted sweeps through the full pipeline against the
/// headless rendering backend.
async fn run_demo(data: Option<&Path>) -> doppler_tree_core::Result<()> {
    let data = match data {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE_DATA.to_string(),
    };

    // Load failure leaves an inert tree in place rather than exiting; the
    // pipeline still runs, it just drops every gesture.
    let tree = match build_tree(&data) {
        Ok(tree) => tree,
        Err(err) => {
            tracing::warn!(%err, "leaf data failed to load, tree stays inert");
            DopplerTree::new()
        }
    };
    tracing::info!(leaves = tree.leaf_count(), "tree ready");

    let (tx, rx) = mpsc::channel(64);
    let listener = tokio::spawn(pipeline::listen(tree.clone(), rx));

    sweep(&tx, 30.0, 50.0).await;
    time::sleep(Duration::from_millis(1200)).await;
    tracing::info!(state = ?tree.state()?, "after left sweep");

    sweep(&tx, 50.0, 30.0).await;
    time::sleep(Duration::from_millis(1200)).await;
    tracing::info!(state = ?tree.state()?, "after right sweep");

    drop(tx);
    listener
        .await
        .map_err(|err| doppler_tree_core::DopplerError::msg(err.to_string()))?;
    Ok(())
}

/// Parses a leaf geometry document and reports what it contains.
fn run_validate(data: &Path) -> doppler_tree_core::Result<()> {
    let raw = std::fs::read_to_string(data)?;
    let descriptors: Vec<LeafDescriptor> = serde_json::from_str(&raw)?;

    tracing::info!(?data, leaves = descriptors.len(), "leaf data parsed");
    for descriptor in &descriptors {
        tracing::info!(
            id = %descriptor.id,
            left = ?descriptor.left_rotate_params,
            right = ?descriptor.right_rotate_params,
            "leaf"
        );
    }
    Ok(())
}

fn build_tree(data: &str) -> doppler_tree_core::Result<DopplerTree<HeadlessHandle>> {
    let descriptors: Vec<LeafDescriptor> = serde_json::from_str(data)?;
    let document = HeadlessDocument::with_elements(descriptors.iter().map(|d| d.id.clone()));
    DopplerTree::load(&document, data)
}

/// Eight samples with |delta| = 20, 5ms apart: enough evidence for exactly
/// one flush after the trailing quiet period.
async fn sweep(tx: &mpsc::Sender<BandwidthSample>, left: f32, right: f32) {
    for _ in 0..8 {
        if tx.send(BandwidthSample::new(left, right)).await.is_err() {
            return;
        }
        time::sleep(Duration::from_millis(5)).await;
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Doppler-reactive tree installation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the scripted gesture demo against the headless backend.
    Demo {
        /// Optional leaf geometry document; a built-in dataset is used
        /// otherwise.
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Parse a leaf geometry document and report its contents.
    Validate {
        /// Path to the leaf geometry document.
        data: PathBuf,
    },
}
