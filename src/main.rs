//! mineflayer - voxel world client core
//!
//! Replays recorded server events into a chunked world and keeps one culled
//! mesh per loaded chunk.

mod config;

use anyhow::{bail, Context, Result};
use config::{ClientConfig, DEFAULT_CONFIG_PATH};
use mineflayer_assets::{registry_from_file, TextureAtlas};
use mineflayer_client::{ClientSession, ReplaySource};
use mineflayer_render::{write_metrics_to_file, ChunkMeshStore};
use mineflayer_world::VoxelWorld;
use std::{env, path::PathBuf};
use tracing::{info, warn};

fn main() -> Result<()> {
    let cli = CliOptions::parse(env::args().skip(1))?;
    let loaded = ClientConfig::try_load_from_path(&cli.config);

    // RUST_LOG wins over the configured level.
    let level = loaded
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| ClientConfig::default().log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    info!("Starting mineflayer v{}", env!("CARGO_PKG_VERSION"));

    let mut config = ClientConfig::or_defaults(loaded);
    cli.apply(&mut config);
    run(&config)
}

fn run(config: &ClientConfig) -> Result<()> {
    let chunk_size = config.world.chunk_size().with_context(|| {
        format!(
            "chunk_size must be positive on every axis, got {:?}",
            config.world.chunk_size
        )
    })?;

    let resources = &config.resources;
    let registry = registry_from_file(&resources.blocks)
        .with_context(|| format!("Failed to load blocks from {}", resources.blocks.display()))?;
    let atlas = TextureAtlas::load_file_sized(
        &resources.textures,
        resources.atlas_width,
        resources.atlas_height,
    )
    .with_context(|| format!("Failed to load textures from {}", resources.textures.display()))?;
    registry
        .validate_textures(&atlas)
        .context("Block table references missing textures")?;
    info!(
        blocks = registry.len(),
        textures = atlas.len(),
        "Loaded block definitions"
    );
    info!(
        server = %config.connection.address(),
        username = %config.connection.username,
        "Connection settings"
    );

    let Some(replay) = config.session.replay.as_ref() else {
        warn!("No replay source configured (set session.replay or pass --replay). Nothing to do");
        return Ok(());
    };

    let mut session = ClientSession::new(
        VoxelWorld::new(chunk_size),
        registry,
        atlas,
        ChunkMeshStore::new(),
    )
    .with_strict(config.session.strict)
    .with_remesh_neighbors(config.world.remesh_neighbors);

    let mut source = ReplaySource::open(replay)
        .with_context(|| format!("Failed to open replay {}", replay.display()))?;
    let stats = session
        .run(&mut source)
        .with_context(|| format!("Replay of {} failed", replay.display()))?;

    let store = session.sink();
    info!(
        events = stats.events,
        applied = stats.updates_applied,
        rejected = stats.updates_rejected,
        positions = stats.positions,
        meshes_built = stats.meshes_built,
        chunks = store.len(),
        triangles = store.total_triangles(),
        "Replay finished"
    );

    if let Some(path) = config.session.mesh_metrics.as_ref() {
        write_metrics_to_file(&store.stats(), path)?;
        info!(path = %path.display(), "Wrote mesh metrics");
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
struct CliOptions {
    config: PathBuf,
    replay: Option<PathBuf>,
    mesh_metrics: Option<PathBuf>,
    strict: bool,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Self> {
        let mut opts = CliOptions {
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            replay: None,
            mesh_metrics: None,
            strict: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => match args.next() {
                    Some(path) => opts.config = PathBuf::from(path),
                    None => bail!("--config requires a file path"),
                },
                "--replay" => match args.next() {
                    Some(path) => opts.replay = Some(PathBuf::from(path)),
                    None => bail!("--replay requires a file path"),
                },
                "--mesh-metrics" => match args.next() {
                    Some(path) => opts.mesh_metrics = Some(PathBuf::from(path)),
                    None => bail!("--mesh-metrics requires a file path"),
                },
                "--strict" => opts.strict = true,
                other => bail!("Unknown argument: {other}"),
            }
        }

        Ok(opts)
    }

    /// Flags override the config file.
    fn apply(&self, config: &mut ClientConfig) {
        if let Some(replay) = &self.replay {
            config.session.replay = Some(replay.clone());
        }
        if let Some(path) = &self.mesh_metrics {
            config.session.mesh_metrics = Some(path.clone());
        }
        if self.strict {
            config.session.strict = true;
        }
    }
}
