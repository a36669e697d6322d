//! Event loop glue between a network source, the world and the mesh sink.

use mineflayer_assets::{BlockRegistry, TextureAtlas};
use mineflayer_render::MeshSink;
use mineflayer_world::VoxelWorld;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{ApplyError, EntityPosition, EventSource, ServerEvent, SourceError, UpdateApplier};

/// Fatal errors from [`ClientSession::run`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// The event source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// An update was rejected while running in strict mode.
    #[error("rejected update in strict mode: {0}")]
    Apply(#[from] ApplyError),
}

/// Counters accumulated over a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Events pulled from sources.
    pub events: usize,
    /// Chunk updates written to the world.
    pub updates_applied: usize,
    /// Chunk updates rejected (world untouched).
    pub updates_rejected: usize,
    /// Player position events seen.
    pub positions: usize,
    /// Chunk meshes rebuilt.
    pub meshes_built: usize,
}

/// Owns the world and routes server events into it.
pub struct ClientSession<S: MeshSink> {
    world: VoxelWorld,
    registry: BlockRegistry,
    atlas: TextureAtlas,
    sink: S,
    strict: bool,
    remesh_neighbors: bool,
    player: Option<EntityPosition>,
    stats: SessionStats,
}

impl<S: MeshSink> ClientSession<S> {
    /// Create a session. Lenient, with neighbor remeshing enabled.
    pub fn new(world: VoxelWorld, registry: BlockRegistry, atlas: TextureAtlas, sink: S) -> Self {
        Self {
            world,
            registry,
            atlas,
            sink,
            strict: false,
            remesh_neighbors: true,
            player: None,
            stats: SessionStats::default(),
        }
    }

    /// Stop [`Self::run`] at the first rejected update instead of skipping it.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Toggle remeshing of loaded neighbors after each update.
    pub fn with_remesh_neighbors(mut self, enabled: bool) -> Self {
        self.remesh_neighbors = enabled;
        self
    }

    /// Apply one event.
    pub fn handle_event(&mut self, event: ServerEvent) -> Result<(), ApplyError> {
        match event {
            ServerEvent::ChunkUpdated(update) => {
                let applier = UpdateApplier::new(&self.registry, &self.atlas)
                    .with_remesh_neighbors(self.remesh_neighbors);
                match applier.apply_update(&mut self.world, &update, &mut self.sink) {
                    Ok(applied) => {
                        self.stats.updates_applied += 1;
                        self.stats.meshes_built += applied.remeshed.len();
                        Ok(())
                    }
                    Err(err) => {
                        self.stats.updates_rejected += 1;
                        Err(err)
                    }
                }
            }
            ServerEvent::PlayerPositionUpdated(position) => {
                debug!(
                    x = position.x,
                    y = position.y,
                    z = position.z,
                    on_ground = position.on_ground,
                    "player position updated"
                );
                self.stats.positions += 1;
                self.player = Some(position);
                Ok(())
            }
        }
    }

    /// Drain `source`. Rejected updates are logged and skipped unless strict.
    pub fn run(&mut self, source: &mut impl EventSource) -> Result<SessionStats, SessionError> {
        while let Some(event) = source.next_event()? {
            self.stats.events += 1;
            let kind = event.kind();
            if let Err(err) = self.handle_event(event) {
                if self.strict {
                    return Err(err.into());
                }
                warn!(%err, event = kind, "skipping rejected event");
            }
        }
        Ok(self.stats)
    }

    /// The world as built so far.
    pub fn world(&self) -> &VoxelWorld {
        &self.world
    }

    /// Block definitions in use.
    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    /// Texture atlas in use.
    pub fn atlas(&self) -> &TextureAtlas {
        &self.atlas
    }

    /// The mesh sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the session, returning the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Last reported player position.
    pub fn player_position(&self) -> Option<EntityPosition> {
        self.player
    }

    /// Counters so far.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }
}
