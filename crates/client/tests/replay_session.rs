//! End-to-end replay: recorded events -> session -> mesh store.
//!
//! With neighbor remeshing enabled, the stored mesh of every loaded chunk must
//! equal a fresh rebuild after any sequence of updates.

use anyhow::Result;
use mineflayer_client::{ClientSession, EntityPosition, ReplaySource, ServerEvent};
use mineflayer_render::{build_mesh, ChunkMeshStore};
use mineflayer_testkit::{sample_assets, JsonlSink};
use mineflayer_world::{Block, BlockType, ChunkUpdate, Vector3i, VoxelWorld};

const CHUNK: Vector3i = Vector3i::new(8, 8, 8);

fn recorded_events() -> Vec<ServerEvent> {
    vec![
        ServerEvent::PlayerPositionUpdated(EntityPosition::new(0.5, 9.0, 0.5)),
        // Floor straddling four chunks around the origin.
        ServerEvent::ChunkUpdated(ChunkUpdate::filled(
            Vector3i::new(-4, 0, -4),
            Vector3i::new(8, 1, 8),
            Block::new(BlockType::GRASS),
        )),
        // Column on the +X edge of the chunk at the origin.
        ServerEvent::ChunkUpdated(ChunkUpdate::filled(
            Vector3i::new(7, 1, 0),
            Vector3i::new(1, 3, 1),
            Block::new(BlockType::LOG),
        )),
        // Block in the next chunk hiding the column's +X face.
        ServerEvent::ChunkUpdated(ChunkUpdate::single(
            Vector3i::new(8, 2, 0),
            Block::new(BlockType::STONE),
        )),
        // Dig a hole through the floor at a chunk corner.
        ServerEvent::ChunkUpdated(ChunkUpdate::single(Vector3i::new(-1, 0, -1), Block::AIR)),
        ServerEvent::PlayerPositionUpdated(EntityPosition::new(7.5, 4.0, 0.5)),
    ]
}

fn record(path: &std::path::Path, events: &[ServerEvent]) -> Result<()> {
    let mut sink = JsonlSink::create(path)?;
    for event in events {
        sink.write(event)?;
    }
    Ok(())
}

#[test]
fn replayed_session_matches_fresh_rebuild() -> Result<()> {
    let path = std::env::temp_dir().join("mineflayer-replay-session.jsonl");
    record(&path, &recorded_events())?;

    let (registry, atlas) = sample_assets()?;
    let mut session = ClientSession::new(
        VoxelWorld::new(CHUNK),
        registry,
        atlas,
        ChunkMeshStore::new(),
    )
    .with_strict(true);
    let mut source = ReplaySource::open(&path)?;
    let stats = session.run(&mut source)?;

    assert_eq!(stats.events, 6);
    assert_eq!(stats.updates_applied, 4);
    assert_eq!(stats.positions, 2);
    assert_eq!(
        session.player_position(),
        Some(EntityPosition::new(7.5, 4.0, 0.5))
    );

    let world = session.world();
    assert_eq!(world.block_type_at(Vector3i::new(7, 3, 0)), BlockType::LOG);
    assert_eq!(world.block_type_at(Vector3i::new(-1, 0, -1)), BlockType::AIR);
    assert_eq!(world.block_type_at(Vector3i::new(-2, 0, -1)), BlockType::GRASS);

    let store = session.sink();
    assert_eq!(store.len(), world.chunk_count());
    for chunk in world.chunks() {
        let fresh = build_mesh(chunk, world, session.registry(), session.atlas());
        let stored = store.get(chunk.origin()).expect("every chunk has a mesh");
        assert_eq!(stored.hash, fresh.hash, "stale mesh for chunk {}", chunk.origin());
    }

    std::fs::remove_file(&path).ok();
    Ok(())
}

#[test]
fn lenient_replay_skips_malformed_update_records() -> Result<()> {
    let (registry, atlas) = sample_assets()?;
    let mut session = ClientSession::new(
        VoxelWorld::new(CHUNK),
        registry,
        atlas,
        ChunkMeshStore::new(),
    );
    let log = r#"
{"type":"ChunkUpdated","origin":{"x":0,"y":0,"z":0},"size":{"x":2,"y":1,"z":1},"blocks":[{"block_type":1}]}
{"type":"ChunkUpdated","origin":{"x":0,"y":0,"z":0},"size":{"x":1,"y":1,"z":1},"blocks":[{"block_type":3}]}
"#;
    let stats = session.run(&mut ReplaySource::from_text(log))?;
    assert_eq!(stats.updates_rejected, 1);
    assert_eq!(stats.updates_applied, 1);
    assert_eq!(session.world().block_type_at(Vector3i::ZERO), BlockType::DIRT);
    assert_eq!(session.world().block_type_at(Vector3i::new(1, 0, 0)), BlockType::AIR);
    Ok(())
}
