//! Property-based tests for face culling
//!
//! For arbitrary sparse block layouts spread over several chunks:
//! - Triangle count is exactly two per solid block face bordering air
//! - Rebuilding yields an identical vertex sequence and hash
//! - Metrics written for the meshes parse back as JSON

use mineflayer_render::{build_mesh, write_metrics_to_file, ChunkMeshStat, FACE_DIRECTIONS};
use mineflayer_testkit::sample_assets;
use mineflayer_world::{Block, BlockType, Vector3i, VoxelWorld};
use proptest::prelude::*;

const CHUNK: Vector3i = Vector3i::new(4, 4, 4);

fn world_from(cells: &[(i32, i32, i32)]) -> VoxelWorld {
    let mut world = VoxelWorld::new(CHUNK);
    for &(x, y, z) in cells {
        world.set_block(Vector3i::new(x, y, z), Block::new(BlockType::STONE));
    }
    world
}

fn exposed_faces(world: &VoxelWorld, key: Vector3i) -> usize {
    let chunk = world.chunk(key).expect("chunk loaded");
    chunk
        .offsets()
        .filter(|&offset| !chunk.block_type(offset).is_air())
        .map(|offset| {
            let position = key + offset;
            FACE_DIRECTIONS
                .iter()
                .filter(|face| world.block_type_at(position + face.normal()).is_air())
                .count()
        })
        .sum()
}

proptest! {
    /// Property: every exposed face becomes exactly two triangles, across chunk edges too.
    #[test]
    fn triangle_count_matches_exposed_faces(
        cells in prop::collection::vec((-6i32..6, -2i32..6, -6i32..6), 1..40),
    ) {
        let world = world_from(&cells);
        let (registry, atlas) = sample_assets().unwrap();

        for key in world.chunk_keys() {
            let chunk = world.chunk(key).unwrap();
            let mesh = build_mesh(chunk, &world, &registry, &atlas);
            prop_assert_eq!(mesh.triangle_count(), 2 * exposed_faces(&world, key),
                "chunk {}", key);
        }
    }

    /// Property: meshing the same world twice is bit-identical.
    #[test]
    fn rebuild_is_deterministic(
        cells in prop::collection::vec((-6i32..6, -2i32..6, -6i32..6), 1..40),
    ) {
        let world = world_from(&cells);
        let (registry, atlas) = sample_assets().unwrap();

        for chunk in world.chunks() {
            let a = build_mesh(chunk, &world, &registry, &atlas);
            let b = build_mesh(chunk, &world, &registry, &atlas);
            prop_assert_eq!(&a.vertices, &b.vertices);
            prop_assert_eq!(a.hash, b.hash);
        }
    }
}

#[test]
fn metrics_file_lists_every_chunk() {
    let world = world_from(&[(0, 0, 0), (-1, 0, 0), (0, 0, 4)]);
    let (registry, atlas) = sample_assets().unwrap();
    let stats: Vec<_> = world
        .chunks()
        .map(|chunk| {
            ChunkMeshStat::of(chunk.origin(), &build_mesh(chunk, &world, &registry, &atlas))
        })
        .collect();

    let path = std::env::temp_dir().join("mineflayer-culling-metrics.json");
    write_metrics_to_file(&stats, &path).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["chunk"], serde_json::json!([-4, 0, 0]));
    // The two blocks straddling the chunk border hide one face each.
    assert_eq!(entries[0]["triangles"], 10);
    assert_eq!(entries[1]["chunk"], serde_json::json!([0, 0, 0]));
    assert_eq!(entries[1]["triangles"], 10);
    assert_eq!(entries[2]["chunk"], serde_json::json!([0, 0, 4]));
    assert_eq!(entries[2]["triangles"], 12);
    std::fs::remove_file(&path).ok();
}
