use std::path::PathBuf;

use anyhow::Result;
use mineflayer_assets::{registry_from_file, registry_from_json, BlockFace, TextureAtlas};
use mineflayer_render::build_mesh;
use mineflayer_world::{Block, BlockType, ChunkUpdate, Vector3i, VoxelWorld};

fn resource(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("resources")
        .join(name)
}

const PACK: &str = r#"
[
  { "id": 1, "name": "stone" },
  { "id": 2, "name": "grass", "textures": { "top": "grass_top", "bottom": "dirt", "side": "grass_side" } }
]
"#;

#[test]
fn bundled_resources_load_and_agree() -> Result<()> {
    let registry = registry_from_file(&resource("blocks.txt"))?;
    let atlas = TextureAtlas::load_file(resource("textures.txt"))?;
    registry.validate_textures(&atlas)?;
    assert_eq!(registry.len(), mineflayer_testkit::sample_registry()?.len());

    assert_eq!(registry.id_by_name("grass"), Some(BlockType::GRASS.id()));
    assert_eq!(registry.texture_for(BlockType::LOG.id(), BlockFace::Top), Some("log_top"));
    assert_eq!(registry.texture_for(BlockType::LOG.id(), BlockFace::Left), Some("log_side"));
    Ok(())
}

#[test]
fn registry_mesh_pipeline_from_json() -> Result<()> {
    let registry = registry_from_json(PACK)?;
    let atlas = TextureAtlas::load_file(resource("textures.txt"))?;
    registry.validate_textures(&atlas)?;

    let mut world = VoxelWorld::new(Vector3i::new(16, 16, 16));
    let update = ChunkUpdate::single(Vector3i::new(0, 0, 0), Block::new(BlockType::GRASS));
    let touched = world.write_update(&update)?;
    assert_eq!(touched.len(), 1);

    let chunk = world.chunk(Vector3i::ZERO).expect("chunk was written");
    let mesh = build_mesh(chunk, &world, &registry, &atlas);
    assert_eq!(mesh.triangle_count(), 12);

    // The top face samples grass_top, which sits in the atlas corner.
    let grass_top = atlas.uv_rect("grass_top").expect("grass_top in atlas");
    let top_uvs: Vec<[f32; 2]> = mesh
        .vertices
        .iter()
        .filter(|vertex| vertex.normal == [0.0, 1.0, 0.0])
        .map(|vertex| vertex.uv)
        .collect();
    assert!(!top_uvs.is_empty());
    for uv in top_uvs {
        assert!(uv[0] >= grass_top.u0 && uv[0] <= grass_top.u1);
        assert!(uv[1] >= grass_top.v0 && uv[1] <= grass_top.v1);
    }
    Ok(())
}
