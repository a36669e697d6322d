use blake3::Hasher;
use mineflayer_assets::{BlockFace, BlockRegistry, TextureAtlas, UvRect};
use mineflayer_world::{BlockType, Chunk, Vector3i, VoxelWorld};
use tracing::trace;

/// Neighbor directions evaluated for every solid block, in emission order
/// (+X, -X, +Y, -Y, +Z, -Z).
pub const FACE_DIRECTIONS: [BlockFace; 6] = [
    BlockFace::Right,
    BlockFace::Left,
    BlockFace::Top,
    BlockFace::Bottom,
    BlockFace::Front,
    BlockFace::Back,
];

/// BLAKE3 digest of a mesh's vertex bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHash(pub [u8; 32]);

impl MeshHash {
    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

/// Vertex layout produced by the mesher.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Position in world coordinates.
    pub position: [f32; 3],
    /// Face normal (unit length).
    pub normal: [f32; 3],
    /// Texture coordinates for atlas sampling.
    pub uv: [f32; 2],
}

/// Triangle-list geometry for one chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Every three consecutive vertices form one triangle.
    pub vertices: Vec<MeshVertex>,
    /// Stable hash of `vertices` for determinism comparisons.
    pub hash: MeshHash,
}

impl Mesh {
    /// Wrap a vertex list, hashing its bytes.
    pub fn from_vertices(vertices: Vec<MeshVertex>) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(bytemuck::cast_slice(&vertices));
        Self {
            vertices,
            hash: MeshHash(*hasher.finalize().as_bytes()),
        }
    }

    /// Construct an empty mesh (useful for initialization).
    pub fn empty() -> Self {
        Self::from_vertices(Vec::new())
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// True if there is no geometry.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = &[MeshVertex]> {
        self.vertices.chunks_exact(3)
    }
}

/// Culling mesher: emits the faces of solid blocks that border air.
///
/// Neighbors are read through the world, so faces on a chunk edge are
/// culled against the adjacent chunk. Unloaded space counts as air.
pub struct MeshBuilder<'a> {
    registry: &'a BlockRegistry,
    atlas: &'a TextureAtlas,
}

impl<'a> MeshBuilder<'a> {
    /// Create a builder over the given definition table and atlas.
    pub fn new(registry: &'a BlockRegistry, atlas: &'a TextureAtlas) -> Self {
        Self { registry, atlas }
    }

    /// Build a fresh mesh for `chunk`.
    pub fn build(&self, chunk: &Chunk, world: &VoxelWorld) -> Mesh {
        let mut vertices = Vec::with_capacity(1024);
        for offset in chunk.offsets() {
            let block_type = chunk.block_type(offset);
            if block_type.is_air() {
                continue;
            }
            let position = chunk.origin() + offset;
            for face in FACE_DIRECTIONS {
                // Past the coordinate range counts as open space.
                let neighbor = match position.checked_add(face.normal()) {
                    Some(n) if chunk.contains_world(n) => chunk.block_type(n - chunk.origin()),
                    Some(n) => world.block_type_at(n),
                    None => BlockType::AIR,
                };
                if neighbor.is_air() {
                    self.push_quad(&mut vertices, block_type, face, position);
                }
            }
        }
        Mesh::from_vertices(vertices)
    }

    fn push_quad(
        &self,
        vertices: &mut Vec<MeshVertex>,
        block_type: BlockType,
        face: BlockFace,
        position: Vector3i,
    ) {
        let uv = self.resolve_uvs(block_type, face);
        let normal = face.normal();
        let normal = [normal.x as f32, normal.y as f32, normal.z as f32];
        let corners = face_corners(face);
        let weights = face_uv_weights(face);

        let vertex = |i: usize| {
            let [cx, cy, cz] = corners[i];
            let [s, t] = weights[i];
            MeshVertex {
                position: [
                    (i64::from(position.x) + i64::from(cx)) as f32,
                    (i64::from(position.y) + i64::from(cy)) as f32,
                    (i64::from(position.z) + i64::from(cz)) as f32,
                ],
                normal,
                uv: uv.lerp(s, t),
            }
        };
        for i in [0, 1, 2, 0, 2, 3] {
            vertices.push(vertex(i));
        }
    }

    fn resolve_uvs(&self, block_type: BlockType, face: BlockFace) -> UvRect {
        if let Some(texture) = self.registry.texture_for(block_type.id(), face) {
            if let Some(rect) = self.atlas.uv_rect(texture) {
                return rect;
            }
            trace!(%block_type, texture, ?face, "texture missing from atlas; using id cell");
        } else {
            trace!(%block_type, ?face, "block type not in registry; using id cell");
        }

        let atlas_size = 16.0;
        let atlas_x = (block_type.id() % 16) as f32;
        let atlas_y = (block_type.id() / 16) as f32;
        UvRect {
            u0: atlas_x / atlas_size,
            v0: atlas_y / atlas_size,
            u1: (atlas_x + 1.0) / atlas_size,
            v1: (atlas_y + 1.0) / atlas_size,
        }
    }
}

/// Mesh `chunk` against `world` with the given definitions.
pub fn build_mesh(
    chunk: &Chunk,
    world: &VoxelWorld,
    registry: &BlockRegistry,
    atlas: &TextureAtlas,
) -> Mesh {
    MeshBuilder::new(registry, atlas).build(chunk, world)
}

// Unit-cube corners, counter-clockwise seen from outside the face.
fn face_corners(face: BlockFace) -> [[i32; 3]; 4] {
    match face {
        BlockFace::Right => [[1, 0, 0], [1, 1, 0], [1, 1, 1], [1, 0, 1]],
        BlockFace::Left => [[0, 0, 1], [0, 1, 1], [0, 1, 0], [0, 0, 0]],
        BlockFace::Top => [[0, 1, 0], [0, 1, 1], [1, 1, 1], [1, 1, 0]],
        BlockFace::Bottom => [[0, 0, 0], [1, 0, 0], [1, 0, 1], [0, 0, 1]],
        BlockFace::Front => [[1, 0, 1], [1, 1, 1], [0, 1, 1], [0, 0, 1]],
        BlockFace::Back => [[0, 0, 0], [0, 1, 0], [1, 1, 0], [1, 0, 0]],
    }
}

// (s, t) inside the texture rect for each corner. Sides keep the texture
// upright: t = 0 at the top edge.
fn face_uv_weights(face: BlockFace) -> [[f32; 2]; 4] {
    match face {
        BlockFace::Top => [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]],
        BlockFace::Bottom => [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        _ => [[1.0, 1.0], [1.0, 0.0], [0.0, 0.0], [0.0, 1.0]],
    }
}
