use std::collections::{BTreeMap, HashMap};

use mineflayer_core::Vector3i;

use crate::{AssetError, BlockConfig, BlockTextureConfig, TextureAtlas};

/// Faces corresponding to the block's six sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockFace {
    /// Positive Y face.
    Top,
    /// Negative Y face.
    Bottom,
    /// Positive Z face.
    Front,
    /// Negative Z face.
    Back,
    /// Negative X face.
    Left,
    /// Positive X face.
    Right,
}

impl BlockFace {
    /// Every face, in definition-table column order.
    pub const ALL: [BlockFace; 6] = [
        BlockFace::Top,
        BlockFace::Bottom,
        BlockFace::Front,
        BlockFace::Back,
        BlockFace::Left,
        BlockFace::Right,
    ];

    /// Outward unit normal.
    pub const fn normal(self) -> Vector3i {
        match self {
            BlockFace::Top => Vector3i::new(0, 1, 0),
            BlockFace::Bottom => Vector3i::new(0, -1, 0),
            BlockFace::Front => Vector3i::new(0, 0, 1),
            BlockFace::Back => Vector3i::new(0, 0, -1),
            BlockFace::Left => Vector3i::new(-1, 0, 0),
            BlockFace::Right => Vector3i::new(1, 0, 0),
        }
    }
}

/// One texture name per face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceTextures {
    /// Top (+Y).
    pub top: String,
    /// Bottom (-Y).
    pub bottom: String,
    /// Front (+Z).
    pub front: String,
    /// Back (-Z).
    pub back: String,
    /// Left (-X).
    pub left: String,
    /// Right (+X).
    pub right: String,
}

impl FaceTextures {
    /// Same texture on every face.
    pub fn uniform(name: &str) -> Self {
        Self {
            top: name.to_string(),
            bottom: name.to_string(),
            front: name.to_string(),
            back: name.to_string(),
            left: name.to_string(),
            right: name.to_string(),
        }
    }

    /// Resolve per-face overrides on top of a base texture.
    ///
    /// `all` is applied first, then `side`, then the individual faces.
    pub fn from_config(base: &str, config: Option<BlockTextureConfig>) -> Self {
        let mut textures = Self::uniform(base);
        let Some(cfg) = config else {
            return textures;
        };
        if let Some(all) = cfg.all.as_deref() {
            textures.set_all(all);
        }
        if let Some(side) = cfg.side.as_deref() {
            textures.set_sides(side);
        }
        if let Some(top) = cfg.top {
            textures.top = top;
        }
        if let Some(bottom) = cfg.bottom {
            textures.bottom = bottom;
        }
        if let Some(front) = cfg.front {
            textures.front = front;
        }
        if let Some(back) = cfg.back {
            textures.back = back;
        }
        if let Some(left) = cfg.left {
            textures.left = left;
        }
        if let Some(right) = cfg.right {
            textures.right = right;
        }
        textures
    }

    /// Texture name for the supplied face.
    pub fn texture_for(&self, face: BlockFace) -> &str {
        match face {
            BlockFace::Top => &self.top,
            BlockFace::Bottom => &self.bottom,
            BlockFace::Front => &self.front,
            BlockFace::Back => &self.back,
            BlockFace::Left => &self.left,
            BlockFace::Right => &self.right,
        }
    }

    /// `(face, texture)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockFace, &str)> {
        BlockFace::ALL
            .into_iter()
            .map(move |face| (face, self.texture_for(face)))
    }

    fn set_all(&mut self, value: &str) {
        *self = Self::uniform(value);
    }

    fn set_sides(&mut self, value: &str) {
        let val = value.to_string();
        self.front = val.clone();
        self.back = val.clone();
        self.left = val.clone();
        self.right = val;
    }
}

/// Resolved block-type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDefinition {
    /// Numeric block-type id.
    pub id: u16,
    /// Human-readable identifier (e.g., "stone").
    pub name: String,
    /// Per-face texture names.
    pub textures: FaceTextures,
}

impl BlockDefinition {
    /// Build a definition.
    pub fn new(id: u16, name: impl Into<String>, textures: FaceTextures) -> Self {
        Self {
            id,
            name: name.into(),
            textures,
        }
    }

    /// Definition using one texture, named like the block, on every face.
    pub fn simple(id: u16, name: &str) -> Self {
        Self::new(id, name, FaceTextures::uniform(name))
    }

    /// Construct a definition from a JSON pack entry.
    pub fn from_config(config: BlockConfig) -> Self {
        let base = config.texture.clone().unwrap_or_else(|| config.name.clone());
        let textures = FaceTextures::from_config(&base, config.textures);
        Self::new(config.id, config.name, textures)
    }

    /// Resolve the atlas entry for the supplied face.
    pub fn texture_for(&self, face: BlockFace) -> &str {
        self.textures.texture_for(face)
    }
}

/// Registry storing block definitions keyed by id.
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    definitions: BTreeMap<u16, BlockDefinition>,
    name_to_id: HashMap<String, u16>,
}

impl BlockRegistry {
    /// Construct a registry, rejecting duplicate ids and names.
    pub fn new(definitions: Vec<BlockDefinition>) -> Result<Self, AssetError> {
        let mut registry = Self::default();
        for def in definitions {
            if registry.definitions.contains_key(&def.id) {
                return Err(AssetError::DuplicateId(def.id));
            }
            if registry.name_to_id.contains_key(&def.name) {
                return Err(AssetError::DuplicateName(def.name));
            }
            registry.name_to_id.insert(def.name.clone(), def.id);
            registry.definitions.insert(def.id, def);
        }
        Ok(registry)
    }

    /// Look up a definition by numeric id.
    pub fn definition(&self, id: u16) -> Option<&BlockDefinition> {
        self.definitions.get(&id)
    }

    /// True if `id` is air or has a definition.
    pub fn contains(&self, id: u16) -> bool {
        id == 0 || self.definitions.contains_key(&id)
    }

    /// Resolve a block id by its name.
    pub fn id_by_name(&self, name: &str) -> Option<u16> {
        self.name_to_id.get(name).copied()
    }

    /// Texture name for one face of a block type.
    pub fn texture_for(&self, id: u16, face: BlockFace) -> Option<&str> {
        self.definition(id).map(|def| def.texture_for(face))
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// True if no definitions are loaded.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &BlockDefinition> {
        self.definitions.values()
    }

    /// Check that every texture referenced by a definition exists in `atlas`.
    pub fn validate_textures(&self, atlas: &TextureAtlas) -> Result<(), AssetError> {
        for def in self.iter() {
            for (_, texture) in def.textures.iter() {
                if atlas.region(texture).is_none() {
                    return Err(AssetError::UnknownTexture {
                        block: def.name.clone(),
                        texture: texture.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AtlasRegion;

    #[test]
    fn normals_are_unit_and_opposed() {
        for face in BlockFace::ALL {
            let n = face.normal();
            assert_eq!(n.x.abs() + n.y.abs() + n.z.abs(), 1);
            assert!(BlockFace::ALL.iter().any(|other| other.normal() == -n));
        }
    }

    #[test]
    fn texture_config_precedence() {
        let cfg = BlockTextureConfig {
            all: Some("log_side".into()),
            side: Some("bark".into()),
            top: Some("log_top".into()),
            left: Some("knot".into()),
            ..Default::default()
        };
        let textures = FaceTextures::from_config("log", Some(cfg));
        assert_eq!(textures.top, "log_top");
        assert_eq!(textures.bottom, "log_side");
        assert_eq!(textures.front, "bark");
        assert_eq!(textures.left, "knot");
        assert_eq!(textures.right, "bark");
    }

    #[test]
    fn definition_defaults_texture_to_name() {
        let def = BlockDefinition::from_config(BlockConfig {
            id: 3,
            name: "dirt".into(),
            texture: None,
            textures: None,
        });
        assert_eq!(def.texture_for(BlockFace::Back), "dirt");
    }

    #[test]
    fn registry_rejects_duplicates() {
        let err = BlockRegistry::new(vec![
            BlockDefinition::simple(1, "stone"),
            BlockDefinition::simple(1, "granite"),
        ])
        .unwrap_err();
        assert!(matches!(err, AssetError::DuplicateId(1)));

        let err = BlockRegistry::new(vec![
            BlockDefinition::simple(1, "stone"),
            BlockDefinition::simple(2, "stone"),
        ])
        .unwrap_err();
        assert!(matches!(err, AssetError::DuplicateName(name) if name == "stone"));
    }

    #[test]
    fn registry_lookups() {
        let registry = BlockRegistry::new(vec![
            BlockDefinition::simple(3, "dirt"),
            BlockDefinition::simple(1, "stone"),
        ])
        .unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(0));
        assert!(registry.contains(1));
        assert!(!registry.contains(2));
        assert_eq!(registry.id_by_name("dirt"), Some(3));
        assert_eq!(registry.texture_for(1, BlockFace::Top), Some("stone"));
        let ids: Vec<_> = registry.iter().map(|def| def.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn validate_textures_reports_missing_entry() {
        let registry = BlockRegistry::new(vec![BlockDefinition::simple(1, "stone")]).unwrap();
        let mut atlas = TextureAtlas::new(256, 256);
        let err = registry.validate_textures(&atlas).unwrap_err();
        assert!(matches!(err, AssetError::UnknownTexture { texture, .. } if texture == "stone"));

        atlas.insert("stone", AtlasRegion::new(16, 0, 16, 16));
        registry.validate_textures(&atlas).unwrap();
    }
}
