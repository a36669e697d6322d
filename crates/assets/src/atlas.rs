use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::table_records;

/// Atlas edge length assumed when an index file does not state one.
pub const DEFAULT_ATLAS_SIZE: u32 = 256;

/// Errors that can occur while loading or validating atlas metadata.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// Wrap IO failures when reading metadata files.
    #[error("failed to read atlas metadata: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap JSON parsing issues.
    #[error("failed to parse atlas metadata: {0}")]
    Parse(#[from] serde_json::Error),
    /// A line of a text index could not be parsed.
    #[error("malformed texture index at line {line}: {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// Validation errors describing why metadata is inconsistent.
    #[error("invalid atlas metadata: {0}")]
    Invalid(String),
}

/// Pixel rectangle of one texture inside the atlas (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasRegion {
    /// X offset in pixels.
    pub x: u32,
    /// Y offset in pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl AtlasRegion {
    /// Build a region.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Normalized texture coordinates; `v` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    /// Left U.
    pub u0: f32,
    /// Top V.
    pub v0: f32,
    /// Right U.
    pub u1: f32,
    /// Bottom V.
    pub v1: f32,
}

impl UvRect {
    /// Point at fractional position `(s, t)` inside the rectangle.
    pub fn lerp(&self, s: f32, t: f32) -> [f32; 2] {
        [
            self.u0 + s * (self.u1 - self.u0),
            self.v0 + t * (self.v1 - self.v0),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct AtlasEntry {
    name: String,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
struct AtlasFile {
    atlas_width: u32,
    atlas_height: u32,
    entries: Vec<AtlasEntry>,
}

/// Named texture regions of one atlas image.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureAtlas {
    width: u32,
    height: u32,
    regions: BTreeMap<String, AtlasRegion>,
}

impl Default for TextureAtlas {
    fn default() -> Self {
        Self::new(DEFAULT_ATLAS_SIZE, DEFAULT_ATLAS_SIZE)
    }
}

impl TextureAtlas {
    /// Empty atlas of the given pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            regions: BTreeMap::new(),
        }
    }

    /// Atlas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Atlas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Add or replace a region, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, region: AtlasRegion) -> Option<AtlasRegion> {
        self.regions.insert(name.into(), region)
    }

    /// Parse the whitespace-separated `name x y w h` index format.
    pub fn parse_index(input: &str, width: u32, height: u32) -> Result<Self, AtlasError> {
        let mut atlas = Self::new(width, height);
        for (line, columns) in table_records(input) {
            let [name, x, y, w, h] = columns[..] else {
                return Err(AtlasError::Malformed {
                    line,
                    reason: format!("expected 5 columns, found {}", columns.len()),
                });
            };
            let number = |value: &str| {
                value.parse::<u32>().map_err(|_| AtlasError::Malformed {
                    line,
                    reason: format!("'{value}' is not a pixel coordinate"),
                })
            };
            let region = AtlasRegion::new(number(x)?, number(y)?, number(w)?, number(h)?);
            if atlas.insert(name, region).is_some() {
                return Err(AtlasError::Malformed {
                    line,
                    reason: format!("duplicate atlas entry '{name}'"),
                });
            }
        }
        atlas.validate()?;
        Ok(atlas)
    }

    /// Parse the JSON layout and validate contents.
    pub fn parse_json(input: &str) -> Result<Self, AtlasError> {
        let file: AtlasFile = serde_json::from_str(input)?;
        let mut atlas = Self::new(file.atlas_width, file.atlas_height);
        for entry in file.entries {
            let region = AtlasRegion::new(entry.x, entry.y, entry.width, entry.height);
            if atlas.insert(entry.name.clone(), region).is_some() {
                return Err(AtlasError::Invalid(format!(
                    "duplicate atlas entry '{}'",
                    entry.name
                )));
            }
        }
        atlas.validate()?;
        Ok(atlas)
    }

    /// Load metadata from disk: `.json` files use the JSON layout, anything
    /// else the text index with a [`DEFAULT_ATLAS_SIZE`] square atlas.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, AtlasError> {
        Self::load_file_sized(path, DEFAULT_ATLAS_SIZE, DEFAULT_ATLAS_SIZE)
    }

    /// Like [`Self::load_file`] but with an explicit size for text indexes.
    pub fn load_file_sized(
        path: impl AsRef<Path>,
        width: u32,
        height: u32,
    ) -> Result<Self, AtlasError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::parse_json(&data)
        } else {
            Self::parse_index(&data, width, height)
        }
    }

    /// Validate the structure of the metadata and return `Ok(())` if consistent.
    pub fn validate(&self) -> Result<(), AtlasError> {
        if self.width == 0 || self.height == 0 {
            return Err(AtlasError::Invalid(
                "atlas width and height must be greater than zero".into(),
            ));
        }
        for (name, region) in &self.regions {
            if region.width == 0 || region.height == 0 {
                return Err(AtlasError::Invalid(format!(
                    "entry {name} has empty dimensions {}x{}",
                    region.width, region.height
                )));
            }
            let fits = |start: u32, extent: u32, limit: u32| {
                start.checked_add(extent).is_some_and(|end| end <= limit)
            };
            if !fits(region.x, region.width, self.width) || !fits(region.y, region.height, self.height)
            {
                return Err(AtlasError::Invalid(format!(
                    "entry {name} exceeds atlas bounds"
                )));
            }
        }
        Ok(())
    }

    /// Lookup a region by name.
    pub fn region(&self, name: &str) -> Option<&AtlasRegion> {
        self.regions.get(name)
    }

    /// Normalized UV rectangle of a named region.
    pub fn uv_rect(&self, name: &str) -> Option<UvRect> {
        let region = self.region(name)?;
        let w = self.width as f32;
        let h = self.height as f32;
        Some(UvRect {
            u0: region.x as f32 / w,
            v0: region.y as f32 / h,
            u1: (region.x as f32 + region.width as f32) / w,
            v1: (region.y as f32 + region.height as f32) / h,
        })
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True if the atlas has no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Region names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }
}
