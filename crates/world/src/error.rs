use thiserror::Error;

use crate::Vector3i;

/// Errors raised while writing updates into the world.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The dense block array does not match the declared extent.
    #[error("update at {origin} with size {size} expects {expected} blocks, got {actual}")]
    SizeMismatch {
        origin: Vector3i,
        size: Vector3i,
        expected: usize,
        actual: usize,
    },
    /// An update declared a negative extent on some axis.
    #[error("update at {origin} has negative size {size}")]
    NegativeSize { origin: Vector3i, size: Vector3i },
    /// The declared extent has more cells than can be addressed.
    #[error("update at {origin} has size {size} with too many cells")]
    ExtentTooLarge { origin: Vector3i, size: Vector3i },
    /// The far corner of the update box lies outside the `i32` coordinate range.
    #[error("update at {origin} with size {size} extends past the coordinate range")]
    OutOfRange { origin: Vector3i, size: Vector3i },
}
