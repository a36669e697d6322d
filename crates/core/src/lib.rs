#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod vector;

pub use vector::Vector3i;
