//! Core type definitions used across the Capture Now workspace.

pub mod geo;
pub mod id;
pub mod pagination;

pub use geo::{Coordinates, DistanceBucket};
pub use id::*;
pub use pagination::{PageRequest, PageResponse};
