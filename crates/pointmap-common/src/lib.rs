//! Common types and utilities shared across the pointmap crates.

pub mod bbox;
pub mod display;
pub mod error;
pub mod point;

pub use bbox::BoundingBox;
pub use display::{CompositeLabel, DisplayParameters, ToggleState, ViewSummary};
pub use error::{PointMapError, PointMapResult};
pub use point::{CanonicalSet, Point};
