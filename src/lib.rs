#[macro_use]
mod coordinate;

pub mod algorithm;
mod config;
mod envelope;
mod error;
mod geometry;
pub mod graph;
pub mod noding;
mod overlay;
mod precision;
pub mod relate;

pub use self::algorithm::BoundaryNodeRule;
pub use self::config::OverlayConfig;
pub use self::coordinate::Coordinate;
pub use self::envelope::Envelope;
pub use self::error::{Error, Result};
pub use self::geometry::{Dimension, Geometry, Polygon};
pub use self::graph::Location;
pub use self::overlay::{OpCode, Overlay, Unknown};
pub use self::precision::PrecisionModel;
pub use self::relate::{IntersectionMatrix, relate, relate_with};
