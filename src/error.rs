use num_traits::ToPrimitive;

use crate::Coordinate;

/// The errors the topology engine may report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The intersection of two lines cannot be represented by finite coordinates.
    #[error("intersection is not representable as a finite coordinate")]
    NotRepresentable,
    /// The graph built from the inputs is topologically inconsistent.
    #[error("{reason} at {at}")]
    Topology { reason: &'static str, at: String },
    /// An internal invariant of the graph does not hold.
    #[error("assertion failed: {0}")]
    Assertion(&'static str),
    /// A polygon ring has no coordinates at all.
    #[error("ring is empty")]
    EmptyRing,
    /// A ring or line string has fewer points than required.
    #[error("found {got} points, at least {want} are required")]
    TooFewPoints { got: usize, want: usize },
    /// A polygon ring does not end where it starts.
    #[error("ring is not closed")]
    UnclosedRing,
    /// An input coordinate is NaN or infinite.
    #[error("coordinate is not finite")]
    NonFiniteCoordinate,
    /// Heterogeneous geometry collections are not valid operands.
    #[error("geometry collections are not supported as operands")]
    CollectionArgument,
    /// The edges of the graph cross each other at some non-node point.
    #[error("found non-noded intersection at {0}")]
    NotNoded(String),
    /// A dimension pattern is not made of nine symbols out of `T F * 0 1 2`.
    #[error("invalid dimension pattern {0:?}")]
    InvalidPattern(String),
}

impl Error {
    /// Returns a [`Error::Topology`] located at the given coordinate.
    pub(crate) fn topology<T>(reason: &'static str, at: &Coordinate<T>) -> Self
    where
        T: ToPrimitive,
    {
        Self::Topology {
            reason,
            at: display(at),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Formats a coordinate for an error message.
pub(crate) fn display<T>(at: &Coordinate<T>) -> String
where
    T: ToPrimitive,
{
    let ordinate = |value: &T| value.to_f64().unwrap_or(f64::NAN);
    format!("({}, {})", ordinate(&at.x), ordinate(&at.y))
}
