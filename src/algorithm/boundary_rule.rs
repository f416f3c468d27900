use crate::graph::Location;

/// Decides whether a point where some amount of line endpoints meet is in the boundary of a
/// geometry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryNodeRule {
    /// An odd amount of endpoints makes a boundary point.
    #[default]
    Mod2,
    /// Any endpoint is a boundary point.
    Endpoint,
    /// Only points where more than one endpoint meet are boundary points.
    MultivalentEndpoint,
    /// Only points being the endpoint of a single line are boundary points.
    MonovalentEndpoint,
}

impl BoundaryNodeRule {
    /// Returns true if, and only if, a point being the endpoint of the given amount of lines is
    /// in the boundary.
    pub fn is_in_boundary(&self, count: usize) -> bool {
        match self {
            Self::Mod2 => count % 2 == 1,
            Self::Endpoint => count > 0,
            Self::MultivalentEndpoint => count > 1,
            Self::MonovalentEndpoint => count == 1,
        }
    }
}

/// Returns the location of a point being the endpoint of the given amount of lines.
pub(crate) fn determine_boundary(rule: &BoundaryNodeRule, count: usize) -> Location {
    if rule.is_in_boundary(count) {
        Location::Boundary
    } else {
        Location::Interior
    }
}
