use num_traits::Float;

use crate::{PrecisionModel, algorithm::BoundaryNodeRule};

/// The settings of an overlay or relate operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayConfig<T = f64> {
    /// The model both operands, and every computed intersection, are rounded to.
    pub precision: PrecisionModel<T>,
    /// The rule deciding which endpoints of lines are on their boundary.
    pub boundary_rule: BoundaryNodeRule,
    /// Whether the split edges are checked to be fully noded before building the graph.
    pub validate_noding: bool,
}

impl<T> Default for OverlayConfig<T>
where
    T: Float,
{
    fn default() -> Self {
        Self {
            precision: PrecisionModel::Floating,
            boundary_rule: BoundaryNodeRule::Mod2,
            validate_noding: true,
        }
    }
}

impl<T> OverlayConfig<T>
where
    T: Float,
{
    pub fn with_precision(mut self, precision: PrecisionModel<T>) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_boundary_rule(mut self, rule: BoundaryNodeRule) -> Self {
        self.boundary_rule = rule;
        self
    }

    pub fn with_validate_noding(mut self, validate: bool) -> Self {
        self.validate_noding = validate;
        self
    }
}
