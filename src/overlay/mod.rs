//! Boolean set operations between two geometries.

mod line_builder;
mod op;
mod point_builder;
mod polygon_builder;
mod ring;

use std::fmt;

use num_traits::Float;
use tracing::debug;

use crate::{
    Error, Geometry, OverlayConfig, Result,
    graph::{Label, Location},
};

use self::op::{OverlayOp, empty_result};

/// Marker for yet undefined generic parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unknown;

/// The boolean set operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    /// The points in both operands.
    Intersection,
    /// The points in any of the operands.
    Union,
    /// The points in the subject but not in the clip.
    Difference,
    /// The points in exactly one of the operands.
    SymDifference,
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Intersection => "intersection",
            Self::Union => "union",
            Self::Difference => "difference",
            Self::SymDifference => "symmetric difference",
        };

        write!(f, "{name}")
    }
}

impl OpCode {
    /// Returns true if, and only if, a point with the given locations relative to the subject
    /// and the clip belongs to the result of the operation.
    ///
    /// Points on the boundary of an operand count as part of it.
    pub fn is_result(self, subject: Location, clip: Location) -> bool {
        let is_in = |location| matches!(location, Location::Interior | Location::Boundary);
        let (subject, clip) = (is_in(subject), is_in(clip));

        match self {
            Self::Intersection => subject && clip,
            Self::Union => subject || clip,
            Self::Difference => subject && !clip,
            Self::SymDifference => subject != clip,
        }
    }

    /// Returns true if, and only if, a component with the given label belongs to the result of
    /// the operation.
    pub fn is_result_label(self, label: &Label) -> bool {
        self.is_result(label.location(0), label.location(1))
    }

    /// Returns the result of the operation for the given operands if it is known without
    /// computing anything, because one of them is empty.
    fn shortcut<T>(self, subject: &Geometry<T>, clip: &Geometry<T>) -> Option<Geometry<T>>
    where
        T: Clone,
    {
        let empty = || empty_result(self, subject.dimension(), clip.dimension());

        match (self, subject.is_empty(), clip.is_empty()) {
            (_, false, false) => None,
            (Self::Intersection, ..) | (Self::Difference, true, _) => Some(empty()),
            (Self::Union | Self::SymDifference, true, true) => Some(empty()),
            (Self::Union | Self::SymDifference, true, false) => Some(clip.clone()),
            (Self::Union | Self::SymDifference | Self::Difference, false, true) => {
                Some(subject.clone())
            }
        }
    }
}

/// Implements the overlay of two geometries.
///
/// Every parameter must be set before the operation can be executed.
#[derive(Debug, Clone)]
pub struct Overlay<Subject, Clip, Operation, Config> {
    subject: Subject,
    clip: Clip,
    operation: Operation,
    config: Config,
}

impl Default for Overlay<Unknown, Unknown, Unknown, Unknown> {
    fn default() -> Self {
        Self {
            subject: Unknown,
            clip: Unknown,
            operation: Unknown,
            config: Unknown,
        }
    }
}

impl<Sub, Clip, Cfg> Overlay<Sub, Clip, Unknown, Cfg> {
    pub fn with_operation(self, operation: OpCode) -> Overlay<Sub, Clip, OpCode, Cfg> {
        Overlay {
            subject: self.subject,
            clip: self.clip,
            operation,
            config: self.config,
        }
    }
}

impl<Clip, Op, Cfg> Overlay<Unknown, Clip, Op, Cfg> {
    pub fn with_subject<T>(
        self,
        subject: impl Into<Geometry<T>>,
    ) -> Overlay<Geometry<T>, Clip, Op, Cfg> {
        Overlay {
            subject: subject.into(),
            clip: self.clip,
            operation: self.operation,
            config: self.config,
        }
    }
}

impl<Sub, Op, Cfg> Overlay<Sub, Unknown, Op, Cfg> {
    pub fn with_clip<T>(self, clip: impl Into<Geometry<T>>) -> Overlay<Sub, Geometry<T>, Op, Cfg> {
        Overlay {
            subject: self.subject,
            clip: clip.into(),
            operation: self.operation,
            config: self.config,
        }
    }
}

impl<Sub, Clip, Op> Overlay<Sub, Clip, Op, Unknown> {
    pub fn with_config<T>(
        self,
        config: OverlayConfig<T>,
    ) -> Overlay<Sub, Clip, Op, OverlayConfig<T>> {
        Overlay {
            subject: self.subject,
            clip: self.clip,
            operation: self.operation,
            config,
        }
    }
}

impl<T> Overlay<Geometry<T>, Geometry<T>, OpCode, OverlayConfig<T>>
where
    T: Float,
{
    /// Performs the overlay and returns the resulting [`Geometry`].
    ///
    /// Both operands are validated and rounded to the precision model of the configuration
    /// before anything else. Heterogeneous collections are not supported.
    #[tracing::instrument(level = "debug", skip_all, fields(op = %self.operation))]
    pub fn execute(mut self) -> Result<Geometry<T>> {
        if self.subject.is_collection() || self.clip.is_collection() {
            return Err(Error::CollectionArgument);
        }

        self.subject.validate()?;
        self.clip.validate()?;

        self.subject.make_precise(&self.config.precision);
        self.clip.make_precise(&self.config.precision);

        if let Some(result) = self.operation.shortcut(&self.subject, &self.clip) {
            debug!("empty operand short-circuited");
            return Ok(result);
        }

        OverlayOp::new([&self.subject, &self.clip], self.config)?.compute(self.operation)
    }
}

impl<T> Geometry<T>
where
    T: Float,
{
    fn overlay(self, rhs: Self, operation: OpCode) -> Result<Self> {
        Overlay::default()
            .with_operation(operation)
            .with_subject(self)
            .with_clip(rhs)
            .with_config(OverlayConfig::default())
            .execute()
    }

    /// Returns the union of self and rhs.
    pub fn or(self, rhs: Self) -> Result<Self> {
        self.overlay(rhs, OpCode::Union)
    }

    /// Returns the intersection of self and rhs.
    pub fn and(self, rhs: Self) -> Result<Self> {
        self.overlay(rhs, OpCode::Intersection)
    }

    /// Returns the difference of rhs from self.
    pub fn not(self, rhs: Self) -> Result<Self> {
        self.overlay(rhs, OpCode::Difference)
    }

    /// Returns the symmetric difference of self and rhs.
    pub fn xor(self, rhs: Self) -> Result<Self> {
        self.overlay(rhs, OpCode::SymDifference)
    }
}
