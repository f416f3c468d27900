use std::cmp::Ordering;

use num_traits::Float;

use crate::noding::{EdgeSetIntersector, EdgeSets, SegmentIntersector};

/// Finds the pairs of segments whose envelopes overlap by sweeping a vertical line across
/// them.
#[derive(Debug, Default, Clone, Copy)]
pub struct SweepLineIntersector;

impl<T> EdgeSetIntersector<T> for SweepLineIntersector
where
    T: Float,
{
    fn compute_intersections(
        &self,
        edges: &mut EdgeSets<'_, T>,
        intersector: &mut dyn SegmentIntersector<T>,
    ) {
        let mut segments: Vec<_> = edges.segments().collect();
        segments.sort_by(|(_, lhs), (_, rhs)| {
            lhs.min_x.partial_cmp(&rhs.min_x).unwrap_or(Ordering::Equal)
        });

        for (index, (lhs, lhs_envelope)) in segments.iter().enumerate() {
            for (rhs, rhs_envelope) in &segments[index + 1..] {
                if rhs_envelope.min_x > lhs_envelope.max_x {
                    break;
                }

                if !edges.is_candidate_pair(*lhs, *rhs) || !lhs_envelope.intersects(rhs_envelope) {
                    continue;
                }

                // segments of the first set always go first
                let (first, second) = if rhs.set < lhs.set {
                    (*rhs, *lhs)
                } else {
                    (*lhs, *rhs)
                };

                intersector.process_intersections(edges, first, second);
                if intersector.is_done() {
                    return;
                }
            }
        }
    }
}
