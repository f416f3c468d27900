use crate::graph::{Label, Location, Position};

const NULL_DEPTH: i32 = -1;

/// Counts, for both operands, how many of the coincident edges merged into a single one have
/// the interior of an area at each of their sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Depth {
    depths: [[i32; 3]; 2],
}

impl Default for Depth {
    fn default() -> Self {
        Self {
            depths: [[NULL_DEPTH; 3]; 2],
        }
    }
}

/// Returns the depth a single edge contributes with at a side having the given location.
fn depth_at(location: Location) -> i32 {
    match location {
        Location::Exterior => 0,
        Location::Interior => 1,
        _ => NULL_DEPTH,
    }
}

impl Depth {
    pub fn get(&self, index: usize, position: Position) -> i32 {
        self.depths[index][position as usize]
    }

    pub fn set(&mut self, index: usize, position: Position, depth: i32) {
        self.depths[index][position as usize] = depth;
    }

    /// Returns the location implied by the depth at the given side.
    pub fn location(&self, index: usize, position: Position) -> Location {
        if self.get(index, position) <= 0 {
            Location::Exterior
        } else {
            Location::Interior
        }
    }

    /// Increments the depth at the given side if the location is interior.
    pub fn add_location(&mut self, index: usize, position: Position, location: Location) {
        if location == Location::Interior {
            self.depths[index][position as usize] += 1;
        }
    }

    /// Returns true if, and only if, no depth has been recorded at all.
    pub fn is_null(&self) -> bool {
        self.depths
            .iter()
            .flatten()
            .all(|depth| *depth == NULL_DEPTH)
    }

    /// Returns true if, and only if, no depth has been recorded for the given operand.
    pub fn is_null_of(&self, index: usize) -> bool {
        self.depths[index][Position::Left as usize] == NULL_DEPTH
    }

    pub fn is_null_at(&self, index: usize, position: Position) -> bool {
        self.get(index, position) == NULL_DEPTH
    }

    /// Adds the side locations of the given label to the depths.
    pub fn add(&mut self, label: &Label) {
        for index in 0..2 {
            for position in [Position::Left, Position::Right] {
                let location = label.location_at(index, position);
                if !matches!(location, Location::Exterior | Location::Interior) {
                    continue;
                }

                let depth = &mut self.depths[index][position as usize];
                if *depth == NULL_DEPTH {
                    *depth = depth_at(location);
                } else {
                    *depth += depth_at(location);
                }
            }
        }
    }

    /// Returns the difference between the right and left depths of the given operand.
    pub fn delta(&self, index: usize) -> i32 {
        self.get(index, Position::Right) - self.get(index, Position::Left)
    }

    /// Reduces the depths to their minimal form: zero for the shallowest side, one for the
    /// deepest one.
    pub fn normalize(&mut self) {
        for index in 0..2 {
            if self.is_null_of(index) {
                continue;
            }

            let sides = &mut self.depths[index][Position::Left as usize..];
            let min = sides.iter().copied().min().unwrap_or_default().max(0);
            sides
                .iter_mut()
                .for_each(|depth| *depth = if *depth > min { 1 } else { 0 });
        }
    }
}
