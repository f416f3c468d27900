use std::fmt;

/// The location of a point relative to a geometry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    /// Not yet known.
    #[default]
    None,
    Exterior,
    Boundary,
    Interior,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::None => '-',
            Self::Exterior => 'e',
            Self::Boundary => 'b',
            Self::Interior => 'i',
        };

        write!(f, "{symbol}")
    }
}

impl Location {
    /// Returns true if, and only if, the location is known.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// A position relative to a directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// On the edge itself.
    On = 0,
    Left = 1,
    Right = 2,
}

impl Position {
    /// Returns the position at the other side of the edge.
    pub fn opposite(self) -> Self {
        match self {
            Self::On => Self::On,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// The locations of an edge relative to a single geometry.
///
/// Line locations only know about the edge itself, while area locations also know about both
/// sides of the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopologyLocation {
    locations: [Location; 3],
    area: bool,
}

impl TopologyLocation {
    /// Returns a line location.
    pub fn line(on: Location) -> Self {
        Self {
            locations: [on, Location::None, Location::None],
            area: false,
        }
    }

    /// Returns an area location.
    pub fn area(on: Location, left: Location, right: Location) -> Self {
        Self {
            locations: [on, left, right],
            area: true,
        }
    }

    fn len(&self) -> usize {
        if self.area { 3 } else { 1 }
    }

    fn slots(&self) -> &[Location] {
        &self.locations[..self.len()]
    }

    /// Returns the location at the given position.
    pub fn get(&self, position: Position) -> Location {
        self.slots()
            .get(position as usize)
            .copied()
            .unwrap_or_default()
    }

    /// Returns true if, and only if, no location is known.
    pub fn is_null(&self) -> bool {
        self.slots().iter().all(|location| !location.is_known())
    }

    /// Returns true if, and only if, some location is unknown.
    pub fn is_any_null(&self) -> bool {
        self.slots().iter().any(|location| !location.is_known())
    }

    pub fn is_area(&self) -> bool {
        self.area
    }

    pub fn is_line(&self) -> bool {
        !self.area
    }

    /// Returns true if, and only if, self and rhs have the same location at the given position.
    pub fn is_equal_on_side(&self, rhs: &Self, position: Position) -> bool {
        self.get(position) == rhs.get(position)
    }

    /// Swaps the side locations.
    pub fn flip(&mut self) {
        if self.area {
            self.locations.swap(Position::Left as usize, Position::Right as usize);
        }
    }

    /// Sets the location at the given position.
    ///
    /// Side positions of a line location do not exist, so setting them has no effect.
    pub fn set(&mut self, position: Position, location: Location) {
        if (position as usize) < self.len() {
            self.locations[position as usize] = location;
        }
    }

    pub fn set_all(&mut self, location: Location) {
        let len = self.len();
        self.locations[..len].fill(location);
    }

    pub fn set_all_if_null(&mut self, location: Location) {
        let len = self.len();
        self.locations[..len]
            .iter_mut()
            .filter(|current| !current.is_known())
            .for_each(|current| *current = location);
    }

    /// Returns true if, and only if, every position has the given location.
    pub fn all_positions_equal(&self, location: Location) -> bool {
        self.slots().iter().all(|current| *current == location)
    }

    /// Fills the unknown locations of self with the ones of rhs, becoming an area location if
    /// rhs is.
    pub fn merge(&mut self, rhs: &Self) {
        if rhs.area && !self.area {
            self.area = true;
            self.locations[Position::Left as usize] = Location::None;
            self.locations[Position::Right as usize] = Location::None;
        }

        let len = self.len().min(rhs.len());
        self.locations[..len]
            .iter_mut()
            .zip(&rhs.locations[..len])
            .filter(|(current, _)| !current.is_known())
            .for_each(|(current, other)| *current = *other);
    }

    /// Drops the side locations.
    pub fn to_line(&mut self) {
        self.area = false;
        self.locations[Position::Left as usize] = Location::None;
        self.locations[Position::Right as usize] = Location::None;
    }
}

/// The topological relationship of a graph component with both operands of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    elements: [TopologyLocation; 2],
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, element) in self.elements.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }

            write!(f, "A{index}:")?;
            if element.is_area() {
                write!(f, "{}", element.get(Position::Left))?;
            }

            write!(f, "{}", element.get(Position::On))?;
            if element.is_area() {
                write!(f, "{}", element.get(Position::Right))?;
            }
        }

        Ok(())
    }
}

impl Label {
    /// Returns a line label with the given location for both operands.
    pub fn line(on: Location) -> Self {
        Self {
            elements: [TopologyLocation::line(on); 2],
        }
    }

    /// Returns a line label knowing the location relative to the given operand only.
    pub fn line_of(index: usize, on: Location) -> Self {
        let mut label = Self::line(Location::None);
        label.elements[index].set(Position::On, on);
        label
    }

    /// Returns an area label with the given locations for both operands.
    pub fn area(on: Location, left: Location, right: Location) -> Self {
        Self {
            elements: [TopologyLocation::area(on, left, right); 2],
        }
    }

    /// Returns an area label knowing the locations relative to the given operand only.
    pub fn area_of(index: usize, on: Location, left: Location, right: Location) -> Self {
        let mut label = Self::area(Location::None, Location::None, Location::None);
        label.elements[index] = TopologyLocation::area(on, left, right);
        label
    }

    /// Returns the line label made of the on-locations of the given label.
    pub fn to_line_label(&self) -> Self {
        let mut label = Self::line(Location::None);
        for index in 0..2 {
            label.set_location(index, self.location(index));
        }

        label
    }

    pub fn flip(&mut self) {
        self.elements.iter_mut().for_each(TopologyLocation::flip);
    }

    /// Returns self with the side locations swapped.
    pub fn flipped(mut self) -> Self {
        self.flip();
        self
    }

    /// Returns the location relative to the given operand at the given position.
    pub fn location_at(&self, index: usize, position: Position) -> Location {
        self.elements[index].get(position)
    }

    /// Returns the location of the edge itself relative to the given operand.
    pub fn location(&self, index: usize) -> Location {
        self.elements[index].get(Position::On)
    }

    pub fn set_location_at(&mut self, index: usize, position: Position, location: Location) {
        self.elements[index].set(position, location);
    }

    pub fn set_location(&mut self, index: usize, location: Location) {
        self.elements[index].set(Position::On, location);
    }

    pub fn set_all_locations(&mut self, index: usize, location: Location) {
        self.elements[index].set_all(location);
    }

    pub fn set_all_locations_if_null(&mut self, index: usize, location: Location) {
        self.elements[index].set_all_if_null(location);
    }

    /// Fills the unknown locations of self with the ones of rhs.
    pub fn merge(&mut self, rhs: &Self) {
        self.elements
            .iter_mut()
            .zip(&rhs.elements)
            .for_each(|(element, other)| element.merge(other));
    }

    /// Returns the amount of operands the label knows something about.
    pub fn geometry_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|element| !element.is_null())
            .count()
    }

    pub fn is_null(&self, index: usize) -> bool {
        self.elements[index].is_null()
    }

    pub fn is_any_null(&self, index: usize) -> bool {
        self.elements[index].is_any_null()
    }

    /// Returns true if, and only if, the label is an area label for any operand.
    pub fn is_area(&self) -> bool {
        self.elements.iter().any(TopologyLocation::is_area)
    }

    pub fn is_area_of(&self, index: usize) -> bool {
        self.elements[index].is_area()
    }

    pub fn is_line(&self, index: usize) -> bool {
        self.elements[index].is_line()
    }

    pub fn is_equal_on_side(&self, rhs: &Self, position: Position) -> bool {
        self.elements
            .iter()
            .zip(&rhs.elements)
            .all(|(element, other)| element.is_equal_on_side(other, position))
    }

    pub fn all_positions_equal(&self, index: usize, location: Location) -> bool {
        self.elements[index].all_positions_equal(location)
    }

    /// Drops the side locations relative to the given operand.
    pub fn to_line(&mut self, index: usize) {
        if self.elements[index].is_area() {
            self.elements[index].to_line();
        }
    }
}
