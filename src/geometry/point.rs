use super::*;

/// An admitted stop: caller identifier plus a finite coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    id: String,
    coordinate: Coordinate,
}

impl Point {
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }
}

impl From<(String, Coordinate)> for Point {
    fn from((id, coordinate): (String, Coordinate)) -> Self {
        debug_assert!(coordinate.is_finite());
        Self { id, coordinate }
    }
}
