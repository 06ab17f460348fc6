use super::*;
use crate::Degrees;

/// Ordered, non-empty collection of points with unique identifiers.
///
/// Only [`Admission`] builds one, which is what upholds both invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet(Vec<Point>);

impl PointSet {
    pub(super) fn new(points: Vec<Point>) -> Self {
        debug_assert!(!points.is_empty());
        Self(points)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn points(&self) -> &[Point] {
        &self.0
    }
    pub fn point(&self, i: usize) -> &Point {
        &self.0[i]
    }
    pub fn coordinate(&self, i: usize) -> &Coordinate {
        self.0[i].coordinate()
    }
    pub fn coordinates(&self) -> impl Iterator<Item = &Coordinate> + '_ {
        self.0.iter().map(Point::coordinate)
    }
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(Point::id)
    }
    /// Length of the bounding box diagonal.
    pub fn extent(&self) -> Degrees {
        let (lo, hi) = self.coordinates().fold(
            ((Degrees::MAX, Degrees::MAX), (Degrees::MIN, Degrees::MIN)),
            |((x0, y0), (x1, y1)), c| {
                (
                    (x0.min(c.lon()), y0.min(c.lat())),
                    (x1.max(c.lon()), y1.max(c.lat())),
                )
            },
        );
        Coordinate::from(lo).distance(&Coordinate::from(hi)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_spans_bounding_box() {
        let records = vec![
            Record::from(("a", 0., 0.)),
            Record::from(("b", 3., 1.)),
            Record::from(("c", 1., 4.)),
        ];
        let admission = Admission::try_from(records).unwrap();
        assert_eq!(admission.points().extent(), 5.);
    }

    #[test]
    fn extent_of_single_point_is_zero() {
        let admission = Admission::try_from(vec![Record::from(("a", 7., 7.))]).unwrap();
        assert_eq!(admission.points().extent(), 0.);
    }
}
