use super::*;
use crate::geometry::Coordinate;

/// Running coordinate sum of the points assigned to one cluster.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Centroid {
    lon: f64,
    lat: f64,
    n: usize,
}

impl Centroid {
    pub fn n(&self) -> usize {
        self.n
    }
    /// Arithmetic mean of absorbed points, or `None` if nothing was absorbed.
    pub fn mean(&self) -> Option<Coordinate> {
        match self.n {
            0 => None,
            n => Some(Coordinate::from((
                self.lon / n as f64,
                self.lat / n as f64,
            ))),
        }
    }
}

impl Absorb for Centroid {
    fn absorb(self, other: &Self) -> Self {
        Self {
            lon: self.lon + other.lon,
            lat: self.lat + other.lat,
            n: self.n + other.n,
        }
    }
}

impl From<&Coordinate> for Centroid {
    fn from(c: &Coordinate) -> Self {
        Self {
            lon: c.lon(),
            lat: c.lat(),
            n: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_absorbed_points() {
        let centroid = [(0., 0.), (2., 0.), (4., 6.)]
            .into_iter()
            .map(Coordinate::from)
            .map(|ref c| Centroid::from(c))
            .fold(Centroid::default(), |a, ref b| a.absorb(b));
        assert_eq!(centroid.n(), 3);
        assert_eq!(centroid.mean(), Some(Coordinate::from((2., 2.))));
    }

    #[test]
    fn empty_has_no_mean() {
        assert_eq!(Centroid::default().mean(), None);
    }
}
