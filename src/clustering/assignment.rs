use super::*;
use crate::Energy;
use crate::geometry::Coordinate;
use crate::geometry::PointSet;

/// Cluster index per point, aligned with [`PointSet`] order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment(Vec<usize>);

impl Assignment {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn cluster(&self, i: usize) -> usize {
        self.0[i]
    }
    pub fn clusters(&self) -> &[usize] {
        &self.0
    }
    /// Indices of points assigned to cluster `j`.
    pub fn members(&self, j: usize) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == j)
            .map(|(i, _)| i)
    }
    /// Member count of each of the `k` clusters.
    pub fn sizes(&self, k: usize) -> Vec<usize> {
        let mut sizes = vec![0; k];
        self.0.iter().for_each(|&j| sizes[j] += 1);
        sizes
    }
    /// Whether every cluster size lies within the capacity bounds.
    pub fn is_feasible(&self, capacity: &Capacity) -> bool {
        self.len() == capacity.n()
            && self.0.iter().all(|&j| j < capacity.k())
            && self
                .sizes(capacity.k())
                .into_iter()
                .all(|size| capacity.admits(size))
    }
    /// Means of assigned points. An empty cluster keeps its previous centroid.
    pub fn centroids(&self, points: &PointSet, previous: &[Coordinate]) -> Vec<Coordinate> {
        let mut sums = vec![Centroid::default(); previous.len()];
        self.0
            .iter()
            .zip(points.coordinates())
            .for_each(|(&j, c)| sums[j] = sums[j].absorb(&Centroid::from(c)));
        sums.iter()
            .zip(previous.iter())
            .map(|(sum, prev)| sum.mean().unwrap_or(*prev))
            .collect()
    }
    /// Total squared distance from each point to its cluster's centroid.
    pub fn cost(&self, points: &PointSet, centroids: &[Coordinate]) -> Energy {
        self.0
            .iter()
            .zip(points.coordinates())
            .map(|(&j, c)| c.distance(&centroids[j]))
            .sum()
    }
}

impl From<Vec<usize>> for Assignment {
    fn from(clusters: Vec<usize>) -> Self {
        Self(clusters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::tests::line;

    #[test]
    fn sizes_and_members() {
        let a = Assignment::from(vec![0, 1, 1, 2, 1]);
        assert_eq!(a.sizes(3), vec![1, 3, 1]);
        assert_eq!(a.members(1).collect::<Vec<_>>(), vec![1, 2, 4]);
    }

    #[test]
    fn feasibility_checks_every_bound() {
        let a = Assignment::from(vec![0, 0, 1, 1, 1]);
        assert!(a.is_feasible(&Capacity::raw(5, 2, 2, 3)));
        assert!(!a.is_feasible(&Capacity::raw(5, 2, 3, 3)));
        assert!(!a.is_feasible(&Capacity::raw(5, 2, 1, 2)));
        assert!(!a.is_feasible(&Capacity::raw(6, 2, 2, 3)));
    }

    #[test]
    fn centroids_are_means() {
        let points = line(4);
        let a = Assignment::from(vec![0, 0, 1, 1]);
        let previous = vec![Coordinate::from((9., 9.)); 2];
        let centroids = a.centroids(&points, &previous);
        assert_eq!(centroids[0], Coordinate::from((0.5, 0.)));
        assert_eq!(centroids[1], Coordinate::from((2.5, 0.)));
        assert_eq!(a.cost(&points, &centroids), 1.);
    }

    #[test]
    fn empty_cluster_keeps_previous_centroid() {
        let points = line(3);
        let a = Assignment::from(vec![0, 0, 0]);
        let previous = vec![Coordinate::from((1., 1.)), Coordinate::from((7., 7.))];
        let centroids = a.centroids(&points, &previous);
        assert_eq!(centroids[0], Coordinate::from((1., 0.)));
        assert_eq!(centroids[1], Coordinate::from((7., 7.)));
    }
}
