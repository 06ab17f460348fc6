use super::*;
use crate::ClusterError;
use crate::Energy;
use crate::geometry::Coordinate;
use crate::geometry::PointSet;
use rayon::prelude::*;
use std::time::Instant;

/// Balanced assignment of points to fixed centroids.
///
/// A transportation problem: every point ships one unit to some cluster,
/// every cluster receives between `capacity.min()` and `capacity.max()`
/// units, and shipping point `i` to cluster `j` costs the squared distance
/// between them.
///
/// # Contract
///
/// On `Ok`, the assignment covers every point and satisfies the capacity
/// bounds. Implementations may stop early once `deadline` has passed and
/// return [`ClusterError::SolverTimeout`]; a problem without any feasible
/// assignment yields [`ClusterError::InfeasibleCapacity`].
pub trait Transport: Sync {
    fn solve(
        &self,
        points: &PointSet,
        centroids: &[Coordinate],
        capacity: &Capacity,
        deadline: Option<Instant>,
    ) -> Result<Assignment, ClusterError>;

    /// N × K matrix of squared point-to-centroid distances, in point order.
    fn costs(&self, points: &PointSet, centroids: &[Coordinate]) -> Vec<Vec<Energy>> {
        points
            .points()
            .par_iter()
            .map(|p| {
                centroids
                    .iter()
                    .map(|c| p.coordinate().distance(c))
                    .collect::<Vec<Energy>>()
            })
            .collect::<Vec<Vec<Energy>>>()
    }
}

/// Rejects lower bounds that demand more points than exist.
/// Upper bounds too tight to hold every point surface as unrouted flow.
pub(super) fn balanced(capacity: &Capacity) -> Result<(), ClusterError> {
    let (n, k, min, max) = (capacity.n(), capacity.k(), capacity.min(), capacity.max());
    if k * min > n || min > max {
        return Err(crate::Infeasibility::Unbalanced { k, n, min, max }.into());
    }
    Ok(())
}
