use super::*;
use crate::ClusterError;
use crate::Energy;
use crate::Infeasibility;
use crate::geometry::Coordinate;
use crate::geometry::PointSet;
use std::time::Instant;

/// Nearest-centroid assignment followed by capacity repair.
///
/// Fallback for when [`MinCostFlow`] cannot finish within its time budget.
/// Always feasible when the bounds are, but not cost-minimal.
///
/// # Algorithm
///
/// 1. Assign each point to its nearest centroid (lower index on ties)
/// 2. While some cluster exceeds `max`, move the member with the cheapest
///    detour into a cluster that still has room
/// 3. While some cluster is below `min`, pull in the point with the cheapest
///    detour from a cluster that can spare one
///
/// # Complexity
///
/// O(N × K) per moved point.
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl Transport for Greedy {
    fn solve(
        &self,
        points: &PointSet,
        centroids: &[Coordinate],
        capacity: &Capacity,
        _: Option<Instant>,
    ) -> Result<Assignment, ClusterError> {
        balanced(capacity)?;
        let (n, k) = (capacity.n(), capacity.k());
        if k * capacity.max() < n {
            return Err(Infeasibility::Unrouted {
                routed: k * capacity.max(),
                required: n,
            }
            .into());
        }
        let ref costs = self.costs(points, centroids);
        let mut clusters = costs
            .iter()
            .map(|row| Self::nearest(row))
            .collect::<Vec<usize>>();
        let mut sizes = Assignment::from(clusters.clone()).sizes(k);
        while let Some(from) = (0..k).find(|&j| sizes[j] > capacity.max()) {
            let (i, to) = (0..n)
                .filter(|&i| clusters[i] == from)
                .flat_map(|i| (0..k).map(move |to| (i, to)))
                .filter(|&(_, to)| sizes[to] < capacity.max())
                .min_by(|&(i1, t1), &(i2, t2)| {
                    let d1 = costs[i1][t1] - costs[i1][from];
                    let d2 = costs[i2][t2] - costs[i2][from];
                    d1.total_cmp(&d2)
                })
                .expect("total capacity holds every point");
            clusters[i] = to;
            sizes[from] -= 1;
            sizes[to] += 1;
        }
        while let Some(to) = (0..k).find(|&j| sizes[j] < capacity.min()) {
            let i = (0..n)
                .filter(|&i| sizes[clusters[i]] > capacity.min())
                .min_by(|&i1, &i2| {
                    let d1 = costs[i1][to] - costs[i1][clusters[i1]];
                    let d2 = costs[i2][to] - costs[i2][clusters[i2]];
                    d1.total_cmp(&d2)
                })
                .expect("minimum sizes sum to at most N");
            sizes[clusters[i]] -= 1;
            sizes[to] += 1;
            clusters[i] = to;
        }
        Ok(Assignment::from(clusters))
    }
}

impl Greedy {
    /// Index of the cheapest centroid; first wins on ties.
    fn nearest(row: &[Energy]) -> usize {
        row.iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(j, _)| j)
            .unwrap_or(0)
    }
}
