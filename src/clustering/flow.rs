use super::*;
use crate::ClusterError;
use crate::Energy;
use crate::Infeasibility;
use crate::geometry::Coordinate;
use crate::geometry::PointSet;
use std::cmp::Ordering;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;

/// Exact balanced assignment via min-cost flow.
///
/// # Network
///
/// ```text
///            1, 0          1, d²(i,j)         min, 0
///   source ───────▶ point i ───────▶ cluster j ───────▶ sink
///                                       │                ▲
///                                       │ max-min, 0     │ N - K·min, 0
///                                       └──▶ overflow ───┘
/// ```
///
/// Every unit of flow reaching the sink is one point. The arcs into the sink
/// carry exactly `K·min + (N - K·min) = N` units, so a flow of value N
/// saturates every mandatory arc (each cluster gets at least `min`) while the
/// optional arcs cap each cluster at `max`. All arc costs are non-negative,
/// so successive shortest paths with Dijkstra and Johnson potentials finds
/// the cost-minimal such flow without a Bellman-Ford warm-up.
///
/// # Complexity
///
/// N augmentations of one unit, each a Dijkstra over O(N·K) arcs:
/// O(N² · K · log(N·K)).
#[derive(Debug, Clone, Copy, Default)]
pub struct MinCostFlow;

impl Transport for MinCostFlow {
    fn solve(
        &self,
        points: &PointSet,
        centroids: &[Coordinate],
        capacity: &Capacity,
        deadline: Option<Instant>,
    ) -> Result<Assignment, ClusterError> {
        balanced(capacity)?;
        let start = Instant::now();
        let ref costs = self.costs(points, centroids);
        let mut network = Network::from((costs, capacity));
        let routed = network
            .route(deadline)
            .ok_or_else(|| ClusterError::SolverTimeout {
                elapsed: start.elapsed(),
            })?;
        if routed < capacity.n() {
            return Err(Infeasibility::Unrouted {
                routed,
                required: capacity.n(),
            }
            .into());
        }
        log::trace!("{:<32}{:<32?}", "min cost flow solved", start.elapsed());
        Ok(network.assignment())
    }
}

/// Residual arc. Arcs are stored in pairs so `a ^ 1` is the reverse of `a`.
#[derive(Debug, Clone, Copy)]
struct Arc {
    to: usize,
    cap: usize,
    cost: Energy,
}

/// Dijkstra frontier entry, ordered by distance then node index so that
/// ties settle on the lower node (and therefore the lower cluster) first.
///
/// Tie-breaking applies to each augmenting path, not to the point order of
/// the final assignment: a later path may reroute an earlier point through
/// the residual graph at equal cost. The result is deterministic and
/// cost-minimal either way.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    dist: Energy,
    node: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist
            .total_cmp(&other.dist)
            .then(self.node.cmp(&other.node))
    }
}
impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Eq for Frontier {}
impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

/// Residual graph for one assignment pass.
struct Network {
    n: usize,
    k: usize,
    arcs: Vec<Arc>,
    graph: Vec<Vec<usize>>,
}

impl Network {
    const SOURCE: usize = 0;
    fn point(&self, i: usize) -> usize {
        1 + i
    }
    fn cluster(&self, j: usize) -> usize {
        1 + self.n + j
    }
    fn overflow(&self) -> usize {
        1 + self.n + self.k
    }
    fn sink(&self) -> usize {
        2 + self.n + self.k
    }
    fn nodes(&self) -> usize {
        3 + self.n + self.k
    }

    fn connect(&mut self, from: usize, to: usize, cap: usize, cost: Energy) {
        let a = self.arcs.len();
        self.arcs.push(Arc { to, cap, cost });
        self.arcs.push(Arc {
            to: from,
            cap: 0,
            cost: -cost,
        });
        self.graph[from].push(a);
        self.graph[to].push(a ^ 1);
    }

    /// Pushes units until every point is routed or no augmenting path is
    /// left. Returns the number routed, or `None` once `deadline` passes.
    fn route(&mut self, deadline: Option<Instant>) -> Option<usize> {
        let mut potential = vec![0.; self.nodes()];
        let mut routed = 0;
        while routed < self.n {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                return None;
            }
            let (dist, prev) = self.dijkstra(&potential);
            if dist[self.sink()].is_infinite() {
                break;
            }
            potential
                .iter_mut()
                .zip(dist.iter())
                .filter(|(_, d)| d.is_finite())
                .for_each(|(h, d)| *h += d);
            // every path leaves the source through a unit arc
            let mut v = self.sink();
            while v != Self::SOURCE {
                let a = prev[v];
                self.arcs[a].cap -= 1;
                self.arcs[a ^ 1].cap += 1;
                v = self.arcs[a ^ 1].to;
            }
            routed += 1;
        }
        Some(routed)
    }

    /// Shortest residual paths from the source under reduced costs.
    /// Returns distances and, per node, the arc it was reached through.
    fn dijkstra(&self, potential: &[Energy]) -> (Vec<Energy>, Vec<usize>) {
        let mut dist = vec![Energy::INFINITY; self.nodes()];
        let mut prev = vec![usize::MAX; self.nodes()];
        let mut heap = BinaryHeap::new();
        dist[Self::SOURCE] = 0.;
        heap.push(Reverse(Frontier {
            dist: 0.,
            node: Self::SOURCE,
        }));
        while let Some(Reverse(Frontier { dist: d, node: u })) = heap.pop() {
            if d > dist[u] {
                continue;
            }
            for &a in self.graph[u].iter() {
                let arc = self.arcs[a];
                if arc.cap == 0 {
                    continue;
                }
                // reduced costs are non-negative up to rounding
                let reduced = (arc.cost + potential[u] - potential[arc.to]).max(0.);
                let next = d + reduced;
                if next < dist[arc.to] {
                    dist[arc.to] = next;
                    prev[arc.to] = a;
                    heap.push(Reverse(Frontier {
                        dist: next,
                        node: arc.to,
                    }));
                }
            }
        }
        (dist, prev)
    }

    /// Reads the saturated point → cluster arcs back into an assignment.
    fn assignment(&self) -> Assignment {
        (0..self.n)
            .map(|i| {
                self.graph[self.point(i)]
                    .iter()
                    .filter(|&&a| a % 2 == 0)
                    .find(|&&a| self.arcs[a].cap == 0)
                    .map(|&a| self.arcs[a].to - self.cluster(0))
                    .expect("routed point has one saturated cluster arc")
            })
            .collect::<Vec<usize>>()
            .into()
    }
}

impl From<(&Vec<Vec<Energy>>, &Capacity)> for Network {
    fn from((costs, capacity): (&Vec<Vec<Energy>>, &Capacity)) -> Self {
        let n = capacity.n();
        let k = capacity.k();
        let mut network = Self {
            n,
            k,
            arcs: Vec::with_capacity(2 * (n * (k + 1) + 2 * k + 1)),
            graph: vec![Vec::new(); 3 + n + k],
        };
        for (i, row) in costs.iter().enumerate() {
            let p = network.point(i);
            network.connect(Self::SOURCE, p, 1, 0.);
            for (j, &cost) in row.iter().enumerate() {
                let c = network.cluster(j);
                network.connect(p, c, 1, cost);
            }
        }
        let (sink, overflow) = (network.sink(), network.overflow());
        for j in 0..k {
            let c = network.cluster(j);
            network.connect(c, sink, capacity.min(), 0.);
            network.connect(c, overflow, capacity.max() - capacity.min(), 0.);
        }
        network.connect(overflow, sink, capacity.slack(), 0.);
        network
    }
}
