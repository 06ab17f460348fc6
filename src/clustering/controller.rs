use super::*;
use crate::ClusterError;
use crate::Energy;
use crate::geometry::Coordinate;
use crate::geometry::PointSet;
use std::collections::HashSet;
use std::time::Instant;

/// Outcome of the iterate-until-stable loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Convergence {
    assignment: Assignment,
    centroids: Vec<Coordinate>,
    cost: Energy,
    iterations: usize,
    phase: Phase,
    approximate: bool,
}

impl Convergence {
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }
    pub fn centroids(&self) -> &[Coordinate] {
        &self.centroids
    }
    /// Total squared distance of points to their cluster means.
    pub fn cost(&self) -> Energy {
        self.cost
    }
    /// Assignment passes executed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    /// Whether the assignment came from the greedy fallback.
    pub fn approximate(&self) -> bool {
        self.approximate
    }
}

/// Drives Lloyd iterations over a balanced assignment step.
///
/// Each pass solves the transportation problem for the current centroids,
/// then moves every centroid to the mean of its members. Both steps can
/// only lower the total cost, so the loop settles once an assignment repeats.
/// Until then the lowest-cost assignment seen is kept, which is what gets
/// returned if the iteration cap or the time budget is hit first.
pub struct Controller<'a, T = MinCostFlow>
where
    T: Transport,
{
    points: &'a PointSet,
    capacity: Capacity,
    config: Config,
    solver: T,
    phase: Phase,
}

impl<'a> From<(&'a PointSet, Capacity, Config)> for Controller<'a, MinCostFlow> {
    fn from((points, capacity, config): (&'a PointSet, Capacity, Config)) -> Self {
        Self::with_solver(points, capacity, config, MinCostFlow)
    }
}

impl<'a, T> Controller<'a, T>
where
    T: Transport,
{
    pub fn with_solver(points: &'a PointSet, capacity: Capacity, config: Config, solver: T) -> Self {
        debug_assert_eq!(points.len(), capacity.n());
        Self {
            points,
            capacity,
            config,
            solver,
            phase: Phase::Initializing,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn transition(&mut self, next: Phase) {
        log::debug!("{:<32}{:<32}", "kmeans phase", format!("{} → {}", self.phase, next));
        self.phase = next;
    }

    fn expired(deadline: Option<Instant>) -> bool {
        deadline.is_some_and(|d| Instant::now() >= d)
    }

    pub fn run(mut self) -> Result<Convergence, ClusterError> {
        let start = Instant::now();
        let deadline = self.config.time_limit().map(|t| start + t);
        let points = self.points;
        let capacity = self.capacity;
        log::info!("{:<32}{:<32}", "initialize  kmeans", capacity);
        let mut centroids = Seeding::from(self.config.seed()).centroids(points, capacity.k());
        self.transition(Phase::Iterating);
        log::info!("{:<32}{:<32}", "clustering kmeans", capacity);
        let mut best: Option<Convergence> = None;
        let mut history = HashSet::new();
        let mut previous: Option<Assignment> = None;
        let mut iterations = 0;
        while iterations < self.config.max_iterations() {
            iterations += 1;
            let (assignment, approximate) =
                match self.solver.solve(points, &centroids, &capacity, deadline) {
                    Ok(assignment) => (assignment, false),
                    Err(ClusterError::SolverTimeout { .. }) if best.is_some() => {
                        iterations -= 1;
                        self.transition(Phase::BudgetExhausted);
                        break;
                    }
                    Err(ClusterError::SolverTimeout { .. }) if self.config.fallback() => {
                        log::warn!("{:<32}{:<32}", "exact solver timed out", "using greedy repair");
                        match Greedy.solve(points, &centroids, &capacity, None) {
                            Ok(assignment) => (assignment, true),
                            Err(e) => {
                                self.transition(Phase::Infeasible);
                                return Err(e);
                            }
                        }
                    }
                    Err(ClusterError::SolverTimeout { .. }) => {
                        return Err(ClusterError::SolverTimeout {
                            elapsed: start.elapsed(),
                        });
                    }
                    Err(e) => {
                        self.transition(Phase::Infeasible);
                        return Err(e);
                    }
                };
            debug_assert!(assignment.is_feasible(&capacity));
            let next = assignment.centroids(points, &centroids);
            let cost = assignment.cost(points, &next);
            log::debug!("{:<32}{:<32}", format!("kmeans iteration {}", iterations), cost);
            let candidate = Convergence {
                assignment,
                centroids: next,
                cost,
                iterations,
                phase: Phase::Iterating,
                approximate,
            };
            if previous.as_ref() == Some(&candidate.assignment) {
                self.transition(Phase::Converged);
                log::info!("{:<32}{:<32}", "kmeans converged", iterations);
                return Ok(Convergence {
                    phase: Phase::Converged,
                    ..candidate
                });
            }
            if best.as_ref().is_none_or(|b| cost < b.cost) {
                best = Some(candidate.clone());
            }
            if history.contains(&candidate.assignment) {
                self.transition(Phase::Oscillating);
                break;
            }
            if Self::expired(deadline) {
                self.transition(Phase::BudgetExhausted);
                break;
            }
            history.insert(candidate.assignment.clone());
            previous = Some(candidate.assignment);
            centroids = candidate.centroids;
        }
        if !self.phase.is_terminal() {
            self.transition(Phase::MaxIterationsReached);
        }
        log::info!("{:<32}{:<32}", "kmeans stopped", self.phase);
        best.map(|b| Convergence {
            iterations,
            phase: self.phase,
            ..b
        })
        .ok_or(ClusterError::SolverTimeout {
            elapsed: start.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Infeasibility;
    use crate::clustering::tests::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn run(points: &PointSet, k: usize, d: f64, config: Config) -> Result<Convergence, ClusterError> {
        let capacity = Capacity::plan(points.len(), ClusterSpec::from((k, d)))?;
        Controller::from((points, capacity, config)).run()
    }

    /// Cycles through a fixed list of assignments, ignoring centroids.
    struct Cycle {
        assignments: Vec<Assignment>,
        calls: AtomicUsize,
    }

    impl Transport for Cycle {
        fn solve(
            &self,
            _: &PointSet,
            _: &[Coordinate],
            _: &Capacity,
            _: Option<Instant>,
        ) -> Result<Assignment, ClusterError> {
            let t = self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(self.assignments[t % self.assignments.len()].clone())
        }
    }

    #[test]
    fn line_splits_at_midpoint() {
        let points = line(10);
        let result = run(&points, 2, 0., Config::default()).unwrap();
        assert_eq!(result.phase(), Phase::Converged);
        assert_eq!(result.assignment().sizes(2), vec![5, 5]);
        let left = result.assignment().cluster(0);
        assert!((0..5).all(|i| result.assignment().cluster(i) == left));
        assert!((5..10).all(|i| result.assignment().cluster(i) != left));
        assert!((result.cost() - 20.).abs() < 1e-9);
    }

    #[test]
    fn deterministic_across_runs() {
        let points = cloud(120, 11);
        let a = run(&points, 4, 0.1, Config::default()).unwrap();
        let b = run(&points, 4, 0.1, Config::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn iteration_cap_keeps_best() {
        let points = cloud(60, 5);
        let result = run(&points, 3, 0.2, Config::default().with_max_iterations(1)).unwrap();
        assert_eq!(result.phase(), Phase::MaxIterationsReached);
        assert_eq!(result.iterations(), 1);
        let capacity = Capacity::plan(60, ClusterSpec::from((3, 0.2))).unwrap();
        assert!(result.assignment().is_feasible(&capacity));
    }

    #[test]
    fn expired_budget_falls_back_to_greedy() {
        let points = cloud(40, 9);
        let config = Config::default().with_time_limit(Duration::ZERO);
        let result = run(&points, 4, 0., config).unwrap();
        assert!(result.approximate());
        assert_eq!(result.phase(), Phase::BudgetExhausted);
        assert_eq!(result.assignment().sizes(4), vec![10, 10, 10, 10]);
    }

    #[test]
    fn expired_budget_without_fallback_times_out() {
        let points = cloud(40, 9);
        let config = Config::default()
            .with_time_limit(Duration::ZERO)
            .without_fallback();
        assert!(matches!(
            run(&points, 4, 0., config),
            Err(ClusterError::SolverTimeout { .. })
        ));
    }

    #[test]
    fn unroutable_bounds_are_infeasible() {
        let points = line(7);
        let capacity = Capacity::raw(7, 2, 0, 3);
        let err = Controller::from((&points, capacity, Config::default()))
            .run()
            .unwrap_err();
        assert_eq!(
            err,
            ClusterError::InfeasibleCapacity(Infeasibility::Unrouted {
                routed: 6,
                required: 7,
            })
        );
    }

    #[test]
    fn repeated_assignment_is_oscillation() {
        let points = line(4);
        let capacity = Capacity::raw(4, 2, 2, 2);
        let near = Assignment::from(vec![0, 0, 1, 1]);
        let far = Assignment::from(vec![0, 1, 0, 1]);
        let solver = Cycle {
            assignments: vec![far.clone(), near.clone()],
            calls: AtomicUsize::new(0),
        };
        let result = Controller::with_solver(&points, capacity, Config::default(), solver)
            .run()
            .unwrap();
        assert_eq!(result.phase(), Phase::Oscillating);
        assert_eq!(result.iterations(), 3);
        assert_eq!(result.assignment(), &near);
        assert!((result.cost() - 1.).abs() < 1e-12);
    }

    #[test]
    fn identical_points_cost_nothing() {
        let points = self::points(&[(3., 4.); 9]);
        let result = run(&points, 3, 0., Config::default()).unwrap();
        assert_eq!(result.assignment().sizes(3), vec![3, 3, 3]);
        assert_eq!(result.cost(), 0.);
        assert!(result.centroids().iter().all(|c| *c == Coordinate::from((3., 4.))));
    }
}
