use std::time::Duration;

/// Why a clustering problem cannot be solved under its size bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum Infeasibility {
    /// K was zero.
    NoClusters,
    /// More clusters requested than there are points to fill them.
    TooManyClusters { k: usize, n: usize },
    /// Deviation outside [0, 1) or not finite.
    Deviation(f64),
    /// Rounded bounds crossed each other.
    Inverted { min: usize, max: usize },
    /// K clusters of [min, max] members cannot hold exactly N points.
    Unbalanced { k: usize, n: usize, min: usize, max: usize },
    /// The flow network could only route part of the points.
    Unrouted { routed: usize, required: usize },
}

impl std::fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoClusters => write!(f, "cluster count must be at least 1"),
            Self::TooManyClusters { k, n } => {
                write!(f, "cannot form {} non-empty clusters from {} points", k, n)
            }
            Self::Deviation(d) => write!(f, "deviation {} is not a fraction in [0, 1)", d),
            Self::Inverted { min, max } => {
                write!(f, "minimum size {} exceeds maximum size {}", min, max)
            }
            Self::Unbalanced { k, n, min, max } => write!(
                f,
                "{} clusters sized [{}, {}] cannot hold {} points",
                k, min, max, n
            ),
            Self::Unrouted { routed, required } => write!(
                f,
                "no feasible assignment: routed {} of {} points",
                routed, required
            ),
        }
    }
}

/// Errors returned by the clustering engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ClusterError {
    /// No record survived admission. Carries how many were excluded.
    NoValidInput { excluded: usize },
    /// Size bounds cannot be satisfied.
    InfeasibleCapacity(Infeasibility),
    /// The first feasible assignment could not be found within budget.
    SolverTimeout { elapsed: Duration },
}

impl std::fmt::Display for ClusterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoValidInput { excluded } => write!(
                f,
                "no valid coordinates found ({} records excluded)",
                excluded
            ),
            Self::InfeasibleCapacity(reason) => write!(f, "infeasible capacity: {}", reason),
            Self::SolverTimeout { elapsed } => write!(
                f,
                "solver timed out after {:?} without a feasible assignment",
                elapsed
            ),
        }
    }
}

impl std::error::Error for ClusterError {}

impl From<Infeasibility> for ClusterError {
    fn from(reason: Infeasibility) -> Self {
        Self::InfeasibleCapacity(reason)
    }
}
