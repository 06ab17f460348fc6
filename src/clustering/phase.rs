/// Lifecycle of a clustering run.
///
/// ```text
/// Initializing → Iterating → Converged
///                          → MaxIterationsReached
///                          → Oscillating
///                          → BudgetExhausted
///                          → Infeasible
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Phase {
    Initializing,
    Iterating,
    /// Two consecutive passes produced the same assignment.
    Converged,
    /// Iteration cap hit; the best assignment seen is kept.
    MaxIterationsReached,
    /// An earlier, non-consecutive assignment came back.
    Oscillating,
    /// Wall-clock budget ran out after a feasible assignment was found.
    BudgetExhausted,
    /// No assignment satisfies the size bounds.
    Infeasible,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Initializing | Self::Iterating)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initializing => write!(f, "initializing"),
            Self::Iterating => write!(f, "iterating"),
            Self::Converged => write!(f, "converged"),
            Self::MaxIterationsReached => write!(f, "max iterations reached"),
            Self::Oscillating => write!(f, "oscillating"),
            Self::BudgetExhausted => write!(f, "budget exhausted"),
            Self::Infeasible => write!(f, "infeasible"),
        }
    }
}
