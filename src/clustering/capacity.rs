use crate::ClusterError;
use crate::Infeasibility;

/// Requested cluster count and tolerated deviation from the even split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterSpec {
    k: usize,
    deviation: f64,
}

impl ClusterSpec {
    pub fn k(&self) -> usize {
        self.k
    }
    pub fn deviation(&self) -> f64 {
        self.deviation
    }
}

impl From<(usize, f64)> for ClusterSpec {
    fn from((k, deviation): (usize, f64)) -> Self {
        Self { k, deviation }
    }
}

/// Per-cluster size bounds for N points in K clusters.
///
/// `min = floor(N/K · (1 - d))` and `max = ceil(N/K · (1 + d))`. The
/// rounding is deliberately asymmetric: it only ever widens the band, and
/// the feasibility boundary callers observe depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    n: usize,
    k: usize,
    min: usize,
    max: usize,
}

impl Capacity {
    /// Derives and validates bounds for `n` points.
    pub fn plan(n: usize, spec: ClusterSpec) -> Result<Self, ClusterError> {
        let k = spec.k();
        let d = spec.deviation();
        if k < 1 {
            return Err(Infeasibility::NoClusters.into());
        }
        if k > n {
            return Err(Infeasibility::TooManyClusters { k, n }.into());
        }
        if !d.is_finite() || d < 0. || d >= 1. {
            return Err(Infeasibility::Deviation(d).into());
        }
        let even = n as f64 / k as f64;
        let min = (even * (1. - d)).floor() as usize;
        let max = (even * (1. + d)).ceil() as usize;
        if min > max {
            return Err(Infeasibility::Inverted { min, max }.into());
        }
        if k * min > n || k * max < n {
            return Err(Infeasibility::Unbalanced { k, n, min, max }.into());
        }
        let capacity = Self { n, k, min, max };
        log::info!("{:<32}{:<32}", "planned capacity", capacity);
        Ok(capacity)
    }
    pub fn n(&self) -> usize {
        self.n
    }
    pub fn k(&self) -> usize {
        self.k
    }
    pub fn min(&self) -> usize {
        self.min
    }
    pub fn max(&self) -> usize {
        self.max
    }
    /// Points routed through the shared overflow once every cluster holds `min`.
    pub fn slack(&self) -> usize {
        self.n - self.k * self.min
    }
    /// Whether a cluster of this size respects the bounds.
    pub fn admits(&self, size: usize) -> bool {
        self.min <= size && size <= self.max
    }
}

#[cfg(test)]
impl Capacity {
    /// Unvalidated bounds, for exercising solvers on infeasible inputs.
    pub(crate) fn raw(n: usize, k: usize, min: usize, max: usize) -> Self {
        Self { n, k, min, max }
    }
}

impl std::fmt::Display for Capacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "N={} K={} [{}, {}]", self.n, self.k, self.min, self.max)
    }
}
