/// Incremental aggregation of points into a centroid.
///
/// The "absorb" pattern generalizes mean computation: samples are folded in
/// one at a time starting from an empty `Default` aggregate, and the
/// aggregate is read back once the fold is complete.
///
/// # Invariant
///
/// `absorb` is associative, so folding points in a fixed order always yields
/// the same bits regardless of how the points were produced.
pub trait Absorb: Default {
    /// Combines this aggregate with another, producing a merged result.
    fn absorb(self, other: &Self) -> Self;
}
