use crate::Energy;
use crate::SEEDING_JITTER;
use crate::geometry::Coordinate;
use crate::geometry::PointSet;
use rand::Rng;
use rand::SeedableRng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::SmallRng;
use rayon::prelude::*;

/// Deterministic k-means++ initialization.
///
/// 1. choose 1st centroid uniformly from the dataset
/// 2. choose nth centroid with probability proportional to squared distance
///    to the nearest chosen centroid
/// 3. once every remaining point coincides with a chosen centroid, nudge a
///    chosen point off its position instead of picking a duplicate
///
/// The generator is seeded from configuration only, so identical inputs
/// always produce identical centroids.
#[derive(Debug, Clone, Copy)]
pub struct Seeding {
    seed: u64,
}

impl From<u64> for Seeding {
    fn from(seed: u64) -> Self {
        Self { seed }
    }
}

impl Seeding {
    pub fn centroids(&self, points: &PointSet, k: usize) -> Vec<Coordinate> {
        let n = points.len();
        let ref mut rng = SmallRng::seed_from_u64(self.seed);
        let mut centroids = Vec::with_capacity(k);
        let mut potentials = vec![Energy::INFINITY; n];
        let jitter = Self::jitter(points);
        while centroids.len() < k {
            let next = match centroids.len() {
                0 => *points.coordinate(rng.random_range(0..n)),
                _ => match WeightedIndex::new(potentials.iter()) {
                    Ok(weights) => *points.coordinate(weights.sample(rng)),
                    Err(_) => {
                        let base = points.coordinate(rng.random_range(0..n));
                        let radius = jitter * centroids.len() as f64;
                        let angle = rng.random::<f64>() * std::f64::consts::TAU;
                        log::debug!("{:<32}{:<32}", "perturbing duplicate centroid", base);
                        base.nudge(radius, angle)
                    }
                },
            };
            potentials = points
                .points()
                .par_iter()
                .map(|p| p.coordinate().distance(&next))
                .collect::<Vec<Energy>>()
                .into_iter()
                .zip(potentials.into_iter())
                .map(|(d0, d1)| Energy::min(d0, d1))
                .collect::<Vec<Energy>>();
            centroids.push(next);
        }
        centroids
    }

    /// Nudge radius: a vanishing fraction of the data extent, never zero.
    fn jitter(points: &PointSet) -> f64 {
        (points.extent() * SEEDING_JITTER).max(SEEDING_JITTER)
    }
}
