//! Size-constrained k-means.
//!
//! ## Pipeline
//!
//! 1. **Capacity**: derive per-cluster [min, max] sizes from K and the deviation
//! 2. **Seeding**: deterministic k-means++ centroids
//! 3. **Controller**: alternate balanced assignment and centroid updates
//! 4. **Result**: mint one label per cluster and map points onto them
//!
//! ## Assignment Solvers
//!
//! - [`MinCostFlow`]: exact transportation solve by successive shortest paths
//! - [`Greedy`]: nearest-centroid-then-repair fallback under time pressure
//!
//! Both sit behind [`Transport`], so either can be swapped for another
//! min-cost-flow implementation.
mod absorb;
mod assignment;
mod capacity;
mod centroid;
mod config;
mod controller;
mod engine;
mod flow;
mod greedy;
mod phase;
mod result;
mod seeding;
mod transport;


pub use absorb::*;
pub use assignment::*;
pub use capacity::*;
pub use centroid::*;
pub use config::*;
pub use controller::*;
pub use engine::*;
pub use flow::*;
pub use greedy::*;
pub use phase::*;
pub use result::*;
pub use seeding::*;
pub use transport::*;
