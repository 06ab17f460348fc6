//! Raw records and the point set admitted from them.
mod admission;
mod coordinate;
mod point;
mod points;
mod record;

pub use admission::*;
pub use coordinate::*;
pub use point::*;
pub use points::*;
pub use record::*;
