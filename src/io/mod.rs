//! Collaborators on either side of the engine.
//!
//! A [`Source`] hands over the raw records of one import batch before a run;
//! a [`Sink`] persists the point → label mapping afterwards. The engine never
//! sees either. [`Courier`] owns delivery policy: batching, retries, and a
//! structured list of rows that could not be written.
mod courier;
mod sink;
mod source;
mod update;

pub use courier::*;
pub use sink::*;
pub use source::*;
pub use update::*;
