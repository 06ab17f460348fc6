//! Cluster Binary
//!
//! Splits the stops of one import into size-balanced clusters and writes
//! each stop's cluster label as JSON Lines.
//!
//! Options: --input, --import-id, --amount, --deviation, --output

use geobalance::*;

fn main() -> anyhow::Result<()> {
    log();
    cli::CLI::run()
}
