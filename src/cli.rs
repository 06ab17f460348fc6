//! Command-line driver: fetch one import, cluster it, write labels back.
use crate::clustering::ClusterSpec;
use crate::clustering::Config;
use crate::clustering::Engine;
use crate::clustering::Label;
use crate::clustering::Phase;
use crate::geometry::Excluded;
use crate::io::Courier;
use crate::io::Failure;
use crate::io::JsonSink;
use crate::io::JsonSource;
use crate::io::Source;
use crate::*;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Environment fallback for `--time-limit`.
const TIME_LIMIT_VAR: &str = "CLUSTER_TIME_LIMIT";

#[derive(Debug, Parser)]
#[command(name = "cluster", about = "Split an import's stops into size-balanced clusters")]
pub struct Args {
    /// JSON file of `{ "<import id>": [record, ...] }`
    #[arg(long)]
    input: PathBuf,
    /// Import batch to cluster
    #[arg(long)]
    import_id: String,
    /// Number of clusters
    #[arg(long)]
    amount: usize,
    /// Tolerated fraction of deviation from the even split, in [0, 1)
    #[arg(long)]
    deviation: f64,
    /// JSON Lines file receiving one `{id, cluster_id}` per stop
    #[arg(long)]
    output: PathBuf,
    /// Seed for centroid initialization
    #[arg(long, default_value_t = KMEANS_SEED)]
    seed: u64,
    /// Cap on assignment passes
    #[arg(long, default_value_t = KMEANS_MAX_ITERATIONS)]
    max_iterations: usize,
    /// Wall-clock budget such as 30s, 5m, 2h
    #[arg(long, value_parser = time_limit)]
    time_limit: Option<Duration>,
    /// Fail instead of using the greedy fallback when the budget runs out
    #[arg(long)]
    no_fallback: bool,
    /// Updates per sink write
    #[arg(long, default_value_t = SINK_BATCH_SIZE)]
    batch_size: usize,
    /// Extra attempts per failed sink write
    #[arg(long, default_value_t = SINK_RETRIES)]
    retries: usize,
}

fn time_limit(s: &str) -> Result<Duration, String> {
    parse_duration(s).ok_or_else(|| format!("invalid duration {:?}, expected e.g. 30s, 5m, 2h", s))
}

impl Args {
    fn config(&self) -> Config {
        let config = Config::default()
            .with_seed(self.seed)
            .with_max_iterations(self.max_iterations);
        let config = match self.time_limit.or_else(|| {
            std::env::var(TIME_LIMIT_VAR)
                .ok()
                .and_then(|s| parse_duration(&s))
        }) {
            Some(limit) => config.with_time_limit(limit),
            None => config,
        };
        match self.no_fallback {
            true => config.without_fallback(),
            false => config,
        }
    }
    fn spec(&self) -> ClusterSpec {
        ClusterSpec::from((self.amount, self.deviation))
    }
}

/// What the run printed on stdout.
#[derive(Debug, serde::Serialize)]
pub struct Summary<'a> {
    message: &'static str,
    import_id: &'a str,
    clusters: &'a [Label],
    excluded: Excluded,
    phase: Phase,
    iterations: usize,
    approximate: bool,
    written: usize,
    failed: &'a [Failure],
}

pub struct CLI(Args);

impl From<Args> for CLI {
    fn from(args: Args) -> Self {
        Self(args)
    }
}

impl CLI {
    pub fn run() -> anyhow::Result<()> {
        Self::from(Args::parse()).execute()
    }

    fn execute(&self) -> anyhow::Result<()> {
        let args = &self.0;
        log::info!("{:<32}{:<32}", "clustering import", args.import_id);
        let records = JsonSource::from(args.input.clone()).fetch(&args.import_id)?;
        let result = Engine::from(args.config()).run(records, args.spec())?;
        let file = std::fs::File::create(&args.output)?;
        let sink = JsonSink::from(std::io::BufWriter::new(file));
        let report = Courier::from(sink)
            .with_batch_size(args.batch_size)
            .with_retries(args.retries)
            .deliver(&result.updates());
        let summary = Summary {
            message: "clustering complete",
            import_id: &args.import_id,
            clusters: result.labels(),
            excluded: result.excluded(),
            phase: result.phase(),
            iterations: result.iterations(),
            approximate: result.approximate(),
            written: report.written,
            failed: &report.failed,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}
