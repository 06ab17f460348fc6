use super::*;
use crate::ClusterError;
use crate::geometry::Admission;
use crate::geometry::Record;

/// Entry point: raw records in, labelled clusters out.
///
/// Admission → capacity planning → seeded Lloyd iterations over exact
/// balanced assignments → label minting. Pure and synchronous; fetching
/// records and persisting labels happen on either side of [`Engine::run`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    config: Config,
}

impl From<Config> for Engine {
    fn from(config: Config) -> Self {
        Self { config }
    }
}

impl Engine {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(&self, records: Vec<Record>, spec: ClusterSpec) -> Result<ClusterResult, ClusterError> {
        let ref admission = Admission::try_from(records)?;
        let capacity = Capacity::plan(admission.points().len(), spec)?;
        let convergence = Controller::from((admission.points(), capacity, self.config)).run()?;
        log::info!("{:<32}{:<32}", "clustering cost", convergence.cost());
        if convergence.approximate() {
            log::warn!("{:<32}{:<32}", "result from greedy fallback", convergence.phase());
        }
        Ok(ClusterResult::from((admission, convergence)))
    }
}
