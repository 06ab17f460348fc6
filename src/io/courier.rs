use super::*;
use crate::SINK_BATCH_SIZE;
use crate::SINK_RETRIES;

/// A row the sink would not accept, with the last error it gave.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Failure {
    pub id: String,
    pub reason: String,
}

/// Outcome of delivering a set of updates.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Report {
    pub written: usize,
    pub failed: Vec<Failure>,
}

impl Report {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Delivers updates to a [`Sink`] in batches.
///
/// A batch that still fails after `retries` extra attempts is written row by
/// row, so one bad row costs only itself. Rows that fail on their own are
/// collected into the [`Report`] rather than aborting delivery.
pub struct Courier<S>
where
    S: Sink,
{
    sink: S,
    batch_size: usize,
    retries: usize,
}

impl<S> From<S> for Courier<S>
where
    S: Sink,
{
    fn from(sink: S) -> Self {
        Self {
            sink,
            batch_size: SINK_BATCH_SIZE,
            retries: SINK_RETRIES,
        }
    }
}

impl<S> Courier<S>
where
    S: Sink,
{
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }
    pub fn into_inner(self) -> S {
        self.sink
    }

    pub fn deliver(&mut self, updates: &[Update]) -> Report {
        let mut report = Report::default();
        for batch in updates.chunks(self.batch_size) {
            match self.attempt(batch) {
                Ok(()) => report.written += batch.len(),
                Err(e) => {
                    log::warn!("{:<32}{:<32}", "batch write failed", e);
                    for update in batch {
                        match self.attempt(std::slice::from_ref(update)) {
                            Ok(()) => report.written += 1,
                            Err(e) => {
                                log::warn!("{:<32}{:<32}", "update failed", update.id);
                                report.failed.push(Failure {
                                    id: update.id.clone(),
                                    reason: e.to_string(),
                                });
                            }
                        }
                    }
                }
            }
        }
        log::info!("{:<32}{:<32}", "updates written", report.written);
        if !report.is_complete() {
            log::warn!("{:<32}{:<32}", "updates failed", report.failed.len());
        }
        report
    }

    fn attempt(&mut self, batch: &[Update]) -> anyhow::Result<()> {
        let mut attempt = 0;
        loop {
            match self.sink.write(batch) {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    log::debug!("{:<32}{:<32}", format!("retrying write #{}", attempt), e);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::Label;

    fn updates(ids: &[&str]) -> Vec<Update> {
        let label = Label::default();
        ids.iter().map(|id| Update::from((*id, label))).collect()
    }

    /// Fails the first `failures` calls, then accepts everything.
    struct Flaky {
        failures: usize,
        calls: usize,
        rows: Vec<Update>,
    }

    impl Sink for Flaky {
        fn write(&mut self, updates: &[Update]) -> anyhow::Result<()> {
            self.calls += 1;
            if self.calls <= self.failures {
                anyhow::bail!("connection reset");
            }
            self.rows.extend_from_slice(updates);
            Ok(())
        }
    }

    /// Rejects any batch containing a poisoned id.
    struct Picky {
        poison: &'static str,
        rows: Vec<Update>,
    }

    impl Sink for Picky {
        fn write(&mut self, updates: &[Update]) -> anyhow::Result<()> {
            if updates.iter().any(|u| u.id == self.poison) {
                anyhow::bail!("constraint violation on {}", self.poison);
            }
            self.rows.extend_from_slice(updates);
            Ok(())
        }
    }

    #[test]
    fn delivers_in_batches() {
        let rows = updates(&["a", "b", "c", "d", "e"]);
        let mut courier = Courier::from(Vec::new()).with_batch_size(2);
        let report = courier.deliver(&rows);
        assert_eq!(report.written, 5);
        assert!(report.is_complete());
        assert_eq!(courier.into_inner(), rows);
    }

    #[test]
    fn retries_transient_failures() {
        let rows = updates(&["a", "b", "c"]);
        let sink = Flaky {
            failures: 2,
            calls: 0,
            rows: Vec::new(),
        };
        let mut courier = Courier::from(sink).with_retries(2);
        let report = courier.deliver(&rows);
        assert_eq!(report, Report { written: 3, failed: vec![] });
        let sink = courier.into_inner();
        assert_eq!(sink.calls, 3);
        assert_eq!(sink.rows, rows);
    }

    #[test]
    fn isolates_rejected_rows() {
        let rows = updates(&["a", "b", "bad", "c"]);
        let sink = Picky {
            poison: "bad",
            rows: Vec::new(),
        };
        let mut courier = Courier::from(sink).with_batch_size(3).with_retries(1);
        let report = courier.deliver(&rows);
        assert_eq!(report.written, 3);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].id, "bad");
        assert!(report.failed[0].reason.contains("constraint violation"));
        let written = courier
            .into_inner()
            .rows
            .into_iter()
            .map(|u| u.id)
            .collect::<Vec<_>>();
        assert_eq!(written, vec!["a", "b", "c"]);
    }
}
