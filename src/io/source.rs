use crate::geometry::Record;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Retrieves the raw records of one import batch.
pub trait Source {
    fn fetch(&self, batch: &str) -> anyhow::Result<Vec<Record>>;
}

/// In-memory batches, keyed by import id.
impl Source for BTreeMap<String, Vec<Record>> {
    fn fetch(&self, batch: &str) -> anyhow::Result<Vec<Record>> {
        match self.get(batch) {
            Some(records) => Ok(records.clone()),
            None => {
                log::warn!("{:<32}{:<32}", "unknown import", batch);
                Ok(Vec::new())
            }
        }
    }
}

/// JSON file holding `{ "<import id>": [record, ...], ... }`.
pub struct JsonSource {
    path: PathBuf,
}

impl From<PathBuf> for JsonSource {
    fn from(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Source for JsonSource {
    fn fetch(&self, batch: &str) -> anyhow::Result<Vec<Record>> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let batches = serde_json::from_str::<BTreeMap<String, Vec<Record>>>(&text)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        let records = batches.fetch(batch)?;
        log::info!("{:<32}{:<32}", "fetched records", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("geobalance-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_requested_batch() {
        let path = temp(
            "source.json",
            r#"{
                "import-a": [{"id": "1", "location": {"latitude": 1.0, "longitude": 2.0}}],
                "import-b": [{"id": "2", "location": null}, {"id": "3"}]
            }"#,
        );
        let source = JsonSource::from(path.clone());
        assert_eq!(source.fetch("import-a").unwrap().len(), 1);
        assert_eq!(source.fetch("import-b").unwrap().len(), 2);
        assert!(source.fetch("import-c").unwrap().is_empty());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp("broken.json", "[1, 2");
        assert!(JsonSource::from(path.clone()).fetch("x").is_err());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_is_an_error() {
        let source = JsonSource::from(PathBuf::from("/nonexistent/geobalance.json"));
        assert!(source.fetch("x").is_err());
    }
}
