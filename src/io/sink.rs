use super::*;
use std::io::Write;

/// Persists cluster labels for a batch of points.
///
/// A failed `write` may have persisted part of the batch; writes must be
/// idempotent per row so that retrying the batch is safe.
pub trait Sink {
    fn write(&mut self, updates: &[Update]) -> anyhow::Result<()>;
}

/// In-memory sink.
impl Sink for Vec<Update> {
    fn write(&mut self, updates: &[Update]) -> anyhow::Result<()> {
        self.extend_from_slice(updates);
        Ok(())
    }
}

/// JSON Lines writer: one `{"id": ..., "cluster_id": ...}` object per line.
pub struct JsonSink<W>
where
    W: Write,
{
    writer: W,
}

impl<W> From<W> for JsonSink<W>
where
    W: Write,
{
    fn from(writer: W) -> Self {
        Self { writer }
    }
}

impl<W> JsonSink<W>
where
    W: Write,
{
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> Sink for JsonSink<W>
where
    W: Write,
{
    fn write(&mut self, updates: &[Update]) -> anyhow::Result<()> {
        for update in updates {
            serde_json::to_writer(&mut self.writer, update)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::Label;

    #[test]
    fn writes_json_lines() {
        let label = Label::default();
        let updates = vec![Update::from(("a", label)), Update::from(("b", label))];
        let mut sink = JsonSink::from(Vec::new());
        sink.write(&updates).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            format!(r#"{{"id":"a","cluster_id":"{}"}}"#, label)
        );
        let back = serde_json::from_str::<Update>(lines[1]).unwrap();
        assert_eq!(back, updates[1]);
    }
}
