use crate::clustering::Label;

/// One row for the data sink: a point and the label of its cluster.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Update {
    pub id: String,
    pub cluster_id: Label,
}

impl From<(&str, Label)> for Update {
    fn from((id, cluster_id): (&str, Label)) -> Self {
        Self {
            id: id.to_string(),
            cluster_id,
        }
    }
}
