use super::*;
use crate::Energy;
use crate::ID;
use crate::geometry::Admission;
use crate::geometry::Coordinate;
use crate::geometry::Excluded;
use crate::io::Update;
use std::collections::BTreeMap;

/// Marker for cluster labels.
#[derive(Debug, Clone, Copy)]
pub struct Cluster;

/// Opaque external token naming one cluster of one run.
pub type Label = ID<Cluster>;

/// Final, immutable outcome of a clustering run.
///
/// Labels are minted here, once per cluster index. They carry no meaning
/// beyond the run that produced them: clustering the same input twice yields
/// the same partition under different labels.
#[derive(Debug, Clone)]
pub struct ClusterResult {
    ids: Vec<String>,
    labels: Vec<Label>,
    excluded: Excluded,
    convergence: Convergence,
}

impl ClusterResult {
    /// One label per cluster index.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
    pub fn label(&self, j: usize) -> Label {
        self.labels[j]
    }
    /// One centroid per cluster index.
    pub fn centroids(&self) -> &[Coordinate] {
        self.convergence.centroids()
    }
    pub fn assignment(&self) -> &Assignment {
        self.convergence.assignment()
    }
    pub fn excluded(&self) -> Excluded {
        self.excluded
    }
    pub fn phase(&self) -> Phase {
        self.convergence.phase()
    }
    pub fn cost(&self) -> Energy {
        self.convergence.cost()
    }
    pub fn iterations(&self) -> usize {
        self.convergence.iterations()
    }
    pub fn approximate(&self) -> bool {
        self.convergence.approximate()
    }
    /// (point id, label) in input order.
    pub fn members(&self) -> impl Iterator<Item = (&str, Label)> + '_ {
        self.ids
            .iter()
            .zip(self.assignment().clusters())
            .map(|(id, &j)| (id.as_str(), self.label(j)))
    }
    /// Point id → label.
    pub fn mapping(&self) -> BTreeMap<&str, Label> {
        self.members().collect()
    }
    /// Point ids grouped by cluster index, in input order.
    pub fn partition(&self) -> Vec<Vec<&str>> {
        (0..self.labels.len())
            .map(|j| {
                self.assignment()
                    .members(j)
                    .map(|i| self.ids[i].as_str())
                    .collect()
            })
            .collect()
    }
    /// Rows for the data sink.
    pub fn updates(&self) -> Vec<Update> {
        self.members()
            .map(|(id, label)| Update::from((id, label)))
            .collect()
    }
    /// Same partition and centroids under freshly minted labels.
    pub fn relabel(&self) -> Self {
        Self {
            labels: Self::mint(self.labels.len()),
            ..self.clone()
        }
    }
    fn mint(k: usize) -> Vec<Label> {
        (0..k).map(|_| Label::default()).collect()
    }
}

impl From<(&Admission, Convergence)> for ClusterResult {
    fn from((admission, convergence): (&Admission, Convergence)) -> Self {
        let k = convergence.centroids().len();
        Self {
            ids: admission.points().ids().map(String::from).collect(),
            labels: Self::mint(k),
            excluded: admission.excluded(),
            convergence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::tests::*;
    use std::collections::HashSet;

    fn result() -> ClusterResult {
        let mut rows = records(&[(0., 0.), (0.1, 0.), (5., 5.), (5.1, 5.)]);
        rows.push(crate::geometry::Record {
            id: "missing".to_string(),
            location: None,
        });
        let admission = Admission::try_from(rows).unwrap();
        let capacity = Capacity::plan(4, ClusterSpec::from((2, 0.))).unwrap();
        let convergence = Controller::from((admission.points(), capacity, Config::default()))
            .run()
            .unwrap();
        ClusterResult::from((&admission, convergence))
    }

    #[test]
    fn every_point_gets_its_cluster_label() {
        let result = result();
        let mapping = result.mapping();
        assert_eq!(mapping.len(), 4);
        assert_eq!(mapping["p0"], mapping["p1"]);
        assert_eq!(mapping["p2"], mapping["p3"]);
        assert_ne!(mapping["p0"], mapping["p2"]);
        assert!(!mapping.contains_key("missing"));
        assert_eq!(result.excluded().total(), 1);
    }

    #[test]
    fn labels_are_distinct() {
        let result = result();
        let labels = result.labels().iter().collect::<HashSet<_>>();
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn relabel_keeps_partition() {
        let result = result();
        let again = result.relabel();
        assert_eq!(result.partition(), again.partition());
        assert_eq!(result.centroids(), again.centroids());
        assert!(
            result
                .labels()
                .iter()
                .all(|l| !again.labels().contains(l))
        );
    }

    #[test]
    fn updates_follow_input_order() {
        let result = result();
        let updates = result.updates();
        assert_eq!(
            updates.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(),
            vec!["p0", "p1", "p2", "p3"]
        );
        assert_eq!(updates[0].cluster_id, result.mapping()["p0"]);
    }
}
