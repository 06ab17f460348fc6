use super::*;
use crate::ClusterError;
use std::collections::HashSet;

/// Tally of records left out of the point set, by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Excluded {
    /// No location, or a location missing a component.
    pub missing: usize,
    /// NaN or infinite component.
    pub nonfinite: usize,
    /// Identifier already admitted earlier in the input.
    pub duplicate: usize,
}

impl Excluded {
    pub fn total(&self) -> usize {
        self.missing + self.nonfinite + self.duplicate
    }
}

/// Geometry adapter output: usable points plus what was excluded.
#[derive(Debug, Clone)]
pub struct Admission {
    points: PointSet,
    excluded: Excluded,
}

impl Admission {
    pub fn points(&self) -> &PointSet {
        &self.points
    }
    pub fn excluded(&self) -> Excluded {
        self.excluded
    }
}

impl TryFrom<Vec<Record>> for Admission {
    type Error = ClusterError;
    fn try_from(records: Vec<Record>) -> Result<Self, Self::Error> {
        let mut excluded = Excluded::default();
        let mut seen = HashSet::new();
        let mut points = Vec::with_capacity(records.len());
        for record in records {
            match record.coordinate() {
                None => {
                    log::debug!("{:<32}{:<32}", "excluding missing location", record.id);
                    excluded.missing += 1;
                }
                Some(c) if !c.is_finite() => {
                    log::debug!("{:<32}{:<32}", "excluding non-finite location", record.id);
                    excluded.nonfinite += 1;
                }
                Some(_) if seen.contains(&record.id) => {
                    log::debug!("{:<32}{:<32}", "excluding duplicate id", record.id);
                    excluded.duplicate += 1;
                }
                Some(c) => {
                    seen.insert(record.id.clone());
                    points.push(Point::from((record.id, c)));
                }
            }
        }
        log::info!("{:<32}{:<32}", "admitted points", points.len());
        log::info!("{:<32}{:<32}", "excluded records", excluded.total());
        if points.is_empty() {
            return Err(ClusterError::NoValidInput {
                excluded: excluded.total(),
            });
        }
        Ok(Self {
            points: PointSet::new(points),
            excluded,
        })
    }
}
