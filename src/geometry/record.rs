use super::*;

/// Location joined onto a stop row. Either component may be absent.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Location {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// One raw row as handed over by a data source.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub location: Option<Location>,
}

impl Record {
    /// The coordinate, if both components are present.
    /// Finiteness is checked on admission, not here.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let location = self.location.as_ref()?;
        match (location.longitude, location.latitude) {
            (Some(lon), Some(lat)) => Some(Coordinate::from((lon, lat))),
            _ => None,
        }
    }
}

impl From<(&str, f64, f64)> for Record {
    fn from((id, lon, lat): (&str, f64, f64)) -> Self {
        Self {
            id: id.to_string(),
            location: Some(Location {
                latitude: Some(lat),
                longitude: Some(lon),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_joined_rows() {
        let json = r#"[
            {"id": "a", "location": {"latitude": 52.5, "longitude": 13.4}},
            {"id": "b", "location": null},
            {"id": "c", "location": {"latitude": 52.5}},
            {"id": "d"}
        ]"#;
        let records = serde_json::from_str::<Vec<Record>>(json).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(
            records[0].coordinate(),
            Some(Coordinate::from((13.4, 52.5)))
        );
        assert_eq!(records[1].coordinate(), None);
        assert_eq!(records[2].coordinate(), None);
        assert_eq!(records[3].coordinate(), None);
    }
}
