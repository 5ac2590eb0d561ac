//! Raw inputs consumed from the data collaborators

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::{Meters, NodeId};

/// Road-network junction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadNode {
    pub id: NodeId,
    /// Longitude
    pub x: f64,
    /// Latitude
    pub y: f64,
}

impl RoadNode {
    pub fn geometry(&self) -> Point<f64> {
        Point::new(self.x, self.y)
    }
}

/// A street name as found in the road data: a single name or a list of aliases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreetName {
    Single(String),
    Aliases(Vec<String>),
}

impl StreetName {
    /// Display name with aliases joined by `", "`
    pub fn display(&self) -> String {
        match self {
            StreetName::Single(name) => name.clone(),
            StreetName::Aliases(names) => names.join(", "),
        }
    }
}

/// Directed road segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub length: Meters,
    #[serde(default)]
    pub name: Option<StreetName>,
}

impl RoadEdge {
    pub fn display_name(&self) -> String {
        self.name.as_ref().map(StreetName::display).unwrap_or_default()
    }
}

/// Raw directed road network
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadNetwork {
    pub nodes: Vec<RoadNode>,
    pub edges: Vec<RoadEdge>,
}

/// Bus stop as listed by a line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStop {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub name: String,
}

impl RawStop {
    pub fn geometry(&self) -> Point<f64> {
        Point::new(self.x, self.y)
    }
}

/// Bus line with its stops in travel order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusLine {
    pub line: String,
    pub stops: Vec<RawStop>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn street_name_variants() {
        let edges: Vec<RoadEdge> = serde_json::from_str(
            r#"[
                {"from": 1, "to": 2, "length": 10.0, "name": "Carrer A"},
                {"from": 2, "to": 3, "length": 10.0, "name": ["Gran Via", "GV"]},
                {"from": 3, "to": 4, "length": 10.0}
            ]"#,
        )
        .unwrap();
        assert_eq!(edges[0].display_name(), "Carrer A");
        assert_eq!(edges[1].display_name(), "Gran Via, GV");
        assert_eq!(edges[2].display_name(), "");
    }
}
