//! Raw dataset records as they appear in the JSON files.
//!
//! These are deliberately loose: ids are plain strings, weights are floats
//! and times are `HH:MM` strings. Turning them into domain types (and
//! rejecting what doesn't fit) happens in the validation step.

use serde::Deserialize;

/// A complete single-file dataset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
    #[serde(default)]
    pub routes: Vec<RouteRecord>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", alias = "category", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(alias = "time_min", alias = "timeMin")]
    pub time: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default, alias = "distance_m", alias = "distanceMeters")]
    pub distance: f64,
}

fn default_mode() -> String {
    "walk".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteRecord {
    #[serde(alias = "id")]
    pub route_id: String,
    pub name: String,
    #[serde(default)]
    pub fare: Option<u32>,
    #[serde(default)]
    pub trips: Vec<TripRecord>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TripRecord {
    #[serde(alias = "id")]
    pub trip_id: String,
    #[serde(default)]
    pub direction: String,
    pub departure_time: String,
    pub stops: Vec<String>,
    #[serde(default)]
    pub stop_times: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_dataset() {
        let json = r#"{
            "nodes": [{"id": "A", "name": "Alpha", "type": "stop"}],
            "edges": [{"from": "A", "to": "B", "mode": "walk", "time": 10, "cost": 0, "distance": 800}],
            "routes": [{
                "route_id": "R1",
                "name": "Route 1",
                "fare": 20,
                "trips": [{
                    "trip_id": "T1",
                    "direction": "outbound",
                    "departure_time": "08:00",
                    "stops": ["A", "B"]
                }]
            }]
        }"#;

        let dataset: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.nodes[0].kind, "stop");
        assert_eq!(dataset.edges[0].time, 10.0);
        assert_eq!(dataset.routes[0].fare, Some(20));
        assert_eq!(dataset.routes[0].trips[0].stops, vec!["A", "B"]);
        assert!(dataset.routes[0].trips[0].stop_times.is_none());
    }

    #[test]
    fn optional_sections_default() {
        let dataset: Dataset =
            serde_json::from_str(r#"{"nodes": [{"id": "A", "name": "Alpha"}]}"#).unwrap();
        assert!(dataset.edges.is_empty());
        assert!(dataset.routes.is_empty());
        assert_eq!(dataset.nodes[0].kind, "");
    }

    #[test]
    fn accepts_field_aliases() {
        let edge: EdgeRecord = serde_json::from_str(
            r#"{"from": "A", "to": "B", "time_min": 4.5, "distance_m": 300}"#,
        )
        .unwrap();
        assert_eq!(edge.mode, "walk");
        assert_eq!(edge.time, 4.5);
        assert_eq!(edge.cost, 0.0);
        assert_eq!(edge.distance, 300.0);

        let node: NodeRecord =
            serde_json::from_str(r#"{"id": "A", "name": "Alpha", "category": "landmark"}"#)
                .unwrap();
        assert_eq!(node.kind, "landmark");
    }

    #[test]
    fn edge_requires_time() {
        let result: Result<EdgeRecord, _> = serde_json::from_str(r#"{"from": "A", "to": "B"}"#);
        assert!(result.is_err());
    }
}
