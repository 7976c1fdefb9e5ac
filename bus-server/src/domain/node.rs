//! Locations and the local connections between them.

use std::fmt;

use super::NodeId;

/// What kind of place a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    /// A bus stop.
    Stop,
    /// A named landmark (market, hospital, campus gate).
    Landmark,
    /// A bus terminal where routes start and end.
    Terminal,
    /// A road junction or point.
    Junction,
    /// Anything the dataset labels differently.
    Other,
}

impl NodeCategory {
    /// Parse a dataset category label. Unknown labels map to `Other`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "stop" | "bus_stop" | "busstop" => NodeCategory::Stop,
            "landmark" => NodeCategory::Landmark,
            "terminal" | "terminus" => NodeCategory::Terminal,
            "junction" | "point" | "intersection" => NodeCategory::Junction,
            _ => NodeCategory::Other,
        }
    }

    /// Label used in API responses.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeCategory::Stop => "stop",
            NodeCategory::Landmark => "landmark",
            NodeCategory::Terminal => "terminal",
            NodeCategory::Junction => "junction",
            NodeCategory::Other => "other",
        }
    }
}

/// A named location in the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub category: NodeCategory,
}

impl Node {
    /// Creates a node.
    pub fn new(id: NodeId, name: impl Into<String>, category: NodeCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
        }
    }
}

/// How a leg is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Walk,
    Rickshaw,
    /// Shared auto-rickshaw.
    Cng,
    /// Scheduled bus; only produced by timetable legs.
    Bus,
    Other,
}

impl Mode {
    /// Parse a dataset mode label. Unknown labels map to `Other`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "walk" | "walking" | "foot" => Mode::Walk,
            "rickshaw" => Mode::Rickshaw,
            "cng" | "auto" | "autorickshaw" => Mode::Cng,
            "bus" => Mode::Bus,
            _ => Mode::Other,
        }
    }

    /// Label used in API responses.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Walk => "walk",
            Mode::Rickshaw => "rickshaw",
            Mode::Cng => "cng",
            Mode::Bus => "bus",
            Mode::Other => "other",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed local connection between two nodes.
///
/// Several edges may join the same pair, one per mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub mode: Mode,
    pub time_mins: u32,
    pub cost: u32,
    pub distance_m: u32,
}

impl Edge {
    /// Creates an edge.
    pub fn new(
        from: NodeId,
        to: NodeId,
        mode: Mode,
        time_mins: u32,
        cost: u32,
        distance_m: u32,
    ) -> Self {
        Self {
            from,
            to,
            mode,
            time_mins,
            cost,
            distance_m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_is_lenient() {
        assert_eq!(NodeCategory::parse("stop"), NodeCategory::Stop);
        assert_eq!(NodeCategory::parse("Bus_Stop"), NodeCategory::Stop);
        assert_eq!(NodeCategory::parse(" landmark "), NodeCategory::Landmark);
        assert_eq!(NodeCategory::parse("terminus"), NodeCategory::Terminal);
        assert_eq!(NodeCategory::parse("point"), NodeCategory::Junction);
        assert_eq!(NodeCategory::parse("mosque"), NodeCategory::Other);
    }

    #[test]
    fn mode_parse_and_label() {
        assert_eq!(Mode::parse("walk"), Mode::Walk);
        assert_eq!(Mode::parse("WALKING"), Mode::Walk);
        assert_eq!(Mode::parse("cng"), Mode::Cng);
        assert_eq!(Mode::parse("rickshaw"), Mode::Rickshaw);
        assert_eq!(Mode::parse("boat"), Mode::Other);

        assert_eq!(Mode::Cng.to_string(), "cng");
        assert_eq!(Mode::Bus.as_str(), "bus");
    }
}
