// Canned route suggestions keyed by transport mode

use crate::core::models::{Event, RouteOption};
use std::str::FromStr;

/// Modes used when the caller does not name any
pub const DEFAULT_TRANSPORT_TYPES: &str = "walking,driving,transit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportType {
    Walking,
    Driving,
    Transit,
    Bicycle,
    Taxi,
}

impl TransportType {
    /// Every mode, in the order suggestions are emitted
    pub const ALL: [TransportType; 5] = [
        TransportType::Walking,
        TransportType::Driving,
        TransportType::Transit,
        TransportType::Bicycle,
        TransportType::Taxi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportType::Walking => "walking",
            TransportType::Driving => "driving",
            TransportType::Transit => "transit",
            TransportType::Bicycle => "bicycle",
            TransportType::Taxi => "taxi",
        }
    }
}

impl FromStr for TransportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransportType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown transport type: {}", s))
    }
}

/// Parse a comma-separated mode list. Unknown names are skipped.
pub fn parse_transport_types(list: &str) -> Vec<TransportType> {
    list.split(',')
        .filter_map(|name| name.trim().parse().ok())
        .collect()
}

/// Suggest one canned route per requested mode, in `TransportType::ALL` order
pub fn suggest_routes(event: &Event, requested: &[TransportType]) -> Vec<RouteOption> {
    let destination = &event.location.name;
    TransportType::ALL
        .into_iter()
        .filter(|mode| requested.contains(mode))
        .map(|mode| route_for(mode, destination))
        .collect()
}

fn route_for(mode: TransportType, destination: &str) -> RouteOption {
    let (duration_minutes, distance_km, estimated_cost, steps) = match mode {
        TransportType::Walking => (
            30,
            2.5,
            0.0,
            vec![
                "Start at your location".to_string(),
                "Walk north on Main Street".to_string(),
                "Turn right at Park Avenue".to_string(),
                format!("Arrive at {}", destination),
            ],
        ),
        TransportType::Driving => (
            15,
            5.0,
            500.0,
            vec![
                "Start driving from your location".to_string(),
                "Head east on Highway 1".to_string(),
                "Take exit 23 toward City Center".to_string(),
                format!("Arrive at {}", destination),
            ],
        ),
        TransportType::Transit => (
            25,
            6.0,
            280.0,
            vec![
                "Walk to nearest station".to_string(),
                "Take Yamanote Line to Shinjuku Station".to_string(),
                "Transfer to Chuo Line".to_string(),
                format!("Exit at station near {}", destination),
                format!("Walk 5 minutes to {}", destination),
            ],
        ),
        TransportType::Bicycle => (
            20,
            4.0,
            0.0,
            vec![
                "Start cycling from your location".to_string(),
                "Take the bike path along the river".to_string(),
                "Turn left at the park".to_string(),
                format!("Arrive at {}", destination),
            ],
        ),
        TransportType::Taxi => (
            12,
            5.0,
            2000.0,
            vec![
                "Get a taxi from your location".to_string(),
                format!("Direct route to {}", destination),
            ],
        ),
    };

    RouteOption {
        transport_type: mode.as_str().to_string(),
        duration_minutes,
        distance_km,
        steps,
        estimated_cost: Some(estimated_cost),
    }
}
