// Domain models shared by the store, the auth flow and the HTTP layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Venue location, owned by value by events and places
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub area: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

/// A listed event. Immutable once the store is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub location: Location,
    pub category: String,
    pub external_links: ExternalLinks,
    pub price: Option<f64>,
    pub capacity: Option<u32>,
}

/// Kind of nearby place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceType {
    Restaurant,
    Cafe,
    Hotel,
    Entertainment,
}

impl PlaceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceType::Restaurant => "restaurant",
            PlaceType::Cafe => "cafe",
            PlaceType::Hotel => "hotel",
            PlaceType::Entertainment => "entertainment",
        }
    }
}

impl fmt::Display for PlaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "restaurant" => Ok(PlaceType::Restaurant),
            "cafe" => Ok(PlaceType::Cafe),
            "hotel" => Ok(PlaceType::Hotel),
            "entertainment" => Ok(PlaceType::Entertainment),
            other => Err(format!("Unknown place type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyPlace {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub place_type: PlaceType,
    pub location: Location,
    pub rating: Option<f64>,
    pub price_level: Option<u8>,
    pub description: Option<String>,
}

/// Registered user. Credentials live in a separate table keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: u64,
    pub user_id: u64,
    pub event_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: u64,
    pub user_id: u64,
    pub event_id: u64,
    pub reminder: bool,
}

/// One suggested way of getting to an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOption {
    pub transport_type: String,
    pub duration_minutes: u32,
    pub distance_km: f64,
    pub steps: Vec<String>,
    pub estimated_cost: Option<f64>,
}

/// Login response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(token: String) -> Self {
        Self {
            access_token: token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Optional event filters, combined with AND.
///
/// Unset fields (and empty strings) do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub area: Option<String>,
    pub station: Option<String>,
    /// Keep events starting at or after this instant
    pub start_after: Option<DateTime<Utc>>,
    /// Keep events ending at or before this instant
    pub end_before: Option<DateTime<Utc>>,
    pub category: Option<String>,
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        let area_ok = non_empty(&self.area).map_or(true, |area| event.location.area == area);
        let station_ok = non_empty(&self.station)
            .map_or(true, |station| event.location.station.as_deref() == Some(station));
        let start_ok = self.start_after.map_or(true, |after| event.start_datetime >= after);
        let end_ok = self.end_before.map_or(true, |before| event.end_datetime <= before);
        let category_ok = non_empty(&self.category).map_or(true, |category| event.category == category);

        area_ok && station_ok && start_ok && end_ok && category_ok
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
