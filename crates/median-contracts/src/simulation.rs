//! Map traffic/weather simulation state.
//!
//! `SimulationState` is the snapshot a map renderer reads. It is produced
//! and advanced only by the simulator crate; renderers treat it as
//! read-only.

use serde::{Deserialize, Serialize};

use crate::{impl_labeled, label::Labeled};

/// Side length of the square map coordinate space (percent of the viewport).
pub const MAP_EXTENT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weather {
    Clear,
    Rain,
    Fog,
}

impl Labeled for Weather {
    const KIND: &'static str = "weather";
    const ALL: &'static [Self] = &[Weather::Clear, Weather::Rain, Weather::Fog];

    fn label(self) -> &'static str {
        match self {
            Weather::Clear => "CLEAR",
            Weather::Rain => "RAIN",
            Weather::Fog => "FOG",
        }
    }
}

impl_labeled!(Weather);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrafficDensity {
    Low,
    Moderate,
    Heavy,
    Blocked,
}

impl Labeled for TrafficDensity {
    const KIND: &'static str = "traffic density";
    const ALL: &'static [Self] = &[
        TrafficDensity::Low,
        TrafficDensity::Moderate,
        TrafficDensity::Heavy,
        TrafficDensity::Blocked,
    ];

    fn label(self) -> &'static str {
        match self {
            TrafficDensity::Low => "LOW",
            TrafficDensity::Moderate => "MODERATE",
            TrafficDensity::Heavy => "HEAVY",
            TrafficDensity::Blocked => "BLOCKED",
        }
    }
}

impl_labeled!(TrafficDensity);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Road {
    Main,
    Cross,
}

impl Labeled for Road {
    const KIND: &'static str = "road";
    const ALL: &'static [Self] = &[Road::Main, Road::Cross];

    fn label(self) -> &'static str {
        match self {
            Road::Main => "MAIN",
            Road::Cross => "CROSS",
        }
    }
}

impl_labeled!(Road);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentKind {
    Accident,
    Work,
}

impl Labeled for IncidentKind {
    const KIND: &'static str = "incident kind";
    const ALL: &'static [Self] = &[IncidentKind::Accident, IncidentKind::Work];

    fn label(self) -> &'static str {
        match self {
            IncidentKind::Accident => "ACCIDENT",
            IncidentKind::Work => "WORK",
        }
    }
}

impl_labeled!(IncidentKind);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoiKind {
    Charger,
    Parking,
    Coffee,
}

impl Labeled for PoiKind {
    const KIND: &'static str = "POI kind";
    const ALL: &'static [Self] = &[PoiKind::Charger, PoiKind::Parking, PoiKind::Coffee];

    fn label(self) -> &'static str {
        match self {
            PoiKind::Charger => "CHARGER",
            PoiKind::Parking => "PARKING",
            PoiKind::Coffee => "COFFEE",
        }
    }
}

impl_labeled!(PoiKind);

/// Turn instruction of one route step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NavAction {
    Straight,
    Left,
    Right,
    #[serde(rename = "UTURN")]
    UTurn,
    Destination,
}

impl NavAction {
    /// Actions a synthesized intermediate step may take.
    pub const TURNS: [NavAction; 4] = [NavAction::Straight, NavAction::Left, NavAction::Right, NavAction::UTurn];
}

impl Labeled for NavAction {
    const KIND: &'static str = "navigation action";
    const ALL: &'static [Self] = &[
        NavAction::Straight,
        NavAction::Left,
        NavAction::Right,
        NavAction::UTurn,
        NavAction::Destination,
    ];

    fn label(self) -> &'static str {
        match self {
            NavAction::Straight => "STRAIGHT",
            NavAction::Left => "LEFT",
            NavAction::Right => "RIGHT",
            NavAction::UTurn => "UTURN",
            NavAction::Destination => "DESTINATION",
        }
    }
}

impl_labeled!(NavAction);

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// A point in map space, both axes in `0.0..=MAP_EXTENT`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

impl MapPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_on_map(self) -> bool {
        (0.0..=MAP_EXTENT).contains(&self.x) && (0.0..=MAP_EXTENT).contains(&self.y)
    }
}

/// The single active road incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub road: Road,
    pub kind: IncidentKind,
    pub started_at_ms: u64,
    pub clears_at_ms: u64,
}

/// A transient point of interest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub id: u64,
    pub kind: PoiKind,
    pub position: MapPoint,
    pub spawned_at_ms: u64,
    pub expires_at_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStep {
    pub action: NavAction,
    pub distance_m: u32,
    pub street: String,
}

/// Navigation request/response state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Navigation {
    #[default]
    Idle,
    Calculating {
        destination: MapPoint,
        ready_at_ms: u64,
    },
    Routed {
        destination: MapPoint,
        steps: Vec<RouteStep>,
    },
}

impl Navigation {
    pub fn destination(&self) -> Option<MapPoint> {
        match self {
            Navigation::Idle => None,
            Navigation::Calculating { destination, .. } | Navigation::Routed { destination, .. } => {
                Some(*destination)
            }
        }
    }

    pub fn steps(&self) -> &[RouteStep] {
        match self {
            Navigation::Routed { steps, .. } => steps,
            _ => &[],
        }
    }

    pub fn is_calculating(&self) -> bool {
        matches!(self, Navigation::Calculating { .. })
    }
}

/// Last sampled density per road, before incident overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadDensities {
    pub main: TrafficDensity,
    pub cross: TrafficDensity,
}

impl RoadDensities {
    pub fn get(&self, road: Road) -> TrafficDensity {
        match road {
            Road::Main => self.main,
            Road::Cross => self.cross,
        }
    }

    pub fn set(&mut self, road: Road, density: TrafficDensity) {
        match road {
            Road::Main => self.main = density,
            Road::Cross => self.cross = density,
        }
    }
}

impl Default for RoadDensities {
    fn default() -> Self {
        Self { main: TrafficDensity::Low, cross: TrafficDensity::Low }
    }
}

/// Everything the map renderer reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Simulated milliseconds since the simulator started.
    pub now_ms: u64,
    /// Clock ticks applied so far.
    pub ticks: u64,
    /// Simulated hour of day, 0 to 23.
    pub hour: u8,
    pub weather: Weather,
    pub sampled: RoadDensities,
    pub incident: Option<Incident>,
    pub pois: Vec<Poi>,
    /// Identifier the next spawned POI receives.
    pub next_poi_id: u64,
    /// Vehicle start position.
    pub position: GeoPoint,
    pub navigation: Navigation,
}

impl SimulationState {
    pub fn new(start_hour: u8, position: GeoPoint) -> Self {
        Self {
            now_ms: 0,
            ticks: 0,
            hour: start_hour % 24,
            weather: Weather::Clear,
            sampled: RoadDensities::default(),
            incident: None,
            pois: Vec::new(),
            next_poi_id: 0,
            position,
            navigation: Navigation::Idle,
        }
    }

    /// Effective density of `road`: Blocked while an incident sits on it,
    /// the last sampled value otherwise.
    pub fn density(&self, road: Road) -> TrafficDensity {
        match self.incident {
            Some(incident) if incident.road == road => TrafficDensity::Blocked,
            _ => self.sampled.get(road),
        }
    }
}
