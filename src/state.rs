//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Current conditions for a location, as resolved by the data layer.
/// Only the first three fields are required; the rest feed the detail view.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherData {
    pub name: String,
    /// Degrees Celsius
    #[serde(rename = "temp")]
    pub temperature: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_max: Option<f64>,
    /// Percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    /// hPa
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<Wind>,
}

impl WeatherData {
    pub fn new(name: impl Into<String>, temperature: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            temperature,
            description: description.into(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Wind {
    /// m/s
    pub speed: f64,
    /// Meteorological degrees, 0 = north
    pub deg: f64,
}

/// Index field of a single air-quality reading
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AqiIndex {
    /// Documented scale is 1-5, but any number may arrive
    pub aqi: f64,
}

/// Pollutant concentrations in μg/m³
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Pollutants {
    pub co: f64,
    pub no2: f64,
    pub o3: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub so2: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AqiReading {
    pub main: AqiIndex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Pollutants>,
}

impl AqiReading {
    pub fn new(aqi: impl Into<f64>) -> Self {
        Self {
            main: AqiIndex { aqi: aqi.into() },
            components: None,
        }
    }
}

/// Air-quality readings, most recent first
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AirQualityData {
    pub list: Vec<AqiReading>,
}

impl AirQualityData {
    pub fn single(aqi: impl Into<f64>) -> Self {
        Self {
            list: vec![AqiReading::new(aqi)],
        }
    }

    pub fn first(&self) -> Option<&AqiReading> {
        self.list.first()
    }

    /// Index of the first reading, if there is one
    pub fn first_index(&self) -> Option<f64> {
        self.first().map(|reading| reading.main.aqi)
    }
}

/// Outcome of the latest fetch attempt: exactly one of loading, failed, or ready
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchState {
    #[default]
    Loading,
    Failed,
    Ready {
        weather: WeatherData,
        aqi: AirQualityData,
    },
}

impl FetchState {
    pub fn ready(weather: WeatherData, aqi: AirQualityData) -> Self {
        FetchState::Ready { weather, aqi }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, FetchState::Ready { .. })
    }

    pub fn weather(&self) -> Option<&WeatherData> {
        match self {
            FetchState::Ready { weather, .. } => Some(weather),
            _ => None,
        }
    }

    pub fn aqi(&self) -> Option<&AirQualityData> {
        match self {
            FetchState::Ready { aqi, .. } => Some(aqi),
            _ => None,
        }
    }
}

/// Detail view tabs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum DetailTab {
    #[default]
    Weather,
    AirQuality,
}

impl DetailTab {
    pub fn toggle(&self) -> Self {
        match self {
            DetailTab::Weather => DetailTab::AirQuality,
            DetailTab::AirQuality => DetailTab::Weather,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DetailTab::Weather => "Weather",
            DetailTab::AirQuality => "Air Quality",
        }
    }
}

/// Spinner frame interval.
pub const SPINNER_TICK_MS: u64 = 80;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Snapshot file backing the card (None reads nothing)
    #[debug(section = "Source", label = "Snapshot", debug_fmt)]
    pub snapshot: Option<String>,

    /// Card lifecycle: Loading → Ready/Failed
    #[debug(section = "Card", label = "State", debug_fmt)]
    pub fetch: FetchState,

    /// Detail view instead of the summary card
    #[debug(section = "View", label = "Details")]
    pub show_details: bool,

    /// Active detail tab
    #[debug(section = "View", label = "Tab", debug_fmt)]
    pub tab: DetailTab,

    /// Spinner frame counter
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(snapshot: Option<String>) -> Self {
        Self {
            snapshot,
            fetch: FetchState::Loading,
            show_details: false,
            tab: DetailTab::default(),
            tick_count: 0,
        }
    }

    pub fn with_fetch(fetch: FetchState) -> Self {
        Self {
            fetch,
            ..Self::default()
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(None)
    }
}
