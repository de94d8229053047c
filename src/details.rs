//! Detail view - the extended weather and air-quality panels behind the card
//!
//! Like [`crate::card`], this is a pure mapping from data to display text;
//! [`crate::components::DetailPanel`] draws it.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::aqi::AqiCategory;
use crate::card::{CardError, format_number};
use crate::state::{AirQualityData, DetailTab, FetchState, Pollutants, WeatherData};

const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

pub const MICROGRAMS: &str = "μg/m³";
pub const MILLIGRAMS: &str = "mg/m³";

/// One labelled reading in the detail grid
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetailItem {
    pub label: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
}

impl DetailItem {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            unit: None,
        }
    }

    fn with_unit(label: &'static str, value: impl Into<String>, unit: &'static str) -> Self {
        Self {
            unit: Some(unit),
            ..Self::new(label, value)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetailView {
    pub location: String,
    /// e.g. `Friday, October 16, 2026`
    pub date: String,
    pub tab: DetailTab,
    /// Large lines at the top of the tab
    pub headline: Vec<String>,
    /// Set on the air-quality tab
    pub category: Option<AqiCategory>,
    pub items: Vec<DetailItem>,
}

impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.location)?;
        writeln!(f, "{}", self.date)?;
        writeln!(f, "[{}]", self.tab.title())?;
        for line in &self.headline {
            writeln!(f, "{line}")?;
        }
        for item in &self.items {
            match item.unit {
                Some(unit) => writeln!(f, "{}: {} {unit}", item.label, item.value)?,
                None => writeln!(f, "{}: {}", item.label, item.value)?,
            }
        }
        Ok(())
    }
}

/// Build the detail view for a ready state; `None` while loading or failed.
pub fn present_details(
    state: &FetchState,
    tab: DetailTab,
    today: NaiveDate,
) -> Option<Result<DetailView, CardError>> {
    match state {
        FetchState::Ready { weather, aqi } => Some(detail_view(weather, aqi, tab, today)),
        _ => None,
    }
}

pub fn detail_view(
    weather: &WeatherData,
    aqi: &AirQualityData,
    tab: DetailTab,
    today: NaiveDate,
) -> Result<DetailView, CardError> {
    let reading = aqi.first().ok_or_else(|| CardError::MalformedData {
        location: weather.name.clone(),
    })?;

    let (headline, category, items) = match tab {
        DetailTab::Weather => (weather_headline(weather), None, weather_items(weather)),
        DetailTab::AirQuality => {
            let category = AqiCategory::classify_value(reading.main.aqi);
            let mut headline = vec![
                format!("AQI {}", format_number(reading.main.aqi)),
                category.label().to_string(),
            ];
            if let Some(pollutants) = &reading.components {
                headline.insert(0, format!("PM2.5 {} {MICROGRAMS}", to_fixed1(pollutants.pm2_5)));
            }
            let items = reading
                .components
                .as_ref()
                .map(pollutant_items)
                .unwrap_or_default();
            (headline, Some(category), items)
        }
    };

    Ok(DetailView {
        location: weather.name.clone(),
        date: format_date(today),
        tab,
        headline,
        category,
        items,
    })
}

fn weather_headline(weather: &WeatherData) -> Vec<String> {
    let mut headline = vec![
        format!("{}°", format_number(js_round(weather.temperature))),
        weather.description.clone(),
    ];
    if let (Some(high), Some(low)) = (weather.temp_max, weather.temp_min) {
        headline.push(format!(
            "H: {}° L: {}°",
            format_number(js_round(high)),
            format_number(js_round(low))
        ));
    }
    headline
}

fn weather_items(weather: &WeatherData) -> Vec<DetailItem> {
    let mut items = Vec::new();
    if let Some(feels_like) = weather.feels_like {
        items.push(DetailItem::new(
            "Feels Like",
            format!("{}°C", format_number(js_round(feels_like))),
        ));
    }
    if let Some(humidity) = weather.humidity {
        items.push(DetailItem::new(
            "Humidity",
            format!("{}%", format_number(humidity)),
        ));
    }
    if let Some(wind) = weather.wind {
        let speed = format!("{} m/s", format_number(wind.speed));
        let value = match wind_direction(wind.deg) {
            Some(direction) => format!("{speed} {direction}"),
            None => speed,
        };
        items.push(DetailItem::new("Wind", value));
    }
    if let Some(pressure) = weather.pressure {
        items.push(DetailItem::new(
            "Pressure",
            format!("{} hPa", format_number(pressure)),
        ));
    }
    items
}

fn pollutant_items(pollutants: &Pollutants) -> Vec<DetailItem> {
    vec![
        DetailItem::with_unit("PM2.5", to_fixed1(pollutants.pm2_5), MICROGRAMS),
        DetailItem::with_unit("PM10", to_fixed1(pollutants.pm10), MICROGRAMS),
        DetailItem::with_unit("O₃", to_fixed1(pollutants.o3), MICROGRAMS),
        DetailItem::with_unit("NO₂", to_fixed1(pollutants.no2), MICROGRAMS),
        DetailItem::with_unit("SO₂", to_fixed1(pollutants.so2), MICROGRAMS),
        DetailItem::with_unit("CO", to_fixed1(pollutants.co / 1000.0), MILLIGRAMS),
    ]
}

/// 8-point compass bucket for a wind bearing; 45° sectors centred on N.
/// Negative and >360° bearings wrap.
pub fn wind_direction(deg: f64) -> Option<&'static str> {
    if !deg.is_finite() {
        return None;
    }
    let sector = js_round(deg / 45.0).rem_euclid(8.0) as usize;
    COMPASS.get(sector).copied()
}

/// Round half up (toward +∞), so `-2.5` -> `-2`
pub fn js_round(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// One decimal place, exact ties rounding away from zero (`0.25` -> `0.3`)
pub fn to_fixed1(value: f64) -> String {
    if !value.is_finite() || value.abs() >= 1e21 {
        return format_number(value);
    }
    let magnitude = value.abs();
    let scaled = magnitude * 10.0;
    let exact = magnitude.mul_add(10.0, -scaled) == 0.0;
    if exact && scaled.fract() == 0.5 {
        let tenths = scaled.floor() + 1.0;
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}{:.1}", tenths / 10.0);
    }
    format!("{value:.1}")
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AqiReading, Wind};
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn paris() -> WeatherData {
        WeatherData {
            feels_like: Some(17.6),
            temp_min: Some(15.1),
            temp_max: Some(21.5),
            humidity: Some(64.0),
            pressure: Some(1016.0),
            wind: Some(Wind {
                speed: 3.6,
                deg: 250.0,
            }),
            ..WeatherData::new("Paris", 18.5, "Clear sky")
        }
    }

    fn paris_air() -> AirQualityData {
        AirQualityData {
            list: vec![AqiReading {
                components: Some(Pollutants {
                    co: 201.94,
                    no2: 0.77,
                    o3: 68.66,
                    pm2_5: 0.5,
                    pm10: 0.54,
                    so2: 0.64,
                }),
                ..AqiReading::new(2)
            }],
        }
    }

    #[test]
    fn test_wind_direction_sectors() {
        assert_eq!(wind_direction(0.0), Some("N"));
        assert_eq!(wind_direction(22.5), Some("NE"));
        assert_eq!(wind_direction(22.4), Some("N"));
        assert_eq!(wind_direction(90.0), Some("E"));
        assert_eq!(wind_direction(250.0), Some("W"));
        assert_eq!(wind_direction(337.5), Some("N"));
        assert_eq!(wind_direction(337.4), Some("NW"));
        assert_eq!(wind_direction(360.0), Some("N"));
    }

    #[test]
    fn test_wind_direction_wraps() {
        assert_eq!(wind_direction(-45.0), Some("NW"));
        assert_eq!(wind_direction(405.0), Some("NE"));
        assert_eq!(wind_direction(f64::NAN), None);
    }

    #[test]
    fn test_js_round() {
        assert_eq!(js_round(18.5), 19.0);
        assert_eq!(js_round(18.49), 18.0);
        assert_eq!(js_round(-2.5), -2.0);
        assert_eq!(js_round(-2.6), -3.0);
    }

    #[test]
    fn test_to_fixed1() {
        assert_eq!(to_fixed1(0.5), "0.5");
        assert_eq!(to_fixed1(68.66), "68.7");
        assert_eq!(to_fixed1(0.25), "0.3");
        assert_eq!(to_fixed1(1.0), "1.0");
        assert_eq!(to_fixed1(0.20194), "0.2");
    }

    #[test]
    fn test_weather_tab() {
        let view = detail_view(&paris(), &paris_air(), DetailTab::Weather, today()).unwrap();

        assert_eq!(view.location, "Paris");
        assert_eq!(view.date, "Friday, October 16, 2026");
        assert_eq!(view.headline, vec!["19°", "Clear sky", "H: 22° L: 15°"]);
        assert_eq!(view.category, None);
        assert_eq!(
            view.items,
            vec![
                DetailItem::new("Feels Like", "18°C"),
                DetailItem::new("Humidity", "64%"),
                DetailItem::new("Wind", "3.6 m/s W"),
                DetailItem::new("Pressure", "1016 hPa"),
            ]
        );
    }

    #[test]
    fn test_air_quality_tab() {
        let view = detail_view(&paris(), &paris_air(), DetailTab::AirQuality, today()).unwrap();

        assert_eq!(view.headline, vec!["PM2.5 0.5 μg/m³", "AQI 2", "Fair"]);
        assert_eq!(view.category, Some(AqiCategory::Fair));

        let values: Vec<_> = view
            .items
            .iter()
            .map(|item| (item.label, item.value.as_str(), item.unit))
            .collect();
        assert_eq!(
            values,
            vec![
                ("PM2.5", "0.5", Some(MICROGRAMS)),
                ("PM10", "0.5", Some(MICROGRAMS)),
                ("O₃", "68.7", Some(MICROGRAMS)),
                ("NO₂", "0.8", Some(MICROGRAMS)),
                ("SO₂", "0.6", Some(MICROGRAMS)),
                ("CO", "0.2", Some(MILLIGRAMS)),
            ]
        );
    }

    #[test]
    fn test_display_lists_items() {
        let view = detail_view(&paris(), &paris_air(), DetailTab::AirQuality, today()).unwrap();
        let text = view.to_string();

        assert!(text.starts_with("Paris\nFriday, October 16, 2026\n[Air Quality]\n"));
        assert!(text.contains("O₃: 68.7 μg/m³\n"));
        assert!(text.ends_with("CO: 0.2 mg/m³\n"));
    }

    #[test]
    fn test_sparse_data_omits_items() {
        let weather = WeatherData::new("Oslo", -3.0, "Snow");
        let aqi = AirQualityData::single(5);

        let view = detail_view(&weather, &aqi, DetailTab::Weather, today()).unwrap();
        assert_eq!(view.headline, vec!["-3°", "Snow"]);
        assert!(view.items.is_empty());

        let view = detail_view(&weather, &aqi, DetailTab::AirQuality, today()).unwrap();
        assert_eq!(view.headline, vec!["AQI 5", "Hazardous"]);
        assert!(view.items.is_empty());
    }

    #[test]
    fn test_empty_aqi_list_is_malformed() {
        let result = detail_view(
            &paris(),
            &AirQualityData::default(),
            DetailTab::Weather,
            today(),
        );
        assert_eq!(
            result,
            Err(CardError::MalformedData {
                location: "Paris".into()
            })
        );
    }

    #[test]
    fn test_only_ready_state_has_details() {
        assert!(present_details(&FetchState::Loading, DetailTab::Weather, today()).is_none());
        assert!(present_details(&FetchState::Failed, DetailTab::AirQuality, today()).is_none());

        let ready = FetchState::ready(paris(), paris_air());
        assert!(matches!(
            present_details(&ready, DetailTab::Weather, today()),
            Some(Ok(_))
        ));
    }
}
