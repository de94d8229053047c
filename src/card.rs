//! Card presenter - pure function: FetchState -> RenderedCard
//!
//! A [`RenderedCard`] is a framework-independent description of what to show:
//! an ordered list of elements, each with static style hints. Drawing it is
//! left to the host (see [`crate::components::CardBody`]).

use std::fmt;

use serde::Serialize;

use crate::aqi::AqiCategory;
use crate::state::{AirQualityData, FetchState, WeatherData};

pub const ERROR_MESSAGE: &str = "Error fetching data. Please try again.";
pub const AQI_LABEL: &str = "Air Quality Index (AQI):";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Spinner,
    Error,
    Location,
    Temperature,
    Description,
    AqiLabel,
    AqiValue,
    AqiCategory,
}

/// Colour role of an element; the host picks the actual colour
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Normal,
    Accent,
    Error,
    Aqi(AqiCategory),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StyleHint {
    /// Font size class in points
    pub font_size: u8,
    pub bold: bool,
    pub centered: bool,
    pub tone: Tone,
}

impl StyleHint {
    const fn new(font_size: u8, bold: bool, centered: bool) -> Self {
        Self {
            font_size,
            bold,
            centered,
            tone: Tone::Normal,
        }
    }

    const fn with_tone(self, tone: Tone) -> Self {
        Self { tone, ..self }
    }
}

const SPINNER_STYLE: StyleHint = StyleHint::new(24, false, true).with_tone(Tone::Accent);
const ERROR_STYLE: StyleHint = StyleHint::new(16, false, true).with_tone(Tone::Error);
const LOCATION_STYLE: StyleHint = StyleHint::new(24, true, true);
const TEMPERATURE_STYLE: StyleHint = StyleHint::new(30, false, true);
const DESCRIPTION_STYLE: StyleHint = StyleHint::new(18, false, true);
const AQI_LABEL_STYLE: StyleHint = StyleHint::new(20, true, false);
const AQI_VALUE_STYLE: StyleHint = StyleHint::new(24, true, true);
const AQI_CATEGORY_STYLE: StyleHint = StyleHint::new(18, false, true);

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CardElement {
    pub kind: ElementKind,
    /// None for purely graphic elements (the spinner)
    pub text: Option<String>,
    pub style: StyleHint,
}

impl CardElement {
    fn text(kind: ElementKind, text: impl Into<String>, style: StyleHint) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            style,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedCard {
    pub elements: Vec<CardElement>,
}

impl RenderedCard {
    /// The fixed failure card
    pub fn failed() -> Self {
        Self {
            elements: vec![CardElement::text(
                ElementKind::Error,
                ERROR_MESSAGE,
                ERROR_STYLE,
            )],
        }
    }

    pub fn is_spinner(&self) -> bool {
        matches!(
            self.elements.as_slice(),
            [CardElement {
                kind: ElementKind::Spinner,
                ..
            }]
        )
    }

    /// Text of the first element of `kind`
    pub fn text_of(&self, kind: ElementKind) -> Option<&str> {
        self.elements
            .iter()
            .find(|element| element.kind == kind)
            .and_then(|element| element.text.as_deref())
    }

    /// All text lines in display order
    pub fn lines(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|element| element.text.as_deref())
            .collect()
    }
}

impl fmt::Display for RenderedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("ready state for {location:?} has no air-quality readings")]
    MalformedData { location: String },
}

/// Turns a [`FetchState`] into a [`RenderedCard`]. Stateless.
#[derive(Clone, Copy, Debug, Default)]
pub struct WeatherCardPresenter;

impl WeatherCardPresenter {
    pub fn render(&self, state: &FetchState) -> Result<RenderedCard, CardError> {
        match state {
            FetchState::Loading => Ok(RenderedCard {
                elements: vec![CardElement {
                    kind: ElementKind::Spinner,
                    text: None,
                    style: SPINNER_STYLE,
                }],
            }),
            FetchState::Failed => Ok(RenderedCard::failed()),
            FetchState::Ready { weather, aqi } => Ok(RenderedCard {
                elements: ready_elements(weather, aqi)?,
            }),
        }
    }
}

/// Render with the default presenter
pub fn render(state: &FetchState) -> Result<RenderedCard, CardError> {
    WeatherCardPresenter.render(state)
}

fn ready_elements(
    weather: &WeatherData,
    aqi: &AirQualityData,
) -> Result<Vec<CardElement>, CardError> {
    let index = aqi.first_index().ok_or_else(|| CardError::MalformedData {
        location: weather.name.clone(),
    })?;
    let category = AqiCategory::classify_value(index);

    Ok(vec![
        CardElement::text(ElementKind::Location, &weather.name, LOCATION_STYLE),
        CardElement::text(
            ElementKind::Temperature,
            format_temperature(weather.temperature),
            TEMPERATURE_STYLE,
        ),
        CardElement::text(
            ElementKind::Description,
            &weather.description,
            DESCRIPTION_STYLE,
        ),
        CardElement::text(ElementKind::AqiLabel, AQI_LABEL, AQI_LABEL_STYLE),
        CardElement::text(
            ElementKind::AqiValue,
            format_number(index),
            AQI_VALUE_STYLE.with_tone(Tone::Aqi(category)),
        ),
        CardElement::text(
            ElementKind::AqiCategory,
            category.label(),
            AQI_CATEGORY_STYLE.with_tone(Tone::Aqi(category)),
        ),
    ])
}

/// `18.5` -> `18.5°C`, `18.0` -> `18°C`; negative zero prints as `0°C`.
pub fn format_temperature(celsius: f64) -> String {
    format!("{}°C", format_number(celsius))
}

/// Shortest decimal form of `value`, written the way JavaScript's
/// `Number#toString` writes it: plain digits for magnitudes in `[1e-6, 1e21)`,
/// exponent form (`1e+21`, `1.5e-7`) outside that range.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    // `{:e}` yields the shortest round-trip digits, e.g. `1.23456e2`
    let scientific = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return format!("{value}");
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return format!("{value}");
    };

    let digits = mantissa.replace('.', "");
    let len = digits.len() as i32;
    // Position of the decimal point relative to the first digit
    let point = exponent + 1;

    let body = if len <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - len) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat(-point as usize))
    } else {
        let exp_sign = if exponent >= 0 { '+' } else { '-' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{exp_sign}{}", exponent.abs())
        } else {
            format!("{first}.{rest}e{exp_sign}{}", exponent.abs())
        }
    };
    format!("{sign}{body}")
}
