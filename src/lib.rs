//! Weather card - presents weather and air-quality data as a single card
//!
//! The core is [`card::render`], a pure function from [`state::FetchState`]
//! to [`card::RenderedCard`], and the [`aqi::AqiCategory`] classifier. The
//! remaining modules host the card in a terminal.

pub mod action;
pub mod aqi;
pub mod card;
pub mod components;
pub mod details;
pub mod effect;
pub mod reducer;
pub mod snapshot;
pub mod state;

pub use aqi::{AqiCategory, classify};
pub use card::{CardError, RenderedCard, WeatherCardPresenter, render};
pub use details::{DetailView, present_details};
pub use state::{AirQualityData, DetailTab, FetchState, WeatherData};
