//! Actions - intents from the UI and results from async tasks

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::FetchState;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Snapshot category =====
    /// Intent: (re)read the snapshot file (triggers async task)
    SnapshotLoad,

    /// Result: snapshot read; carries whatever state the data layer recorded
    SnapshotDidLoad(FetchState),

    /// Result: snapshot could not be read or parsed
    SnapshotDidError(String),

    // ===== UI category =====
    /// Show or hide the detail view
    UiToggleDetails,

    /// Flip the detail view between weather and air quality
    UiSwitchTab,

    // ===== Uncategorized (global) =====
    /// Periodic tick for the spinner
    Tick,

    /// Exit the application
    Quit,
}
