//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::card;
use crate::effect::Effect;
use crate::state::{AppState, FetchState};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Snapshot actions =====
        Action::SnapshotLoad => {
            let Some(path) = state.snapshot.clone() else {
                return DispatchResult::unchanged();
            };
            // A ready card stays up while the snapshot is re-read
            if !state.fetch.is_ready() {
                state.fetch = FetchState::Loading;
            }
            state.tick_count = 0;
            DispatchResult::changed_with(Effect::LoadSnapshot { path })
        }

        Action::SnapshotDidLoad(fetch) => {
            if fetch == state.fetch {
                return DispatchResult::unchanged();
            }
            if let Err(e) = card::render(&fetch) {
                tracing::warn!(error = %e, "snapshot violates the card contract");
            }
            tracing::debug!(?fetch, "card state replaced");
            state.fetch = fetch;
            DispatchResult::changed()
        }

        Action::SnapshotDidError(msg) => {
            tracing::warn!(error = %msg, "snapshot load failed");
            state.fetch = FetchState::Failed;
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::UiToggleDetails => {
            state.show_details = !state.show_details;
            DispatchResult::changed()
        }

        Action::UiSwitchTab => {
            state.tab = state.tab.toggle();
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Tick => {
            if state.fetch.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AirQualityData, DetailTab, WeatherData};

    fn ready() -> FetchState {
        FetchState::ready(
            WeatherData::new("Paris", 18.5, "Clear sky"),
            AirQualityData::single(2),
        )
    }

    #[test]
    fn test_load_without_snapshot_is_noop() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::SnapshotLoad);

        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_load_sets_loading_and_emits_effect() {
        let mut state = AppState {
            snapshot: Some("paris.json".into()),
            fetch: FetchState::Failed,
            tick_count: 9,
            ..AppState::default()
        };

        let result = reducer(&mut state, Action::SnapshotLoad);

        assert!(result.changed);
        assert!(state.fetch.is_loading());
        assert_eq!(state.tick_count, 0);
        assert_eq!(
            result.effects,
            vec![Effect::LoadSnapshot {
                path: "paris.json".into()
            }]
        );
    }

    #[test]
    fn test_reload_keeps_ready_card() {
        let mut state = AppState {
            snapshot: Some("paris.json".into()),
            fetch: ready(),
            ..AppState::default()
        };

        let result = reducer(&mut state, Action::SnapshotLoad);

        assert!(result.changed);
        assert!(state.fetch.is_ready());
        assert_eq!(result.effects.len(), 1);
    }

    #[test]
    fn test_did_load_replaces_state() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::SnapshotDidLoad(ready()));
        assert!(result.changed);
        assert_eq!(state.fetch, ready());

        let result = reducer(&mut state, Action::SnapshotDidLoad(ready()));
        assert!(!result.changed);
    }

    #[test]
    fn test_did_error_fails_card() {
        let mut state = AppState::with_fetch(ready());

        let result = reducer(&mut state, Action::SnapshotDidError("boom".into()));

        assert!(result.changed);
        assert!(state.fetch.is_failed());
    }

    #[test]
    fn test_tick_only_animates_while_loading() {
        let mut state = AppState::with_fetch(ready());
        let result = reducer(&mut state, Action::Tick);
        assert!(!result.changed);
        assert_eq!(state.tick_count, 0);

        state.fetch = FetchState::Loading;
        let result = reducer(&mut state, Action::Tick);
        assert!(result.changed);
        assert_eq!(state.tick_count, 1);
    }

    #[test]
    fn test_detail_view_toggles() {
        let mut state = AppState::with_fetch(ready());
        assert!(!state.show_details);

        assert!(reducer(&mut state, Action::UiToggleDetails).changed);
        assert!(state.show_details);

        assert!(reducer(&mut state, Action::UiSwitchTab).changed);
        assert_eq!(state.tab, DetailTab::AirQuality);
        reducer(&mut state, Action::UiSwitchTab);
        assert_eq!(state.tab, DetailTab::Weather);

        reducer(&mut state, Action::UiToggleDetails);
        assert!(!state.show_details);
    }
}
