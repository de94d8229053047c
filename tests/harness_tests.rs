//! Store + effect + render tests using EffectStoreTestHarness
//!
//! Async snapshot reads are simulated by completing the result action by hand.

use ratatui::{Frame, layout::Rect};
use tui_dispatch::NumericComponentId;
use tui_dispatch::testing::*;
use weather_card::{
    action::Action,
    components::{CardDisplay, CardDisplayProps, Component},
    effect::Effect,
    reducer::reducer,
    state::{AirQualityData, AppState, DetailTab, FetchState, WeatherData},
};

fn mock_ready() -> FetchState {
    FetchState::ready(
        WeatherData::new("Paris", 18.5, "Clear sky"),
        AirQualityData::single(2),
    )
}

fn initial() -> AppState {
    AppState::new(Some("snapshots/paris.json".into()))
}

fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let props = CardDisplayProps {
        state,
        is_focused: true,
    };
    CardDisplay.render(frame, area, props);
}

#[test]
fn test_snapshot_flow_with_harness() {
    let mut harness = EffectStoreTestHarness::new(initial(), reducer);

    harness.dispatch_collect(Action::SnapshotLoad);
    harness.assert_state(|s| s.fetch.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::LoadSnapshot { path } if path == "snapshots/paris.json"),
    );

    harness.complete_action(Action::SnapshotDidLoad(mock_ready()));
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 1, "Should have processed 1 action");
    assert_eq!(changed, 1, "Action should have changed state");
    harness.assert_state(|s| s.fetch.weather().unwrap().description == "Clear sky");
}

#[test]
fn test_snapshot_error_flow() {
    let mut harness = EffectStoreTestHarness::new(initial(), reducer);

    harness.dispatch_collect(Action::SnapshotLoad);
    harness.complete_action(Action::SnapshotDidError("permission denied".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.fetch.is_failed());

    let output = harness.render_plain(60, 24, draw);
    assert!(output.contains("Error fetching data. Please try again."));
    assert!(
        !output.contains("permission denied"),
        "Failure cause must not reach the card:\n{output}"
    );
}

#[test]
fn test_reload_keeps_card_visible() {
    let mut harness = EffectStoreTestHarness::new(initial(), reducer);
    harness.complete_action(Action::SnapshotDidLoad(mock_ready()));
    harness.process_emitted();

    harness.dispatch_collect(Action::SnapshotLoad);
    harness.assert_state(|s| s.fetch.is_ready());

    let output = harness.render_plain(60, 24, draw);
    assert!(output.contains("Fair"), "Card stays up while reloading:\n{output}");
}

#[test]
fn test_ticks_only_while_loading() {
    let mut harness = EffectStoreTestHarness::new(initial(), reducer);

    let results = harness.dispatch_all([Action::Tick, Action::Tick]);
    assert_eq!(results, vec![true, true]);
    harness.assert_state(|s| s.tick_count == 2);

    harness.complete_action(Action::SnapshotDidLoad(mock_ready()));
    harness.process_emitted();

    let results = harness.dispatch_all([Action::Tick]);
    assert_eq!(results, vec![false]);
}

#[test]
fn test_keyboard_triggers_reload() {
    let mut harness = EffectStoreTestHarness::new(initial(), reducer);
    let mut component = CardDisplay;

    let actions = harness.send_keys::<NumericComponentId, _, _>("r", |state, event| {
        let props = CardDisplayProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::SnapshotLoad);

    harness.dispatch_collect(Action::SnapshotLoad);
    let effects = harness.drain_effects();
    effects.effects_all_match(|e| matches!(e, Effect::LoadSnapshot { .. }));
}

#[test]
fn test_no_snapshot_stays_loading() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SnapshotLoad);
    let effects = harness.drain_effects();
    effects.effects_empty();
    harness.assert_state(|s| s.fetch.is_loading());
}

#[test]
fn test_render_changes_between_states() {
    let mut harness = EffectStoreTestHarness::new(initial(), reducer);
    let loading = harness.render_plain(60, 24, draw);

    harness.complete_action(Action::SnapshotDidLoad(mock_ready()));
    harness.process_emitted();
    let ready = harness.render_plain(60, 24, draw);

    assert_ne!(loading, ready, "Loading and ready renders should differ");
    assert!(ready.contains("Paris"));
}

#[test]
fn test_detail_view_keys() {
    let mut harness = EffectStoreTestHarness::new(initial(), reducer);
    harness.complete_action(Action::SnapshotDidLoad(mock_ready()));
    harness.process_emitted();

    harness.dispatch_collect(Action::UiToggleDetails);
    harness.assert_state(|s| s.show_details);
    let weather = harness.render_plain(60, 24, draw);
    assert!(weather.contains("Weather"), "Tabs shown:\n{weather}");

    harness.dispatch_collect(Action::UiSwitchTab);
    harness.assert_state(|s| s.tab == DetailTab::AirQuality);
    let air = harness.render_plain(60, 24, draw);
    assert!(air.contains("AQI 2"), "Air quality tab:\n{air}");

    harness.dispatch_collect(Action::UiToggleDetails);
    let card = harness.render_plain(60, 24, draw);
    assert!(card.contains("Air Quality Index (AQI):"), "Back to the card:\n{card}");
}
