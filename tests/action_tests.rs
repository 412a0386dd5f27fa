//! Action and state tests using TestHarness
//!
//! - Create harness with initial state
//! - Emit actions to simulate user/async events
//! - Drain and assert emitted actions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_dispatch::testing::*;
use tui_dispatch::{
    assert_emitted, assert_not_emitted, EffectStore, EventKind, NumericComponentId,
};
use weather_screen::{
    action::Action,
    components::{Component, SearchBar, WeatherScreen},
    effect::Effect,
    reducer::reducer,
    state::{
        query_is_searchable, AppState, ForecastOrigin, LocationCandidate, WeatherSnapshot,
        DEFAULT_CITY,
    },
};

fn candidate(name: &str, country: &str) -> LocationCandidate {
    LocationCandidate {
        name: name.into(),
        country: country.into(),
        ..Default::default()
    }
}

fn search_state(query: &str, results: Vec<LocationCandidate>) -> AppState {
    AppState {
        loading: false,
        search_visible: true,
        search_query: query.into(),
        search_results: results,
        ..Default::default()
    }
}

#[test]
fn test_reducer_load_default() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert!(store.state().weather.is_none());

    let result = store.dispatch(Action::WeatherLoadDefault);
    assert!(result.changed, "State should change");
    assert!(store.state().loading);
    assert_eq!(result.effects.len(), 3);
    assert!(result
        .effects
        .iter()
        .any(|e| matches!(e, Effect::LoadStoredCity)));
}

#[test]
fn test_reducer_blank_stored_city_falls_back() {
    let mut store = EffectStore::new(AppState::new("Galle", 3000), reducer);

    let result = store.dispatch(Action::WeatherStoredCityDidLoad(Some("   ".into())));
    assert!(matches!(
        &result.effects[0],
        Effect::FetchForecast { city, .. } if city == "Galle"
    ));
}

#[test]
fn test_reducer_forecast_requests_are_distinct() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let first = store.dispatch(Action::WeatherStoredCityDidLoad(None));
    let second = store.dispatch(Action::WeatherStoredCityDidLoad(None));

    let request_of = |effect: &Effect| match effect {
        Effect::FetchForecast { request, .. } => *request,
        other => panic!("unexpected effect {other:?}"),
    };
    assert_ne!(
        request_of(&first.effects[0]),
        request_of(&second.effects[0])
    );
}

#[test]
fn test_reducer_last_response_wins() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let mut first = WeatherSnapshot::default();
    first.location.name = "Colombo".into();
    let mut second = WeatherSnapshot::default();
    second.location.name = "Kandy".into();

    store.dispatch(Action::WeatherDidLoad {
        city: "Colombo".into(),
        origin: ForecastOrigin::Selection,
        snapshot: first,
    });
    store.dispatch(Action::WeatherDidLoad {
        city: "Kandy".into(),
        origin: ForecastOrigin::Startup,
        snapshot: second,
    });

    assert_eq!(
        store.state().weather.as_ref().map(|w| w.location.name.as_str()),
        Some("Kandy")
    );
}

#[test]
fn test_reducer_toggle_search_clears() {
    let mut store = EffectStore::new(
        search_state("Lon", vec![candidate("London", "United Kingdom")]),
        reducer,
    );

    store.dispatch(Action::SearchToggle);
    assert!(!store.state().search_visible);
    assert!(store.state().search_query.is_empty());
    assert!(store.state().search_results.is_empty());

    store.dispatch(Action::SearchToggle);
    assert!(store.state().search_visible);
}

#[test]
fn test_short_query_hides_stale_results() {
    let state = search_state("Lo", vec![candidate("London", "United Kingdom")]);

    // Results are kept but not shown
    assert_eq!(state.search_results.len(), 1);
    assert!(state.visible_candidates().is_empty());
}

#[test]
fn test_clear_stale_results_option() {
    let state = search_state("Lon", vec![candidate("London", "United Kingdom")])
        .with_clear_stale_results(true);
    let mut store = EffectStore::new(state, reducer);

    store.dispatch(Action::SearchQueryChange("Lo".into()));
    assert!(store.state().search_results.is_empty());
}

#[test]
fn test_search_error_keeps_candidates() {
    let mut store = EffectStore::new(
        search_state("Lon", vec![candidate("London", "United Kingdom")]),
        reducer,
    );

    let result = store.dispatch(Action::SearchDidError("HTTP 500".into()));
    assert!(!result.changed);
    assert_eq!(store.state().search_results.len(), 1);
}

#[test]
fn test_confirm_without_candidates_is_noop() {
    let mut store = EffectStore::new(search_state("Lon", Vec::new()), reducer);

    let result = store.dispatch(Action::SearchConfirm);
    assert!(!result.changed);
    assert!(result.effects.is_empty());
    assert!(store.state().search_visible);
}

#[test]
fn test_query_is_searchable() {
    assert!(!query_is_searchable(""));
    assert!(!query_is_searchable("Lo"));
    assert!(!query_is_searchable("  Lo  "));
    assert!(query_is_searchable("Lon"));
}

#[test]
fn test_search_bar_keyboard_events() {
    let state = search_state(
        "Lon",
        vec![
            candidate("London", "United Kingdom"),
            candidate("Londrina", "Brazil"),
        ],
    );
    let mut component = SearchBar::new();
    component.set_open(true);

    let mut actions: Vec<Action> = Vec::new();
    for code in [KeyCode::Enter, KeyCode::Esc] {
        let event = EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE));
        actions.extend(
            component.handle_event(&event, WeatherScreen::search_props(&state, true)),
        );
    }

    actions.assert_count(2);
    assert_emitted!(actions, Action::SearchConfirm);
    assert_emitted!(actions, Action::SearchToggle);
}

#[test]
fn test_search_bar_enter_without_candidates() {
    let state = search_state("Lo", vec![candidate("London", "United Kingdom")]);
    let mut component = SearchBar::new();
    component.set_open(true);

    let event = EventKind::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    let actions: Vec<_> = component
        .handle_event(&event, WeatherScreen::search_props(&state, true))
        .into_iter()
        .collect();

    actions.assert_empty();
}

#[test]
fn test_search_bar_typing_changes_query() {
    let mut harness = TestHarness::<AppState, Action>::new(search_state("", Vec::new()));
    let mut component = SearchBar::new();
    component.set_open(true);

    let actions = harness.send_keys::<NumericComponentId, _, _>("k", |state, event| {
        let props = WeatherScreen::search_props(state, true);
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    assert_emitted!(actions, Action::SearchQueryChange(_));
    assert_not_emitted!(actions, Action::SearchConfirm);
}

#[test]
fn test_search_bar_ignores_when_closed() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = SearchBar::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("a b", |state, event| {
        let props = WeatherScreen::search_props(state, true);
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_action_categories() {
    let did_load = Action::WeatherDidLoad {
        city: DEFAULT_CITY.into(),
        origin: ForecastOrigin::Startup,
        snapshot: WeatherSnapshot::default(),
    };

    // Categories are inferred from naming convention
    assert_eq!(did_load.category(), Some("weather_did"));
    assert_eq!(Action::Quit.category(), None);
    assert!(did_load.is_weather_did());
}

#[test]
fn test_harness_emit_and_drain() {
    let mut harness = TestHarness::<(), Action>::new(());

    harness.emit(Action::WeatherLoadDefault);
    harness.emit(Action::SearchToggle);
    harness.emit(Action::ProgressTick(1));

    let actions = harness.drain_emitted();
    actions.assert_count(3);
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![
        Action::WeatherLoadDefault,
        Action::WeatherStoredCityDidLoad(None),
    ];

    assert_emitted!(actions, Action::WeatherLoadDefault);
    assert_emitted!(actions, Action::WeatherStoredCityDidLoad(_));
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::WeatherDidError { .. });
}
