use chrono::NaiveDate;
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::forecast_strip::CARD_HEIGHT;
use super::{
    Component, CurrentConditionsProps, CurrentConditionsView, ForecastStrip, ForecastStripProps,
    LoadingView, LoadingViewProps, SearchBar, SearchBarProps,
};
use crate::action::Action;
use crate::state::AppState;

const SEARCH_BAR_HEIGHT: u16 = 3;

/// Props for WeatherScreen - read-only view of state
pub struct WeatherScreenProps<'a> {
    pub state: &'a AppState,
    /// Local date at render time
    pub today: NaiveDate,
    pub is_focused: bool,
}

/// The whole screen: loading view or populated weather view
#[derive(Default)]
pub struct WeatherScreen {
    pub search: SearchBar,
}

impl WeatherScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_props(state: &AppState, is_focused: bool) -> SearchBarProps<'_> {
        SearchBarProps {
            query: &state.search_query,
            candidates: state.visible_candidates(),
            selected: state.search_selected,
            is_open: state.search_visible,
            is_focused,
            on_query_change: Action::SearchQueryChange,
            on_select: Action::SearchSelect,
        }
    }
}

impl Component<Action> for WeatherScreen {
    type Props<'a> = WeatherScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('/') | KeyCode::Char('s') if !props.state.loading => {
                    Some(Action::SearchToggle)
                }
                KeyCode::Left | KeyCode::Char('h') => Some(Action::UiScrollForecast(-1)),
                KeyCode::Right | KeyCode::Char('l') => Some(Action::UiScrollForecast(1)),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherScreenProps<'_>) {
        let state = props.state;
        if state.loading {
            LoadingView.render(
                frame,
                area,
                LoadingViewProps {
                    progress: state.progress(),
                },
            );
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Length(1),                 // Header
            Constraint::Length(SEARCH_BAR_HEIGHT), // Search bar
            Constraint::Min(1),                    // Current conditions
            Constraint::Length(CARD_HEIGHT),       // Forecast strip
            Constraint::Length(1),                 // Help bar
        ])
        .split(area);

        let header = Line::from(vec![
            Span::raw(" "),
            Span::styled("Weather", Style::default().fg(Color::White).bold()),
        ]);
        frame.render_widget(Paragraph::new(header), chunks[0]);

        self.search.set_open(state.search_visible);
        let search_focused = props.is_focused && state.search_visible;
        self.search
            .render(frame, chunks[1], Self::search_props(state, search_focused));

        CurrentConditionsView.render(
            frame,
            chunks[2],
            CurrentConditionsProps {
                weather: state.weather.as_ref(),
                today: props.today,
            },
        );

        ForecastStrip.render(
            frame,
            chunks[3],
            ForecastStripProps {
                days: state
                    .weather
                    .as_ref()
                    .map(|weather| weather.forecast_days.as_slice())
                    .unwrap_or_default(),
                scroll: state.forecast_scroll,
            },
        );

        render_help_bar(frame, chunks[4], state.search_visible);

        // Dropdown last so it draws over the conditions block
        let candidates = state.visible_candidates();
        if !candidates.is_empty() {
            let below = chunks[2].union(chunks[3]);
            let height = SearchBar::dropdown_height(candidates).min(below.height);
            let dropdown = Rect {
                x: chunks[1].x + 1,
                y: below.y,
                width: chunks[1].width.saturating_sub(2),
                height,
            };
            self.search
                .render_dropdown(frame, dropdown, Self::search_props(state, search_focused));
        }
    }
}

fn render_help_bar(frame: &mut Frame, area: Rect, search_open: bool) {
    let search_hints = [
        StatusBarHint::new("esc", "close"),
        StatusBarHint::new("\u{2191}\u{2193}", "pick"),
        StatusBarHint::new("enter", "select"),
    ];
    let main_hints = [
        StatusBarHint::new("/", "search"),
        StatusBarHint::new("\u{2190}\u{2192}", "scroll"),
        StatusBarHint::new("q", "quit"),
    ];
    let hints = if search_open {
        &search_hints
    } else {
        &main_hints
    };

    let mut status_bar = StatusBar::new();
    <StatusBar as Component<Action>>::render(
        &mut status_bar,
        frame,
        area,
        StatusBarProps {
            left: StatusBarSection::empty(),
            center: StatusBarSection::hints(hints),
            right: StatusBarSection::empty(),
            style: StatusBarStyle::default(),
            is_focused: false,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn loaded_state() -> AppState {
        AppState {
            loading: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_handle_event_toggle_search() {
        let mut component = WeatherScreen::new();
        let state = loaded_state();
        let props = WeatherScreenProps {
            state: &state,
            today: today(),
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("s")), props)
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::SearchToggle);
    }

    #[test]
    fn test_search_disabled_while_loading() {
        let mut component = WeatherScreen::new();
        let state = AppState::default();
        let props = WeatherScreenProps {
            state: &state,
            today: today(),
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("s")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_handle_event_quit() {
        let mut component = WeatherScreen::new();
        let state = loaded_state();
        let props = WeatherScreenProps {
            state: &state,
            today: today(),
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("q")), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::Quit);
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        let mut component = WeatherScreen::new();
        let state = loaded_state();
        let props = WeatherScreenProps {
            state: &state,
            today: today(),
            is_focused: false,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("q")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_loading() {
        let mut render = RenderHarness::new(60, 24);
        let mut component = WeatherScreen::new();
        let state = AppState::default();

        let output = render.render_to_string_plain(|frame| {
            let props = WeatherScreenProps {
                state: &state,
                today: today(),
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Loading weather"));
        assert!(output.contains("0%"));
    }
}
