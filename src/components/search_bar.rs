use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, ScrollbarStyle, SelectList, SelectListBehavior, SelectListProps,
    SelectListStyle, SelectionStyle, TextInput, TextInputProps, TextInputStyle,
    highlight_substring,
};

use super::Component;
use crate::action::Action;
use crate::state::LocationCandidate;

const PLACEHOLDER: &str = "Search city";
const SEARCH_ICON: &str = "\u{1f50d}";
const CLOSE_ICON: &str = "\u{2715}";
const BAR_BG: Color = Color::Rgb(50, 50, 60);
const DROPDOWN_BG: Color = Color::Rgb(209, 213, 219);

/// Search input with the toggle icon and the candidate dropdown
pub struct SearchBar {
    input: TextInput,
    list: SelectList,
    was_open: bool,
}

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    /// Candidates that may be shown (already filtered by visibility rules)
    pub candidates: &'a [LocationCandidate],
    pub selected: usize,
    pub is_open: bool,
    pub is_focused: bool,
    // Action constructors
    pub on_query_change: fn(String) -> Action,
    pub on_select: fn(usize) -> Action,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            list: SelectList::new(),
            was_open: false,
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_open(&mut self, is_open: bool) {
        if is_open != self.was_open {
            self.reset();
        }
        self.was_open = is_open;
    }

    fn reset(&mut self) {
        self.input = TextInput::new();
        self.list = SelectList::new();
    }

    /// Rows the dropdown wants: one per candidate plus padding.
    pub fn dropdown_height(candidates: &[LocationCandidate]) -> u16 {
        if candidates.is_empty() {
            0
        } else {
            candidates.len().min(u16::MAX as usize - 2) as u16 + 2
        }
    }

    fn candidate_items(candidates: &[LocationCandidate], query: &str) -> Vec<Line<'static>> {
        let base = Style::default().fg(Color::Black);
        let highlight = Style::default()
            .fg(Color::Rgb(11, 120, 120))
            .add_modifier(Modifier::BOLD);
        candidates
            .iter()
            .map(|candidate| {
                let mut line =
                    highlight_substring(&candidate.label(), query.trim(), base, highlight);
                line.spans.insert(0, Span::styled("\u{1f4cd} ", base));
                line
            })
            .collect()
    }

    /// Draw the candidate dropdown over whatever sits below the bar.
    pub fn render_dropdown(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        props: SearchBarProps<'_>,
    ) {
        if !props.is_open || props.candidates.is_empty() || area.height < 3 {
            return;
        }
        frame.render_widget(Clear, area);
        let items = Self::candidate_items(props.candidates, props.query);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.selected,
            is_focused: props.is_focused,
            style: dropdown_style(),
            behavior: SelectListBehavior::default(),
            on_select: props.on_select,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, area, list_props);
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_open || !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            // Same as pressing the close icon
            KeyCode::Esc => return vec![Action::SearchToggle],
            KeyCode::Enter => {
                if props.candidates.is_empty() {
                    return Vec::new();
                }
                return vec![Action::SearchConfirm];
            }
            KeyCode::Down | KeyCode::Up => {
                if props.candidates.is_empty() {
                    return Vec::new();
                }
                let items = Self::candidate_items(props.candidates, props.query);
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: props.selected,
                    is_focused: props.is_focused,
                    style: dropdown_style(),
                    behavior: SelectListBehavior::default(),
                    on_select: props.on_select,
                    render_item: &|item| item.clone(),
                };
                return self
                    .list
                    .handle_event(event, list_props)
                    .into_iter()
                    .collect();
            }
            _ => {}
        }

        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            style: input_style(),
            on_change: props.on_query_change,
            on_submit: |_| Action::SearchConfirm,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if props.is_open {
                Color::Rgb(11, 179, 178)
            } else {
                Color::DarkGray
            }))
            .style(Style::default().bg(BAR_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [input_area, icon_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(3)]).areas(inner);

        if props.is_open {
            let input_props = TextInputProps {
                value: props.query,
                placeholder: PLACEHOLDER,
                is_focused: props.is_focused,
                style: input_style(),
                on_change: props.on_query_change,
                on_submit: |_| Action::SearchConfirm,
                on_cursor_move: Some(|_| Action::Render),
            };
            self.input.render(frame, input_area, input_props);
        } else {
            let placeholder = Line::from(vec![
                Span::raw(" "),
                Span::styled(PLACEHOLDER, Style::default().fg(Color::Gray)),
            ]);
            frame.render_widget(Paragraph::new(placeholder), input_area);
        }

        let icon = if props.is_open { CLOSE_ICON } else { SEARCH_ICON };
        frame.render_widget(Paragraph::new(Line::from(icon).centered()), icon_area);
    }
}

fn dropdown_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 1),
            bg: Some(DROPDOWN_BG),
            fg: Some(Color::Black),
        },
        selection: SelectionStyle::default(),
        scrollbar: ScrollbarStyle::default(),
    }
}

fn input_style() -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(BAR_BG),
            fg: Some(Color::White),
        },
        placeholder_style: None,
        cursor_style: None,
    }
}
