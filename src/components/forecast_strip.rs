use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::conditions::icon_for;
use crate::format::{format_temp, weekday_label};
use crate::state::ForecastDay;

/// Card size including borders.
pub const CARD_WIDTH: u16 = 13;
pub const CARD_HEIGHT: u16 = 5;
const CARD_GAP: u16 = 1;
const CARD_BG: Color = Color::Rgb(40, 44, 60);

/// Horizontally scrollable row of per-day cards
pub struct ForecastStrip;

pub struct ForecastStripProps<'a> {
    pub days: &'a [ForecastDay],
    /// Index of the first card drawn
    pub scroll: usize,
}

/// How many cards fit in `width` columns.
pub fn visible_cards(width: u16) -> usize {
    usize::from((width + CARD_GAP) / (CARD_WIDTH + CARD_GAP))
}

impl Component<Action> for ForecastStrip {
    type Props<'a> = ForecastStripProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if props.days.is_empty() || area.height < CARD_HEIGHT {
            return;
        }

        let start = props.scroll.min(props.days.len() - 1);
        let count = visible_cards(area.width).min(props.days.len() - start);
        if count == 0 {
            return;
        }

        let mut constraints = Vec::with_capacity(count * 2);
        for i in 0..count {
            if i > 0 {
                constraints.push(Constraint::Length(CARD_GAP));
            }
            constraints.push(Constraint::Length(CARD_WIDTH));
        }
        let [row] = Layout::vertical([Constraint::Length(CARD_HEIGHT)]).areas(area);
        let slots = Layout::horizontal(constraints).split(row);

        for (day, slot) in props.days[start..start + count]
            .iter()
            .zip(slots.iter().step_by(2))
        {
            render_card(frame, *slot, day);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, day: &ForecastDay) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .style(Style::default().bg(CARD_BG));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let icon = icon_for(&day.day.condition.text);
    let lines = vec![
        Line::from(Span::styled(
            weekday_label(day.date),
            Style::default().fg(Color::White),
        ))
        .centered(),
        Line::from(Span::styled(icon.glyph(), Style::default().fg(icon.color()))).centered(),
        Line::from(Span::styled(
            format_temp(day.day.avgtemp_c),
            Style::default().fg(Color::White).bold(),
        ))
        .centered(),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
