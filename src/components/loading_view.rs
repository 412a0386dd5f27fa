use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Gauge, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::conditions::WeatherIcon;

pub const LOADING_BG: Color = Color::Rgb(16, 42, 67);
pub const PROGRESS_COLOR: Color = Color::Rgb(11, 179, 178);
const BAR_WIDTH: u16 = 30;

/// Skeleton screen shown while `loading` is set
pub struct LoadingView;

pub struct LoadingViewProps {
    /// Simulated progress in [0, 1]
    pub progress: f64,
}

impl Component<Action> for LoadingView {
    type Props<'a> = LoadingViewProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        frame.render_widget(Block::default().style(Style::default().bg(LOADING_BG)), area);

        let chunks = Layout::vertical([
            Constraint::Length(1), // icon
            Constraint::Length(1), // spacer
            Constraint::Max(6),    // title
            Constraint::Length(1), // spacer
            Constraint::Length(1), // progress bar
            Constraint::Length(1), // caption
        ])
        .flex(Flex::Center)
        .split(area);

        let icon = Line::from(WeatherIcon::PartlyCloudy.glyph()).centered();
        frame.render_widget(Paragraph::new(icon), chunks[0]);

        let title_fill = Fill::Linear(LinearGradient::horizontal(
            ArtColor::rgb(255, 255, 255),
            ArtColor::rgb(150, 220, 220),
        ));
        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(title_fill);
        frame.render_widget(ArtBox::new(&renderer, "Weather"), chunks[2]);

        let [bar_area] = Layout::horizontal([Constraint::Length(BAR_WIDTH)])
            .flex(Flex::Center)
            .areas(chunks[4]);
        let ratio = props.progress.clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(PROGRESS_COLOR).bg(Color::Rgb(40, 60, 80)))
            .ratio(ratio)
            .label(format!("{:.0}%", ratio * 100.0));
        frame.render_widget(gauge, bar_area);

        let caption = Line::from(vec![Span::styled(
            "Loading weather...",
            Style::default().fg(Color::Gray),
        )])
        .centered();
        frame.render_widget(Paragraph::new(caption), chunks[5]);
    }
}
