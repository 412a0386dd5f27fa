use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::conditions::icon_for;
use crate::format::{format_humidity, format_temp, format_wind, weekday_label};
use crate::state::WeatherSnapshot;

/// Location, date, icon, temperature and the three-stat row
pub struct CurrentConditionsView;

pub struct CurrentConditionsProps<'a> {
    pub weather: Option<&'a WeatherSnapshot>,
    /// Date the weekday label is computed from
    pub today: NaiveDate,
}

const PLACEHOLDER: &str = "--";

impl Component<Action> for CurrentConditionsView {
    type Props<'a> = CurrentConditionsProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // name, country
            Constraint::Length(1), // weekday
            Constraint::Length(1), // spacer
            Constraint::Length(1), // icon
            Constraint::Max(6),    // temperature
            Constraint::Length(1), // condition text
            Constraint::Length(1), // spacer
            Constraint::Length(1), // stats
        ])
        .flex(Flex::Center)
        .split(area);

        let Some(weather) = props.weather else {
            render_empty(frame, &chunks, props.today);
            return;
        };

        let title = Line::from(vec![
            Span::styled(
                format!("{}, ", weather.location.name),
                Style::default().fg(Color::White).bold(),
            ),
            Span::styled(
                weather.location.country.clone(),
                Style::default().fg(Color::Gray),
            ),
        ])
        .centered();
        frame.render_widget(Paragraph::new(title), chunks[0]);

        render_weekday(frame, chunks[1], props.today);

        let icon = icon_for(&weather.current.condition.text);
        let icon_line =
            Line::from(Span::styled(icon.glyph(), Style::default().fg(icon.color()))).centered();
        frame.render_widget(Paragraph::new(icon_line), chunks[3]);

        let temp_text = format_temp(weather.current.temp_c);
        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(temperature_gradient(weather.current.temp_c));
        frame.render_widget(ArtBox::new(&renderer, &temp_text), chunks[4]);

        let desc = Line::from(vec![Span::styled(
            weather.current.condition.text.clone(),
            Style::default().fg(Color::Gray),
        )])
        .centered();
        frame.render_widget(Paragraph::new(desc), chunks[5]);

        render_stats(
            frame,
            chunks[7],
            [
                ("\u{1f4a8}", format_wind(weather.current.wind_kph)),
                (
                    "\u{1f305}",
                    weather.sunrise().unwrap_or(PLACEHOLDER).to_string(),
                ),
                ("\u{1f4a7}", format_humidity(weather.current.humidity)),
            ],
        );
    }
}

fn render_weekday(frame: &mut Frame, area: Rect, today: NaiveDate) {
    let day = Line::from(vec![Span::styled(
        weekday_label(today),
        Style::default().fg(Color::White),
    )])
    .centered();
    frame.render_widget(Paragraph::new(day), area);
}

fn render_stats(frame: &mut Frame, area: Rect, stats: [(&str, String); 3]) {
    let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);
    for ((icon, value), column) in stats.into_iter().zip(columns.iter()) {
        let line = Line::from(vec![
            Span::raw(format!("{icon} ")),
            Span::styled(value, Style::default().fg(Color::White).bold()),
        ])
        .centered();
        frame.render_widget(Paragraph::new(line), *column);
    }
}

fn render_empty(frame: &mut Frame, chunks: &[Rect], today: NaiveDate) {
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                "No weather data",
                Style::default().fg(Color::Gray).bold(),
            ))
            .centered(),
        ),
        chunks[0],
    );
    render_weekday(frame, chunks[1], today);

    let hint = Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("/", Style::default().fg(Color::Cyan).bold()),
        Span::styled(" to search for a city", Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), chunks[5]);

    render_stats(
        frame,
        chunks[7],
        [
            ("\u{1f4a8}", PLACEHOLDER.to_string()),
            ("\u{1f305}", PLACEHOLDER.to_string()),
            ("\u{1f4a7}", PLACEHOLDER.to_string()),
        ],
    );
}

/// Colder is bluer, warmer is redder.
fn temperature_gradient(celsius: f32) -> Fill {
    let (start, end) = match celsius {
        t if t < 0.0 => (ArtColor::rgb(150, 200, 255), ArtColor::rgb(200, 230, 255)),
        t if t < 15.0 => (ArtColor::rgb(100, 180, 255), ArtColor::rgb(150, 220, 200)),
        t if t < 25.0 => (ArtColor::rgb(100, 200, 150), ArtColor::rgb(255, 220, 100)),
        t if t < 35.0 => (ArtColor::rgb(255, 180, 80), ArtColor::rgb(255, 120, 80)),
        _ => (ArtColor::rgb(255, 100, 80), ArtColor::rgb(255, 60, 60)),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}
