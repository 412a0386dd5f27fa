//! Condition text to icon mapping
//!
//! WeatherAPI reports conditions as free text ("Partly cloudy", "Moderate rain at times").
//! Known strings map to an icon; anything else falls back to [`WeatherIcon::Other`].

use ratatui::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Sun,
    PartlyCloudy,
    Cloud,
    Mist,
    ModerateRain,
    HeavyRain,
    Thunder,
    Snow,
    Other,
}

/// Text → icon table. Keys are lowercase.
const CONDITION_ICONS: &[(&str, WeatherIcon)] = &[
    ("sunny", WeatherIcon::Sun),
    ("clear", WeatherIcon::Sun),
    ("partly cloudy", WeatherIcon::PartlyCloudy),
    ("cloudy", WeatherIcon::Cloud),
    ("overcast", WeatherIcon::Cloud),
    ("mist", WeatherIcon::Mist),
    ("fog", WeatherIcon::Mist),
    ("freezing fog", WeatherIcon::Mist),
    ("patchy rain possible", WeatherIcon::ModerateRain),
    ("patchy rain nearby", WeatherIcon::ModerateRain),
    ("patchy light drizzle", WeatherIcon::ModerateRain),
    ("light drizzle", WeatherIcon::ModerateRain),
    ("patchy light rain", WeatherIcon::ModerateRain),
    ("light rain", WeatherIcon::ModerateRain),
    ("light rain shower", WeatherIcon::ModerateRain),
    ("moderate rain", WeatherIcon::ModerateRain),
    ("moderate rain at times", WeatherIcon::ModerateRain),
    ("heavy rain", WeatherIcon::HeavyRain),
    ("heavy rain at times", WeatherIcon::HeavyRain),
    ("moderate or heavy freezing rain", WeatherIcon::HeavyRain),
    ("moderate or heavy rain shower", WeatherIcon::HeavyRain),
    ("torrential rain shower", WeatherIcon::HeavyRain),
    ("moderate or heavy rain with thunder", WeatherIcon::Thunder),
    ("patchy light rain with thunder", WeatherIcon::Thunder),
    ("thundery outbreaks possible", WeatherIcon::Thunder),
    ("thundery outbreaks in nearby", WeatherIcon::Thunder),
    ("light snow", WeatherIcon::Snow),
    ("patchy light snow", WeatherIcon::Snow),
    ("moderate snow", WeatherIcon::Snow),
    ("heavy snow", WeatherIcon::Snow),
    ("blizzard", WeatherIcon::Snow),
    ("blowing snow", WeatherIcon::Snow),
];

/// Look up the icon for a condition string. Case and surrounding whitespace are ignored.
pub fn icon_for(text: &str) -> WeatherIcon {
    let key = text.trim().to_lowercase();
    CONDITION_ICONS
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(WeatherIcon::Other, |(_, icon)| *icon)
}

impl WeatherIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            WeatherIcon::Sun => "\u{2600}\u{fe0f}",
            WeatherIcon::PartlyCloudy => "\u{26c5}",
            WeatherIcon::Cloud => "\u{2601}\u{fe0f}",
            WeatherIcon::Mist => "\u{1f32b}\u{fe0f}",
            WeatherIcon::ModerateRain => "\u{1f326}\u{fe0f}",
            WeatherIcon::HeavyRain => "\u{1f327}\u{fe0f}",
            WeatherIcon::Thunder => "\u{26c8}\u{fe0f}",
            WeatherIcon::Snow => "\u{1f328}\u{fe0f}",
            WeatherIcon::Other => "\u{1f321}\u{fe0f}",
        }
    }

    pub fn color(self) -> Color {
        match self {
            WeatherIcon::Sun => Color::Rgb(255, 220, 100),
            WeatherIcon::PartlyCloudy => Color::Rgb(255, 200, 120),
            WeatherIcon::Cloud | WeatherIcon::Mist => Color::Gray,
            WeatherIcon::ModerateRain | WeatherIcon::HeavyRain => Color::Rgb(100, 180, 255),
            WeatherIcon::Thunder => Color::Rgb(200, 160, 255),
            WeatherIcon::Snow => Color::White,
            WeatherIcon::Other => Color::DarkGray,
        }
    }
}
