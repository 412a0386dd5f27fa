//! Display formatting shared by the views

use chrono::NaiveDate;

/// Full weekday name, e.g. "Monday".
pub fn weekday_label(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Temperature floored to whole degrees, e.g. `22.9` → "22°C".
pub fn format_temp(celsius: f32) -> String {
    format!("{}°C", celsius.floor() as i32)
}

pub fn format_wind(kph: f32) -> String {
    format!("{kph}km")
}

pub fn format_humidity(percent: u8) -> String {
    format!("{percent}%")
}
