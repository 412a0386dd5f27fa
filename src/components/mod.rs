pub mod current_conditions;
pub mod forecast_strip;
pub mod loading_view;
pub mod search_bar;
pub mod weather_screen;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use current_conditions::{CurrentConditionsView, CurrentConditionsProps};
pub use forecast_strip::{ForecastStrip, ForecastStripProps};
pub use loading_view::{LoadingView, LoadingViewProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use weather_screen::{WeatherScreen, WeatherScreenProps};
