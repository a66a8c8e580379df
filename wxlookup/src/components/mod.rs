pub mod forecast_chart;
pub mod help_bar;
pub mod lookup_screen;
pub mod weather_panel;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use forecast_chart::{ForecastChart, ForecastChartProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use lookup_screen::{LookupScreen, LookupScreenProps};
pub use weather_panel::{WeatherPanel, WeatherPanelProps};

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];
