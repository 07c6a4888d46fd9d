mod chart_card;
mod filter_bar;
mod stat_card;
mod theme_toggle;

pub use chart_card::ChartCard;
pub use filter_bar::FilterBar;
pub use stat_card::StatCard;
pub use theme_toggle::ThemeToggle;
