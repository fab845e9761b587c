use ratatui::style::Color;

/// Rows given to the compose field, borders included.
pub const COMPOSE_HEIGHT: u16 = 6;
pub const HEADER_HEIGHT: u16 = 2;

pub const PENDING_COLOR: Color = Color::Yellow;
pub const SUCCESS_COLOR: Color = Color::Green;
pub const FAILURE_COLOR: Color = Color::Red;
/// Background of every other list row.
pub const STRIPE_COLOR: Color = Color::Indexed(236);
