//! HUD color palette

/// Color representation supporting named and true colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Reset to default
    #[default]
    Reset,
    Black,
    DarkGrey,
    Grey,
    White,
    Red,
    Green,
    Yellow,
    Cyan,
    /// True color RGB
    Rgb(u8, u8, u8),
}

impl Color {
    pub const GOLD: Self = Color::Rgb(218, 165, 32);
    pub const ALERT_RED: Self = Color::Rgb(220, 20, 60);
    pub const STATUS_GREEN: Self = Color::Rgb(50, 205, 50);
    pub const HUD_CYAN: Self = Color::Rgb(0, 255, 255);
    pub const BACKDROP: Self = Color::Rgb(5, 7, 12);

    /// Convert to crossterm color
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        use crossterm::style::Color as C;

        match *self {
            Color::Reset => C::Reset,
            Color::Black => C::Black,
            Color::DarkGrey => C::DarkGrey,
            Color::Grey => C::Grey,
            Color::White => C::White,
            Color::Red => C::Red,
            Color::Green => C::Green,
            Color::Yellow => C::Yellow,
            Color::Cyan => C::Cyan,
            Color::Rgb(r, g, b) => C::Rgb { r, g, b },
        }
    }
}
