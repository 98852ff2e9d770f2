use board_scene::Rgb;
use ratatui::style::Color;

/// Colors the board viewer uses outside the scene itself. Square, highlight
/// and arrow colors come from the scene.
#[derive(Debug, Clone)]
pub struct Theme {
    pub white_piece: Rgb,
    pub black_piece: Rgb,
    pub board_border: Color,
    pub board_label: Color,
    pub status_text: Color,
    pub status_error: Color,
    pub background: Rgb,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            white_piece: Rgb::new(0xd4, 0xa0, 0x17),
            black_piece: Rgb::new(0x1e, 0x1e, 0x1e),
            board_border: Color::Cyan,
            board_label: Color::Yellow,
            status_text: Color::Gray,
            status_error: Color::LightRed,
            background: Rgb::BLACK,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

pub fn from_color(color: Color) -> Option<Rgb> {
    match color {
        Color::Rgb(r, g, b) => Some(Rgb::new(r, g, b)),
        Color::Black => Some(Rgb::BLACK),
        Color::White => Some(Rgb::WHITE),
        _ => None,
    }
}
