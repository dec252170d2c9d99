/// An RGB colour, parsed from the `#rrggbb` strings stored in settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from hex string like "#ff0000" or "ff0000"
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self { r, g, b })
    }

    /// Parse a stored colour, falling back when it is malformed
    pub fn from_hex_or(hex: &str, fallback: Color) -> Self {
        Self::from_hex(hex).unwrap_or(fallback)
    }

    /// Convert to crossterm Color
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_parses_with_hash() {
        let color = Color::from_hex("#e2e8f0").unwrap();
        assert_eq!(color, Color::rgb(0xe2, 0xe8, 0xf0));
    }

    #[test]
    fn from_hex_parses_without_hash() {
        assert_eq!(Color::from_hex("ffffff"), Some(Color::WHITE));
    }

    #[test]
    fn from_hex_returns_none_for_invalid() {
        assert!(Color::from_hex("fff").is_none());
        assert!(Color::from_hex("gggggg").is_none());
        assert!(Color::from_hex("#ééé").is_none());
    }

    #[test]
    fn from_hex_or_falls_back() {
        assert_eq!(Color::from_hex_or("slate", Color::BLACK), Color::BLACK);
    }
}
