//! Colors and stroke metrics shared by every backend.

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// CSS color string, usable in SVG attributes and Canvas2D styles.
    pub fn css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                f32::from(self.a) / 255.0
            )
        }
    }
}

/// Palette for the canvas renderers and exporters.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Rgba,
    pub node_fill: Rgba,
    pub node_border: Rgba,
    pub root_fill: Rgba,
    pub selected_border: Rgba,
    pub hovered_fill: Rgba,
    pub label: Rgba,
    pub edge: Rgba,
    pub edge_highlight: Rgba,
    pub toggle_fill: Rgba,
    pub edge_width: f32,
    pub highlight_width: f32,
    pub border_width: f32,
    pub corner_radius: f32,
    pub font_size: f32,
    pub font_family: &'static str,
}

impl Theme {
    /// Dark canvas with white connectors.
    pub fn dark() -> Self {
        Self {
            background: Rgba::rgb(0x0f, 0x0f, 0x0f),
            node_fill: Rgba::rgb(0x1c, 0x1c, 0x1e),
            node_border: Rgba::rgb(0x3a, 0x3a, 0x3c),
            root_fill: Rgba::rgb(0x4f, 0x46, 0xe5),
            selected_border: Rgba::rgb(0x81, 0x8c, 0xf8),
            hovered_fill: Rgba::rgb(0x2c, 0x2c, 0x2e),
            label: Rgba::rgb(0xf5, 0xf5, 0xf7),
            edge: Rgba::rgb(0xff, 0xff, 0xff),
            edge_highlight: Rgba::rgb(0x81, 0x8c, 0xf8),
            toggle_fill: Rgba::rgba(0xff, 0xff, 0xff, 0x1f),
            edge_width: 2.0,
            highlight_width: 3.0,
            border_width: 1.0,
            corner_radius: 8.0,
            font_size: 14.0,
            font_family: "Inter, system-ui, sans-serif",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let c = Rgba::from_hex("#0f0f0f").unwrap();
        assert_eq!(c, Rgba::rgb(15, 15, 15));
        assert_eq!(c.css(), "#0f0f0f");
        assert!(Rgba::from_hex("#abc").is_none());
        assert!(Rgba::from_hex("zzzzzz").is_none());
    }

    #[test]
    fn translucent_css_uses_rgba() {
        assert_eq!(Rgba::rgba(255, 0, 0, 51).css(), "rgba(255, 0, 0, 0.2)");
    }
}
