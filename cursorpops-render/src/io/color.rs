/*
 * Colour literals: #RRGGBB, R,G,B and R.R,G.G,B.B
 */
use hex_color::HexColor;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    /// Pixels of this colour are see-through on the overlay surface.
    pub const TRANSPARENCY_KEY: Color = Color::new(255, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    /// Nudges the transparency key so user colours are never invisible.
    pub fn visible(self) -> Color {
        if self == Color::TRANSPARENCY_KEY {
            Color::new(255, 0, 254)
        } else {
            self
        }
    }

    /// Form written back onto a command line, `R,G,B`.
    pub fn to_literal(self) -> String {
        format!("{},{},{}", self.r, self.g, self.b)
    }
}

impl From<HexColor> for Color {
    fn from(colour: HexColor) -> Color {
        Color::new(colour.r, colour.g, colour.b)
    }
}

/// Parses a colour literal. Anything malformed is black.
pub fn parse_color(literal: &str) -> Color {
    if literal.is_empty() {
        return Color::default();
    }

    let parsed = match literal.strip_prefix('#') {
        Some(hex) => parse_hex(hex),
        None => parse_rgb(literal),
    };

    parsed.unwrap_or_default()
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match HexColor::parse(&format!("#{hex}")) {
        Ok(colour) => Some(colour.into()),
        Err(e) => {
            log::debug!("rejected hex colour #{hex}: {e:?}");
            None
        }
    }
}

fn parse_rgb(literal: &str) -> Option<Color> {
    let (r, rest) = literal.split_once(',')?;
    let (g, b) = rest.split_once(',')?;
    let channels = [r.trim(), g.trim(), b.trim()];

    let [r, g, b] = if channels.iter().any(|c| c.contains('.')) {
        channels.map(unit_channel)
    } else {
        channels.map(|c| c.parse::<u8>().ok())
    };

    Some(Color::new(r?, g?, b?))
}

// 0.0..=1.0 scaled onto a byte
fn unit_channel(channel: &str) -> Option<u8> {
    let value = channel.parse::<f32>().ok()?;
    if !(0.0..=1.0).contains(&value) {
        return None;
    }
    Some((value * 255.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_literal_reads_three_channels() {
        assert_eq!(parse_color("#FF8000"), Color::new(255, 128, 0));
        assert_eq!(parse_color("#0a0B0c"), Color::new(10, 11, 12));
    }

    #[test]
    fn hex_literal_must_be_six_digits() {
        assert_eq!(parse_color("#FFF"), Color::BLACK);
        assert_eq!(parse_color("#FF80001"), Color::BLACK);
        assert_eq!(parse_color("#GG8000"), Color::BLACK);
        assert_eq!(parse_color("#"), Color::BLACK);
    }

    #[test]
    fn integer_triplet() {
        assert_eq!(parse_color("12,34,56"), Color::new(12, 34, 56));
        assert_eq!(parse_color("255,255,255"), Color::WHITE);
    }

    #[test]
    fn float_triplet_scales_to_bytes() {
        assert_eq!(parse_color("1,0.5,0"), Color::new(255, 128, 0));
        assert_eq!(parse_color("0.0,1.0,0.2"), Color::new(0, 255, 51));
    }

    #[test]
    fn malformed_literals_fall_back_to_black() {
        assert_eq!(parse_color(""), Color::BLACK);
        assert_eq!(parse_color("bad"), Color::BLACK);
        assert_eq!(parse_color("1,2"), Color::BLACK);
        assert_eq!(parse_color("1,2,3,4"), Color::BLACK);
        assert_eq!(parse_color("256,0,0"), Color::BLACK);
        assert_eq!(parse_color("-1,0,0"), Color::BLACK);
        assert_eq!(parse_color("1.5,0,0"), Color::BLACK);
        assert_eq!(parse_color("a,b,c"), Color::BLACK);
    }

    #[test]
    fn transparency_key_is_nudged() {
        assert_eq!(parse_color("255,0,255").visible(), Color::new(255, 0, 254));
        assert_eq!(parse_color("#FF00FF").visible(), Color::new(255, 0, 254));
        assert_eq!(Color::WHITE.visible(), Color::WHITE);
    }
}
