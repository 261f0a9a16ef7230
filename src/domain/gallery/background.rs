// SPDX-License-Identifier: MPL-2.0
//! Overlay background colour.

/// An RGBA colour parsed from a background style string.
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` and the keywords `black`,
/// `white` and `transparent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl BackgroundColor {
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);

    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "black" => return Some(Self::BLACK),
            "white" => return Some(Self::rgba(1.0, 1.0, 1.0, 1.0)),
            "transparent" => return Some(Self::rgba(0.0, 0.0, 0.0, 0.0)),
            _ => {}
        }

        let hex = value.strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let channels: Vec<u8> = match hex.len() {
            3 | 4 => hex
                .chars()
                .map(|c| {
                    let digit = c.to_digit(16).unwrap_or(0) as u8;
                    digit * 17
                })
                .collect(),
            6 | 8 => hex
                .as_bytes()
                .chunks(2)
                .map(|pair| {
                    let s = std::str::from_utf8(pair).unwrap_or("00");
                    u8::from_str_radix(s, 16).unwrap_or(0)
                })
                .collect(),
            _ => return None,
        };

        let channel = |i: usize| channels.get(i).map_or(1.0, |c| f32::from(*c) / 255.0);
        Some(Self::rgba(channel(0), channel(1), channel(2), channel(3)))
    }
}

impl Default for BackgroundColor {
    fn default() -> Self {
        Self::rgba(0.0, 0.0, 0.0, 0.92)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_hex() {
        let color = BackgroundColor::parse("#ff0080").unwrap();
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert!((color.b - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn parses_short_hex_with_alpha() {
        let color = BackgroundColor::parse("#fff0").unwrap();
        assert_eq!(color, BackgroundColor::rgba(1.0, 1.0, 1.0, 0.0));
    }

    #[test]
    fn parses_keywords_case_insensitively() {
        assert_eq!(BackgroundColor::parse("Black"), Some(BackgroundColor::BLACK));
        assert_eq!(
            BackgroundColor::parse("transparent").map(|c| c.a),
            Some(0.0)
        );
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(BackgroundColor::parse("red").is_none());
        assert!(BackgroundColor::parse("#12345").is_none());
        assert!(BackgroundColor::parse("#gggggg").is_none());
        assert!(BackgroundColor::parse("").is_none());
    }
}
