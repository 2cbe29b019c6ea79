//! Accent colour parsing.

use serde::Serialize;

/// Accents at or below this lightness (percent) get an inverted foreground.
pub const INVERT_LIGHTNESS_THRESHOLD: f64 = 65.0;

/// Error type for colour parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// Not a `#rgb` or `#rrggbb` colour.
    #[error("Invalid hex colour: {0:?}")]
    InvalidHex(String),
}

/// A colour in HSL space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsl {
    /// Hue in degrees, `0..360`.
    pub h: f64,
    /// Saturation in percent.
    pub s: f64,
    /// Lightness in percent.
    pub l: f64,
}

/// Parse a hex colour (`#rrggbb`, `#rgb`, leading `#` optional) into HSL.
pub fn hex_to_hsl(hex: &str) -> Result<Hsl, ColorError> {
    let invalid = || ColorError::InvalidHex(hex.to_string());

    let digits = hex.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    let (r, g, b) = match digits.len() {
        3 => {
            let short = |i: usize| channel(&digits[i..=i]).map(|v| v * 17);
            (short(0)?, short(1)?, short(2)?)
        }
        6 => (channel(&digits[0..2])?, channel(&digits[2..4])?, channel(&digits[4..6])?),
        _ => return Err(invalid()),
    };

    Ok(rgb_to_hsl(r, g, b))
}

fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl { h: 0.0, s: 0.0, l: l * 100.0 };
    }

    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: h * 60.0,
        s: s * 100.0,
        l: l * 100.0,
    }
}

/// Check if a logo on this accent should be drawn inverted.
pub fn needs_inverted_foreground(accent: &str) -> Result<bool, ColorError> {
    Ok(hex_to_hsl(accent)?.l <= INVERT_LIGHTNESS_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_primaries() {
        let red = hex_to_hsl("#ff0000").unwrap();
        assert!(close(red.h, 0.0) && close(red.s, 100.0) && close(red.l, 50.0));

        let green = hex_to_hsl("#00ff00").unwrap();
        assert!(close(green.h, 120.0));

        let blue = hex_to_hsl("0000FF").unwrap();
        assert!(close(blue.h, 240.0));
    }

    #[test]
    fn test_greys() {
        assert_eq!(hex_to_hsl("#ffffff").unwrap(), Hsl { h: 0.0, s: 0.0, l: 100.0 });
        assert_eq!(hex_to_hsl("#000").unwrap(), Hsl { h: 0.0, s: 0.0, l: 0.0 });
    }

    #[test]
    fn test_short_form_matches_long_form() {
        assert_eq!(hex_to_hsl("#f80").unwrap(), hex_to_hsl("#ff8800").unwrap());
    }

    #[test]
    fn test_invalid() {
        for bad in ["", "#", "#12", "#12345", "#gggggg", "#+12345", "#ff00ff00"] {
            assert_eq!(hex_to_hsl(bad), Err(ColorError::InvalidHex(bad.to_string())), "{bad}");
        }
    }

    #[test]
    fn test_inversion_threshold() {
        // navy, l = 25
        assert!(needs_inverted_foreground("#000080").unwrap());
        // pure red, l = 50
        assert!(needs_inverted_foreground("#ff0000").unwrap());
        // pale yellow, l = 80
        assert!(!needs_inverted_foreground("#ffff99").unwrap());
        assert!(needs_inverted_foreground("nope").is_err());
    }
}
