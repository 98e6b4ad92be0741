//! Hex color tokens (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`)

use resvg::tiny_skia::Color;

/// Parse a hex token into RGBA components. Shorthand digits are doubled.
pub fn parse_hex(token: &str) -> Option<[u8; 4]> {
    let hex = token.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let digits: Vec<u8> = match hex.len() {
        3 | 4 => hex
            .chars()
            .map(|c| {
                let d = c.to_digit(16).unwrap_or(0) as u8;
                d * 16 + d
            })
            .collect(),
        6 | 8 => (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
            .collect::<Result<_, _>>()
            .ok()?,
        _ => return None,
    };

    let alpha = digits.get(3).copied().unwrap_or(255);
    Some([digits[0], digits[1], digits[2], alpha])
}

pub fn to_skia(token: &str) -> Option<Color> {
    parse_hex(token).map(|[r, g, b, a]| Color::from_rgba8(r, g, b, a))
}
