//! Color handling for star fills.

use std::str::FromStr;

use ratatui::style::Color;

/// How a star's color is applied at a given opacity.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    /// Value handed to the surface as fill style.
    pub fill_style: String,
    /// Global alpha to set while filling, then reset to 1.
    pub global_alpha: Option<f64>,
}

/// Fold `opacity` into `color`.
///
/// `rgb(...)` and `hsl(...)` become their alpha-aware forms carrying the
/// opacity. Any other string (hex, named, malformed) is kept as is and the
/// opacity goes through the surface's global alpha instead.
pub fn apply_opacity(color: &str, opacity: f64) -> Paint {
    let trimmed = color.trim();
    let functional = [("rgb", "rgba"), ("hsl", "hsla")]
        .into_iter()
        .find_map(|(name, alpha_name)| {
            function_args(trimmed, name).map(|args| format!("{alpha_name}({args}, {opacity})"))
        });

    match functional {
        Some(fill_style) => Paint {
            fill_style,
            global_alpha: None,
        },
        None => Paint {
            fill_style: color.to_string(),
            global_alpha: Some(opacity),
        },
    }
}

/// Arguments of `name(...)`, matched case-insensitively.
fn function_args<'a>(color: &'a str, name: &str) -> Option<&'a str> {
    let open = color.find('(')?;
    if !color[..open].trim_end().eq_ignore_ascii_case(name) {
        return None;
    }
    color[open + 1..].strip_suffix(')').map(str::trim)
}

/// An RGB color with a straight alpha channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Parse a CSS-style color string.
///
/// Understands `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`, `hsl()`,
/// `hsla()` and the color names ratatui recognizes.
pub fn parse_color(color: &str) -> Option<Rgba> {
    let color = color.trim();
    if let Some(hex) = color.strip_prefix('#') {
        return parse_hex(hex);
    }
    for name in ["rgba", "rgb"] {
        if let Some(args) = function_args(color, name) {
            return parse_rgb_args(args);
        }
    }
    for name in ["hsla", "hsl"] {
        if let Some(args) = function_args(color, name) {
            return parse_hsl_args(args);
        }
    }
    Color::from_str(color).ok().and_then(named_to_rgb)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let short = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);

    match hex.len() {
        3 => Some(Rgba::opaque(short(0)?, short(1)?, short(2)?)),
        6 => Some(Rgba::opaque(channel(0)?, channel(2)?, channel(4)?)),
        8 => Some(Rgba {
            a: channel(6)? as f64 / 255.0,
            ..Rgba::opaque(channel(0)?, channel(2)?, channel(4)?)
        }),
        _ => None,
    }
}

/// Split functional arguments on commas, whitespace and `/`.
fn split_args(args: &str) -> Vec<&str> {
    args.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect()
}

/// A number, or a percentage scaled so that `100%` equals `full`.
fn parse_component(part: &str, full: f64) -> Option<f64> {
    match part.strip_suffix('%') {
        Some(percent) => percent.parse::<f64>().ok().map(|v| v / 100.0 * full),
        None => part.parse::<f64>().ok(),
    }
}

fn parse_alpha(part: Option<&&str>) -> Option<f64> {
    match part {
        Some(part) => parse_component(part, 1.0).map(|a| a.clamp(0.0, 1.0)),
        None => Some(1.0),
    }
}

fn parse_rgb_args(args: &str) -> Option<Rgba> {
    let parts = split_args(args);
    if !(3..=4).contains(&parts.len()) {
        return None;
    }
    let channel = |i: usize| {
        parse_component(parts[i], 255.0).map(|v| v.round().clamp(0.0, 255.0) as u8)
    };
    Some(Rgba {
        r: channel(0)?,
        g: channel(1)?,
        b: channel(2)?,
        a: parse_alpha(parts.get(3))?,
    })
}

fn parse_hsl_args(args: &str) -> Option<Rgba> {
    let parts = split_args(args);
    if !(3..=4).contains(&parts.len()) {
        return None;
    }
    let hue = parts[0].trim_end_matches("deg").parse::<f64>().ok()?;
    let saturation = parse_component(parts[1], 1.0)?.clamp(0.0, 1.0);
    let lightness = parse_component(parts[2], 1.0)?.clamp(0.0, 1.0);
    let [r, g, b] = hsl_to_rgb(hue.rem_euclid(360.0), saturation, lightness);
    Some(Rgba {
        r,
        g,
        b,
        a: parse_alpha(parts.get(3))?,
    })
}

/// RGB equivalents for ratatui's named colors.
fn named_to_rgb(color: Color) -> Option<Rgba> {
    let (r, g, b) = match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0, 0, 0),
        Color::Red => (128, 0, 0),
        Color::Green => (0, 128, 0),
        Color::Yellow => (128, 128, 0),
        Color::Blue => (0, 0, 128),
        Color::Magenta => (128, 0, 128),
        Color::Cyan => (0, 128, 128),
        Color::Gray => (192, 192, 192),
        Color::DarkGray => (128, 128, 128),
        Color::LightRed => (255, 0, 0),
        Color::LightGreen => (0, 255, 0),
        Color::LightYellow => (255, 255, 0),
        Color::LightBlue => (0, 0, 255),
        Color::LightMagenta => (255, 0, 255),
        Color::LightCyan => (0, 255, 255),
        Color::White => (255, 255, 255),
        _ => return None,
    };
    Some(Rgba::opaque(r, g, b))
}

/// Convert HSL (hue in degrees, saturation and lightness in `0..=1`) to RGB.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u8; 3] {
    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return [v, v, v];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    let h = h / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    [
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    ]
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
