use crate::Rng;

pub const DARK_TEXT: &str = "#000000";
pub const LIGHT_TEXT: &str = "#FFFFFF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorFormat {
    #[default]
    Hex,
    Rgb,
    Hsl,
}

/// Text colour readable on top of the `#rrggbb` background `hex_color`.
///
/// Perceived luminance above one half picks black; anything that does not
/// parse picks white.
pub fn contrast_color(hex_color: &str) -> &'static str {
    let Some((r, g, b)) = parse_hex_rgb(hex_color) else {
        return LIGHT_TEXT;
    };
    let luminance = (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0;
    if luminance > 0.5 { DARK_TEXT } else { LIGHT_TEXT }
}

fn parse_hex_rgb(hex_color: &str) -> Option<(u8, u8, u8)> {
    let digits = hex_color.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

pub fn random_color(rng: &mut Rng, format: ColorFormat) -> String {
    match format {
        ColorFormat::Hex => format!(
            "#{:02x}{:02x}{:02x}",
            rng.below(256),
            rng.below(256),
            rng.below(256)
        ),
        ColorFormat::Rgb => format!(
            "rgb({}, {}, {})",
            rng.below(256),
            rng.below(256),
            rng.below(256)
        ),
        ColorFormat::Hsl => {
            let hue = rng.below(360);
            let saturation = rng.below(100);
            // Lightness stays in 25..75 so text on it remains legible.
            let lightness = rng.below(50) + 25;
            format!("hsl({hue}, {saturation}%, {lightness}%)")
        }
    }
}

pub fn color_palette(rng: &mut Rng, count: usize, format: ColorFormat) -> Vec<String> {
    (0..count).map(|_| random_color(rng, format)).collect()
}
