use anyhow::{anyhow, Result};
use image::Rgba;
use std::str::FromStr;

pub const RED_MAIN: Rgba<u8> = Rgba([219, 68, 55, 255]); // #DB4437
pub const RED_DARK: Rgba<u8> = Rgba([183, 28, 28, 255]); // #B71C1C
pub const CORAL: Rgba<u8> = Rgba([239, 108, 77, 255]); // #EF6C4D
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// The named colours a badge is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Outer hexagon and the circuit node dots
    pub primary: Rgba<u8>,
    /// Middle hexagon
    pub accent: Rgba<u8>,
    /// Central hexagon and the keyhole
    pub dark: Rgba<u8>,
    /// Rings, lock backdrop, lock glyph and circuit traces
    pub light: Rgba<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: RED_MAIN,
            accent: CORAL,
            dark: RED_DARK,
            light: WHITE,
        }
    }
}

impl Palette {
    /// Replace any of the coloured layers with a CSS colour string.
    pub fn with_overrides(
        mut self,
        primary: Option<&str>,
        accent: Option<&str>,
        dark: Option<&str>,
    ) -> Result<Self> {
        if let Some(color) = primary {
            self.primary = parse_color(color)?;
        }
        if let Some(color) = accent {
            self.accent = parse_color(color)?;
        }
        if let Some(color) = dark {
            self.dark = parse_color(color)?;
        }
        Ok(self)
    }
}

/// Parse a CSS colour into an opaque RGBA pixel. Any alpha in the input is ignored.
pub fn parse_color(value: &str) -> Result<Rgba<u8>> {
    let color = css_color::Srgb::from_str(value)
        .map_err(|_| anyhow!("Invalid CSS color: {value:?}"))?;

    Ok(Rgba([
        (color.red * 255.).round() as u8,
        (color.green * 255.).round() as u8,
        (color.blue * 255.).round() as u8,
        255,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_color("#fff").unwrap(), WHITE);
        assert_eq!(parse_color("#DB4437").unwrap(), RED_MAIN);
        assert_eq!(parse_color("#000000").unwrap(), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_color("not-a-color").is_err());
    }

    #[test]
    fn overrides_only_touch_given_layers() {
        let palette = Palette::default()
            .with_overrides(Some("#000"), None, None)
            .unwrap();
        assert_eq!(palette.primary, Rgba([0, 0, 0, 255]));
        assert_eq!(palette.accent, CORAL);
        assert_eq!(palette.dark, RED_DARK);
        assert_eq!(palette.light, WHITE);
    }

    #[test]
    fn bad_override_is_an_error() {
        let result = Palette::default().with_overrides(None, Some("#12345"), None);
        assert!(result.is_err());
    }
}
