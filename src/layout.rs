//! Fixed design of the Play Store feature graphic
//!
//! This module holds every literal that makes up the graphic: canvas size,
//! palette, icon placement, the text block and the decorative bar, plus the
//! default locations of the input and output files. The composer reads these
//! values and never computes positions of its own.

use anyhow::{anyhow, Result};
use image::Rgba;
use std::str::FromStr;

/// Canvas width in pixels required by the Play Store
pub const CANVAS_WIDTH: u32 = 1024;

/// Canvas height in pixels required by the Play Store
pub const CANVAS_HEIGHT: u32 = 500;

/// Solid background, matching the blue of the app icon
pub const BACKGROUND_COLOR: &str = "#2c3e89";

/// Default path of the source app icon, relative to the working directory
pub const DEFAULT_ICON_PATH: &str = "assets/icon.png";

/// Default path of the generated graphic, relative to the working directory
pub const DEFAULT_OUTPUT_PATH: &str = "play-store-assets/feature-graphic-1024x500.png";

/// Default bold face used for the title line
pub const DEFAULT_TITLE_FONT: &str = "/System/Library/Fonts/Supplemental/Arial Bold.ttf";

/// Default regular face used for every other line
pub const DEFAULT_BODY_FONT: &str = "/System/Library/Fonts/Supplemental/Arial.ttf";

/// Pixel height of the title face
pub const TITLE_FONT_SIZE: f32 = 56.0;

/// Pixel height of the body face
pub const BODY_FONT_SIZE: f32 = 32.0;

/// Where and how large the icon is pasted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconPlacement {
    /// Left edge of the pasted icon
    pub x: u32,
    /// Top edge of the pasted icon
    pub y: u32,
    /// Edge length the icon is stretched to, regardless of its aspect ratio
    pub size: u32,
}

pub const ICON_PLACEMENT: IconPlacement = IconPlacement {
    x: 50,
    y: 75,
    size: 350,
};

/// Gradient overlay: black, fading linearly from this opacity at the top
/// row to nothing at the bottom row
pub const GRADIENT_MAX_OPACITY: f32 = 0.2;

/// Top-left anchor of the text block
pub const TEXT_ANCHOR: (i32, i32) = (450, 120);

/// Which face a line of text is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    Title,
    Body,
}

/// A single line of the text block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLine {
    /// The literal text to draw
    pub text: &'static str,
    /// Vertical offset from the text anchor
    pub offset_y: i32,
    /// CSS color of the text
    pub color: &'static str,
    /// Face used for this line
    pub role: FontRole,
}

impl TextLine {
    /// Absolute top-left position of the line on the canvas
    pub fn position(&self) -> (i32, i32) {
        (TEXT_ANCHOR.0, TEXT_ANCHOR.1 + self.offset_y)
    }
}

/// The four lines of the text block, top to bottom
pub const TEXT_LINES: [TextLine; 4] = [
    TextLine {
        text: "eThavanai Book",
        offset_y: 0,
        color: "#ffffff",
        role: FontRole::Title,
    },
    TextLine {
        text: "தினத்தவணைப் புத்தகம்",
        offset_y: 70,
        color: "#ffc107",
        role: FontRole::Body,
    },
    TextLine {
        text: "Daily Installment Ledger",
        offset_y: 130,
        color: "#e3f2fd",
        role: FontRole::Body,
    },
    TextLine {
        text: "Digital lending made simple",
        offset_y: 180,
        color: "#90caf9",
        role: FontRole::Body,
    },
];

/// Filled rectangle with inclusive corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub color: &'static str,
}

/// Accent line underneath the text block
pub const DECORATIVE_BAR: Bar = Bar {
    left: 450,
    top: 450,
    right: 950,
    bottom: 455,
    color: "#ffc107",
};

/// Parse a CSS color string into an opaque RGBA pixel
pub fn parse_color(color: &str) -> Result<Rgba<u8>> {
    let srgb = css_color::Srgb::from_str(color).map_err(|_| anyhow!("Invalid color: {color}"))?;

    Ok(Rgba([
        (srgb.red * 255.).round() as u8,
        (srgb.green * 255.).round() as u8,
        (srgb.blue * 255.).round() as u8,
        255,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_palette_colors() {
        assert_eq!(parse_color(BACKGROUND_COLOR).unwrap(), Rgba([44, 62, 137, 255]));
        assert_eq!(parse_color(DECORATIVE_BAR.color).unwrap(), Rgba([255, 193, 7, 255]));
        assert_eq!(parse_color("#ffffff").unwrap(), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn every_text_color_is_valid() {
        for line in TEXT_LINES {
            assert!(parse_color(line.color).is_ok(), "bad color for {:?}", line.text);
        }
    }

    #[test]
    fn rejects_garbage_color() {
        assert!(parse_color("not-a-color").is_err());
    }

    #[test]
    fn text_lines_fit_on_canvas() {
        for line in TEXT_LINES {
            let (x, y) = line.position();
            assert!(x >= 0 && (x as u32) < CANVAS_WIDTH);
            assert!(y >= 0 && (y as u32) < CANVAS_HEIGHT);
        }
        assert_eq!(TEXT_LINES[3].position(), (450, 300));
    }

    #[test]
    fn bar_fits_on_canvas() {
        assert!(DECORATIVE_BAR.left < DECORATIVE_BAR.right);
        assert!(DECORATIVE_BAR.top < DECORATIVE_BAR.bottom);
        assert!(DECORATIVE_BAR.right < CANVAS_WIDTH && DECORATIVE_BAR.bottom < CANVAS_HEIGHT);
    }

    #[test]
    fn icon_fits_on_canvas() {
        assert!(ICON_PLACEMENT.x + ICON_PLACEMENT.size <= CANVAS_WIDTH);
        assert!(ICON_PLACEMENT.y + ICON_PLACEMENT.size <= CANVAS_HEIGHT);
    }
}
