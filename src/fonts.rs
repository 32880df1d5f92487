use crate::layout::{FontRole, BODY_FONT_SIZE, TITLE_FONT_SIZE};
use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};
use std::path::Path;

/// Width of a built-in glyph cell
pub const BUILTIN_GLYPH_WIDTH: u32 = 5;

/// Height of a built-in glyph cell
pub const BUILTIN_GLYPH_HEIGHT: u32 = 7;

/// Horizontal distance between two built-in glyphs
pub const BUILTIN_ADVANCE: i32 = 6;

/// Drawn for characters the built-in font has no glyph for
const BUILTIN_MISSING_GLYPH: [u8; 7] = [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F];

/// 5x7 bitmaps for printable ASCII (0x20..=0x7E), one byte per row,
/// bit 4 is the leftmost column
const BUILTIN_GLYPHS: [[u8; 7]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x04, 0x04, 0x04, 0x04, 0x00, 0x00, 0x04], // '!'
    [0x0A, 0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00], // '"'
    [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A], // '#'
    [0x04, 0x0F, 0x14, 0x0E, 0x05, 0x1E, 0x04], // '$'
    [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03], // '%'
    [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D], // '&'
    [0x0C, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00], // '\''
    [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02], // '('
    [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08], // ')'
    [0x00, 0x04, 0x15, 0x0E, 0x15, 0x04, 0x00], // '*'
    [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00], // '+'
    [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08], // ','
    [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00], // '-'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C], // '.'
    [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00], // '/'
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E], // '0'
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E], // '1'
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F], // '2'
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E], // '3'
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02], // '4'
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E], // '5'
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E], // '6'
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08], // '7'
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E], // '8'
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C], // '9'
    [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00], // ':'
    [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x04, 0x08], // ';'
    [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02], // '<'
    [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00], // '='
    [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08], // '>'
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04], // '?'
    [0x0E, 0x11, 0x01, 0x0D, 0x15, 0x15, 0x0E], // '@'
    [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11], // 'A'
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // 'B'
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // 'C'
    [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C], // 'D'
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // 'E'
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // 'F'
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F], // 'G'
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // 'H'
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // 'I'
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // 'J'
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // 'K'
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // 'L'
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11], // 'M'
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11], // 'N'
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // 'O'
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // 'P'
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // 'Q'
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // 'R'
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // 'S'
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // 'T'
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // 'U'
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04], // 'V'
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A], // 'W'
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // 'X'
    [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04], // 'Y'
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // 'Z'
    [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E], // '['
    [0x00, 0x10, 0x08, 0x04, 0x02, 0x01, 0x00], // '\\'
    [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E], // ']'
    [0x04, 0x0A, 0x11, 0x00, 0x00, 0x00, 0x00], // '^'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F], // '_'
    [0x08, 0x04, 0x02, 0x00, 0x00, 0x00, 0x00], // '`'
    [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F], // 'a'
    [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x1E], // 'b'
    [0x00, 0x00, 0x0E, 0x10, 0x10, 0x11, 0x0E], // 'c'
    [0x01, 0x01, 0x0D, 0x13, 0x11, 0x11, 0x0F], // 'd'
    [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E], // 'e'
    [0x06, 0x09, 0x08, 0x1C, 0x08, 0x08, 0x08], // 'f'
    [0x00, 0x0F, 0x11, 0x11, 0x0F, 0x01, 0x0E], // 'g'
    [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x11], // 'h'
    [0x04, 0x00, 0x0C, 0x04, 0x04, 0x04, 0x0E], // 'i'
    [0x02, 0x00, 0x06, 0x02, 0x02, 0x12, 0x0C], // 'j'
    [0x10, 0x10, 0x12, 0x14, 0x18, 0x14, 0x12], // 'k'
    [0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // 'l'
    [0x00, 0x00, 0x1A, 0x15, 0x15, 0x11, 0x11], // 'm'
    [0x00, 0x00, 0x16, 0x19, 0x11, 0x11, 0x11], // 'n'
    [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E], // 'o'
    [0x00, 0x00, 0x1E, 0x11, 0x1E, 0x10, 0x10], // 'p'
    [0x00, 0x00, 0x0D, 0x13, 0x0F, 0x01, 0x01], // 'q'
    [0x00, 0x00, 0x16, 0x19, 0x10, 0x10, 0x10], // 'r'
    [0x00, 0x00, 0x0E, 0x10, 0x0E, 0x01, 0x1E], // 's'
    [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06], // 't'
    [0x00, 0x00, 0x11, 0x11, 0x11, 0x13, 0x0D], // 'u'
    [0x00, 0x00, 0x11, 0x11, 0x11, 0x0A, 0x04], // 'v'
    [0x00, 0x00, 0x11, 0x11, 0x15, 0x15, 0x0A], // 'w'
    [0x00, 0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11], // 'x'
    [0x00, 0x00, 0x11, 0x11, 0x0F, 0x01, 0x0E], // 'y'
    [0x00, 0x00, 0x1F, 0x02, 0x04, 0x08, 0x1F], // 'z'
    [0x02, 0x04, 0x04, 0x08, 0x04, 0x04, 0x02], // '{'
    [0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // '|'
    [0x08, 0x04, 0x04, 0x02, 0x04, 0x04, 0x08], // '}'
    [0x00, 0x00, 0x08, 0x15, 0x02, 0x00, 0x00], // '~'
];

/// Look up the bitmap for a character, falling back to a hollow box
pub fn builtin_glyph(ch: char) -> &'static [u8; 7] {
    match ch {
        ' '..='~' => &BUILTIN_GLYPHS[ch as usize - ' ' as usize],
        _ => &BUILTIN_MISSING_GLYPH,
    }
}

/// A face text can be drawn with
pub enum Typeface {
    /// A TrueType font rendered at a fixed pixel height
    TrueType { font: Font<'static>, px: f32 },
    /// The built-in 5x7 bitmap font, which has no size control
    Builtin,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Typeface::TrueType { px, .. } => f.debug_struct("TrueType").field("px", px).finish(),
            Typeface::Builtin => f.write_str("Builtin"),
        }
    }
}

impl Typeface {
    /// Load a TrueType face from disk
    pub fn load(path: &Path, px: f32) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read font: {}", path.display()))?;
        let font = Font::try_from_vec(data)
            .with_context(|| format!("Failed to parse font: {}", path.display()))?;
        Ok(Typeface::TrueType { font, px })
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Typeface::Builtin)
    }

    /// Draw `text` with its top-left corner at (x, y)
    pub fn draw_text(&self, img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, text: &str) {
        match self {
            Typeface::TrueType { font, px } => draw_truetype(img, font, *px, x, y, color, text),
            Typeface::Builtin => draw_builtin(img, x, y, color, text),
        }
    }
}

/// The faces used for the title line and for all other lines
#[derive(Debug)]
pub struct FontPair {
    pub title: Typeface,
    pub body: Typeface,
}

impl FontPair {
    pub fn builtin() -> Self {
        FontPair {
            title: Typeface::Builtin,
            body: Typeface::Builtin,
        }
    }

    pub fn for_role(&self, role: FontRole) -> &Typeface {
        match role {
            FontRole::Title => &self.title,
            FontRole::Body => &self.body,
        }
    }
}

/// Load the bold title face and the regular body face.
/// If either one can't be used, both fall back to the built-in font.
pub fn load_fonts(title_path: &Path, body_path: &Path) -> FontPair {
    let title = Typeface::load(title_path, TITLE_FONT_SIZE);
    let body = Typeface::load(body_path, BODY_FONT_SIZE);

    match (title, body) {
        (Ok(title), Ok(body)) => FontPair { title, body },
        _ => FontPair::builtin(),
    }
}

fn draw_truetype(
    img: &mut RgbaImage,
    font: &Font<'static>,
    px: f32,
    x: i32,
    y: i32,
    color: Rgba<u8>,
    text: &str,
) {
    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    let origin = point(x as f32, y as f32 + v_metrics.ascent);

    for glyph in font.layout(text, scale, origin) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = gx as i32 + bb.min.x;
            let py = gy as i32 + bb.min.y;
            if px < 0 || py < 0 || px as u32 >= img.width() || py as u32 >= img.height() {
                return;
            }
            let a = (coverage * 255.0) as u8;
            if a == 0 {
                return;
            }
            blend_coverage(img.get_pixel_mut(px as u32, py as u32), color, a);
        });
    }
}

fn draw_builtin(img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, text: &str) {
    let mut caret_x = x;

    for ch in text.chars() {
        let rows = builtin_glyph(ch);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..BUILTIN_GLYPH_WIDTH {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                let px = caret_x + col as i32;
                let py = y + row as i32;
                if px < 0 || py < 0 || px as u32 >= img.width() || py as u32 >= img.height() {
                    continue;
                }
                img.put_pixel(px as u32, py as u32, color);
            }
        }
        caret_x += BUILTIN_ADVANCE;
    }
}

// Mix `color` over an opaque destination pixel by glyph coverage
fn blend_coverage(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: u8) {
    let sa = coverage as f32 / 255.0;
    let inv = 1.0 - sa;
    for c in 0..3 {
        dst.0[c] = (color.0[c] as f32 * sa + dst.0[c] as f32 * inv).round() as u8;
    }
    dst.0[3] = 255;
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageBuffer;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    #[test]
    fn glyph_table_covers_printable_ascii() {
        assert_eq!(builtin_glyph(' '), &[0; 7]);
        assert_eq!(builtin_glyph('~'), &BUILTIN_GLYPHS[94]);
        assert_eq!(builtin_glyph('A')[4], 0x1F);
        assert_eq!(builtin_glyph('த'), &BUILTIN_MISSING_GLYPH);
        for glyph in BUILTIN_GLYPHS.iter() {
            assert!(glyph.iter().all(|row| row & !0x1F == 0));
        }
    }

    #[test]
    fn missing_fonts_fall_back_to_builtin() {
        let fonts = load_fonts(
            Path::new("/nonexistent/Bold.ttf"),
            Path::new("/nonexistent/Regular.ttf"),
        );
        assert!(fonts.title.is_builtin());
        assert!(fonts.body.is_builtin());
    }

    #[test]
    fn unparseable_font_falls_back_to_builtin() {
        let dir = tempfile::TempDir::new().unwrap();
        let bogus = dir.path().join("bogus.ttf");
        std::fs::write(&bogus, b"definitely not a font").unwrap();

        assert!(Typeface::load(&bogus, 32.0).is_err());
        let fonts = load_fonts(&bogus, &bogus);
        assert!(fonts.title.is_builtin() && fonts.body.is_builtin());
    }

    #[test]
    fn builtin_text_paints_solid_pixels() {
        let mut img: RgbaImage = ImageBuffer::from_pixel(40, 10, BLACK);
        Typeface::Builtin.draw_text(&mut img, 1, 1, WHITE, "Hi");

        // Left stem of 'H'
        for y in 1..8 {
            assert_eq!(*img.get_pixel(1, y), WHITE);
        }
        // Gap between 'H' and 'i'
        assert_eq!(*img.get_pixel(6, 4), BLACK);
        // Dot of 'i' in the second cell
        assert_eq!(*img.get_pixel(1 + 6 + 2, 1), WHITE);
    }

    #[test]
    fn builtin_text_clips_at_edges() {
        let mut img: RgbaImage = ImageBuffer::from_pixel(4, 4, BLACK);
        Typeface::Builtin.draw_text(&mut img, -2, -3, WHITE, "MMMM");
        Typeface::Builtin.draw_text(&mut img, 2, 2, WHITE, "W");
        assert_eq!(img.dimensions(), (4, 4));
    }

    #[test]
    fn coverage_blend_stays_opaque() {
        let mut px = Rgba([0, 0, 0, 255]);
        blend_coverage(&mut px, Rgba([255, 255, 255, 255]), 128);
        assert_eq!(px.0[3], 255);
        assert!(px.0[0] > 120 && px.0[0] < 135);
    }
}
