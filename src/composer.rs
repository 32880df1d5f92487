use crate::fonts::{load_fonts, FontPair};
use crate::layout::{
    parse_color, Bar, IconPlacement, BACKGROUND_COLOR, CANVAS_HEIGHT, CANVAS_WIDTH,
    DECORATIVE_BAR, GRADIENT_MAX_OPACITY, ICON_PLACEMENT, TEXT_LINES,
};
use anyhow::{Context, Result};
use image::{
    buffer::ConvertBuffer,
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    imageops::FilterType,
    ColorType, DynamicImage, ImageBuffer, ImageEncoder, Pixel, Rgba, RgbImage, RgbaImage,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Input and output locations for one run
#[derive(Debug, Clone)]
pub struct Options {
    pub icon: PathBuf,
    pub output: PathBuf,
    pub title_font: PathBuf,
    pub body_font: PathBuf,
}

/// Compose the feature graphic and write it to `options.output`.
/// The output directory must already exist.
pub fn generate_feature_graphic(options: &Options) -> Result<()> {
    let canvas = compose(options)?;
    save_png(&canvas, &options.output)?;

    println!("✅ Feature graphic created: {}", options.output.display());
    println!("   Size: {}x{} px", CANVAS_WIDTH, CANVAS_HEIGHT);
    println!("   Format: PNG");

    Ok(())
}

/// Run every drawing step and return the finished canvas
pub fn compose(options: &Options) -> Result<RgbaImage> {
    let background = parse_color(BACKGROUND_COLOR)?;
    let mut canvas: RgbaImage = ImageBuffer::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, background);

    // A missing icon is fine, a broken one is not
    if options.icon.exists() {
        let icon = load_icon(&options.icon)?;
        paste_icon(&mut canvas, &icon, ICON_PLACEMENT);
    }

    draw_gradient_overlay(&mut canvas, GRADIENT_MAX_OPACITY);

    let fonts = load_fonts(&options.title_font, &options.body_font);
    draw_text_block(&mut canvas, &fonts)?;

    draw_decorative_bar(&mut canvas, &DECORATIVE_BAR)?;

    Ok(canvas)
}

fn load_icon(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("Failed to load icon: {}", path.display()))
}

/// Stretch the icon to the placement size and composite it onto the canvas.
/// Sources with an alpha channel are blended, opaque sources replace pixels.
pub fn paste_icon(canvas: &mut RgbaImage, icon: &DynamicImage, placement: IconPlacement) {
    let resized = icon
        .resize_exact(placement.size, placement.size, FilterType::Lanczos3)
        .to_rgba8();

    if icon.color().has_alpha() {
        image::imageops::overlay(canvas, &resized, placement.x.into(), placement.y.into());
    } else {
        image::imageops::replace(canvas, &resized, placement.x.into(), placement.y.into());
    }
}

/// Darken the canvas with black whose opacity falls linearly from
/// `max_opacity` on the first row to zero past the last row
pub fn draw_gradient_overlay(canvas: &mut RgbaImage, max_opacity: f32) {
    let height = canvas.height();

    for y in 0..height {
        let alpha = (255.0 * (1.0 - y as f32 / height as f32) * max_opacity) as u8;
        if alpha == 0 {
            continue;
        }
        let shade = Rgba([0, 0, 0, alpha]);
        for x in 0..canvas.width() {
            canvas.get_pixel_mut(x, y).blend(&shade);
        }
    }
}

fn draw_text_block(canvas: &mut RgbaImage, fonts: &FontPair) -> Result<()> {
    for line in TEXT_LINES {
        let color = parse_color(line.color)?;
        let (x, y) = line.position();
        fonts
            .for_role(line.role)
            .draw_text(canvas, x, y, color, line.text);
    }
    Ok(())
}

/// Fill the bar rectangle, clipped to the canvas
pub fn draw_decorative_bar(canvas: &mut RgbaImage, bar: &Bar) -> Result<()> {
    let color = parse_color(bar.color)?;
    let right = bar.right.min(canvas.width().saturating_sub(1));
    let bottom = bar.bottom.min(canvas.height().saturating_sub(1));

    for y in bar.top..=bottom {
        for x in bar.left..=right {
            canvas.put_pixel(x, y, color);
        }
    }
    Ok(())
}

/// Write the canvas as an RGB PNG, replacing any existing file
pub fn save_png(canvas: &RgbaImage, path: &Path) -> Result<()> {
    let rgb: RgbImage = canvas.convert();

    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file: {}", path.display()))?;
    let mut out_file = BufWriter::new(file);
    write_png(rgb.as_raw(), &mut out_file, rgb.width(), rgb.height())?;
    out_file.flush().context("Failed to write PNG")?;
    Ok(())
}

// Encode RGB data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, width: u32, height: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder
        .write_image(image_data, width, height, ColorType::Rgb8)
        .context("Failed to encode PNG")?;
    Ok(())
}
