use feature_graphic::layout::{
    parse_color, BACKGROUND_COLOR, CANVAS_HEIGHT, CANVAS_WIDTH, DECORATIVE_BAR,
    DEFAULT_OUTPUT_PATH, ICON_PLACEMENT,
};
use image::io::Reader as ImageReader;

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());

    let img = ImageReader::open(&path)
        .expect("Failed to open image")
        .decode()
        .expect("Failed to decode image");

    let rgba_img = img.to_rgba8();
    let width = img.width();
    let height = img.height();

    println!("Checking feature graphic: {}", path);
    println!("Image dimensions: {}x{}", width, height);

    let mut ok = true;

    if (width, height) != (CANVAS_WIDTH, CANVAS_HEIGHT) {
        println!(
            "⚠ Expected {}x{}, got {}x{}",
            CANVAS_WIDTH, CANVAS_HEIGHT, width, height
        );
        std::process::exit(1);
    }

    // Sample the center of the decorative bar
    let bar_color = parse_color(DECORATIVE_BAR.color).expect("Invalid bar color");
    let bar_x = (DECORATIVE_BAR.left + DECORATIVE_BAR.right) / 2;
    let bar_y = (DECORATIVE_BAR.top + DECORATIVE_BAR.bottom) / 2;
    let pixel = rgba_img.get_pixel(bar_x, bar_y);

    println!("\nDecorative bar center (x={}, y={}):", bar_x, bar_y);
    println!("  RGBA: [{}, {}, {}, {}]", pixel[0], pixel[1], pixel[2], pixel[3]);

    if pixel.0[..3] == bar_color.0[..3] {
        println!("✓ Decorative bar detected!");
    } else {
        println!("⚠ Decorative bar missing");
        ok = false;
    }

    // Count samples across the icon area that stray from the background
    let background = parse_color(BACKGROUND_COLOR).expect("Invalid background color");
    let samples = 10;
    let mut icon_like = 0;

    for i in 0..samples {
        let offset = ICON_PLACEMENT.size * i / samples + ICON_PLACEMENT.size / (samples * 2);
        let p = rgba_img.get_pixel(ICON_PLACEMENT.x + offset, ICON_PLACEMENT.y + offset);

        let distance: u32 = (0..3)
            .map(|c| (p[c] as i32 - background[c] as i32).unsigned_abs())
            .sum();
        if distance > 60 {
            icon_like += 1;
        }
    }

    println!("\nIcon analysis:");
    println!("  {} out of {} samples differ from the background", icon_like, samples);

    if icon_like > 0 {
        println!("✓ Icon detected!");
    } else {
        println!("⚠ No icon found (assets/icon.png may have been missing)");
    }

    if !ok {
        std::process::exit(1);
    }
}
