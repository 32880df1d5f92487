use anyhow::Result;
use clap::Parser;
use feature_graphic::{composer, layout};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "feature-graphic",
    about = "Create the 1024x500 Play Store feature graphic"
)]
struct Args {
    /// Path to the app icon. Skipped silently when the file doesn't exist.
    #[clap(long, value_name = "FILE", default_value = layout::DEFAULT_ICON_PATH)]
    icon: PathBuf,

    /// Output PNG file. Its directory must already exist.
    #[clap(short, long, value_name = "FILE", default_value = layout::DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Bold TrueType font for the title
    #[clap(long, value_name = "FILE", default_value = layout::DEFAULT_TITLE_FONT)]
    title_font: PathBuf,

    /// Regular TrueType font for the other lines
    #[clap(long, value_name = "FILE", default_value = layout::DEFAULT_BODY_FONT)]
    body_font: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let options = composer::Options {
        icon: args.icon,
        output: args.output,
        title_font: args.title_font,
        body_font: args.body_font,
    };

    composer::generate_feature_graphic(&options)
}
