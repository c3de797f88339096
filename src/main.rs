use anyhow::Result;
use badge_icon_gen::{
    badge::{ICON_SIZES, MAX_ICON_SIZE, MIN_ICON_SIZE},
    icon_gen,
};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(
    name = "badge-icon-gen",
    about = "Render the hexagonal padlock badge icons"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = "./icons")]
    output: PathBuf,

    /// Icon sizes to render, each 16 to 1024. Defaults to 16,32,48,128.
    #[clap(
        short,
        long,
        value_delimiter = ',',
        value_name = "SIZES",
        value_parser = clap::value_parser!(u32).range((MIN_ICON_SIZE as i64)..=(MAX_ICON_SIZE as i64))
    )]
    sizes: Option<Vec<u32>>,

    /// Also bundle the rendered sizes (up to 256px) into icon.ico
    #[clap(long)]
    ico: bool,

    /// Write manifest-icons.json with the extension manifest icon entries
    #[clap(long)]
    manifest: bool,

    /// Outer hexagon color (CSS color format)
    #[clap(long, value_name = "COLOR")]
    primary: Option<String>,

    /// Middle hexagon color (CSS color format)
    #[clap(long, value_name = "COLOR")]
    accent: Option<String>,

    /// Central hexagon and keyhole color (CSS color format)
    #[clap(long, value_name = "COLOR")]
    dark: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    icon_gen::generate_icons(icon_gen::Args {
        output: args.output,
        sizes: args.sizes.unwrap_or_else(|| ICON_SIZES.to_vec()),
        ico: args.ico,
        manifest: args.manifest,
        primary: args.primary,
        accent: args.accent,
        dark: args.dark,
    })
}
