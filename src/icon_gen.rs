use crate::badge::{render_badge, BadgeStyle, MAX_ICON_SIZE, MIN_ICON_SIZE};
use crate::manifest_json::{ManifestIcons, MANIFEST_FILE_NAME};
use crate::palette::Palette;
use anyhow::{ensure, Context, Result};
use image::{
    codecs::{
        ico::{IcoEncoder, IcoFrame},
        png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    },
    ColorType, ImageEncoder, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// Largest frame an ICO directory entry can describe.
const ICO_MAX_SIZE: u32 = 256;

/// Options for a generation run, filled in by the CLI.
#[derive(Debug)]
pub struct Args {
    pub output: PathBuf,
    pub sizes: Vec<u32>,
    pub ico: bool,
    pub manifest: bool,
    pub primary: Option<String>,
    pub accent: Option<String>,
    pub dark: Option<String>,
}

pub fn generate_icons(args: Args) -> Result<()> {
    let sizes = normalize_sizes(&args.sizes)?;
    let palette = Palette::default().with_overrides(
        args.primary.as_deref(),
        args.accent.as_deref(),
        args.dark.as_deref(),
    )?;
    let style = BadgeStyle {
        palette,
        ..BadgeStyle::default()
    };

    // Ensure the output directory exists
    create_dir_all(&args.output).context("Can't create output directory")?;

    println!("Generating badge icons...");
    let mut rendered = Vec::with_capacity(sizes.len());
    for &size in &sizes {
        let icon = render_badge(size, &style);
        let filename = icon_filename(size);
        let bytes = save_png(&icon, &args.output.join(&filename))?;
        println!("  ✓ Generated {filename} ({bytes} bytes)");
        rendered.push((size, icon));
    }

    if args.ico {
        generate_ico(&rendered, &args.output)?;
    }

    if args.manifest {
        generate_manifest(&sizes, &args.output)?;
    }

    println!("\nIcons generated successfully.");
    Ok(())
}

/// Sort and dedup the requested sizes, rejecting any outside the renderable range.
fn normalize_sizes(sizes: &[u32]) -> Result<Vec<u32>> {
    ensure!(!sizes.is_empty(), "No icon sizes requested");
    for &size in sizes {
        ensure!(
            (MIN_ICON_SIZE..=MAX_ICON_SIZE).contains(&size),
            "Icon size {size} is outside {MIN_ICON_SIZE}..={MAX_ICON_SIZE}"
        );
    }

    let mut sizes = sizes.to_vec();
    sizes.sort_unstable();
    sizes.dedup();
    Ok(sizes)
}

/// File name an icon of `size` pixels is written under.
pub fn icon_filename(size: u32) -> String {
    format!("icon-{size}.png")
}

fn generate_ico(icons: &[(u32, RgbaImage)], out_dir: &Path) -> Result<()> {
    println!("Generating icon.ico...");
    let mut frames = Vec::new();

    for (size, icon) in icons {
        if *size > ICO_MAX_SIZE {
            warn!(size, "skipping size larger than the ICO format allows");
            continue;
        }
        frames.push(IcoFrame::as_png(
            icon.as_raw(),
            *size,
            *size,
            ColorType::Rgba8,
        )?);
    }

    ensure!(
        !frames.is_empty(),
        "No requested size fits in an ICO file (max {ICO_MAX_SIZE}px)"
    );

    let ico_path = out_dir.join("icon.ico");
    let mut out_file = BufWriter::new(
        File::create(&ico_path)
            .with_context(|| format!("Failed to create {}", ico_path.display()))?,
    );
    let encoder = IcoEncoder::new(&mut out_file);
    encoder.encode_images(&frames)?;
    out_file.flush()?;

    debug!(frames = frames.len(), path = %ico_path.display(), "wrote ico");
    println!("✓ Generated icon.ico");
    Ok(())
}

fn generate_manifest(sizes: &[u32], out_dir: &Path) -> Result<()> {
    // Paths are relative to the extension root, which holds the icon directory
    let prefix = out_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let mut manifest = ManifestIcons::new();
    for &size in sizes {
        let filename = icon_filename(size);
        let path = match &prefix {
            Some(dir) => format!("{dir}/{filename}"),
            None => filename,
        };
        manifest.add_icon(size, path);
    }

    let written = manifest.write_to(out_dir)?;
    debug!(icons = manifest.icons.len(), path = %written.display(), "wrote manifest fragment");
    println!("✓ Generated {MANIFEST_FILE_NAME}");
    Ok(())
}

/// Write `image` as a PNG and return the size of the resulting file.
fn save_png(image: &RgbaImage, path: &Path) -> Result<u64> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_png(image.as_raw(), &mut writer, image.width()).context("Failed to write PNG")?;
    writer.flush()?;

    let bytes = std::fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .len();
    Ok(bytes)
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgba8)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_are_sorted_and_deduplicated() {
        assert_eq!(normalize_sizes(&[128, 32, 32, 16]).unwrap(), vec![16, 32, 128]);
    }

    #[test]
    fn sizes_outside_the_renderable_range_are_rejected() {
        assert!(normalize_sizes(&[6]).is_err());
        assert!(normalize_sizes(&[MIN_ICON_SIZE - 1]).is_err());
        assert!(normalize_sizes(&[32, MAX_ICON_SIZE + 1]).is_err());
        assert!(normalize_sizes(&[]).is_err());
        assert!(normalize_sizes(&[MIN_ICON_SIZE, MAX_ICON_SIZE]).is_ok());
    }

    #[test]
    fn rejected_sizes_fail_before_writing() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let output = temp_dir.path().join("icons");
        let result = generate_icons(Args {
            output: output.clone(),
            sizes: vec![4096],
            ico: false,
            manifest: false,
            primary: None,
            accent: None,
            dark: None,
        });

        assert!(result.is_err());
        assert!(!output.exists());
    }
}
