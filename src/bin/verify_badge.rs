use image::io::Reader as ImageReader;

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "icons/icon-128.png".to_string());

    let img = ImageReader::open(&path)
        .expect("Failed to open image")
        .decode()
        .expect("Failed to decode image");

    let rgba_img = img.to_rgba8();
    let width = img.width();
    let height = img.height();

    println!("Checking badge in: {}", path);
    println!("Image dimensions: {}x{}", width, height);
    println!("Color type: {:?}", img.color());

    // The lock backdrop covers the centre
    let center = rgba_img.get_pixel(width / 2, height / 2);
    println!(
        "\nCenter pixel (x={}, y={}):",
        width / 2,
        height / 2
    );
    println!(
        "  RGBA: [{}, {}, {}, {}]",
        center[0], center[1], center[2], center[3]
    );

    // Corners lie outside the hexagon
    let corners = [
        (0, 0),
        (width - 1, 0),
        (0, height - 1),
        (width - 1, height - 1),
    ];
    let transparent_corners = corners
        .iter()
        .filter(|&&(x, y)| rgba_img.get_pixel(x, y)[3] == 0)
        .count();
    println!("\nTransparent corners: {} of 4", transparent_corners);

    // Vertical extent of the badge through the centre column
    let covered_rows = (0..height)
        .filter(|&y| rgba_img.get_pixel(width / 2, y)[3] >= 128)
        .count();
    let coverage = covered_rows as f32 / height as f32;
    println!("Badge height: {:.1}% of the icon", coverage * 100.0);

    if width == height && center[3] > 0 && transparent_corners == 4 {
        println!("\n✓ Badge looks right!");
    } else {
        println!("\n⚠ Badge may not be rendered properly");
    }
}
