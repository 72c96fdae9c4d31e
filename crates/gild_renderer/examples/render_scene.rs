//! Render one regression scene and save it as a binary PPM.
//!
//! Usage: cargo run -p gild_renderer --example render_scene -- [scene] [file]

use gild_renderer::{render_scene, Framebuffer};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() {
    let mut args = std::env::args().skip(1);
    let index: usize = args
        .next()
        .map(|arg| arg.parse().expect("scene index must be a number"))
        .unwrap_or(0);
    let filename = args.next().unwrap_or_else(|| format!("scene_{}.ppm", index));

    println!("Gild Packet Tracer - Scene {}", index);
    println!("==============================");

    let start = std::time::Instant::now();
    let image = render_scene(index).expect("Failed to render scene");
    println!(
        "Rendered {}x{} in {:?}",
        image.width,
        image.height,
        start.elapsed()
    );

    save_ppm(&image, &filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn save_ppm(image: &Framebuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    write!(writer, "P6\n{} {}\n255\n", image.width, image.height)?;
    writer.write_all(image.as_bytes())?;
    writer.flush()
}
