//! Extract and print a photo's dominant-color palette.
//!
//! Usage: cargo run --example palette -- path/to/photo.jpg

use swatch::{PaletteExtractor, Rgb};

fn main() {
    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: palette <image>");
            std::process::exit(2);
        }
    };

    let extractor = PaletteExtractor::new().with_k(3);

    match extractor.palette_path(&path) {
        Ok(palette) => {
            println!("=== Palette for {path} ===");
            for (i, color) in palette.iter().enumerate() {
                let tag = if i == 0 { "  (dominant)" } else { "" };
                println!("  cluster {i} => {color}{tag}");
            }
        }
        Err(err) => {
            // The wardrobe upload flow treats extraction as best-effort and
            // tags the item white instead of failing the upload.
            eprintln!("extraction failed ({err}); falling back to {}", Rgb::WHITE);
        }
    }
}
