#![allow(dead_code)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use rulemaker::{FigureDir, FigureRenderer, FigureStyle};

pub const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub fn unique_dir(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "rulemaker_{}_{}_{:?}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        std::thread::current().id()
    ));
    path
}

/// Small canvas keeps the tests quick; the layout code is resolution independent.
pub fn test_style() -> FigureStyle {
    FigureStyle {
        width_in: 7.0,
        height_in: 4.0,
        dpi: 60,
    }
}

pub fn renderer(name: &str) -> FigureRenderer {
    FigureRenderer::new(FigureDir::new(unique_dir(name)), test_style()).expect("create figures dir")
}

pub fn assert_png(path: &Path) {
    let bytes = fs::read(path).expect("read rendered image");
    assert!(bytes.len() > PNG_MAGIC.len(), "image should be non-empty");
    assert_eq!(bytes[..8], PNG_MAGIC, "{} is not a PNG", path.display());
}

/// The `pHYs` chunk records the figure's DPI in pixels per metre.
pub fn assert_pixel_density(path: &Path, dpi: u32) {
    let file = File::open(path).expect("open rendered image");
    let reader = png::Decoder::new(file).read_info().expect("decode png header");
    let dims = reader.info().pixel_dims.expect("pHYs chunk present");
    let expected = (dpi as f64 / 0.0254).round() as u32;
    assert_eq!(dims.xppu, expected);
    assert_eq!(dims.yppu, expected);
    assert!(matches!(dims.unit, png::Unit::Meter));
}

pub fn cleanup(renderer: &FigureRenderer) {
    let _ = fs::remove_dir_all(renderer.figure_dir().path());
}
