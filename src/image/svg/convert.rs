//! SVG rasterization.
//!
//! Parses with usvg and renders with resvg onto a transparent square canvas.

use image::RgbaImage;
use resvg::tiny_skia::{Pixmap, Transform};

use crate::error::{FaviconError, Result};

/// Render an SVG document into a `size` x `size` RGBA bitmap.
///
/// The drawing is scaled to fit, aspect ratio preserved, and centered.
#[allow(clippy::cast_precision_loss)]
pub fn rasterize(svg_data: &[u8], size: u32) -> Result<RgbaImage> {
    let tree = usvg::Tree::from_data(svg_data, &usvg::Options::default())
        .map_err(|e| FaviconError::decode(format!("invalid SVG: {e}")))?;

    let (width, height) = (tree.size().width(), tree.size().height());
    if width <= 0.0 || height <= 0.0 {
        return Err(FaviconError::decode(format!(
            "invalid SVG dimensions: {width}x{height}"
        )));
    }

    let mut pixmap = Pixmap::new(size, size)
        .ok_or_else(|| FaviconError::decode(format!("failed to allocate {size}x{size} canvas")))?;

    let edge = size as f32;
    let scale = (edge / width).min(edge / height);
    let dx = (edge - width * scale) / 2.0;
    let dy = (edge - height * scale) / 2.0;
    let transform = Transform::from_row(scale, 0.0, 0.0, scale, dx, dy);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    RgbaImage::from_raw(size, size, rgba)
        .ok_or_else(|| FaviconError::decode("rendered canvas has unexpected length"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED_SQUARE: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"><rect width="4" height="4" fill="#ff0000"/></svg>"##;

    #[test]
    fn test_rasterize_fills_canvas() {
        let img = rasterize(RED_SQUARE, 32).unwrap();
        assert_eq!(img.dimensions(), (32, 32));
        let center = img.get_pixel(16, 16);
        assert_eq!(center.0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_wide_svg_is_letterboxed() {
        let wide = br#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"><rect width="20" height="10" fill="blue"/></svg>"#;
        let img = rasterize(wide, 20).unwrap();
        // top rows stay transparent, middle row is painted
        assert_eq!(img.get_pixel(10, 0)[3], 0);
        assert_eq!(img.get_pixel(10, 10)[3], 255);
    }

    #[test]
    fn test_invalid_svg() {
        let err = rasterize(b"<svg", 16).unwrap_err();
        assert_eq!(err.kind(), "DecodeError");
    }
}
