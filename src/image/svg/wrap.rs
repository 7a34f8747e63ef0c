//! Raster-to-SVG fallback.
//!
//! Embeds a PNG as a base64 data URI inside a minimal SVG document.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::error::{FaviconError, Result};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Wrap `png` (a `size` x `size` bitmap) in an SVG document.
pub fn wrap_png(png: &[u8], size: u32) -> Result<Vec<u8>> {
    let edge = size.to_string();
    let view_box = format!("0 0 {size} {size}");
    let href = format!("data:image/png;base64,{}", STANDARD.encode(png));

    let svg = BytesStart::new("svg").with_attributes([
        ("xmlns", SVG_NS),
        ("xmlns:xlink", XLINK_NS),
        ("width", edge.as_str()),
        ("height", edge.as_str()),
        ("viewBox", view_box.as_str()),
    ]);
    let image = BytesStart::new("image").with_attributes([
        ("width", edge.as_str()),
        ("height", edge.as_str()),
        ("xlink:href", href.as_str()),
        ("href", href.as_str()),
    ]);

    let mut writer = Writer::new(Vec::with_capacity(href.len() + 256));
    let events = [
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        Event::Start(svg),
        Event::Empty(image),
        Event::End(BytesEnd::new("svg")),
    ];
    for event in events {
        writer
            .write_event(event)
            .map_err(|e| FaviconError::encode(format!("svg wrapper: {e}")))?;
    }

    Ok(writer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::resample::encode_png;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_wrapped_svg_parses() {
        let png = encode_png(&RgbaImage::from_pixel(4, 4, Rgba([0, 128, 0, 255]))).unwrap();
        let svg = wrap_png(&png, 4).unwrap();

        let text = std::str::from_utf8(&svg).unwrap();
        assert!(text.starts_with("<?xml"));
        assert!(text.contains("data:image/png;base64,"));
        assert!(text.contains(r#"viewBox="0 0 4 4""#));

        let tree = usvg::Tree::from_data(&svg, &usvg::Options::default()).unwrap();
        assert_eq!(tree.size().width(), 4.0);
    }
}
