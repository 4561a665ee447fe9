//! Rasterize chart SVG to PNG with resvg.

use rayon::prelude::*;
use tracing::{debug, instrument};

use heatmap_common::{HeatmapError, HeatmapResult};

use crate::png;

/// Render `svg` at `scale` (1.0 = SVG pixel size) onto a white background
/// and return straight-alpha RGBA pixels with the image size.
#[instrument(skip(svg), fields(bytes = svg.len()))]
pub fn rasterize_rgba(svg: &str, scale: f32) -> HeatmapResult<(Vec<u8>, usize, usize)> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(HeatmapError::Render(format!("invalid raster scale {}", scale)));
    }

    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|e| HeatmapError::Render(format!("SVG parse failed: {}", e)))?;

    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        HeatmapError::Render(format!("cannot allocate {}x{} pixmap", width, height))
    })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let mut pixels = pixmap.take();
    demultiply(&mut pixels);

    debug!(width, height, "Rasterized chart");
    Ok((pixels, width as usize, height as usize))
}

/// Render `svg` to an encoded PNG.
pub fn rasterize(svg: &str, scale: f32) -> HeatmapResult<Vec<u8>> {
    let (pixels, width, height) = rasterize_rgba(svg, scale)?;
    png::encode_auto(&pixels, width, height)
}

/// tiny-skia stores premultiplied alpha; PNG wants straight alpha.
fn demultiply(pixels: &mut [u8]) {
    pixels.par_chunks_exact_mut(4).for_each(|px| {
        let a = px[3] as u32;
        if a == 0 || a == 255 {
            return;
        }
        for c in &mut px[..3] {
            *c = ((*c as u32 * 255 + a / 2) / a).min(255) as u8;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demultiply() {
        let mut pixels = [64, 32, 0, 128, 10, 20, 30, 255, 0, 0, 0, 0];
        demultiply(&mut pixels);
        assert_eq!(&pixels[..4], &[128, 64, 0, 128]);
        assert_eq!(&pixels[4..8], &[10, 20, 30, 255]);
        assert_eq!(&pixels[8..], &[0, 0, 0, 0]);
    }
}
