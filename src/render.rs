//! Pass 2: turn one raster grid into a colorized RGBA frame.
//!
//! Invalid pixels are substituted with the low normalization bound so
//! missing data renders as the coldest color. The land mask is applied
//! after color mapping so sea pixels are uniformly the mask color
//! regardless of their underlying value.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use rusttype::Scale;

use crate::colormap::Colormap;
use crate::config::WatermarkPosition;
use crate::fonts::FontResolution;
use crate::raster::{Grid, is_valid};

const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Read-only state shared by every rendered frame of a run.
pub struct RenderContext<'a> {
    /// Final normalization bounds, `(low, high)` with `high > low`.
    pub bounds: (f64, f64),
    pub colormap: Colormap,
    /// True = land (kept), false = sea (overridden to `mask_color`).
    pub land_mask: Option<&'a [bool]>,
    pub mask_color: [u8; 4],
    pub font: &'a FontResolution,
    pub watermark: &'a str,
    pub watermark_position: WatermarkPosition,
}

impl RenderContext<'_> {
    /// Padding around text overlays, scaled with the font size.
    fn text_padding(px: f32) -> i32 {
        (px * 0.4).max(5.0).round() as i32
    }
}

/// Render one frame: normalize, color-map, mask, overlay text.
pub fn render_frame(grid: &Grid, date_label: &str, ctx: &RenderContext) -> RgbaImage {
    let (lo, hi) = ctx.bounds;
    let inv_span = 1.0 / (hi - lo);
    let width = grid.width;

    let mut image = RgbaImage::from_fn(grid.width as u32, grid.height as u32, |x, y| {
        let i = y as usize * width + x as usize;
        let raw = grid.data[i];

        // Missing data falls to the low bound, i.e. the coldest color.
        let value = if is_valid(raw) { raw as f64 } else { lo };
        let t = ((value - lo) * inv_span).clamp(0.0, 1.0);

        let rgba = match ctx.land_mask {
            Some(mask) if !mask[i] => ctx.mask_color,
            _ => ctx.colormap.sample(t),
        };

        Rgba(rgba)
    });

    if let FontResolution::Scalable { font, px } = ctx.font {
        let scale = Scale::uniform(*px);
        let pad = RenderContext::text_padding(*px);
        let (w, h) = (grid.width as i32, grid.height as i32);

        let (label_w, label_h) = text_size(scale, font, date_label);
        let label_x = (w - label_w - pad).max(0);
        let label_y = (h - label_h - pad).max(0);

        if !ctx.watermark.is_empty() {
            let (mark_w, mark_h) = text_size(scale, font, ctx.watermark);
            let (x, y) = match ctx.watermark_position {
                WatermarkPosition::TopLeft => (pad, pad),
                WatermarkPosition::TopRight => ((w - mark_w - pad).max(0), pad),
                WatermarkPosition::BottomLeft => (pad, (h - mark_h - pad).max(0)),
                // Stacked above the date label, which owns the corner.
                WatermarkPosition::BottomRight => {
                    ((w - mark_w - pad).max(0), (label_y - mark_h - pad).max(0))
                }
            };
            draw_text_mut(&mut image, TEXT_COLOR, x, y, scale, font, ctx.watermark);
        }

        draw_text_mut(
            &mut image, TEXT_COLOR, label_x, label_y, scale, font, date_label,
        );
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_grid(data: Vec<f32>, width: usize, height: usize) -> Grid {
        Grid {
            width,
            height,
            data,
        }
    }

    fn unmasked_ctx(bounds: (f64, f64)) -> RenderContext<'static> {
        RenderContext {
            bounds,
            colormap: Colormap::Grayscale,
            land_mask: None,
            mask_color: [0, 0, 0, 0],
            font: &FontResolution::Unavailable,
            watermark: "",
            watermark_position: WatermarkPosition::TopLeft,
        }
    }

    #[test]
    fn test_values_map_through_bounds() {
        let grid = test_grid(vec![0.0001, 5.0, 10.0, 20.0], 2, 2);
        let image = render_frame(&grid, "2020-01", &unmasked_ctx((0.0, 10.0)));

        // ~0 -> black, 5 -> mid gray, 10 -> white, 20 clamps to white.
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(1, 0).0, [128, 128, 128, 255]);
        assert_eq!(image.get_pixel(0, 1).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(1, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_invalid_pixels_render_as_coldest_color() {
        let grid = test_grid(vec![f32::NAN, -4.0, 0.0, 10.0], 2, 2);
        let image = render_frame(&grid, "2020-01", &unmasked_ctx((0.0, 10.0)));

        let coldest = Rgba(Colormap::Grayscale.sample(0.0));
        assert_eq!(*image.get_pixel(0, 0), coldest);
        assert_eq!(*image.get_pixel(1, 0), coldest);
        assert_eq!(*image.get_pixel(0, 1), coldest);
        // The one valid pixel is unaffected.
        assert_eq!(image.get_pixel(1, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_sea_pixels_equal_mask_color_exactly() {
        let grid = test_grid(vec![10.0, 10.0, 10.0, 10.0], 2, 2);
        let land_mask = [true, false, false, true];
        let mask_color = [7, 13, 42, 9];

        let ctx = RenderContext {
            bounds: (0.0, 10.0),
            colormap: Colormap::Plasma,
            land_mask: Some(&land_mask),
            mask_color,
            font: &FontResolution::Unavailable,
            watermark: "",
            watermark_position: WatermarkPosition::TopLeft,
        };

        let image = render_frame(&grid, "2020-01", &ctx);

        let land = Rgba(Colormap::Plasma.sample(1.0));
        assert_eq!(*image.get_pixel(0, 0), land);
        assert_eq!(image.get_pixel(1, 0).0, mask_color);
        assert_eq!(image.get_pixel(0, 1).0, mask_color);
        assert_eq!(*image.get_pixel(1, 1), land);
    }

    #[test]
    fn test_text_padding_has_floor() {
        assert_eq!(RenderContext::text_padding(12.0), 5);
        assert_eq!(RenderContext::text_padding(40.0), 16);
    }
}
