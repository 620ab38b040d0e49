//! Canvas sizing and per-pixel mapping for each action.
//!
//! A [`Transform`] pairs the output canvas dimensions with the net
//! source-to-canvas pixel mapping for one [`ActionKind`]. Painting walks
//! the source pixels and places each one on a freshly allocated canvas,
//! generic over the pixel type so the canvas keeps the input's color and
//! alpha representation.

use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel};

use crate::action::ActionKind;

/// Net source-to-canvas mapping. Arguments are the source coordinates
/// followed by the source dimensions.
type PixelMap = fn(u32, u32, u32, u32) -> (u32, u32);

/// The canvas size and pixel mapping selected for one action.
pub struct Transform {
    pub output_width: u32,
    pub output_height: u32,
    map: PixelMap,
}

impl Transform {
    /// Select the canvas dimensions and pixel mapping for `action` applied
    /// to an image of `input_width` x `input_height`.
    ///
    /// The two rotations swap the canvas dimensions; mirror and flip keep
    /// them. The mappings (canvas origin top-left, y down):
    ///
    /// - Clockwise: `(x, y) → (h - 1 - y, x)`
    /// - CounterClockwise: `(x, y) → (y, w - 1 - x)`
    /// - Mirror: `(x, y) → (w - 1 - x, y)`
    /// - Flip: `(x, y) → (x, h - 1 - y)`
    pub fn select(action: ActionKind, input_width: u32, input_height: u32) -> Self {
        match action {
            ActionKind::Clockwise => Transform {
                output_width: input_height,
                output_height: input_width,
                map: |x, y, _w, h| (h - 1 - y, x),
            },
            ActionKind::CounterClockwise => Transform {
                output_width: input_height,
                output_height: input_width,
                map: |x, y, w, _h| (y, w - 1 - x),
            },
            ActionKind::Mirror => Transform {
                output_width: input_width,
                output_height: input_height,
                map: |x, y, w, _h| (w - 1 - x, y),
            },
            ActionKind::Flip => Transform {
                output_width: input_width,
                output_height: input_height,
                map: |x, y, _w, h| (x, h - 1 - y),
            },
        }
    }

    /// Paint `source` onto a freshly allocated canvas of the selected size.
    ///
    /// The transform must have been selected for `source`'s dimensions.
    pub fn paint<I>(&self, source: &I) -> ImageBuffer<I::Pixel, Vec<<I::Pixel as Pixel>::Subpixel>>
    where
        I: GenericImageView,
        I::Pixel: 'static,
    {
        let (width, height) = source.dimensions();
        let mut canvas = ImageBuffer::new(self.output_width, self.output_height);
        for y in 0..height {
            for x in 0..width {
                let (cx, cy) = (self.map)(x, y, width, height);
                canvas.put_pixel(cx, cy, source.get_pixel(x, y));
            }
        }

        canvas
    }
}

/// Apply `action` to `image`, keeping its pixel representation.
///
/// Each known [`DynamicImage`] variant paints into a canvas of the same
/// pixel type; unknown variants fall back to RGBA8.
pub fn apply(action: ActionKind, image: &DynamicImage) -> DynamicImage {
    let transform = Transform::select(action, image.width(), image.height());
    match image {
        DynamicImage::ImageLuma8(buf) => transform.paint(buf).into(),
        DynamicImage::ImageLumaA8(buf) => transform.paint(buf).into(),
        DynamicImage::ImageRgb8(buf) => transform.paint(buf).into(),
        DynamicImage::ImageRgba8(buf) => transform.paint(buf).into(),
        DynamicImage::ImageLuma16(buf) => transform.paint(buf).into(),
        DynamicImage::ImageLumaA16(buf) => transform.paint(buf).into(),
        DynamicImage::ImageRgb16(buf) => transform.paint(buf).into(),
        DynamicImage::ImageRgba16(buf) => transform.paint(buf).into(),
        DynamicImage::ImageRgb32F(buf) => transform.paint(buf).into(),
        DynamicImage::ImageRgba32F(buf) => transform.paint(buf).into(),
        other => transform.paint(&other.to_rgba8()).into(),
    }
}
