//! Conversions between `image` crate buffers and the sample image model.

use image::RgbImage;

use spotter_core::ArrayImage;

/// Convert packed 8-bit RGB into a `[0, 1]` sample image.
pub fn from_rgb_image(src: &RgbImage) -> ArrayImage {
    let mut out = ArrayImage::new(src.width() as usize, src.height() as usize);
    // Both layouts are row-major interleaved RGB, so this is one pass.
    out.write_rgb8(src.as_raw())
        .expect("RgbImage stores width * height RGB triples");
    out
}

/// Render `[0, 1]` samples to packed 8-bit RGB, clamping out-of-range
/// values into the byte range.
pub fn to_rgb_image<I>(src: &ArrayImage<I>) -> RgbImage {
    let mut out = RgbImage::new(src.width() as u32, src.height() as u32);
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let colour = src.get_pixel(x as i32, y as i32);
        *pixel = image::Rgb([to_byte(colour.r), to_byte(colour.g), to_byte(colour.b)]);
    }
    out
}

fn to_byte(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
