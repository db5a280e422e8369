//! Fixed-size RGB images with continuous-coordinate sampling.

use crate::color::{Channel, Rgb};
use crate::error::ImageError;
use crate::interp::{Bilinear, Interpolator};
use crate::rect::Rect;

/// Colour channels stored per pixel.
pub const CHANNELS: usize = 3;

/// A fixed-size RGB image with `f64` samples and a swappable sampling
/// strategy.
///
/// Pixels are stored interleaved and row-major: sample `c` of pixel
/// `(x, y)` lives at `(y * width + x) * 3 + c`. Values are nominally in
/// `[0, 1]` but nothing clamps.
///
/// Reads never fail. Discrete reads outside `[0, width) x [0, height)` and
/// continuous samples outside the inclusive `[0, width] x [0, height]`
/// return the image's [`padding`](Self::padding) colour; discrete writes
/// outside the image are silently dropped. An image is never resized after
/// construction.
#[derive(Clone, Debug)]
pub struct ArrayImage<I = Bilinear> {
    width: usize,
    height: usize,
    data: Vec<f64>,
    interpolator: I,
    /// Colour of every out-of-bounds read. Plain state, not configuration:
    /// assigning a new value affects the very next read.
    pub padding: Rgb,
}

impl ArrayImage<Bilinear> {
    /// Zero-filled image with bilinear sampling and black padding.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_interpolator(width, height, Bilinear)
    }

    /// Image built by evaluating `f` at every pixel, row by row.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Rgb) -> Self {
        let mut image = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                image.put(x, y, f(x, y));
            }
        }
        image
    }

    /// Wrap an existing interleaved buffer of length `width * height * 3`.
    pub fn from_data(width: usize, height: usize, data: Vec<f64>) -> Result<Self, ImageError> {
        let expected = width * height * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::BufferSize {
                width,
                height,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
            interpolator: Bilinear,
            padding: Rgb::BLACK,
        })
    }
}

impl<I> ArrayImage<I> {
    /// Zero-filled image with an explicit sampling strategy.
    pub fn with_interpolator(width: usize, height: usize, interpolator: I) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height * CHANNELS],
            interpolator,
            padding: Rgb::BLACK,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Full image extent as a rectangle anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f64, self.height as f64)
    }

    /// Interleaved sample buffer, `(y * width + x) * 3 + channel`.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Read-only view of one colour plane.
    pub fn plane(&self, channel: Channel) -> ChannelPlane<'_> {
        ChannelPlane {
            data: &self.data,
            width: self.width,
            height: self.height,
            offset: channel.index(),
        }
    }

    /// Exclusive view of one colour plane.
    pub fn plane_mut(&mut self, channel: Channel) -> ChannelPlaneMut<'_> {
        ChannelPlaneMut {
            data: &mut self.data,
            width: self.width,
            height: self.height,
            offset: channel.index(),
        }
    }

    #[inline]
    fn contains_pixel(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Whether `(x, y)` lies in the continuous sampling domain
    /// `[0, width] x [0, height]` of a non-empty image. Note the closed
    /// upper edge: sampling exactly on the far border is in range and
    /// clamps to the last row or column of pixels.
    #[inline]
    fn contains_sample(&self, x: f64, y: f64) -> bool {
        self.width > 0
            && self.height > 0
            && (0.0..=self.width as f64).contains(&x)
            && (0.0..=self.height as f64).contains(&y)
    }

    /// Exact pixel read; out of bounds produces the padding colour.
    pub fn get_pixel(&self, x: i32, y: i32) -> Rgb {
        if !self.contains_pixel(x, y) {
            return self.padding;
        }
        let base = ((y as usize) * self.width + (x as usize)) * CHANNELS;
        Rgb::new(self.data[base], self.data[base + 1], self.data[base + 2])
    }

    /// Exact pixel write; out of bounds is silently dropped.
    pub fn set_pixel(&mut self, x: i32, y: i32, colour: Rgb) {
        if self.contains_pixel(x, y) {
            self.put(x as usize, y as usize, colour);
        }
    }

    #[inline]
    pub(crate) fn put(&mut self, x: usize, y: usize, colour: Rgb) {
        let base = (y * self.width + x) * CHANNELS;
        self.data[base] = colour.r;
        self.data[base + 1] = colour.g;
        self.data[base + 2] = colour.b;
    }

    /// Fill the whole buffer from packed 8-bit RGB rows of length
    /// `width * height * 3`, mapping `0..=255` onto `[0, 1]`.
    pub fn write_rgb8(&mut self, bytes: &[u8]) -> Result<(), ImageError> {
        if bytes.len() != self.data.len() {
            return Err(ImageError::BufferSize {
                width: self.width,
                height: self.height,
                expected: self.data.len(),
                got: bytes.len(),
            });
        }
        for (value, byte) in self.data.iter_mut().zip(bytes) {
            *value = *byte as f64 / 255.0;
        }
        Ok(())
    }

    /// Set every pixel to one colour.
    pub fn fill(&mut self, colour: Rgb) {
        for pixel in self.data.chunks_exact_mut(CHANNELS) {
            pixel[0] = colour.r;
            pixel[1] = colour.g;
            pixel[2] = colour.b;
        }
    }
}

impl<I: Interpolator> ArrayImage<I> {
    /// Continuous sample of one plane; outside the sampling domain this is
    /// the matching padding channel.
    pub fn sample_channel(&self, x: f64, y: f64, channel: Channel) -> f64 {
        if self.contains_sample(x, y) {
            self.interpolator.interpolate(&self.plane(channel), x, y)
        } else {
            self.padding.channel(channel)
        }
    }

    /// Continuous colour sample; outside the sampling domain this is the
    /// padding colour.
    pub fn sample(&self, x: f64, y: f64) -> Rgb {
        if !self.contains_sample(x, y) {
            return self.padding;
        }
        Rgb::new(
            self.interpolator.interpolate(&self.plane(Channel::Red), x, y),
            self.interpolator.interpolate(&self.plane(Channel::Green), x, y),
            self.interpolator.interpolate(&self.plane(Channel::Blue), x, y),
        )
    }
}

/// Borrowed view of a single colour plane of an [`ArrayImage`].
///
/// Positions are discrete and must be inside the plane; the owning image
/// applies its padding rule before sampling ever reaches a plane.
#[derive(Clone, Copy, Debug)]
pub struct ChannelPlane<'a> {
    data: &'a [f64],
    width: usize,
    height: usize,
    offset: usize,
}

impl ChannelPlane<'_> {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at a discrete position, `x < width` and `y < height`.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f64 {
        self.data[(y * self.width + x) * CHANNELS + self.offset]
    }
}

/// Exclusive view of a single colour plane of an [`ArrayImage`].
#[derive(Debug)]
pub struct ChannelPlaneMut<'a> {
    data: &'a mut [f64],
    width: usize,
    height: usize,
    offset: usize,
}

impl ChannelPlaneMut<'_> {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at a discrete position, `x < width` and `y < height`.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f64 {
        self.data[(y * self.width + x) * CHANNELS + self.offset]
    }

    /// Overwrite a single sample, `x < width` and `y < height`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        self.data[(y * self.width + x) * CHANNELS + self.offset] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_round_trip_through_the_interleaved_buffer() {
        let mut image = ArrayImage::new(3, 2);
        image.set_pixel(2, 1, Rgb::new(0.1, 0.2, 0.3));
        assert_eq!(image.get_pixel(2, 1), Rgb::new(0.1, 0.2, 0.3));
        // Last pixel sits at the tail of the buffer.
        assert_eq!(&image.as_slice()[15..], &[0.1, 0.2, 0.3]);
    }

    #[test]
    fn out_of_bounds_reads_produce_padding() {
        let mut image = ArrayImage::new(4, 4);
        image.fill(Rgb::WHITE);
        assert_eq!(image.get_pixel(-1, 0), Rgb::BLACK);
        assert_eq!(image.get_pixel(0, 4), Rgb::BLACK);

        image.padding = Rgb::new(0.5, 0.0, 0.0);
        assert_eq!(image.get_pixel(-1, 0), Rgb::new(0.5, 0.0, 0.0));
        assert_eq!(image.get_pixel(2, 2), Rgb::WHITE);
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut image = ArrayImage::new(2, 2);
        image.set_pixel(-1, 0, Rgb::WHITE);
        image.set_pixel(2, 0, Rgb::WHITE);
        image.set_pixel(0, -3, Rgb::WHITE);
        assert!(image.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn continuous_domain_is_inclusive_of_the_far_edge() {
        let mut image = ArrayImage::new(2, 2);
        image.fill(Rgb::grey(0.75));
        image.padding = Rgb::grey(0.25);
        // Exactly on the far border clamps to the last pixel.
        assert_eq!(image.sample(2.0, 2.0), Rgb::grey(0.75));
        // The tiniest step past it reads padding.
        assert_eq!(image.sample(2.0 + 1e-9, 1.0), Rgb::grey(0.25));
        assert_eq!(image.sample(-1e-9, 1.0), Rgb::grey(0.25));
    }

    #[test]
    fn empty_image_samples_padding_everywhere() {
        let mut image = ArrayImage::new(0, 0);
        image.padding = Rgb::new(0.0, 1.0, 0.0);
        assert_eq!(image.sample(0.0, 0.0), Rgb::new(0.0, 1.0, 0.0));
        assert_eq!(image.get_pixel(0, 0), Rgb::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn from_data_validates_buffer_length() {
        let image = ArrayImage::from_data(2, 2, vec![0.0; 12]).unwrap();
        assert_eq!(image.width(), 2);

        let err = ArrayImage::from_data(2, 2, vec![0.0; 11]).unwrap_err();
        assert_eq!(
            err,
            ImageError::BufferSize {
                width: 2,
                height: 2,
                expected: 12,
                got: 11
            }
        );
    }

    #[test]
    fn write_rgb8_rescales_bytes() {
        let mut image = ArrayImage::new(2, 1);
        image.write_rgb8(&[255, 0, 0, 0, 255, 0]).unwrap();
        assert_eq!(image.get_pixel(0, 0), Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(image.get_pixel(1, 0), Rgb::new(0.0, 1.0, 0.0));

        assert!(image.write_rgb8(&[0; 5]).is_err());
    }

    #[test]
    fn plane_views_share_the_pixel_buffer() {
        let mut image = ArrayImage::new(2, 2);
        image.plane_mut(Channel::Green).set(1, 0, 0.8);
        assert_eq!(image.get_pixel(1, 0), Rgb::new(0.0, 0.8, 0.0));
        assert_eq!(image.plane(Channel::Green).at(1, 0), 0.8);
        assert_eq!(image.plane(Channel::Red).at(1, 0), 0.0);
    }

    #[test]
    fn from_fn_visits_every_pixel() {
        let image = ArrayImage::from_fn(3, 2, |x, y| Rgb::grey((x + 10 * y) as f64));
        assert_eq!(image.get_pixel(0, 0), Rgb::grey(0.0));
        assert_eq!(image.get_pixel(2, 0), Rgb::grey(2.0));
        assert_eq!(image.get_pixel(1, 1), Rgb::grey(11.0));
    }

    #[test]
    fn bounds_match_dimensions() {
        let image = ArrayImage::new(640, 480);
        let b = image.bounds();
        assert_eq!((b.x, b.y), (0.0, 0.0));
        assert_eq!((b.width, b.height), (640.0, 480.0));
    }
}
