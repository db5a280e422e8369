//! Window resampling between images of unrelated geometry.

use log::trace;

use crate::image::ArrayImage;
use crate::interp::Interpolator;
use crate::rect::Rect;

impl<I> ArrayImage<I> {
    /// Resample the full extent of `source` into this image.
    pub fn write_from<J: Interpolator>(&mut self, source: &ArrayImage<J>) {
        self.write_from_window(source, source.bounds());
    }

    /// Resample the `window` region of `source` onto the full extent of
    /// this image.
    ///
    /// Each destination pixel `(x, y)` maps to the continuous source
    /// position `(window.left + x / W * window.width,
    /// window.top + y / H * window.height)` and samples it with the
    /// source's own strategy. The destination is always filled completely:
    /// aspect mismatch stretches rather than crops, and window regions
    /// outside the source read its padding colour. Callers that need an
    /// undistorted view pick the window with
    /// [`Rect::biggest_contained_box`] or [`Rect::smallest_containing_box`]
    /// first.
    ///
    /// The window may lie anywhere, including entirely outside the source
    /// or inverted down to zero size; no combination fails.
    pub fn write_from_window<J: Interpolator>(&mut self, source: &ArrayImage<J>, window: Rect) {
        let width = self.width();
        let height = self.height();
        trace!(
            "resampling {}x{} window ({:.1}, {:.1}, {:.1}, {:.1}) onto {}x{}",
            source.width(),
            source.height(),
            window.x,
            window.y,
            window.width,
            window.height,
            width,
            height,
        );

        for y in 0..height {
            let sy = window.top() + y as f64 / height as f64 * window.height;
            for x in 0..width {
                let sx = window.left() + x as f64 / width as f64 * window.width;
                self.put(x, y, source.sample(sx, sy));
            }
        }
    }
}
