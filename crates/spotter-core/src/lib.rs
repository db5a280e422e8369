//! Image model and resampling primitives for object detection viewers.
//!
//! This crate is intentionally small and knows nothing about cameras,
//! inference engines, or any concrete pixel source. It provides an RGB
//! image with `f64` samples, continuous-coordinate sampling behind the
//! [`Interpolator`] seam, and the window resampling operation that
//! squeezes an arbitrary source region onto a fixed-size buffer.
//!
//! Sampling conventions: discrete positions are valid on
//! `[0, width) x [0, height)` and continuous positions on the inclusive
//! `[0, width] x [0, height]`, edge-clamped past the last pixel centre.
//! Everything outside produces the image's mutable padding colour, and
//! writes outside the image are dropped, so per-pixel access never fails.

mod color;
mod error;
mod image;
mod interp;
mod logger;
mod rect;
mod resample;

pub use color::{Channel, Rgb};
pub use error::ImageError;
pub use image::{ArrayImage, ChannelPlane, ChannelPlaneMut, CHANNELS};
pub use interp::{Bilinear, Interpolator, Nearest};
pub use rect::{intersection_over_union, union_area, Rect};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init, init_with_level};
