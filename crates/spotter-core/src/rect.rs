//! Axis-aligned rectangles and box overlap measures.
//!
//! Rectangles are continuous: coordinates and extents are `f64`, and a
//! rectangle covers the half-open ranges `[x, x + width)` horizontally and
//! `[y, y + height)` vertically when used as a pixel region. Extents stay
//! non-negative through every named constructor; [`Rect::from_sides`] clamps
//! inverted inputs to zero area rather than producing a negative extent.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with non-negative extent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Zero-area rectangle at the origin.
    pub const EMPTY: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Rectangle from its top-left corner and extents. Callers keep the
    /// extents non-negative; the other constructors enforce it.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of the given size centred on `center`.
    pub fn from_center(center: Point2<f64>, width: f64, height: f64) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// Rectangle spanned by two opposite corners, in either order.
    pub fn from_corners(a: Point2<f64>, b: Point2<f64>) -> Self {
        let center = Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        Self::from_center(center, (b.x - a.x).abs(), (b.y - a.y).abs())
    }

    /// Rectangle from its four edges; inverted edge pairs clamp to zero
    /// extent instead of going negative.
    pub fn from_sides(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Width over height.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Top-left corner.
    #[inline]
    pub fn corner(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the point lies inside the half-open extent.
    pub fn contains(&self, point: Point2<f64>) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Overlap with `other`. Disjoint rectangles produce a zero-area
    /// result, never a negative extent.
    pub fn intersect(&self, other: Rect) -> Rect {
        Rect::from_sides(
            self.left().max(other.left()),
            self.top().max(other.top()),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        )
    }

    /// Scale both extents about the unchanged center.
    pub fn enlarge(&self, factor: f64) -> Rect {
        self.enlarge_xy(factor, factor)
    }

    /// Scale each extent about the unchanged center.
    pub fn enlarge_xy(&self, factor_x: f64, factor_y: f64) -> Rect {
        Rect::from_center(self.center(), self.width * factor_x, self.height * factor_y)
    }

    /// Largest rectangle of the given aspect ratio that fits inside
    /// `self`, sharing its center.
    pub fn biggest_contained_box(&self, aspect_ratio: f64) -> Rect {
        if aspect_ratio < self.aspect_ratio() {
            Rect::from_center(self.center(), self.height * aspect_ratio, self.height)
        } else {
            Rect::from_center(self.center(), self.width, self.width / aspect_ratio)
        }
    }

    /// Smallest rectangle of the given aspect ratio that contains all of
    /// `self`, sharing its center.
    pub fn smallest_containing_box(&self, aspect_ratio: f64) -> Rect {
        if aspect_ratio > self.aspect_ratio() {
            Rect::from_center(self.center(), self.height * aspect_ratio, self.height)
        } else {
            Rect::from_center(self.center(), self.width, self.width / aspect_ratio)
        }
    }
}

/// Area covered by at least one of the two rectangles.
pub fn union_area(a: Rect, b: Rect) -> f64 {
    a.area() + b.area() - a.intersect(b).area()
}

/// Intersection over union of two boxes, in `[0, 1]` for boxes of positive
/// area.
///
/// Two zero-area boxes divide zero by zero and yield NaN; NaN compares
/// false against any threshold, so such pairs never count as overlapping.
/// Callers that must distinguish degenerate boxes filter them first.
pub fn intersection_over_union(a: Rect, b: Rect) -> f64 {
    a.intersect(b).area() / union_area(a, b)
}
