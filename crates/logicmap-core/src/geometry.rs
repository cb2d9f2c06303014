//! Geometric primitives for node placement and arrow anchoring.
//!
//! This module provides the geometric types used throughout logicmap for
//! positioning nodes, hit testing, and computing arrow anchor points.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in model space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Side`] - One of the four edges of a bounds rectangle
//!
//! # Coordinate System
//!
//! Logicmap uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward (positive to the right)
//! - **Y-axis**: Increases downward (positive downward)
//!
//! All coordinates here are *model units*: the values a document stores.
//! Zoom and pan are view transforms applied on top of the model and never
//! written back into these types.

/// A 2D point representing a position in model coordinate space.
///
/// Points use `f32` coordinates and provide operations for basic vector math.
/// The coordinate system has origin at top-left with Y increasing downward
/// (see [module documentation](self) for details).
///
/// # Examples
///
/// ```
/// # use logicmap_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let moved = p1.translate(3.0, -4.0);
/// assert_eq!(moved.x(), 13.0);
/// assert_eq!(moved.y(), 16.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Moves the point by a delta on each axis, returning a new point
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Subtracts another point from this point, returning the difference vector
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Distance from this point to the line segment `a`..`b`.
    ///
    /// Used for hit testing against drawn connections, where a click counts
    /// if it lands within a tolerance of the segment itself (not the
    /// infinite line through it).
    pub fn distance_to_segment(self, a: Point, b: Point) -> f32 {
        let ab = b.sub_point(a);
        let len_sq = ab.x * ab.x + ab.y * ab.y;
        if len_sq == 0.0 {
            return self.sub_point(a).hypot();
        }

        let ap = self.sub_point(a);
        let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
        let closest = Point::new(a.x + ab.x * t, a.y + ab.y * t);
        self.sub_point(closest).hypot()
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Floors both dimensions at the given minimum.
    ///
    /// # Examples
    ///
    /// ```
    /// # use logicmap_core::geometry::Size;
    /// let requested = Size::new(10.0, 500.0);
    /// let clamped = requested.clamp_min(Size::new(60.0, 40.0));
    /// assert_eq!(clamped.width(), 60.0);
    /// assert_eq!(clamped.height(), 500.0);
    /// ```
    pub fn clamp_min(self, min: Size) -> Self {
        Self {
            width: self.width.max(min.width),
            height: self.height.max(min.height),
        }
    }
}

/// One of the four edges of a [`Bounds`] rectangle.
///
/// Connections anchor at the midpoint of a side; which side is chosen
/// depends on the relative position of the two connected nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Returns the bottom-right corner as a Point
    pub fn max_point(self) -> Point {
        Point {
            x: self.max_x,
            y: self.max_y,
        }
    }

    /// Returns the midpoint of the given edge.
    ///
    /// These are the four points an arrow may snap to.
    ///
    /// # Examples
    ///
    /// ```
    /// # use logicmap_core::geometry::{Bounds, Point, Side, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(150.0, 60.0));
    /// assert_eq!(bounds.anchor(Side::Right), Point::new(150.0, 30.0));
    /// assert_eq!(bounds.anchor(Side::Bottom), Point::new(75.0, 60.0));
    /// ```
    pub fn anchor(self, side: Side) -> Point {
        let center = self.center();
        match side {
            Side::Top => Point::new(center.x, self.min_y),
            Side::Bottom => Point::new(center.x, self.max_y),
            Side::Left => Point::new(self.min_x, center.y),
            Side::Right => Point::new(self.max_x, center.y),
        }
    }

    /// Returns true if the point lies inside the bounds (edges inclusive)
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// The resulting bounds will have the minimum values of both bounds for min_x and min_y,
    /// and the maximum values of both bounds for max_x and max_y.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds outward by the given margin on every side
    pub fn expand(&self, margin: f32) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// Moves the bounds by the specified offset.
    ///
    /// This translates both the minimum and maximum coordinates by the given amount.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn size_strategy() -> impl Strategy<Value = Size> {
        (-500.0f32..500.0, -500.0f32..500.0).prop_map(|(w, h)| Size::new(w, h))
    }

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            1.0f32..500.0,
            1.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h)))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Clamping can only raise a dimension, never lower it.
    fn check_clamp_min_floors(size: Size, min: Size) -> Result<(), TestCaseError> {
        let clamped = size.clamp_min(min);

        prop_assert!(clamped.width() >= min.width());
        prop_assert!(clamped.height() >= min.height());
        prop_assert!(clamped.width() >= size.width());
        prop_assert!(clamped.height() >= size.height());
        Ok(())
    }

    /// Every anchor lies on the boundary of its bounds.
    fn check_anchors_on_boundary(bounds: Bounds) -> Result<(), TestCaseError> {
        for side in [Side::Top, Side::Bottom, Side::Left, Side::Right] {
            let anchor = bounds.anchor(side);
            let on_edge = approx_eq!(f32, anchor.x(), bounds.min_x())
                || approx_eq!(f32, anchor.x(), bounds.max_x())
                || approx_eq!(f32, anchor.y(), bounds.min_y())
                || approx_eq!(f32, anchor.y(), bounds.max_y());
            prop_assert!(on_edge);
            prop_assert!(bounds.contains(anchor));
        }
        Ok(())
    }

    /// A bounds always contains its own center.
    fn check_bounds_contains_center(bounds: Bounds) -> Result<(), TestCaseError> {
        prop_assert!(bounds.contains(bounds.center()));
        Ok(())
    }

    /// Segment distance is zero for both endpoints.
    fn check_segment_distance_endpoints(a: Point, b: Point) -> Result<(), TestCaseError> {
        prop_assert!(a.distance_to_segment(a, b) < 0.001);
        prop_assert!(b.distance_to_segment(a, b) < 0.001);
        Ok(())
    }

    /// Translating bounds preserves their size.
    fn check_translate_preserves_size(bounds: Bounds, offset: Point) -> Result<(), TestCaseError> {
        let translated = bounds.translate(offset);

        prop_assert!(approx_eq!(
            f32,
            translated.width(),
            bounds.width(),
            epsilon = 0.001
        ));
        prop_assert!(approx_eq!(
            f32,
            translated.height(),
            bounds.height(),
            epsilon = 0.001
        ));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn clamp_min_floors(size in size_strategy(), min in size_strategy()) {
            check_clamp_min_floors(size, min)?;
        }

        #[test]
        fn anchors_on_boundary(bounds in bounds_strategy()) {
            check_anchors_on_boundary(bounds)?;
        }

        #[test]
        fn bounds_contains_center(bounds in bounds_strategy()) {
            check_bounds_contains_center(bounds)?;
        }

        #[test]
        fn segment_distance_endpoints(a in point_strategy(), b in point_strategy()) {
            check_segment_distance_endpoints(a, b)?;
        }

        #[test]
        fn translate_preserves_size(bounds in bounds_strategy(), offset in point_strategy()) {
            check_translate_preserves_size(bounds, offset)?;
        }
    }
}
