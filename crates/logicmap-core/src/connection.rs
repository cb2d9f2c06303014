//! Directed connections between nodes and their smart-arrow routing.
//!
//! A [`Connection`] is identified by its (parent, child) node pair and
//! carries no geometry of its own: the segment it draws is recomputed from
//! the two nodes' current bounds on every draw call. Routing picks the axis
//! of travel by comparing the center-to-center deltas and anchors the arrow
//! at the midpoint of the facing sides.

use std::fmt::{self, Display};

use crate::geometry::{Bounds, Point, Side};
use crate::identifier::Id;

/// A directed edge from a parent node to a child node.
///
/// Both endpoints must refer to live nodes; the store cascade-deletes
/// connections when either endpoint is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection {
    parent: Id,
    child: Id,
}

impl Connection {
    /// Creates a connection from `parent` to `child`.
    pub fn new(parent: Id, child: Id) -> Self {
        Self { parent, child }
    }

    /// Returns the parent (source) node id.
    pub fn parent(&self) -> Id {
        self.parent
    }

    /// Returns the child (target) node id.
    pub fn child(&self) -> Id {
        self.child
    }

    /// Returns true if either endpoint is the given node.
    pub fn touches(&self, id: Id) -> bool {
        self.parent == id || self.child == id
    }
}

impl Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.parent, self.child)
    }
}

/// Chooses the facing sides for an arrow between two centers.
///
/// The axis of travel is whichever center delta is strictly larger in
/// magnitude; an exact |dx| == |dy| tie falls through to the vertical
/// branch. That tie behavior is part of the documented contract and is
/// preserved deliberately.
///
/// Returns `(parent_side, child_side)`.
pub fn facing_sides(parent_center: Point, child_center: Point) -> (Side, Side) {
    let delta = child_center.sub_point(parent_center);

    if delta.x().abs() > delta.y().abs() {
        // Horizontal connection
        if delta.x() > 0.0 {
            (Side::Right, Side::Left)
        } else {
            (Side::Left, Side::Right)
        }
    } else {
        // Vertical connection
        if delta.y() > 0.0 {
            (Side::Bottom, Side::Top)
        } else {
            (Side::Top, Side::Bottom)
        }
    }
}

/// Computes the arrow segment between two node bounds.
///
/// A single straight segment from the parent's facing-side midpoint to the
/// child's. O(1), no state: callers re-route on every draw.
///
/// # Examples
///
/// ```
/// # use logicmap_core::connection::route;
/// # use logicmap_core::geometry::{Bounds, Point, Size};
/// let parent = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(150.0, 60.0));
/// let child = Bounds::new_from_top_left(Point::new(400.0, 0.0), Size::new(150.0, 60.0));
///
/// let (from, to) = route(parent, child);
/// assert_eq!(from, Point::new(150.0, 30.0));
/// assert_eq!(to, Point::new(400.0, 30.0));
/// ```
pub fn route(parent: Bounds, child: Bounds) -> (Point, Point) {
    let (parent_side, child_side) = facing_sides(parent.center(), child.center());
    (parent.anchor(parent_side), child.anchor(child_side))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn bounds_at(x: f32, y: f32) -> Bounds {
        Bounds::new_from_top_left(Point::new(x, y), Size::new(150.0, 60.0))
    }

    #[test]
    fn test_connection_endpoints() {
        let parent = Id::new("p");
        let child = Id::new("c");
        let connection = Connection::new(parent, child);

        assert_eq!(connection.parent(), parent);
        assert_eq!(connection.child(), child);
        assert!(connection.touches(parent));
        assert!(connection.touches(child));
        assert!(!connection.touches(Id::new("other")));
    }

    #[test]
    fn test_child_to_the_right() {
        let (from, to) = route(bounds_at(0.0, 0.0), bounds_at(400.0, 0.0));
        assert_eq!(from, Point::new(150.0, 30.0));
        assert_eq!(to, Point::new(400.0, 30.0));
    }

    #[test]
    fn test_child_to_the_left() {
        let (from, to) = route(bounds_at(400.0, 0.0), bounds_at(0.0, 0.0));
        assert_eq!(from, Point::new(400.0, 30.0));
        assert_eq!(to, Point::new(150.0, 30.0));
    }

    #[test]
    fn test_child_below() {
        let (from, to) = route(bounds_at(0.0, 0.0), bounds_at(0.0, 300.0));
        assert_eq!(from, Point::new(75.0, 60.0));
        assert_eq!(to, Point::new(75.0, 300.0));
    }

    #[test]
    fn test_child_above() {
        let (from, to) = route(bounds_at(0.0, 300.0), bounds_at(0.0, 0.0));
        assert_eq!(from, Point::new(75.0, 300.0));
        assert_eq!(to, Point::new(75.0, 60.0));
    }

    #[test]
    fn test_exact_diagonal_tie_goes_vertical() {
        // |dx| == |dy|: the strictly-greater test fails, so the vertical
        // branch wins. Preserved behavior, do not "fix".
        let (parent_side, child_side) =
            facing_sides(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        assert_eq!(parent_side, Side::Bottom);
        assert_eq!(child_side, Side::Top);

        let (up_side, _) = facing_sides(Point::new(0.0, 0.0), Point::new(-100.0, -100.0));
        assert_eq!(up_side, Side::Top);
    }

    #[test]
    fn test_coincident_centers_go_vertical_upward() {
        // dy == 0 in the vertical branch picks Top -> Bottom, matching the
        // non-positive delta case.
        let (parent_side, child_side) = facing_sides(Point::new(5.0, 5.0), Point::new(5.0, 5.0));
        assert_eq!(parent_side, Side::Top);
        assert_eq!(child_side, Side::Bottom);
    }
}
