//! The typed rectangular node: one unit of argument on the canvas.
//!
//! This module contains [`NodeKind`] (the five argument roles) and [`Node`]
//! itself. Node position and size are always stored in model units; zoom is
//! a view concern applied elsewhere and never written back here.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Bounds, Point, Side, Size},
    identifier::Id,
    reference::Reference,
};

/// Default node size in model units.
pub const DEFAULT_NODE_SIZE: Size = Size::new(150.0, 60.0);

/// Smallest size a node may be resized to, in model units.
pub const MIN_NODE_SIZE: Size = Size::new(60.0, 40.0);

/// The role a node plays in the argument structure.
///
/// The names match the `type` attribute stored in documents.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum NodeKind {
    /// A research question (default for new nodes)
    #[default]
    Question,
    /// A problem raised by a question or another node
    Problem,
    /// A proposed solution
    Solution,
    /// Supporting explanation or evidence
    Explanation,
    /// A conclusion drawn from the surrounding argument
    Conclusion,
}

impl NodeKind {
    /// All kinds, in menu order.
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Question,
        NodeKind::Problem,
        NodeKind::Solution,
        NodeKind::Explanation,
        NodeKind::Conclusion,
    ];
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Question" => Ok(Self::Question),
            "Problem" => Ok(Self::Problem),
            "Solution" => Ok(Self::Solution),
            "Explanation" => Ok(Self::Explanation),
            "Conclusion" => Ok(Self::Conclusion),
            _ => Err(format!("unknown node type `{s}`")),
        }
    }
}

impl From<NodeKind> for &'static str {
    fn from(val: NodeKind) -> Self {
        match val {
            NodeKind::Question => "Question",
            NodeKind::Problem => "Problem",
            NodeKind::Solution => "Solution",
            NodeKind::Explanation => "Explanation",
            NodeKind::Conclusion => "Conclusion",
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// A typed, resizable rectangle with body text and a reference list.
///
/// The position is the top-left corner. Moving translates the position;
/// resizing keeps the top-left corner fixed and clamps to
/// [`MIN_NODE_SIZE`]. Arrow anchor points are derived from the current
/// bounds through [`Node::anchor`].
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    kind: NodeKind,
    position: Point,
    size: Size,
    text: String,
    references: Vec<Reference>,
}

impl Node {
    /// Creates a new node of the given kind at the given position, with a
    /// fresh id, the default size, and placeholder text.
    pub fn new(kind: NodeKind, position: Point) -> Self {
        Self::with_id(Id::generate(), kind, position)
    }

    /// Creates a node with a known id, as when reconstructing from a document.
    pub fn with_id(id: Id, kind: NodeKind, position: Point) -> Self {
        Self {
            id,
            kind,
            position,
            size: DEFAULT_NODE_SIZE,
            text: String::from("New Node"),
            references: Vec::new(),
        }
    }

    /// Sets the size, returning the modified node. Clamped like [`Node::resize`].
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size.clamp_min(MIN_NODE_SIZE);
        self
    }

    /// Sets the body text, returning the modified node.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Returns the node id.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the node kind.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Changes the node kind.
    pub fn set_kind(&mut self, kind: NodeKind) {
        self.kind = kind;
    }

    /// Returns the top-left corner in model units.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the size in model units.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the body text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the body text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Returns the current bounding box.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.size)
    }

    /// Returns the center of the node.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Returns the anchor point on the given side; the points an arrow
    /// snaps to.
    ///
    /// # Examples
    ///
    /// ```
    /// # use logicmap_core::geometry::{Point, Side};
    /// # use logicmap_core::node::{Node, NodeKind};
    /// let node = Node::new(NodeKind::Question, Point::new(0.0, 0.0));
    /// assert_eq!(node.anchor(Side::Right), Point::new(150.0, 30.0));
    /// ```
    pub fn anchor(&self, side: Side) -> Point {
        self.bounds().anchor(side)
    }

    /// Translates the node by a delta in model units.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.position = self.position.translate(dx, dy);
    }

    /// Resizes the node, keeping the top-left corner fixed.
    ///
    /// The requested size is clamped to [`MIN_NODE_SIZE`]; there is no
    /// failure mode.
    pub fn resize(&mut self, size: Size) {
        self.size = size.clamp_min(MIN_NODE_SIZE);
    }

    /// Borrows the ordered reference list.
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Appends a reference, preserving insertion order.
    pub fn add_reference(&mut self, reference: Reference) {
        self.references.push(reference);
    }

    /// Finds a reference by id for in-place update.
    pub fn reference_mut(&mut self, id: Id) -> Option<&mut Reference> {
        self.references.iter_mut().find(|r| r.id() == id)
    }

    /// Removes the reference with the given id. Returns true if one was removed.
    pub fn remove_reference(&mut self, id: Id) -> bool {
        let before = self.references.len();
        self.references.retain(|r| r.id() != id);
        self.references.len() != before
    }
}
