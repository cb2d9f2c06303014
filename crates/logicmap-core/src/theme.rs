//! The visual palette shared by renderers and host UIs.
//!
//! Fill colors per node kind, outline and arrow strokes in their default
//! and selected states, and the resize-handle color. Renderers ask the
//! theme rather than hard-coding colors so that a host application and the
//! SVG exporter stay visually consistent.

use crate::{color::Color, node::NodeKind};

/// A minimal stroke: color plus width.
///
/// Connections and node outlines only ever draw solid lines, so no dash or
/// cap styling is carried here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    color: Color,
    width: f32,
}

impl Stroke {
    /// Creates a stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }
}

/// The color palette and stroke weights for drawing a logic map.
#[derive(Debug, Clone)]
pub struct Theme {
    question_fill: Color,
    problem_fill: Color,
    solution_fill: Color,
    explanation_fill: Color,
    conclusion_fill: Color,
    selected_outline: Color,
    handle: Color,
    line_default: Color,
    line_selected: Color,
}

impl Theme {
    /// Returns the fill color for a node of the given kind.
    pub fn fill(&self, kind: NodeKind) -> Color {
        match kind {
            NodeKind::Question => self.question_fill,
            NodeKind::Problem => self.problem_fill,
            NodeKind::Solution => self.solution_fill,
            NodeKind::Explanation => self.explanation_fill,
            NodeKind::Conclusion => self.conclusion_fill,
        }
    }

    /// Outline stroke for a node; heavier and recolored while selected.
    pub fn node_outline(&self, selected: bool) -> Stroke {
        if selected {
            Stroke::new(self.selected_outline, 2.0)
        } else {
            Stroke::new(Color::default(), 1.0)
        }
    }

    /// Stroke for a connection arrow; thicker and red while selected.
    pub fn connection_stroke(&self, selected: bool) -> Stroke {
        if selected {
            Stroke::new(self.line_selected, 4.0)
        } else {
            Stroke::new(self.line_default, 2.0)
        }
    }

    /// The resize-grip color.
    pub fn handle(&self) -> Color {
        self.handle
    }
}

impl Default for Theme {
    fn default() -> Self {
        let color = |s: &str| Color::new(s).expect("theme colors are valid CSS colors");
        Self {
            question_fill: color("#ADD8E6"),
            problem_fill: color("#FFDAB9"),
            solution_fill: color("#90EE90"),
            explanation_fill: color("#D3D3D3"),
            conclusion_fill: color("#FFFACD"),
            selected_outline: color("#0078D7"),
            handle: color("#FF9500"),
            line_default: color("black"),
            line_selected: color("red"),
        }
    }
}
