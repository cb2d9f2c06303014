//! SVG rendering for maps.
//!
//! Produces a static picture of the map: connection lines with arrowheads
//! underneath, node rectangles with their themed fill on top, the node
//! kind as a small bold label and the note text below it. The viewBox is
//! fitted to the content with a padding margin.

use log::info;

use svg::Document;
use svg::node::element::{Definitions, Group, Line, Marker, Polygon, Rectangle, Text};

use logicmap_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
    node::Node,
    theme::Theme,
};

use crate::store::LogicMap;

const ARROW_MARKER_ID: &str = "arrowhead";
const KIND_LABEL_FONT_SIZE: f32 = 11.0;
const TEXT_FONT_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 14.0;

/// Renders a [`LogicMap`] to an SVG string.
#[derive(Debug)]
pub struct SvgExporter {
    theme: Theme,
    background: Option<Color>,
    padding: f32,
}

impl Default for SvgExporter {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl SvgExporter {
    /// Creates an exporter with the given theme and a 40-unit margin.
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            background: None,
            padding: 40.0,
        }
    }

    /// Sets a background fill; by default the canvas is transparent.
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    /// Sets the margin around the content, in model units.
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Renders the map to an SVG document string.
    pub fn export(&self, map: &LogicMap) -> String {
        let bounds = map
            .bounds()
            .unwrap_or_else(|| Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(0.0, 0.0)))
            .expand(self.padding);

        let mut document = Document::new()
            .set(
                "viewBox",
                (bounds.min_x(), bounds.min_y(), bounds.width(), bounds.height()),
            )
            .add(self.arrow_definitions());

        if let Some(background) = &self.background {
            document = document.add(
                Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", bounds.width())
                    .set("height", bounds.height())
                    .set("fill", background),
            );
        }

        // lines first so nodes paint over them
        for connection in map.connections() {
            // connections always join live nodes
            if let Ok((start, end)) = map.route_connection(*connection) {
                document = document.add(self.render_connection(start, end));
            }
        }

        for node in map.nodes() {
            document = document.add(self.render_node(node));
        }

        info!(
            nodes = map.node_count(),
            connections = map.connections().len();
            "Map rendered to SVG"
        );
        document.to_string()
    }

    fn arrow_definitions(&self) -> Definitions {
        let stroke = self.theme.connection_stroke(false);
        let marker = Marker::new()
            .set("id", ARROW_MARKER_ID)
            .set("markerWidth", 10)
            .set("markerHeight", 7)
            .set("refX", 10)
            .set("refY", 3.5)
            .set("orient", "auto")
            .set("markerUnits", "userSpaceOnUse")
            .add(
                Polygon::new()
                    .set("points", "0 0, 10 3.5, 0 7")
                    .set("fill", &stroke.color()),
            );
        Definitions::new().add(marker)
    }

    fn render_connection(&self, start: Point, end: Point) -> Line {
        let stroke = self.theme.connection_stroke(false);
        Line::new()
            .set("x1", start.x())
            .set("y1", start.y())
            .set("x2", end.x())
            .set("y2", end.y())
            .set("stroke", &stroke.color())
            .set("stroke-width", stroke.width())
            .set("marker-end", format!("url(#{ARROW_MARKER_ID})"))
    }

    fn render_node(&self, node: &Node) -> Group {
        let bounds = node.bounds();
        let outline = self.theme.node_outline(false);

        let mut group = Group::new().add(
            Rectangle::new()
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("fill", &self.theme.fill(node.kind()))
                .set("stroke", &outline.color())
                .set("stroke-width", outline.width()),
        );

        let center_x = bounds.center().x();
        group = group.add(
            Text::new(node.kind().to_string())
                .set("x", center_x)
                .set("y", bounds.min_y() + LINE_HEIGHT)
                .set("text-anchor", "middle")
                .set("font-size", KIND_LABEL_FONT_SIZE)
                .set("font-weight", "bold"),
        );

        let mut y = bounds.min_y() + 2.0 * LINE_HEIGHT;
        for line in node.text().lines() {
            if y > bounds.max_y() {
                break;
            }
            group = group.add(
                Text::new(line)
                    .set("x", center_x)
                    .set("y", y)
                    .set("text-anchor", "middle")
                    .set("font-size", TEXT_FONT_SIZE),
            );
            y += LINE_HEIGHT;
        }

        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use logicmap_core::{identifier::Id, node::NodeKind};

    fn sample_map() -> LogicMap {
        let mut map = LogicMap::with_project(Id::new("p"));
        let a = map.add_node(NodeKind::Question, Point::new(0.0, 0.0));
        let b = map.add_node(NodeKind::Solution, Point::new(400.0, 0.0));
        map.set_node_text(a, "Why?").expect("set text");
        map.set_node_text(b, "Because").expect("set text");
        map.connect(a, b).expect("connect");
        map
    }

    #[test]
    fn test_export_contains_nodes_and_connection() {
        let rendered = SvgExporter::default().export(&sample_map());

        assert_eq!(rendered.matches("<rect").count(), 2);
        assert_eq!(rendered.matches("<line").count(), 1);
        assert!(rendered.contains("Why?"));
        assert!(rendered.contains("Because"));
        assert!(rendered.contains("marker-end"));
    }

    #[test]
    fn test_node_fills_follow_the_theme() {
        let rendered = SvgExporter::default().export(&sample_map());
        let theme = Theme::default();
        assert!(rendered.contains(&theme.fill(NodeKind::Question).to_string()));
        assert!(rendered.contains(&theme.fill(NodeKind::Solution).to_string()));
    }

    #[test]
    fn test_background_is_opt_in() {
        let map = sample_map();
        let plain = SvgExporter::default().export(&map);
        assert_eq!(plain.matches("<rect").count(), 2);

        let white = Color::new("white").expect("valid color");
        let with_background = SvgExporter::default()
            .with_background(Some(white))
            .export(&map);
        assert_eq!(with_background.matches("<rect").count(), 3);
    }

    #[test]
    fn test_empty_map_renders_without_content() {
        let rendered = SvgExporter::default().export(&LogicMap::new());
        assert!(rendered.contains("viewBox"));
        assert_eq!(rendered.matches("<rect").count(), 0);
    }

    #[test]
    fn test_viewbox_includes_padding() {
        let rendered = SvgExporter::new(Theme::default())
            .with_padding(40.0)
            .export(&sample_map());
        // content spans 0..550 x 0..60; padded viewBox starts at -40
        assert!(rendered.contains("viewBox=\"-40 -40 630 140\""));
    }
}
