//! LogicMap - research note diagrams with typed nodes and directed
//! connections.
//!
//! A map holds rectangular nodes of five kinds (Question, Problem,
//! Solution, Explanation, Conclusion) on an unbounded canvas, connected by
//! directed arrows routed between facing edge midpoints. Nodes carry free
//! text and bibliographic references, which may point at attached files.
//! Maps persist as XML and export to SVG or a plain-text bibliography.
//!
//! # Examples
//!
//! ```rust
//! use logicmap::{LogicMap, export::svg::SvgExporter};
//! use logicmap::core::{geometry::Point, node::NodeKind};
//!
//! let mut map = LogicMap::new();
//! let question = map.add_node(NodeKind::Question, Point::new(0.0, 0.0));
//! let answer = map.add_node(NodeKind::Solution, Point::new(300.0, 0.0));
//! map.connect(question, answer).expect("distinct live nodes");
//!
//! let xml = map.to_xml().expect("serialize");
//! let svg = SvgExporter::default().export(&map);
//! ```

pub mod attachments;
pub mod bibliography;
pub mod config;
pub mod export;
pub mod session;
pub mod store;

mod error;

pub use logicmap_core as core;

pub use error::LogicMapError;
pub use store::LogicMap;
