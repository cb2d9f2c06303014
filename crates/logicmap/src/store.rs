//! The map store: nodes, connections, and their editing operations.
//!
//! [`LogicMap`] owns every node and connection of one document and enforces
//! the structural rules: connections only ever join two live nodes, a node
//! never connects to itself, and a (parent, child) pair appears at most
//! once. Removing a node removes exactly the connections that touch it.
//!
//! Persistence goes through [`logicmap_xml`]: loading parses the whole
//! document into a fresh map before anything is replaced, so a broken file
//! never leaves a half-loaded map behind.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, info, warn};

use logicmap_core::{
    connection::{self, Connection},
    geometry::{Bounds, Point, Size},
    identifier::Id,
    node::{Node, NodeKind},
    reference::Reference,
};
use logicmap_xml::DocumentData;

use crate::error::LogicMapError;

/// An editable map of typed nodes and directed connections.
///
/// Nodes keep their insertion order, which doubles as the stacking order:
/// later nodes sit on top for hit-testing.
#[derive(Debug, Clone)]
pub struct LogicMap {
    project: Id,
    nodes: IndexMap<Id, Node>,
    connections: Vec<Connection>,
}

impl Default for LogicMap {
    fn default() -> Self {
        Self::new()
    }
}

impl LogicMap {
    /// Creates an empty map with a fresh project id.
    pub fn new() -> Self {
        Self::with_project(Id::generate())
    }

    /// Creates an empty map with the given project id.
    pub fn with_project(project: Id) -> Self {
        Self {
            project,
            nodes: IndexMap::new(),
            connections: Vec::new(),
        }
    }

    /// Returns the project identifier.
    pub fn project(&self) -> Id {
        self.project
    }

    /// Returns the number of nodes in the map.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the map holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node by id.
    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Iterates over nodes in stacking order, bottom first.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Returns all connections in creation order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Looks up a node for direct mutation.
    ///
    /// `Node` enforces its own geometry rules, so handing out the mutable
    /// reference cannot break the map's invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::UnknownNode`] if no node has this id.
    pub fn node_mut(&mut self, id: Id) -> Result<&mut Node, LogicMapError> {
        self.nodes.get_mut(&id).ok_or(LogicMapError::UnknownNode(id))
    }

    // -------------------------------------------------------------------
    // Node editing
    // -------------------------------------------------------------------

    /// Creates a new node of the given kind at the given position and
    /// returns its id.
    pub fn add_node(&mut self, kind: NodeKind, position: Point) -> Id {
        let node = Node::new(kind, position);
        let id = node.id();
        debug!(node:% = id, kind:% = kind; "Node added");
        self.nodes.insert(id, node);
        id
    }

    /// Creates a new node with an explicit size instead of the default.
    pub fn add_node_sized(&mut self, kind: NodeKind, position: Point, size: Size) -> Id {
        let node = Node::new(kind, position).with_size(size);
        let id = node.id();
        debug!(node:% = id, kind:% = kind; "Node added");
        self.nodes.insert(id, node);
        id
    }

    /// Inserts a fully formed node, replacing any node with the same id.
    pub fn insert_node(&mut self, node: Node) {
        self.nodes.insert(node.id(), node);
    }

    /// Removes a node and every connection touching it.
    ///
    /// Returns the removed connections so callers can offer undo or report
    /// what was dropped.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::UnknownNode`] if no node has this id.
    pub fn remove_node(&mut self, id: Id) -> Result<Vec<Connection>, LogicMapError> {
        if self.nodes.shift_remove(&id).is_none() {
            return Err(LogicMapError::UnknownNode(id));
        }

        let mut removed = Vec::new();
        self.connections.retain(|connection| {
            if connection.touches(id) {
                removed.push(*connection);
                false
            } else {
                true
            }
        });

        debug!(node:% = id, connections_removed = removed.len(); "Node removed");
        Ok(removed)
    }

    /// Moves a node by a model-space offset.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::UnknownNode`] if no node has this id.
    pub fn move_node(&mut self, id: Id, dx: f32, dy: f32) -> Result<(), LogicMapError> {
        self.node_mut(id)?.move_by(dx, dy);
        Ok(())
    }

    /// Resizes a node, clamping to the minimum node size.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::UnknownNode`] if no node has this id.
    pub fn resize_node(&mut self, id: Id, size: Size) -> Result<(), LogicMapError> {
        self.node_mut(id)?.resize(size);
        Ok(())
    }

    /// Replaces a node's text.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::UnknownNode`] if no node has this id.
    pub fn set_node_text(
        &mut self,
        id: Id,
        text: impl Into<String>,
    ) -> Result<(), LogicMapError> {
        self.node_mut(id)?.set_text(text);
        Ok(())
    }

    /// Changes a node's kind, keeping its geometry, text, and references.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::UnknownNode`] if no node has this id.
    pub fn set_node_kind(&mut self, id: Id, kind: NodeKind) -> Result<(), LogicMapError> {
        self.node_mut(id)?.set_kind(kind);
        Ok(())
    }

    // -------------------------------------------------------------------
    // Connections
    // -------------------------------------------------------------------

    /// Connects a parent node to a child node.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::UnknownNode`] if either endpoint is absent,
    /// [`LogicMapError::SelfConnection`] if both ids are the same, and
    /// [`LogicMapError::DuplicateConnection`] if this (parent, child) pair
    /// already exists. The reverse direction is a different connection and
    /// is allowed.
    pub fn connect(&mut self, parent: Id, child: Id) -> Result<Connection, LogicMapError> {
        if parent == child {
            return Err(LogicMapError::SelfConnection(parent));
        }
        if !self.nodes.contains_key(&parent) {
            return Err(LogicMapError::UnknownNode(parent));
        }
        if !self.nodes.contains_key(&child) {
            return Err(LogicMapError::UnknownNode(child));
        }

        let connection = Connection::new(parent, child);
        if self.connections.contains(&connection) {
            return Err(LogicMapError::DuplicateConnection { parent, child });
        }

        debug!(parent:% = parent, child:% = child; "Connection added");
        self.connections.push(connection);
        Ok(connection)
    }

    /// Removes the connection from `parent` to `child`.
    ///
    /// Returns true if a connection was removed.
    pub fn disconnect(&mut self, parent: Id, child: Id) -> bool {
        let target = Connection::new(parent, child);
        let before = self.connections.len();
        self.connections.retain(|connection| *connection != target);
        self.connections.len() != before
    }

    /// Computes the endpoints of a connection between the facing edge
    /// midpoints of its nodes.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::UnknownNode`] if either endpoint is absent.
    pub fn route_connection(
        &self,
        connection: Connection,
    ) -> Result<(Point, Point), LogicMapError> {
        let parent = self
            .node(connection.parent())
            .ok_or(LogicMapError::UnknownNode(connection.parent()))?;
        let child = self
            .node(connection.child())
            .ok_or(LogicMapError::UnknownNode(connection.child()))?;
        Ok(connection::route(parent.bounds(), child.bounds()))
    }

    // -------------------------------------------------------------------
    // References
    // -------------------------------------------------------------------

    /// Attaches a bibliographic reference to a node and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::EmptyReferenceLink`] if the reference has
    /// no link, and [`LogicMapError::UnknownNode`] if no node has this id.
    pub fn add_reference(
        &mut self,
        node: Id,
        reference: Reference,
    ) -> Result<Id, LogicMapError> {
        if reference.link().is_empty() {
            return Err(LogicMapError::EmptyReferenceLink);
        }
        let id = reference.id();
        self.node_mut(node)?.add_reference(reference);
        Ok(id)
    }

    /// Replaces the fields of an existing reference, matched by its id.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::EmptyReferenceLink`] if the new link is
    /// empty, [`LogicMapError::UnknownNode`] if no node has this id, and
    /// [`LogicMapError::UnknownReference`] if the node has no reference
    /// with this id.
    pub fn update_reference(
        &mut self,
        node: Id,
        reference: Reference,
    ) -> Result<(), LogicMapError> {
        if reference.link().is_empty() {
            return Err(LogicMapError::EmptyReferenceLink);
        }
        let existing = self
            .node_mut(node)?
            .reference_mut(reference.id())
            .ok_or(LogicMapError::UnknownReference {
                node,
                reference: reference.id(),
            })?;
        *existing = reference;
        Ok(())
    }

    /// Detaches a reference from a node.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::UnknownNode`] if no node has this id, and
    /// [`LogicMapError::UnknownReference`] if the node has no reference
    /// with this id.
    pub fn remove_reference(&mut self, node: Id, reference: Id) -> Result<(), LogicMapError> {
        if self.node_mut(node)?.remove_reference(reference) {
            Ok(())
        } else {
            Err(LogicMapError::UnknownReference { node, reference })
        }
    }

    // -------------------------------------------------------------------
    // Hit testing and bounds
    // -------------------------------------------------------------------

    /// Finds the topmost node whose bounds contain a model-space point.
    pub fn node_at(&self, point: Point) -> Option<Id> {
        self.nodes
            .values()
            .rev()
            .find(|node| node.bounds().contains(point))
            .map(Node::id)
    }

    /// Finds the connection whose routed segment passes closest to a
    /// model-space point, within `tolerance` model units.
    ///
    /// Connections with a missing endpoint cannot occur by construction,
    /// so routing never fails here.
    pub fn connection_at(&self, point: Point, tolerance: f32) -> Option<Connection> {
        let mut best: Option<(Connection, f32)> = None;
        for connection in &self.connections {
            let Ok((start, end)) = self.route_connection(*connection) else {
                continue;
            };
            let distance = point.distance_to_segment(start, end);
            if distance <= tolerance && best.is_none_or(|(_, d)| distance < d) {
                best = Some((*connection, distance));
            }
        }
        best.map(|(connection, _)| connection)
    }

    /// Computes the bounding box of all nodes, or `None` for an empty map.
    pub fn bounds(&self) -> Option<Bounds> {
        self.nodes
            .values()
            .map(Node::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    // -------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------

    /// Builds a map from parsed document data.
    ///
    /// The codec passes links through unresolved; this is where they are
    /// checked. Links naming a missing node, linking a node to itself, or
    /// repeating an existing pair are dropped with a warning rather than
    /// failing the whole load.
    pub fn from_document(document: DocumentData) -> Self {
        let (project, nodes, links) = document.into_parts();
        let mut map = Self::with_project(project);

        for node in nodes {
            if map.nodes.contains_key(&node.id()) {
                warn!(node:% = node.id(); "Duplicate node id in document, keeping the later one");
            }
            map.insert_node(node);
        }

        for link in links {
            if let Err(err) = map.connect(link.parent(), link.child()) {
                warn!(err:% = err; "Dropping unusable link from document");
            }
        }

        map
    }

    /// Bundles this map as document data for writing.
    pub fn to_document(&self) -> DocumentData {
        DocumentData::new(
            self.project,
            self.nodes.values().cloned().collect(),
            self.connections.clone(),
        )
    }

    /// Parses a map from an XML string.
    ///
    /// All-or-nothing: the map is only produced once the whole document
    /// has parsed.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::Xml`] if the document cannot be parsed.
    pub fn from_xml(xml: &str) -> Result<Self, LogicMapError> {
        let document = logicmap_xml::read(xml)?;
        Ok(Self::from_document(document))
    }

    /// Serializes the map to an XML string.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::Xml`] if serialization fails.
    pub fn to_xml(&self) -> Result<String, LogicMapError> {
        Ok(logicmap_xml::write(&self.to_document())?)
    }

    /// Loads a map from an XML file.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::Io`] if the file cannot be read and
    /// [`LogicMapError::Xml`] if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LogicMapError> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path)?;
        let map = Self::from_xml(&xml)?;
        info!(
            path:% = path.display(),
            nodes = map.node_count(),
            connections = map.connections.len();
            "Map loaded"
        );
        Ok(map)
    }

    /// Saves the map to an XML file.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::Xml`] if serialization fails and
    /// [`LogicMapError::Io`] if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LogicMapError> {
        let path = path.as_ref();
        let xml = self.to_xml()?;
        fs::write(path, xml)?;
        info!(
            path:% = path.display(),
            nodes = self.node_count(),
            connections = self.connections.len();
            "Map saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_map() -> (LogicMap, Id, Id) {
        let mut map = LogicMap::new();
        let a = map.add_node(NodeKind::Question, Point::new(0.0, 0.0));
        let b = map.add_node(NodeKind::Solution, Point::new(400.0, 0.0));
        (map, a, b)
    }

    #[test]
    fn test_connect_rejects_self_connection() {
        let (mut map, a, _) = two_node_map();
        assert!(matches!(
            map.connect(a, a),
            Err(LogicMapError::SelfConnection(id)) if id == a
        ));
    }

    #[test]
    fn test_connect_rejects_duplicates_but_allows_reverse() {
        let (mut map, a, b) = two_node_map();
        map.connect(a, b).expect("first connection should succeed");
        assert!(matches!(
            map.connect(a, b),
            Err(LogicMapError::DuplicateConnection { .. })
        ));
        map.connect(b, a).expect("reverse direction is distinct");
        assert_eq!(map.connections().len(), 2);
    }

    #[test]
    fn test_connect_rejects_unknown_endpoint() {
        let (mut map, a, _) = two_node_map();
        let ghost = Id::new("ghost");
        assert!(matches!(
            map.connect(a, ghost),
            Err(LogicMapError::UnknownNode(id)) if id == ghost
        ));
    }

    #[test]
    fn test_remove_node_cascades_exactly() {
        let (mut map, a, b) = two_node_map();
        let c = map.add_node(NodeKind::Conclusion, Point::new(0.0, 300.0));
        map.connect(a, b).expect("connect");
        map.connect(b, c).expect("connect");
        map.connect(c, a).expect("connect");

        let removed = map.remove_node(b).expect("remove should succeed");
        assert_eq!(removed.len(), 2);
        assert!(removed.iter().all(|connection| connection.touches(b)));

        // the c -> a connection survives
        assert_eq!(map.connections(), &[Connection::new(c, a)]);
    }

    #[test]
    fn test_remove_unknown_node_is_an_error() {
        let mut map = LogicMap::new();
        assert!(matches!(
            map.remove_node(Id::new("nope")),
            Err(LogicMapError::UnknownNode(_))
        ));
    }

    #[test]
    fn test_node_at_prefers_topmost() {
        let mut map = LogicMap::new();
        let below = map.add_node(NodeKind::Question, Point::new(0.0, 0.0));
        let above = map.add_node(NodeKind::Problem, Point::new(20.0, 20.0));

        // overlap region contains both; the later node wins
        assert_eq!(map.node_at(Point::new(40.0, 30.0)), Some(above));
        // only the first node covers its own top-left corner
        assert_eq!(map.node_at(Point::new(5.0, 5.0)), Some(below));
        assert_eq!(map.node_at(Point::new(-50.0, -50.0)), None);
    }

    #[test]
    fn test_connection_at_picks_nearest_within_tolerance() {
        let (mut map, a, b) = two_node_map();
        let connection = map.connect(a, b).expect("connect");

        // both nodes are 150x60 at y=0, so the route runs along y=30
        assert_eq!(map.connection_at(Point::new(275.0, 33.0), 10.0), Some(connection));
        assert_eq!(map.connection_at(Point::new(275.0, 80.0), 10.0), None);
    }

    #[test]
    fn test_reference_requires_link() {
        let (mut map, a, _) = two_node_map();
        let empty = Reference::new("");
        assert!(matches!(
            map.add_reference(a, empty),
            Err(LogicMapError::EmptyReferenceLink)
        ));

        let id = map
            .add_reference(a, Reference::new("doi:10.1000/demo"))
            .expect("valid reference");
        assert_eq!(map.node(a).expect("node").references().len(), 1);

        map.remove_reference(a, id).expect("remove");
        assert!(map.node(a).expect("node").references().is_empty());
    }

    #[test]
    fn test_update_reference_replaces_fields() {
        let (mut map, a, _) = two_node_map();
        let id = map
            .add_reference(a, Reference::new("doi:1"))
            .expect("add reference");

        let updated = Reference::with_id(id, "A Title", "doi:2", None, "note");
        map.update_reference(a, updated).expect("update");

        let reference = &map.node(a).expect("node").references()[0];
        assert_eq!(reference.title(), "A Title");
        assert_eq!(reference.link(), "doi:2");
    }

    #[test]
    fn test_from_document_drops_unusable_links() {
        let (map, a, b) = two_node_map();
        let mut document = map.to_document();
        let nodes = document.nodes().to_vec();
        document = DocumentData::new(
            document.project(),
            nodes,
            vec![
                Connection::new(a, b),
                Connection::new(a, b),            // duplicate
                Connection::new(a, a),            // self
                Connection::new(a, Id::new("x")), // dangling
            ],
        );

        let loaded = LogicMap::from_document(document);
        assert_eq!(loaded.connections(), &[Connection::new(a, b)]);
    }

    #[test]
    fn test_xml_roundtrip_preserves_everything() {
        let (mut map, a, b) = two_node_map();
        map.connect(a, b).expect("connect");
        map.set_node_text(a, "Why?").expect("set text");
        map.add_reference(b, Reference::new("doi:1"))
            .expect("add reference");

        let xml = map.to_xml().expect("serialize");
        let loaded = LogicMap::from_xml(&xml).expect("parse");

        assert_eq!(loaded.project(), map.project());
        assert_eq!(loaded.node_count(), 2);
        assert_eq!(loaded.node(a).expect("node a").text(), "Why?");
        assert_eq!(loaded.node(b).expect("node b").references().len(), 1);
        assert_eq!(loaded.connections(), map.connections());
    }

    #[test]
    fn test_bounds_merges_all_nodes() {
        let (map, _, _) = two_node_map();
        let bounds = map.bounds().expect("non-empty map");
        assert_eq!(bounds.min_point(), Point::new(0.0, 0.0));
        assert_eq!(bounds.max_point(), Point::new(550.0, 60.0));
        assert!(LogicMap::new().bounds().is_none());
    }
}
