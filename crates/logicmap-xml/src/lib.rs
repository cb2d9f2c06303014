//! Document format reader and writer for logicmap diagrams.
//!
//! The wire format is a single XML tree: a `LogicMap` root carrying the
//! project identifier, `Node` elements with geometry attributes, a `Text`
//! body and a `References` container, and a `Connections` container of
//! `Link` elements naming (parent, child) id pairs:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <LogicMap project="...">
//!   <Node id="a" type="Question" x="0" y="0" width="150" height="60">
//!     <Text>Why?</Text>
//!     <References>
//!       <Ref id="r"><Title/><Link>doi:1</Link><Desc/></Ref>
//!     </References>
//!   </Node>
//!   <Connections>
//!     <Link parent="a" child="b"/>
//!   </Connections>
//! </LogicMap>
//! ```
//!
//! Reading is defensive about optional fields for compatibility with older
//! documents: missing `width`/`height` fall back to the default node size,
//! a missing `File` element means no attachment, and a missing `project`
//! attribute mints a fresh id. Structural problems (no root, missing
//! required attributes, unparseable numbers, unknown node types) are
//! errors. Connections are returned unresolved: deciding what to do with a
//! `Link` whose endpoint does not exist is the store's job, not the
//! codec's.

mod error;

pub use error::XmlError;

use std::str::FromStr;

use log::debug;
use quick_xml::{
    Reader, Writer,
    escape::unescape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use logicmap_core::{
    connection::Connection,
    geometry::{Point, Size},
    identifier::Id,
    node::{DEFAULT_NODE_SIZE, Node, NodeKind},
    reference::Reference,
};

/// The parsed content of one document: project id, nodes, and raw links.
///
/// Links are (parent, child) pairs exactly as stored; endpoint resolution
/// happens in the store.
#[derive(Debug, Clone)]
pub struct DocumentData {
    project: Id,
    nodes: Vec<Node>,
    connections: Vec<Connection>,
}

impl DocumentData {
    /// Bundles a document for writing.
    pub fn new(project: Id, nodes: Vec<Node>, connections: Vec<Connection>) -> Self {
        Self {
            project,
            nodes,
            connections,
        }
    }

    /// Returns the project identifier.
    pub fn project(&self) -> Id {
        self.project
    }

    /// Borrows the nodes in document order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Borrows the raw connection pairs in document order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Decomposes into (project, nodes, connections).
    pub fn into_parts(self) -> (Id, Vec<Node>, Vec<Connection>) {
        (self.project, self.nodes, self.connections)
    }
}

// =============================================================================
// Writing
// =============================================================================

/// Serializes a document to an XML string.
///
/// # Errors
///
/// Only I/O errors from the underlying writer, which cannot occur when
/// writing to memory; the signature matches [`read`] for symmetry at call
/// sites.
pub fn write(document: &DocumentData) -> Result<String, XmlError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut root = BytesStart::new("LogicMap");
    root.push_attribute(("project", document.project().to_string().as_str()));
    writer.write_event(Event::Start(root))?;

    for node in document.nodes() {
        write_node(&mut writer, node)?;
    }

    writer.write_event(Event::Start(BytesStart::new("Connections")))?;
    for connection in document.connections() {
        let mut link = BytesStart::new("Link");
        link.push_attribute(("parent", connection.parent().to_string().as_str()));
        link.push_attribute(("child", connection.child().to_string().as_str()));
        writer.write_event(Event::Empty(link))?;
    }
    writer.write_event(Event::End(BytesEnd::new("Connections")))?;

    writer.write_event(Event::End(BytesEnd::new("LogicMap")))?;

    let bytes = writer.into_inner();
    Ok(String::from_utf8(bytes).expect("writer output is valid UTF-8"))
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<(), XmlError> {
    let mut element = BytesStart::new("Node");
    element.push_attribute(("id", node.id().to_string().as_str()));
    element.push_attribute(("type", node.kind().to_string().as_str()));
    element.push_attribute(("x", node.position().x().to_string().as_str()));
    element.push_attribute(("y", node.position().y().to_string().as_str()));
    element.push_attribute(("width", node.size().width().to_string().as_str()));
    element.push_attribute(("height", node.size().height().to_string().as_str()));
    writer.write_event(Event::Start(element))?;

    write_text_element(writer, "Text", node.text())?;

    writer.write_event(Event::Start(BytesStart::new("References")))?;
    for reference in node.references() {
        let mut element = BytesStart::new("Ref");
        element.push_attribute(("id", reference.id().to_string().as_str()));
        writer.write_event(Event::Start(element))?;

        write_text_element(writer, "Title", reference.title())?;
        write_text_element(writer, "Link", reference.link())?;
        if let Some(file) = reference.file() {
            write_text_element(writer, "File", file)?;
        }
        write_text_element(writer, "Desc", reference.note())?;

        writer.write_event(Event::End(BytesEnd::new("Ref")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("References")))?;

    writer.write_event(Event::End(BytesEnd::new("Node")))?;
    Ok(())
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), XmlError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

// =============================================================================
// Reading
// =============================================================================

/// Parses a document from an XML string.
///
/// # Errors
///
/// Returns [`XmlError`] if the document is not well-formed XML, has no
/// `LogicMap` root, or a `Node`/`Link` lacks a required attribute or
/// carries an unparseable value.
pub fn read(xml: &str) -> Result<DocumentData, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut project = None;
    let mut saw_root = false;
    let mut nodes = Vec::new();
    let mut connections = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"LogicMap" => {
                    saw_root = true;
                    project = attr_opt(&e, "project")?.map(|value| Id::new(&value));
                }
                b"Node" => nodes.push(read_node(&mut reader, &e)?),
                b"Connections" => read_connections(&mut reader, &mut connections)?,
                _ => {
                    // Unknown top-level element: skip its whole subtree
                    reader.read_to_end(e.name())?;
                }
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"LogicMap" => {
                    saw_root = true;
                    project = attr_opt(&e, "project")?.map(|value| Id::new(&value));
                }
                b"Node" => nodes.push(node_from_attributes(&e)?),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(XmlError::MissingRoot);
    }

    // Older documents may predate the project attribute
    let project = project.unwrap_or_else(|| {
        debug!("document has no project id, minting a fresh one");
        Id::generate()
    });

    Ok(DocumentData::new(project, nodes, connections))
}

fn node_from_attributes(start: &BytesStart<'_>) -> Result<Node, XmlError> {
    let id = Id::new(&attr_req(start, "Node", "id")?);
    let kind_value = attr_req(start, "Node", "type")?;
    let kind = NodeKind::from_str(&kind_value).map_err(|message| XmlError::InvalidValue {
        element: "Node",
        attribute: "type",
        message,
    })?;
    let x = attr_f32(start, "Node", "x")?;
    let y = attr_f32(start, "Node", "y")?;

    // width/height were added later; older documents fall back to defaults
    let width = attr_f32_opt(start, "Node", "width")?.unwrap_or(DEFAULT_NODE_SIZE.width());
    let height = attr_f32_opt(start, "Node", "height")?.unwrap_or(DEFAULT_NODE_SIZE.height());

    Ok(Node::with_id(id, kind, Point::new(x, y))
        .with_size(Size::new(width, height))
        .with_text(""))
}

fn read_node(reader: &mut Reader<&[u8]>, start: &BytesStart<'_>) -> Result<Node, XmlError> {
    let mut node = node_from_attributes(start)?;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"Text" => node.set_text(read_text_content(reader, &e)?),
                b"References" => read_references(reader, &mut node)?,
                _ => {
                    reader.read_to_end(e.name())?;
                }
            },
            Event::End(e) if e.name().as_ref() == b"Node" => break,
            Event::Eof => return Err(XmlError::UnexpectedEof { element: "Node" }),
            _ => {}
        }
    }

    Ok(node)
}

fn read_references(reader: &mut Reader<&[u8]>, node: &mut Node) -> Result<(), XmlError> {
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"Ref" => {
                node.add_reference(read_reference(reader, &e)?);
            }
            Event::Empty(e) if e.name().as_ref() == b"Ref" => {
                let id = ref_id(&e)?;
                node.add_reference(Reference::with_id(id, "", "", None, ""));
            }
            Event::Start(e) => {
                reader.read_to_end(e.name())?;
            }
            Event::End(e) if e.name().as_ref() == b"References" => break,
            Event::Eof => {
                return Err(XmlError::UnexpectedEof {
                    element: "References",
                });
            }
            _ => {}
        }
    }
    Ok(())
}

fn read_reference(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<Reference, XmlError> {
    let id = ref_id(start)?;
    let mut title = String::new();
    let mut link = String::new();
    let mut file = None;
    let mut note = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let text = read_text_content(reader, &e)?;
                match e.name().as_ref() {
                    b"Title" => title = text,
                    b"Link" => link = text,
                    b"File" if !text.is_empty() => file = Some(text),
                    b"Desc" => note = text,
                    _ => {}
                }
            }
            Event::End(e) if e.name().as_ref() == b"Ref" => break,
            Event::Eof => return Err(XmlError::UnexpectedEof { element: "Ref" }),
            _ => {}
        }
    }

    Ok(Reference::with_id(id, title, link, file, note))
}

fn read_connections(
    reader: &mut Reader<&[u8]>,
    connections: &mut Vec<Connection>,
) -> Result<(), XmlError> {
    loop {
        match reader.read_event()? {
            Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"Link" => {
                let parent = Id::new(&attr_req(&e, "Link", "parent")?);
                let child = Id::new(&attr_req(&e, "Link", "child")?);
                connections.push(Connection::new(parent, child));
            }
            Event::Start(e) => {
                reader.read_to_end(e.name())?;
            }
            Event::End(e) if e.name().as_ref() == b"Connections" => break,
            Event::Eof => {
                return Err(XmlError::UnexpectedEof {
                    element: "Connections",
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Reads the text content of the element opened by `start` and resolves
/// XML entities, so that escaped text loads back as what was saved.
fn read_text_content(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<String, XmlError> {
    let raw = reader.read_text(start.name())?;
    let text = unescape(&raw).map_err(quick_xml::Error::from)?;
    Ok(text.into_owned())
}

// =============================================================================
// Attribute helpers
// =============================================================================

fn ref_id(element: &BytesStart<'_>) -> Result<Id, XmlError> {
    // Older documents may omit reference ids; mint one so the entry can
    // still be addressed for update/removal.
    Ok(attr_opt(element, "id")?
        .map(|value| Id::new(&value))
        .unwrap_or_else(Id::generate))
}

fn attr_opt(
    element: &BytesStart<'_>,
    attribute: &'static str,
) -> Result<Option<String>, XmlError> {
    match element.try_get_attribute(attribute)? {
        Some(attr) => {
            let value = attr.unescape_value()?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}

fn attr_req(
    element: &BytesStart<'_>,
    element_name: &'static str,
    attribute: &'static str,
) -> Result<String, XmlError> {
    attr_opt(element, attribute)?.ok_or(XmlError::MissingAttribute {
        element: element_name,
        attribute,
    })
}

fn attr_f32(
    element: &BytesStart<'_>,
    element_name: &'static str,
    attribute: &'static str,
) -> Result<f32, XmlError> {
    let value = attr_req(element, element_name, attribute)?;
    parse_f32(&value, element_name, attribute)
}

fn attr_f32_opt(
    element: &BytesStart<'_>,
    element_name: &'static str,
    attribute: &'static str,
) -> Result<Option<f32>, XmlError> {
    attr_opt(element, attribute)?
        .map(|value| parse_f32(&value, element_name, attribute))
        .transpose()
}

fn parse_f32(
    value: &str,
    element_name: &'static str,
    attribute: &'static str,
) -> Result<f32, XmlError> {
    value.parse::<f32>().map_err(|err| XmlError::InvalidValue {
        element: element_name,
        attribute,
        message: format!("`{value}`: {err}"),
    })
}
