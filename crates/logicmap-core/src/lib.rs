//! Logicmap Core Types and Definitions
//!
//! This crate provides the foundational types for logic-map diagrams:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types and edge anchors ([`geometry`] module)
//! - **Nodes**: Typed rectangular nodes with references ([`node`] module)
//! - **Connections**: Directed arrows with smart anchoring ([`connection`] module)
//! - **Theme**: The visual palette shared by renderers ([`theme`] module)

pub mod color;
pub mod connection;
pub mod geometry;
pub mod identifier;
pub mod node;
pub mod reference;
pub mod theme;
