//! Configuration types for logicmap editing and rendering.
//!
//! This module provides configuration structures that control how maps are
//! viewed and styled. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining canvas, node, and style settings.
//! - [`CanvasConfig`] - Zoom limits and zoom step for the viewport.
//! - [`NodeConfig`] - Default dimensions for new nodes.
//! - [`StyleConfig`] - Visual styling options such as background color.
//!
//! # Example
//!
//! ```
//! # use logicmap::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.canvas().zoom_min() < config.canvas().zoom_max());
//! ```

use serde::Deserialize;

use logicmap_core::{color::Color, geometry::Size, node::DEFAULT_NODE_SIZE};

/// Top-level application configuration combining canvas, node, and style
/// settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Canvas configuration section.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Node configuration section.
    #[serde(default)]
    node: NodeConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    pub fn new(canvas: CanvasConfig, node: NodeConfig, style: StyleConfig) -> Self {
        Self {
            canvas,
            node,
            style,
        }
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the node configuration.
    pub fn node(&self) -> &NodeConfig {
        &self.node
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Zoom limits and zoom step for the viewport.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Smallest allowed zoom factor.
    zoom_min: f32,

    /// Largest allowed zoom factor.
    zoom_max: f32,

    /// Multiplier applied per zoom-in step; zoom-out divides by it.
    zoom_step: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            zoom_min: 0.2,
            zoom_max: 3.0,
            zoom_step: 1.1,
        }
    }
}

impl CanvasConfig {
    /// Returns the smallest allowed zoom factor.
    pub fn zoom_min(&self) -> f32 {
        self.zoom_min
    }

    /// Returns the largest allowed zoom factor.
    pub fn zoom_max(&self) -> f32 {
        self.zoom_max
    }

    /// Returns the per-step zoom multiplier.
    pub fn zoom_step(&self) -> f32 {
        self.zoom_step
    }
}

/// Default dimensions for newly created nodes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Width of a new node, in model units.
    width: f32,

    /// Height of a new node, in model units.
    height: f32,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_NODE_SIZE.width(),
            height: DEFAULT_NODE_SIZE.height(),
        }
    }
}

impl NodeConfig {
    /// Returns the default size for new nodes.
    pub fn default_size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Visual styling configuration for rendered maps.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Default background [`Color`] for exports, as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
    }
}
