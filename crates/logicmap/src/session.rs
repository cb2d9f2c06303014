//! Editing session: viewport transforms, selection, and interaction modes.
//!
//! # Overview
//!
//! - [`Viewport`] - Zoom and pan state with screen/model transforms.
//! - [`Selection`] - What is currently selected, if anything.
//! - [`Mode`] - The gesture in progress between press and release.
//! - [`Session`] - Ties a [`LogicMap`] to viewport and interaction state.
//!
//! A session is driven by pointer events in screen coordinates: [`press`],
//! [`drag`], [`release`]. The session converts to model coordinates, so
//! hit-testing and node movement behave the same at every zoom level.
//!
//! [`press`]: Session::press
//! [`drag`]: Session::drag
//! [`release`]: Session::release

use log::debug;

use logicmap_core::{
    connection::Connection,
    geometry::{Point, Size},
    identifier::Id,
    node::NodeKind,
};

use crate::config::{AppConfig, CanvasConfig};
use crate::error::LogicMapError;
use crate::store::LogicMap;

/// Screen-pixel distance within which a click counts as hitting a
/// connection line.
const CONNECTION_HIT_TOLERANCE: f32 = 10.0;

/// The gesture currently in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Dragging a node.
    Moving(Id),
    /// Dragging a node's resize handle.
    Resizing(Id),
    /// Dragging the canvas itself.
    Panning,
    /// Dragging a connection out of a parent node; release over another
    /// node completes it.
    ConnectingFrom(Id),
}

/// The current selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Node(Id),
    Connection(Connection),
}

impl Selection {
    /// Returns the selected node id, if a node is selected.
    pub fn node(self) -> Option<Id> {
        match self {
            Selection::Node(id) => Some(id),
            _ => None,
        }
    }
}

/// Zoom and pan state with screen/model coordinate transforms.
///
/// A model point `m` appears on screen at `m * zoom + offset`. Zooming
/// about a focus point adjusts the offset so the model point under the
/// focus stays put.
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f32,
    offset: Point,
    zoom_min: f32,
    zoom_max: f32,
    zoom_step: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&CanvasConfig::default())
    }
}

impl Viewport {
    /// Creates a viewport at zoom 1.0 with no pan, using the configured
    /// zoom limits.
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            zoom: 1.0,
            offset: Point::new(0.0, 0.0),
            zoom_min: config.zoom_min(),
            zoom_max: config.zoom_max(),
            zoom_step: config.zoom_step(),
        }
    }

    /// Returns the current zoom factor.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Returns the current pan offset in screen units.
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Converts a screen point to model coordinates.
    pub fn screen_to_model(&self, point: Point) -> Point {
        point.sub_point(self.offset).scale(1.0 / self.zoom)
    }

    /// Converts a model point to screen coordinates.
    pub fn model_to_screen(&self, point: Point) -> Point {
        self.offset.translate(point.x() * self.zoom, point.y() * self.zoom)
    }

    /// Zooms in one step about a screen-space focus point.
    pub fn zoom_in(&mut self, focus: Point) {
        self.zoom_about(self.zoom * self.zoom_step, focus);
    }

    /// Zooms out one step about a screen-space focus point.
    pub fn zoom_out(&mut self, focus: Point) {
        self.zoom_about(self.zoom / self.zoom_step, focus);
    }

    /// Sets the zoom factor, clamped to the configured limits, keeping
    /// the model point under `focus` fixed on screen.
    pub fn zoom_about(&mut self, zoom: f32, focus: Point) {
        let anchored = self.screen_to_model(focus);
        self.zoom = zoom.clamp(self.zoom_min, self.zoom_max);
        self.offset = focus.translate(
            -anchored.x() * self.zoom,
            -anchored.y() * self.zoom,
        );
    }

    /// Pans by a screen-space delta.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.offset = self.offset.translate(dx, dy);
    }
}

/// An interactive editing session over a [`LogicMap`].
#[derive(Debug)]
pub struct Session {
    map: LogicMap,
    viewport: Viewport,
    mode: Mode,
    selection: Selection,
    default_node_size: Size,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(LogicMap::new(), &AppConfig::default())
    }
}

impl Session {
    /// Creates a session over an existing map.
    pub fn new(map: LogicMap, config: &AppConfig) -> Self {
        Self {
            map,
            viewport: Viewport::new(config.canvas()),
            mode: Mode::Idle,
            selection: Selection::None,
            default_node_size: config.node().default_size(),
        }
    }

    /// Borrows the underlying map.
    pub fn map(&self) -> &LogicMap {
        &self.map
    }

    /// Mutably borrows the underlying map, for edits that are not
    /// pointer gestures (text, kinds, references).
    pub fn map_mut(&mut self) -> &mut LogicMap {
        &mut self.map
    }

    /// Borrows the viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutably borrows the viewport, for zoom and scroll input.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Returns the gesture in progress.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    // -------------------------------------------------------------------
    // Pointer gestures
    // -------------------------------------------------------------------

    /// Handles a pointer press at a screen point.
    ///
    /// While a connection gesture is pending, pressing a node completes it
    /// and returns the new connection; pressing empty space cancels.
    /// Otherwise the press selects and starts moving the topmost node
    /// under the pointer, or selects the nearest connection line, or
    /// clears the selection.
    ///
    /// # Errors
    ///
    /// Returns the store's error if a completed connection is invalid
    /// (duplicate pair or missing endpoint).
    pub fn press(&mut self, screen: Point) -> Result<Option<Connection>, LogicMapError> {
        let point = self.viewport.screen_to_model(screen);

        if let Mode::ConnectingFrom(parent) = self.mode {
            self.mode = Mode::Idle;
            return self.complete_connection(parent, point);
        }

        if let Some(id) = self.map.node_at(point) {
            self.selection = Selection::Node(id);
            self.mode = Mode::Moving(id);
            debug!(node:% = id; "Press selected node");
            return Ok(None);
        }

        let tolerance = CONNECTION_HIT_TOLERANCE / self.viewport.zoom();
        if let Some(connection) = self.map.connection_at(point, tolerance) {
            self.selection = Selection::Connection(connection);
            self.mode = Mode::Idle;
            debug!(connection:% = connection; "Press selected connection");
            return Ok(None);
        }

        self.selection = Selection::None;
        self.mode = Mode::Idle;
        Ok(None)
    }

    fn complete_connection(
        &mut self,
        parent: Id,
        point: Point,
    ) -> Result<Option<Connection>, LogicMapError> {
        match self.map.node_at(point) {
            Some(child) if child != parent => {
                let connection = self.map.connect(parent, child)?;
                self.selection = Selection::Connection(connection);
                Ok(Some(connection))
            }
            _ => Ok(None),
        }
    }

    /// Starts resizing a node; subsequent drags grow or shrink it.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::UnknownNode`] if no node has this id.
    pub fn begin_resize(&mut self, id: Id) -> Result<(), LogicMapError> {
        if self.map.node(id).is_none() {
            return Err(LogicMapError::UnknownNode(id));
        }
        self.selection = Selection::Node(id);
        self.mode = Mode::Resizing(id);
        Ok(())
    }

    /// Starts dragging a connection out of a parent node.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::UnknownNode`] if no node has this id.
    pub fn begin_connect(&mut self, parent: Id) -> Result<(), LogicMapError> {
        if self.map.node(parent).is_none() {
            return Err(LogicMapError::UnknownNode(parent));
        }
        self.mode = Mode::ConnectingFrom(parent);
        Ok(())
    }

    /// Starts panning the canvas.
    pub fn begin_pan(&mut self) {
        self.mode = Mode::Panning;
    }

    /// Handles pointer movement by a screen-space delta while a gesture
    /// is in progress.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::UnknownNode`] if the node being moved or
    /// resized has disappeared from the map.
    pub fn drag(&mut self, dx: f32, dy: f32) -> Result<(), LogicMapError> {
        let zoom = self.viewport.zoom();
        match self.mode {
            Mode::Moving(id) => self.map.move_node(id, dx / zoom, dy / zoom),
            Mode::Resizing(id) => {
                let node = self
                    .map
                    .node(id)
                    .ok_or(LogicMapError::UnknownNode(id))?;
                let size = Size::new(
                    node.size().width() + dx / zoom,
                    node.size().height() + dy / zoom,
                );
                self.map.resize_node(id, size)
            }
            Mode::Panning => {
                self.viewport.pan_by(dx, dy);
                Ok(())
            }
            Mode::Idle | Mode::ConnectingFrom(_) => Ok(()),
        }
    }

    /// Handles a pointer release at a screen point, ending the gesture.
    ///
    /// Completing a connection gesture over another node creates the
    /// connection and returns it; releasing anywhere else cancels.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the connection is invalid (duplicate
    /// pair or missing endpoint).
    pub fn release(&mut self, screen: Point) -> Result<Option<Connection>, LogicMapError> {
        let mode = std::mem::replace(&mut self.mode, Mode::Idle);
        let Mode::ConnectingFrom(parent) = mode else {
            return Ok(None);
        };

        let point = self.viewport.screen_to_model(screen);
        self.complete_connection(parent, point)
    }

    // -------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------

    /// Creates a node of the given kind at a screen point, using the
    /// configured default size, and selects it.
    pub fn add_node_at(&mut self, kind: NodeKind, screen: Point) -> Id {
        let point = self.viewport.screen_to_model(screen);
        let id = self.map.add_node_sized(kind, point, self.default_node_size);
        self.selection = Selection::Node(id);
        id
    }

    /// Zooms by the given number of steps about a screen-space focus
    /// point; positive steps zoom in, negative out.
    pub fn zoom_by(&mut self, steps: i32, focus: Point) {
        for _ in 0..steps {
            self.viewport.zoom_in(focus);
        }
        for _ in steps..0 {
            self.viewport.zoom_out(focus);
        }
    }

    /// Deletes whatever is selected.
    ///
    /// Deleting a node also removes its connections; deleting a
    /// connection leaves its nodes alone. Does nothing when the selection
    /// is empty.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::UnknownNode`] if a selected node has
    /// disappeared from the map.
    pub fn delete_selection(&mut self) -> Result<(), LogicMapError> {
        match std::mem::take(&mut self.selection) {
            Selection::Node(id) => {
                self.map.remove_node(id)?;
            }
            Selection::Connection(connection) => {
                self.map.disconnect(connection.parent(), connection.child());
            }
            Selection::None => {}
        }
        self.mode = Mode::Idle;
        Ok(())
    }
}
