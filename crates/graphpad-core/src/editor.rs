//! Editing state machine: turns pointer clicks into graph mutations.

use crate::graph::{Graph, GraphError, VertexId};
use crate::input::{ClickEvent, MouseButton};
use crate::pick::{EDGE_PICK_DISTANCE, VERTEX_PICK_RADIUS};
use kurbo::Point;
use log::debug;
use serde::{Deserialize, Serialize};

/// Editing modes. Add-edge carries its two-click phase so every
/// dispatch site matches exhaustively on the full state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorMode {
    #[default]
    AddVertex,
    AddEdge(EdgePhase),
    Delete,
}

/// Phase of the two-click edge creation sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgePhase {
    #[default]
    AwaitingFirst,
    /// The first vertex was picked; waiting for the second.
    AwaitingSecond(VertexId),
}

/// Mode-select commands coming from the surrounding UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeCommand {
    AddVertex,
    AddEdge,
    Delete,
}

/// The editing state machine. UI text inputs are mirrored here as
/// plain fields and consumed when a click uses them.
#[derive(Debug, Clone)]
pub struct GraphEditor {
    /// Current mode, including any pending edge endpoint.
    pub mode: EditorMode,
    /// When false, each created edge gets a mirror edge with the same
    /// weight in the opposite direction.
    pub directed: bool,
    /// Name applied to the next vertex; empty means auto-name.
    pub vertex_name_input: String,
    /// Weight text applied to the next edge.
    pub edge_weight_input: String,
    status: String,
    needs_redraw: bool,
}

impl Default for GraphEditor {
    fn default() -> Self {
        let mut editor = Self {
            mode: EditorMode::default(),
            directed: true,
            vertex_name_input: String::new(),
            edge_weight_input: String::new(),
            status: String::new(),
            needs_redraw: false,
        };
        editor.set_mode(ModeCommand::AddVertex);
        editor
    }
}

impl GraphEditor {
    /// Create an editor in add-vertex mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode prompt or interaction message.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Take the latched redraw flag, resetting it.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Switch mode. Always transitions, and leaving add-edge mode
    /// mid-selection (or re-entering it) discards the pending vertex.
    pub fn set_mode(&mut self, command: ModeCommand) {
        self.mode = match command {
            ModeCommand::AddVertex => EditorMode::AddVertex,
            ModeCommand::AddEdge => EditorMode::AddEdge(EdgePhase::AwaitingFirst),
            ModeCommand::Delete => EditorMode::Delete,
        };
        self.status = match self.mode {
            EditorMode::AddVertex => "Mode: add vertices".to_string(),
            EditorMode::AddEdge(_) => "Mode: add edges (click the first vertex)".to_string(),
            EditorMode::Delete => "Mode: delete".to_string(),
        };
    }

    /// Handle a pointer click in the current mode. Non-left buttons
    /// are ignored.
    pub fn handle_click(&mut self, graph: &mut Graph, click: ClickEvent) {
        if click.button != MouseButton::Left {
            return;
        }
        match self.mode {
            EditorMode::AddVertex => self.add_vertex_at(graph, click.position),
            EditorMode::AddEdge(phase) => self.handle_edge_click(graph, phase, click.position),
            EditorMode::Delete => self.delete_at(graph, click.position),
        }
    }

    /// Create a vertex at the click position, consuming the name
    /// input. No collision check is performed.
    fn add_vertex_at(&mut self, graph: &mut Graph, position: Point) {
        let name = (!self.vertex_name_input.is_empty()).then(|| self.vertex_name_input.clone());
        let id = graph.add_vertex(name, position);
        self.vertex_name_input.clear();
        self.needs_redraw = true;
        debug!("added vertex {id} at {position:?}");
    }

    fn handle_edge_click(&mut self, graph: &mut Graph, phase: EdgePhase, position: Point) {
        // A miss leaves the phase (and any pending vertex) untouched.
        let Some(hit) = graph.vertex_at(position, VERTEX_PICK_RADIUS) else {
            return;
        };
        match phase {
            EdgePhase::AwaitingFirst => {
                self.mode = EditorMode::AddEdge(EdgePhase::AwaitingSecond(hit));
                let name = graph.vertex(hit).map(|v| v.name.as_str()).unwrap_or("");
                self.status = format!("Edge: picked {name}, click the second vertex");
            }
            EdgePhase::AwaitingSecond(from) => {
                if from != hit {
                    if let Err(err) = self.create_edge(graph, from, hit) {
                        debug!("edge {from} -> {hit} not created: {err}");
                    }
                }
                // The pending vertex is dropped no matter how
                // creation went.
                self.set_mode(ModeCommand::AddEdge);
            }
        }
    }

    /// Attempt edge creation from the weight input and directed flag.
    /// A weight that fails to parse aborts creation and keeps the
    /// input text; a duplicate pair is rejected by the graph.
    fn create_edge(
        &mut self,
        graph: &mut Graph,
        from: VertexId,
        to: VertexId,
    ) -> Result<(), GraphError> {
        let weight: f64 = self
            .edge_weight_input
            .trim()
            .parse()
            .map_err(|_| GraphError::InvalidWeight(self.edge_weight_input.clone()))?;
        // The weight text is consumed once it parsed, even if the
        // edge itself turns out to be a duplicate.
        self.edge_weight_input.clear();

        graph.add_edge(from, to, weight)?;
        if !self.directed {
            // The mirror edge goes through the same duplicate-checked
            // path as the forward one.
            if let Err(err) = graph.add_edge(to, from, weight) {
                debug!("skipped mirror edge {to} -> {from}: {err}");
            }
        }
        self.needs_redraw = true;
        Ok(())
    }

    /// Delete the element under the click: vertices take priority, and
    /// a vertex hit never falls through to the edge test.
    fn delete_at(&mut self, graph: &mut Graph, position: Point) {
        if let Some(id) = graph.vertex_at(position, VERTEX_PICK_RADIUS) {
            if graph.remove_vertex(id).is_ok() {
                self.needs_redraw = true;
                debug!("deleted vertex {id}");
            }
            return;
        }
        if let Some((from, to)) = graph.edge_at(position, EDGE_PICK_DISTANCE) {
            graph.remove_edge(from, to);
            self.needs_redraw = true;
            debug!("deleted edge {from} -> {to}");
        }
    }
}
