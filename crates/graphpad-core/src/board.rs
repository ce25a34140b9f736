//! The interactive board: one owned aggregate tying the graph, the
//! editing state machine, and the path selection together.

use crate::editor::{GraphEditor, ModeCommand};
use crate::graph::{Graph, GraphError, VertexId};
use crate::input::ClickEvent;
use crate::pick::VERTEX_PICK_RADIUS;
use crate::selection::{PathSelection, QueryOutcome};
use kurbo::Point;
use log::debug;

/// Runtime state for one graph-editing session. All interaction
/// handlers go through this aggregate, so there is exactly one logical
/// thread of control over the graph; each handler runs to completion
/// before the next input is accepted.
#[derive(Debug, Clone)]
pub struct Board {
    /// The graph being edited.
    pub graph: Graph,
    /// Editing state machine.
    pub editor: GraphEditor,
    /// Shortest-path query endpoints.
    pub selection: PathSelection,
    status: String,
    needs_redraw: bool,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a board with an empty graph.
    pub fn new() -> Self {
        let editor = GraphEditor::new();
        let status = editor.status().to_string();
        Self {
            graph: Graph::new(),
            editor,
            selection: PathSelection::new(),
            status,
            needs_redraw: false,
        }
    }

    /// The human-readable status string for the external UI: the
    /// current-mode prompt or the latest query message.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Take the latched redraw flag, merging the editor's own flag.
    pub fn take_redraw(&mut self) -> bool {
        let editor_flag = self.editor.take_redraw();
        std::mem::take(&mut self.needs_redraw) || editor_flag
    }

    /// Switch the editing mode.
    pub fn set_mode(&mut self, command: ModeCommand) {
        self.editor.set_mode(command);
        self.status = self.editor.status().to_string();
    }

    /// Route a pointer click to the editing state machine.
    pub fn handle_click(&mut self, click: ClickEvent) {
        self.editor.handle_click(&mut self.graph, click);
        self.status = self.editor.status().to_string();
    }

    /// The dedicated click-to-select interaction: pick the vertex
    /// under the click (if any) as a query endpoint.
    pub fn select_at(&mut self, position: Point) -> Option<VertexId> {
        let id = self.graph.vertex_at(position, VERTEX_PICK_RADIUS)?;
        self.select_vertex(id);
        Some(id)
    }

    /// Register a vertex as a query endpoint directly (for embeddings
    /// where vertices deliver their own click events).
    pub fn select_vertex(&mut self, id: VertexId) {
        self.selection.select(id);
        self.needs_redraw = true;
    }

    /// Run the shortest-path query over the current selection and map
    /// the outcome to the status string.
    pub fn run_query(&mut self) -> QueryOutcome {
        match self.selection.query(&mut self.graph) {
            Ok(QueryOutcome::Incomplete) => {
                self.status = "Select a start and an end vertex first".to_string();
                QueryOutcome::Incomplete
            }
            Ok(QueryOutcome::NoPath) => {
                self.status = "No path exists".to_string();
                QueryOutcome::NoPath
            }
            Ok(QueryOutcome::Found {
                path,
                distance,
                label,
            }) => {
                self.status = format!("Shortest path: {label} (distance {distance})");
                self.needs_redraw = true;
                QueryOutcome::Found {
                    path,
                    distance,
                    label,
                }
            }
            Err(GraphError::InvalidVertexId(id)) => {
                // An endpoint was deleted since it was selected.
                debug!("selection held stale vertex id {id}");
                self.selection.reset();
                self.status = "Selection no longer valid, select again".to_string();
                QueryOutcome::Incomplete
            }
            Err(err) => {
                debug!("query failed: {err}");
                self.status = err.to_string();
                QueryOutcome::Incomplete
            }
        }
    }

    /// Rename a vertex in place.
    pub fn rename_vertex(&mut self, id: VertexId, name: String) -> Result<(), GraphError> {
        self.graph.rename_vertex(id, name)?;
        self.needs_redraw = true;
        Ok(())
    }

    /// Clear the graph and reset the selection. Clearing an already
    /// empty board only logs.
    pub fn clear(&mut self) {
        if self.graph.is_empty() {
            debug!("clear requested on an empty graph");
            return;
        }
        self.graph.clear();
        self.selection.reset();
        self.needs_redraw = true;
        debug!("graph cleared");
    }
}
