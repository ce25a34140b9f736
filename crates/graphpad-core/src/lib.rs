//! GraphPad Core Library
//!
//! Platform-agnostic model and interaction logic for the GraphPad
//! shortest-path editor. This crate owns the graph document, the
//! editing state machine, geometric hit-testing, and the all-pairs
//! shortest-path engine; rendering and raw event delivery live in the
//! embedding application, which drives a [`Board`] with clicks and
//! commands and reads back highlight state, a status string, and a
//! redraw signal.

pub mod board;
pub mod editor;
pub mod graph;
pub mod input;
pub mod pick;
pub mod selection;
pub mod shortest_path;

pub use board::Board;
pub use editor::{EdgePhase, EditorMode, GraphEditor, ModeCommand};
pub use graph::{Edge, Graph, GraphError, Highlight, Vertex, VertexId};
pub use input::{ClickEvent, MouseButton};
pub use pick::{segment_distance, EDGE_PICK_DISTANCE, VERTEX_PICK_RADIUS};
pub use selection::{PathSelection, QueryOutcome, PATH_SEPARATOR};
pub use shortest_path::{floyd_warshall, ShortestPaths, NO_ROUTE};
