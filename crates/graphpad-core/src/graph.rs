//! Graph document: vertices, edges, and the derived adjacency matrix.

use crate::pick;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dense vertex identifier. At rest, the ids of a graph's vertices
/// always form the contiguous range `0..vertex_count()`.
pub type VertexId = usize;

/// Errors raised by graph mutations and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge with the exact ordered `(from, to)` pair already exists.
    #[error("edge {from} -> {to} already exists")]
    DuplicateEdge { from: VertexId, to: VertexId },
    /// A vertex id outside the current `0..vertex_count()` range.
    #[error("vertex id {0} is out of range")]
    InvalidVertexId(VertexId),
    /// Weight text that does not parse as a real number.
    #[error("invalid edge weight {0:?}")]
    InvalidWeight(String),
}

/// Highlight state for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Highlight {
    #[default]
    Neutral,
    /// Part of the most recent shortest-path query result.
    OnPath,
}

/// A graph vertex with identity, display name, and world position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    pub name: String,
    pub position: Point,
    pub highlight: Highlight,
    /// Whether the name was auto-generated as `"V" + id`. Auto-named
    /// vertices are renamed to match their id when ids are compacted
    /// after a deletion; user-given names are never touched.
    auto_named: bool,
}

impl Vertex {
    /// Whether this vertex still carries its auto-generated name.
    pub fn is_auto_named(&self) -> bool {
        self.auto_named
    }
}

/// A directed weighted edge between two vertex ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
    pub highlight: Highlight,
}

/// The graph document. Vertex order is insertion/compaction order;
/// the adjacency matrix is derived on demand and never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// All vertices in insertion/compaction order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check if the graph has no vertices and no edges.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }

    /// Get a vertex by id.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    /// Get a mutable reference to a vertex by id.
    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(id)
    }

    /// Get the edge with the exact ordered `(from, to)` pair.
    pub fn edge(&self, from: VertexId, to: VertexId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.from == from && e.to == to)
    }

    /// Get a mutable reference to the edge with the exact ordered
    /// `(from, to)` pair.
    pub fn edge_mut(&mut self, from: VertexId, to: VertexId) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|e| e.from == from && e.to == to)
    }

    /// Add a vertex at a world position, assigning the next contiguous
    /// id. An absent or empty name auto-generates `"V{id}"`.
    pub fn add_vertex(&mut self, name: Option<String>, position: Point) -> VertexId {
        let id = self.vertices.len();
        let (name, auto_named) = match name.filter(|n| !n.is_empty()) {
            Some(name) => (name, false),
            None => (format!("V{id}"), true),
        };
        self.vertices.push(Vertex {
            id,
            name,
            position,
            highlight: Highlight::Neutral,
            auto_named,
        });
        id
    }

    /// Remove a vertex, cascade-deleting every incident edge, then
    /// compact the remaining ids to `0..N` preserving relative order
    /// and remap every surviving edge's endpoints.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<(), GraphError> {
        if id >= self.vertices.len() {
            return Err(GraphError::InvalidVertexId(id));
        }
        self.edges.retain(|e| e.from != id && e.to != id);
        self.vertices.remove(id);
        self.renumber(id);
        Ok(())
    }

    /// Rename a vertex. The vertex counts as user-named from then on,
    /// so renumbering will leave the new name alone.
    pub fn rename_vertex(&mut self, id: VertexId, name: String) -> Result<(), GraphError> {
        let vertex = self
            .vertex_mut(id)
            .ok_or(GraphError::InvalidVertexId(id))?;
        vertex.name = name;
        vertex.auto_named = false;
        Ok(())
    }

    /// Compact vertex ids after removing `deleted` and remap edges.
    fn renumber(&mut self, deleted: VertexId) {
        for (i, vertex) in self.vertices.iter_mut().enumerate() {
            vertex.id = i;
            if vertex.auto_named {
                vertex.name = format!("V{i}");
            }
        }
        for edge in &mut self.edges {
            if edge.from > deleted {
                edge.from -= 1;
            }
            if edge.to > deleted {
                edge.to -= 1;
            }
        }
    }

    /// Add a directed edge. Fails with [`GraphError::DuplicateEdge`]
    /// when the exact ordered pair already exists. Self-loops are not
    /// rejected; the adjacency rule makes them irrelevant.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: f64) -> Result<(), GraphError> {
        let count = self.vertices.len();
        if from >= count {
            return Err(GraphError::InvalidVertexId(from));
        }
        if to >= count {
            return Err(GraphError::InvalidVertexId(to));
        }
        if self.edge(from, to).is_some() {
            return Err(GraphError::DuplicateEdge { from, to });
        }
        self.edges.push(Edge {
            from,
            to,
            weight,
            highlight: Highlight::Neutral,
        });
        Ok(())
    }

    /// Remove the edge with the exact ordered pair; no-op when absent.
    pub fn remove_edge(&mut self, from: VertexId, to: VertexId) {
        self.edges.retain(|e| !(e.from == from && e.to == to));
    }

    /// Remove all vertices and edges.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
    }

    /// Reset every vertex and edge highlight to neutral.
    pub fn reset_highlights(&mut self) {
        for vertex in &mut self.vertices {
            vertex.highlight = Highlight::Neutral;
        }
        for edge in &mut self.edges {
            edge.highlight = Highlight::Neutral;
        }
    }

    /// Find the first vertex (in list order, not the nearest) within
    /// `radius` of a world position.
    pub fn vertex_at(&self, position: Point, radius: f64) -> Option<VertexId> {
        self.vertices
            .iter()
            .find(|v| v.position.distance(position) <= radius)
            .map(|v| v.id)
    }

    /// Find the first edge (in list order) whose segment passes within
    /// `max_distance` of a world position.
    pub fn edge_at(&self, position: Point, max_distance: f64) -> Option<(VertexId, VertexId)> {
        self.edges
            .iter()
            .find(|e| {
                let (Some(from), Some(to)) = (self.vertex(e.from), self.vertex(e.to)) else {
                    return false;
                };
                pick::segment_distance(position, from.position, to.position) <= max_distance
            })
            .map(|e| (e.from, e.to))
    }

    /// Derive the dense adjacency matrix: `[i][j]` is the weight of
    /// the edge `i -> j` if present, else `+inf`. Every diagonal entry
    /// is forced to `0` last, so self-loops never contribute.
    pub fn adjacency(&self) -> Vec<Vec<f64>> {
        let n = self.vertices.len();
        let mut matrix = vec![vec![f64::INFINITY; n]; n];
        for edge in &self.edges {
            matrix[edge.from][edge.to] = edge.weight;
        }
        for (i, row) in matrix.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_vertex_auto_name() {
        let mut graph = Graph::new();
        let a = graph.add_vertex(None, Point::new(0.0, 0.0));
        let b = graph.add_vertex(Some(String::new()), Point::new(1.0, 0.0));

        assert_eq!(graph.vertex(a).unwrap().name, "V0");
        assert_eq!(graph.vertex(b).unwrap().name, "V1");
        assert!(graph.vertex(a).unwrap().is_auto_named());
    }

    #[test]
    fn test_add_vertex_user_name() {
        let mut graph = Graph::new();
        let id = graph.add_vertex(Some("hub".to_string()), Point::new(0.0, 0.0));

        let vertex = graph.vertex(id).unwrap();
        assert_eq!(vertex.name, "hub");
        assert!(!vertex.is_auto_named());
    }

    #[test]
    fn test_remove_vertex_cascades_and_renumbers() {
        // Vertices {0,1,2} with edges (0,1),(1,2),(0,2); deleting 1
        // leaves {0,1} and only the old (0,2) edge, remapped to (0,1).
        let mut graph = Graph::new();
        for i in 0..3 {
            graph.add_vertex(None, Point::new(i as f64, 0.0));
        }
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(1, 2, 1.0).unwrap();
        graph.add_edge(0, 2, 1.0).unwrap();

        graph.remove_vertex(1).unwrap();

        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        let edge = &graph.edges()[0];
        assert_eq!((edge.from, edge.to), (0, 1));
        let ids: Vec<_> = graph.vertices().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_renumber_renames_only_auto_named() {
        let mut graph = Graph::new();
        graph.add_vertex(None, Point::new(0.0, 0.0)); // V0
        graph.add_vertex(Some("hub".to_string()), Point::new(1.0, 0.0));
        graph.add_vertex(None, Point::new(2.0, 0.0)); // V2

        graph.remove_vertex(0).unwrap();

        assert_eq!(graph.vertex(0).unwrap().name, "hub");
        assert_eq!(graph.vertex(1).unwrap().name, "V1");
    }

    #[test]
    fn test_renumber_keeps_user_v_prefix_name() {
        // A user-given name that happens to start with "V" must not be
        // rewritten by renumbering.
        let mut graph = Graph::new();
        graph.add_vertex(None, Point::new(0.0, 0.0));
        graph.add_vertex(Some("Vienna".to_string()), Point::new(1.0, 0.0));

        graph.remove_vertex(0).unwrap();

        assert_eq!(graph.vertex(0).unwrap().name, "Vienna");
    }

    #[test]
    fn test_remove_vertex_out_of_range() {
        let mut graph = Graph::new();
        graph.add_vertex(None, Point::new(0.0, 0.0));

        assert_eq!(graph.remove_vertex(5), Err(GraphError::InvalidVertexId(5)));
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn test_duplicate_edge_rejected() {
        let mut graph = Graph::new();
        graph.add_vertex(None, Point::new(0.0, 0.0));
        graph.add_vertex(None, Point::new(1.0, 0.0));

        graph.add_edge(0, 1, 2.0).unwrap();
        let err = graph.add_edge(0, 1, 9.0);

        assert_eq!(err, Err(GraphError::DuplicateEdge { from: 0, to: 1 }));
        assert_eq!(graph.edge_count(), 1);
        // Reverse direction is a distinct ordered pair.
        graph.add_edge(1, 0, 2.0).unwrap();
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_add_edge_invalid_endpoint() {
        let mut graph = Graph::new();
        graph.add_vertex(None, Point::new(0.0, 0.0));

        assert_eq!(graph.add_edge(0, 3, 1.0), Err(GraphError::InvalidVertexId(3)));
        assert_eq!(graph.add_edge(3, 0, 1.0), Err(GraphError::InvalidVertexId(3)));
    }

    #[test]
    fn test_remove_edge_noop_when_missing() {
        let mut graph = Graph::new();
        graph.add_vertex(None, Point::new(0.0, 0.0));
        graph.add_vertex(None, Point::new(1.0, 0.0));
        graph.add_edge(0, 1, 1.0).unwrap();

        graph.remove_edge(1, 0);
        assert_eq!(graph.edge_count(), 1);

        graph.remove_edge(0, 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_rename_vertex() {
        let mut graph = Graph::new();
        graph.add_vertex(None, Point::new(0.0, 0.0));
        graph.add_vertex(None, Point::new(1.0, 0.0));

        graph.rename_vertex(1, "goal".to_string()).unwrap();
        assert_eq!(graph.vertex(1).unwrap().name, "goal");
        assert!(!graph.vertex(1).unwrap().is_auto_named());

        assert_eq!(
            graph.rename_vertex(7, "x".to_string()),
            Err(GraphError::InvalidVertexId(7))
        );
    }

    #[test]
    fn test_adjacency_diagonal_zero() {
        let mut graph = Graph::new();
        graph.add_vertex(None, Point::new(0.0, 0.0));
        graph.add_vertex(None, Point::new(1.0, 0.0));
        // Self-loop must not survive into the matrix diagonal.
        graph.add_edge(0, 0, 5.0).unwrap();
        graph.add_edge(0, 1, 2.5).unwrap();

        let matrix = graph.adjacency();
        assert_eq!(matrix[0][0], 0.0);
        assert_eq!(matrix[1][1], 0.0);
        assert_eq!(matrix[0][1], 2.5);
        assert_eq!(matrix[1][0], f64::INFINITY);
    }

    #[test]
    fn test_vertex_at_first_match_wins() {
        let mut graph = Graph::new();
        // Two overlapping vertices; list order decides, not distance.
        graph.add_vertex(None, Point::new(0.2, 0.0));
        graph.add_vertex(None, Point::new(0.0, 0.0));

        assert_eq!(graph.vertex_at(Point::new(0.0, 0.0), 0.5), Some(0));
        assert_eq!(graph.vertex_at(Point::new(5.0, 5.0), 0.5), None);
    }

    #[test]
    fn test_edge_at() {
        let mut graph = Graph::new();
        graph.add_vertex(None, Point::new(0.0, 0.0));
        graph.add_vertex(None, Point::new(4.0, 0.0));
        graph.add_edge(0, 1, 1.0).unwrap();

        assert_eq!(graph.edge_at(Point::new(2.0, 0.2), 0.3), Some((0, 1)));
        assert_eq!(graph.edge_at(Point::new(2.0, 1.0), 0.3), None);
    }

    #[test]
    fn test_clear() {
        let mut graph = Graph::new();
        graph.add_vertex(None, Point::new(0.0, 0.0));
        graph.add_vertex(None, Point::new(1.0, 0.0));
        graph.add_edge(0, 1, 1.0).unwrap();

        graph.clear();
        assert!(graph.is_empty());
        // Ids restart from zero after a clear.
        assert_eq!(graph.add_vertex(None, Point::new(0.0, 0.0)), 0);
    }

    #[test]
    fn test_reset_highlights() {
        let mut graph = Graph::new();
        graph.add_vertex(None, Point::new(0.0, 0.0));
        graph.add_vertex(None, Point::new(1.0, 0.0));
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.vertex_mut(0).unwrap().highlight = Highlight::OnPath;
        graph.edge_mut(0, 1).unwrap().highlight = Highlight::OnPath;

        graph.reset_highlights();

        assert_eq!(graph.vertex(0).unwrap().highlight, Highlight::Neutral);
        assert_eq!(graph.edge(0, 1).unwrap().highlight, Highlight::Neutral);
    }
}
