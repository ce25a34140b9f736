//! Path query selection and highlight control.

use crate::graph::{Graph, GraphError, Highlight, VertexId};
use crate::shortest_path::{self, ShortestPaths};

/// Separator used when joining vertex names for display.
pub const PATH_SEPARATOR: &str = " \u{2192} ";

/// Outcome of a shortest-path query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Fewer than two endpoints are selected; nothing was computed.
    Incomplete,
    /// Both endpoints are set but no route connects them.
    NoPath,
    /// A path was found and highlighted on the graph.
    Found {
        /// Vertex ids in path order, start and end inclusive.
        path: Vec<VertexId>,
        /// Total distance, read directly from the distance matrix.
        distance: f64,
        /// Vertex names joined with [`PATH_SEPARATOR`].
        label: String,
    },
}

/// Tracks the two query endpoints and drives path highlighting.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathSelection {
    start: Option<VertexId>,
    end: Option<VertexId>,
}

impl PathSelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected start vertex, if any.
    pub fn start(&self) -> Option<VertexId> {
        self.start
    }

    /// Selected end vertex, if any.
    pub fn end(&self) -> Option<VertexId> {
        self.end
    }

    /// Whether both endpoints are set.
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Register a click on a vertex: the first click sets the start,
    /// the second sets the end, and a third starts over with the new
    /// id as start.
    pub fn select(&mut self, id: VertexId) {
        match (self.start, self.end) {
            (None, _) => self.start = Some(id),
            (Some(_), None) => self.end = Some(id),
            (Some(_), Some(_)) => {
                self.start = Some(id);
                self.end = None;
            }
        }
    }

    /// Clear both endpoints.
    pub fn reset(&mut self) {
        self.start = None;
        self.end = None;
    }

    /// Run a shortest-path query over the current selection, updating
    /// highlights on the graph.
    ///
    /// The reported distance is read straight from the distance matrix
    /// rather than re-summed from edges, so it always agrees with the
    /// tables that produced the path. Stale endpoints (deleted since
    /// selection) surface as [`GraphError::InvalidVertexId`].
    pub fn query(&self, graph: &mut Graph) -> Result<QueryOutcome, GraphError> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Ok(QueryOutcome::Incomplete);
        };

        // Always a fresh run: the graph may have mutated since the
        // last query and the tables are never cached.
        let paths: ShortestPaths = shortest_path::floyd_warshall(graph);
        let path = paths.reconstruct(start, end)?;
        if path.is_empty() {
            return Ok(QueryOutcome::NoPath);
        }

        let distance = paths.dist[start][end];
        let label = path
            .iter()
            .filter_map(|&id| graph.vertex(id))
            .map(|v| v.name.clone())
            .collect::<Vec<_>>()
            .join(PATH_SEPARATOR);

        highlight_path(graph, &path);

        Ok(QueryOutcome::Found {
            path,
            distance,
            label,
        })
    }
}

/// Reset all highlights, then mark every path vertex and every
/// matching ordered edge between consecutive path vertices. A path
/// step with no matching direct edge is simply left unhighlighted.
fn highlight_path(graph: &mut Graph, path: &[VertexId]) {
    graph.reset_highlights();
    for &id in path {
        if let Some(vertex) = graph.vertex_mut(id) {
            vertex.highlight = Highlight::OnPath;
        }
    }
    for pair in path.windows(2) {
        if let Some(edge) = graph.edge_mut(pair[0], pair[1]) {
            edge.highlight = Highlight::OnPath;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn triangle() -> Graph {
        let mut graph = Graph::new();
        graph.add_vertex(Some("A".to_string()), Point::new(0.0, 0.0));
        graph.add_vertex(Some("B".to_string()), Point::new(2.0, 0.0));
        graph.add_vertex(Some("C".to_string()), Point::new(4.0, 0.0));
        graph.add_edge(0, 1, 4.0).unwrap();
        graph.add_edge(1, 2, 3.0).unwrap();
        graph.add_edge(0, 2, 10.0).unwrap();
        graph
    }

    #[test]
    fn test_click_cycle() {
        let mut selection = PathSelection::new();
        assert!(!selection.is_complete());

        selection.select(0);
        assert_eq!(selection.start(), Some(0));
        assert_eq!(selection.end(), None);

        selection.select(2);
        assert_eq!(selection.end(), Some(2));
        assert!(selection.is_complete());

        // A third click starts over with the new id as start.
        selection.select(1);
        assert_eq!(selection.start(), Some(1));
        assert_eq!(selection.end(), None);
    }

    #[test]
    fn test_incomplete_selection_computes_nothing() {
        let mut graph = triangle();
        let mut selection = PathSelection::new();

        assert_eq!(selection.query(&mut graph), Ok(QueryOutcome::Incomplete));
        selection.select(0);
        assert_eq!(selection.query(&mut graph), Ok(QueryOutcome::Incomplete));
    }

    #[test]
    fn test_query_finds_and_labels_path() {
        let mut graph = triangle();
        let mut selection = PathSelection::new();
        selection.select(0);
        selection.select(2);

        let outcome = selection.query(&mut graph).unwrap();
        assert_eq!(
            outcome,
            QueryOutcome::Found {
                path: vec![0, 1, 2],
                distance: 7.0,
                label: "A \u{2192} B \u{2192} C".to_string(),
            }
        );
    }

    #[test]
    fn test_query_highlights_path_elements() {
        let mut graph = triangle();
        let mut selection = PathSelection::new();
        selection.select(0);
        selection.select(2);
        selection.query(&mut graph).unwrap();

        for id in 0..3 {
            assert_eq!(graph.vertex(id).unwrap().highlight, Highlight::OnPath);
        }
        assert_eq!(graph.edge(0, 1).unwrap().highlight, Highlight::OnPath);
        assert_eq!(graph.edge(1, 2).unwrap().highlight, Highlight::OnPath);
        // The bypassed direct edge stays neutral.
        assert_eq!(graph.edge(0, 2).unwrap().highlight, Highlight::Neutral);
    }

    #[test]
    fn test_query_resets_previous_highlights() {
        let mut graph = triangle();
        let mut selection = PathSelection::new();
        selection.select(0);
        selection.select(2);
        selection.query(&mut graph).unwrap();

        // New query over a shorter span drops the old highlights.
        selection.select(1);
        selection.select(2);
        selection.query(&mut graph).unwrap();

        assert_eq!(graph.vertex(0).unwrap().highlight, Highlight::Neutral);
        assert_eq!(graph.edge(0, 1).unwrap().highlight, Highlight::Neutral);
        assert_eq!(graph.edge(1, 2).unwrap().highlight, Highlight::OnPath);
    }

    #[test]
    fn test_no_path_between_selected() {
        let mut graph = triangle();
        let mut selection = PathSelection::new();
        selection.select(2);
        selection.select(0);

        assert_eq!(selection.query(&mut graph), Ok(QueryOutcome::NoPath));
    }

    #[test]
    fn test_stale_endpoint_is_rejected() {
        let mut graph = triangle();
        let mut selection = PathSelection::new();
        selection.select(0);
        selection.select(2);

        graph.remove_vertex(1).unwrap();
        // Old id 2 is now out of range.
        assert_eq!(
            selection.query(&mut graph),
            Err(GraphError::InvalidVertexId(2))
        );
    }
}
