//! All-pairs shortest paths over the current graph.

use crate::graph::{Graph, GraphError, VertexId};

/// Sentinel in the next-hop table meaning "no direct route".
pub const NO_ROUTE: isize = -1;

/// Result of a Floyd-Warshall run: the distance matrix and the
/// next-hop table used for path reconstruction. Both are snapshots;
/// they are invalid the moment the graph mutates.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    /// `dist[i][j]` is the shortest distance from `i` to `j`
    /// (`+inf` when unreachable).
    pub dist: Vec<Vec<f64>>,
    /// `next[i][j]` is the first hop on the shortest path from `i` to
    /// `j`, or [`NO_ROUTE`]. `next[i][i]` is unused.
    pub next: Vec<Vec<isize>>,
}

/// Run Floyd-Warshall over a freshly derived adjacency matrix. O(V^3)
/// time and O(V^2) space, which is fine at interactive scale; there is
/// no incremental or cached variant.
pub fn floyd_warshall(graph: &Graph) -> ShortestPaths {
    let n = graph.vertex_count();
    let mut dist = graph.adjacency();
    let mut next = vec![vec![NO_ROUTE; n]; n];

    for (i, row) in dist.iter().enumerate() {
        for (j, &weight) in row.iter().enumerate() {
            if i != j && weight.is_finite() {
                next[i][j] = j as isize;
            }
        }
    }

    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let through = dist[i][k] + dist[k][j];
                if through < dist[i][j] {
                    dist[i][j] = through;
                    next[i][j] = next[i][k];
                }
            }
        }
    }

    ShortestPaths { dist, next }
}

impl ShortestPaths {
    /// Number of vertices the tables cover.
    pub fn vertex_count(&self) -> usize {
        self.dist.len()
    }

    /// Range-checked read of `dist[start][end]`.
    pub fn distance(&self, start: VertexId, end: VertexId) -> Result<f64, GraphError> {
        self.check(start)?;
        self.check(end)?;
        Ok(self.dist[start][end])
    }

    /// Reconstruct the vertex sequence from `start` to `end` by
    /// following the next-hop table.
    ///
    /// `start == end` returns `[start]` immediately, without a
    /// reachability check. An unreachable pair returns an empty
    /// sequence. Ids outside the table's range are rejected with
    /// [`GraphError::InvalidVertexId`].
    pub fn reconstruct(&self, start: VertexId, end: VertexId) -> Result<Vec<VertexId>, GraphError> {
        self.check(start)?;
        self.check(end)?;

        if start == end {
            return Ok(vec![start]);
        }
        if self.next[start][end] == NO_ROUTE {
            return Ok(Vec::new());
        }

        let mut path = vec![start];
        let mut at = start;
        while at != end {
            at = self.next[at][end] as VertexId;
            path.push(at);
        }
        Ok(path)
    }

    fn check(&self, id: VertexId) -> Result<(), GraphError> {
        if id >= self.dist.len() {
            return Err(GraphError::InvalidVertexId(id));
        }
        Ok(())
    }
}
