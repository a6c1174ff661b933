//! Weighted undirected graphs for cut problems

use crate::{AnsatzError, Result};
use serde::{Deserialize, Serialize};

/// Weighted undirected graph
///
/// Vertices are `0..num_vertices` and map one-to-one onto register sites.
/// Edges keep their insertion order, which is the order phase operators are
/// emitted in. An edge `(i, j, w)` means the same thing as `(j, i, w)`.
///
/// The serialized form is `{"num_vertices": n, "edges": [[i, j, w], ...]}`;
/// `num_vertices` may be omitted (inferred from the largest endpoint) and
/// edges may be written `[i, j]` for unit weight.
///
/// # Example
///
/// ```
/// use qaoa_ansatz::Graph;
///
/// let graph = Graph::from_edges(4, &[(0, 1, 1.0), (1, 2, 1.5), (2, 3, 1.0)]).unwrap();
/// assert_eq!(graph.num_edges(), 3);
/// assert_eq!(graph.cut_value(&[false, true, false, true]), 3.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GraphSpec", into = "GraphSpec")]
pub struct Graph {
    num_vertices: usize,
    edges: Vec<(usize, usize, f64)>,
}

impl Graph {
    /// Create a graph from `(vertex1, vertex2, weight)` edges
    ///
    /// # Errors
    /// Returns [`AnsatzError::InvalidGraph`] for an endpoint outside
    /// `0..num_vertices`, a self loop, or a non-finite weight
    pub fn from_edges(num_vertices: usize, edges: &[(usize, usize, f64)]) -> Result<Self> {
        for &(u, v, w) in edges {
            if u >= num_vertices || v >= num_vertices {
                return Err(AnsatzError::InvalidGraph(format!(
                    "edge ({}, {}) references a vertex outside 0..{}",
                    u, v, num_vertices
                )));
            }
            if u == v {
                return Err(AnsatzError::InvalidGraph(format!("self loop on vertex {}", u)));
            }
            if !w.is_finite() {
                return Err(AnsatzError::InvalidGraph(format!(
                    "edge ({}, {}) has non-finite weight {}",
                    u, v, w
                )));
            }
        }
        Ok(Self::from_valid_edges(num_vertices, edges.to_vec()))
    }

    fn from_valid_edges(num_vertices: usize, edges: Vec<(usize, usize, f64)>) -> Self {
        Self {
            num_vertices,
            edges,
        }
    }

    /// Create a complete graph with unit weights
    pub fn complete(num_vertices: usize) -> Self {
        let mut edges = Vec::new();
        for i in 0..num_vertices {
            for j in (i + 1)..num_vertices {
                edges.push((i, j, 1.0));
            }
        }
        Self::from_valid_edges(num_vertices, edges)
    }

    /// Create a cycle graph with unit weights
    ///
    /// Fewer than three vertices cannot close a simple cycle; those sizes
    /// produce a path.
    pub fn cycle(num_vertices: usize) -> Self {
        if num_vertices < 3 {
            return Self::path(num_vertices);
        }
        let edges = (0..num_vertices)
            .map(|i| (i, (i + 1) % num_vertices, 1.0))
            .collect();
        Self::from_valid_edges(num_vertices, edges)
    }

    /// Create a path graph with unit weights
    pub fn path(num_vertices: usize) -> Self {
        let edges = (0..num_vertices.saturating_sub(1))
            .map(|i| (i, i + 1, 1.0))
            .collect();
        Self::from_valid_edges(num_vertices, edges)
    }

    /// Number of vertices
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Edges in insertion order
    #[inline]
    pub fn edges(&self) -> &[(usize, usize, f64)] {
        &self.edges
    }

    /// Get total number of edges
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Total weight of edges whose endpoints fall on different sides
    ///
    /// # Panics
    /// Panics if `sides` is shorter than the number of vertices
    pub fn cut_value(&self, sides: &[bool]) -> f64 {
        self.edges
            .iter()
            .filter(|&&(i, j, _)| sides[i] != sides[j])
            .map(|&(_, _, w)| w)
            .sum()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum EdgeSpec {
    Weighted(usize, usize, f64),
    Unweighted(usize, usize),
}

#[derive(Serialize, Deserialize)]
struct GraphSpec {
    #[serde(default)]
    num_vertices: Option<usize>,
    edges: Vec<EdgeSpec>,
}

impl TryFrom<GraphSpec> for Graph {
    type Error = AnsatzError;

    fn try_from(spec: GraphSpec) -> Result<Self> {
        let edges: Vec<(usize, usize, f64)> = spec
            .edges
            .into_iter()
            .map(|edge| match edge {
                EdgeSpec::Weighted(u, v, w) => (u, v, w),
                EdgeSpec::Unweighted(u, v) => (u, v, 1.0),
            })
            .collect();
        let num_vertices = match spec.num_vertices {
            Some(n) => n,
            None => edges.iter().try_fold(0usize, |count, &(u, v, _)| {
                let largest = u.max(v);
                largest.checked_add(1).map(|n| count.max(n)).ok_or_else(|| {
                    AnsatzError::InvalidGraph(format!("vertex index {} is out of range", largest))
                })
            })?,
        };
        Graph::from_edges(num_vertices, &edges)
    }
}

impl From<Graph> for GraphSpec {
    fn from(graph: Graph) -> Self {
        Self {
            num_vertices: Some(graph.num_vertices),
            edges: graph
                .edges
                .into_iter()
                .map(|(u, v, w)| EdgeSpec::Weighted(u, v, w))
                .collect(),
        }
    }
}
