//! Neighbor lookups built once per dataset.

use std::collections::{HashMap, HashSet};

use super::types::{Edge, Node};

/// Lookup tables built once from the dataset and read-only afterwards.
///
/// Neighbor relations are symmetric even though edges are directed. Edges are
/// tracked by their ordinal in the dataset so parallel citations between the
/// same pair of works stay distinct.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyIndex {
	node_by_id: HashMap<String, usize>,
	neighbor_nodes: HashMap<String, HashSet<String>>,
	neighbor_edges: HashMap<String, Vec<usize>>,
}

impl AdjacencyIndex {
	/// Index `nodes` and `edges`. Edges that name unknown ids are indexed too.
	pub fn build(nodes: &[Node], edges: &[Edge]) -> Self {
		let node_by_id = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();
		let mut neighbor_nodes: HashMap<String, HashSet<String>> = HashMap::new();
		let mut neighbor_edges: HashMap<String, Vec<usize>> = HashMap::new();

		for (ordinal, edge) in edges.iter().enumerate() {
			let (src, tgt) = (&edge.source, &edge.target);
			neighbor_nodes
				.entry(src.clone())
				.or_default()
				.insert(tgt.clone());
			neighbor_nodes
				.entry(tgt.clone())
				.or_default()
				.insert(src.clone());

			neighbor_edges.entry(src.clone()).or_default().push(ordinal);
			if src != tgt {
				neighbor_edges.entry(tgt.clone()).or_default().push(ordinal);
			}
		}

		Self {
			node_by_id,
			neighbor_nodes,
			neighbor_edges,
		}
	}

	/// Position of the node with `id` in the dataset's node list.
	pub fn node_index(&self, id: &str) -> Option<usize> {
		self.node_by_id.get(id).copied()
	}

	/// Whether `a` and `b` share at least one edge, in either direction.
	pub fn are_neighbors(&self, a: &str, b: &str) -> bool {
		self.neighbor_nodes
			.get(a)
			.is_some_and(|set| set.contains(b))
	}

	/// Ids adjacent to `id`.
	pub fn neighbors(&self, id: &str) -> Option<&HashSet<String>> {
		self.neighbor_nodes.get(id)
	}

	/// Ordinals of the edges incident to `id`.
	pub fn incident_edges(&self, id: &str) -> &[usize] {
		self.neighbor_edges
			.get(id)
			.map(Vec::as_slice)
			.unwrap_or_default()
	}

	/// `source__target` keys of the edges incident to `id`.
	pub fn incident_edge_keys<'a>(
		&'a self,
		id: &str,
		edges: &'a [Edge],
	) -> impl Iterator<Item = String> + 'a {
		self.incident_edges(id)
			.iter()
			.filter_map(|&i| edges.get(i))
			.map(Edge::key)
	}
}
