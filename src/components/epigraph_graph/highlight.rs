//! Hover emphasis for nodes and edges.

use super::adjacency::AdjacencyIndex;
use super::config::Palette;
use super::types::Edge;

/// Emphasis class of a node relative to the hovered node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeEmphasis {
	/// The hovered node itself.
	Hovered,
	/// A neighbor of the hovered node.
	Connected,
	/// Anything else, or nothing hovered.
	Default,
}

/// Mouse cursor requested while hovering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
	/// Over a node.
	Pointer,
	/// Over empty space.
	Default,
}

impl Cursor {
	/// CSS `cursor` value.
	pub fn as_css(self) -> &'static str {
		match self {
			Cursor::Pointer => "pointer",
			Cursor::Default => "default",
		}
	}
}

/// Color and particle count for one edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeStyle<'a> {
	/// CSS color.
	pub color: &'a str,
	/// Directional particles in flight.
	pub particles: u32,
}

/// What is currently emphasized. Holds the hovered node by id only.
///
/// Queried by the renderer for every visible element each frame, so all
/// lookups are hash probes against the [`AdjacencyIndex`].
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	hovered: Option<String>,
}

impl HighlightState {
	/// Replace the hovered node; returns the cursor the page should show.
	pub fn set_hover(&mut self, id: Option<&str>) -> Cursor {
		self.hovered = id.map(str::to_owned);
		match self.hovered {
			Some(_) => Cursor::Pointer,
			None => Cursor::Default,
		}
	}

	/// Id of the hovered node.
	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	/// Hovered takes precedence over connected.
	pub fn node_emphasis(&self, index: &AdjacencyIndex, id: &str) -> NodeEmphasis {
		match self.hovered.as_deref() {
			Some(h) if h == id => NodeEmphasis::Hovered,
			Some(h) if index.are_neighbors(h, id) => NodeEmphasis::Connected,
			_ => NodeEmphasis::Default,
		}
	}

	/// Palette color for `id` under the current emphasis.
	pub fn node_color<'p>(&self, index: &AdjacencyIndex, palette: &'p Palette, id: &str) -> &'p str {
		match self.node_emphasis(index, id) {
			NodeEmphasis::Hovered => &palette.node_hover,
			NodeEmphasis::Connected => &palette.node_connected,
			NodeEmphasis::Default => &palette.node,
		}
	}

	/// Whether `edge` touches the hovered node.
	pub fn touches(&self, edge: &Edge) -> bool {
		self.hovered
			.as_deref()
			.is_some_and(|h| edge.source == h || edge.target == h)
	}

	/// Hover color and `particles` when `edge` touches the hovered node, plain otherwise.
	pub fn edge_style<'p>(&self, palette: &'p Palette, particles: u32, edge: &Edge) -> EdgeStyle<'p> {
		if self.touches(edge) {
			EdgeStyle {
				color: &palette.link_hover,
				particles,
			}
		} else {
			EdgeStyle {
				color: &palette.link,
				particles: 0,
			}
		}
	}
}

/// Renderer node value: `max(1, sqrt(degree))`, with a missing or zero
/// degree treated as one.
pub fn node_size(degree: Option<u32>) -> f64 {
	let degree = degree.filter(|d| *d > 0).unwrap_or(1);
	f64::from(degree).sqrt().max(1.0)
}
