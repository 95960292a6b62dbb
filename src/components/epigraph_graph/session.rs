//! Per-page interaction state.

use glam::DVec3;
use log::{debug, warn};

use super::adjacency::AdjacencyIndex;
use super::camera::{CameraController, CameraRig, CameraTransition, KeyState, TickOutcome, fly_to};
use super::config::ViewerConfig;
use super::highlight::{Cursor, EdgeStyle, HighlightState, node_size};
use super::panel::{EdgeCard, NodePanel};
use super::search::{SearchIndex, SearchOutcome};
use super::types::{Edge, GraphData, Node};

/// Everything the viewer knows about one browsing session.
///
/// Owns the dataset and all derived state. Browser callbacks reach it through
/// a shared `Rc<RefCell<_>>` on the UI thread.
pub struct GraphSession {
	data: GraphData,
	index: AdjacencyIndex,
	search: SearchIndex,
	highlight: HighlightState,
	keys: KeyState,
	camera: CameraController,
	selected_edge: Option<usize>,
	config: ViewerConfig,
}

/// Side effects of a hover change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverUpdate {
	/// Cursor for the page body.
	pub cursor: Cursor,
	/// New hover panel contents.
	pub panel: NodePanel,
}

impl GraphSession {
	/// Index `data` once; nothing is hovered or selected.
	pub fn new(data: GraphData, config: ViewerConfig) -> Self {
		let index = AdjacencyIndex::build(&data.nodes, &data.links);
		let search = SearchIndex::new(&data.nodes, &config.search);
		let camera = CameraController::new(&config.navigation);
		Self {
			data,
			index,
			search,
			highlight: HighlightState::default(),
			keys: KeyState::default(),
			camera,
			selected_edge: None,
			config,
		}
	}

	/// The loaded dataset.
	pub fn data(&self) -> &GraphData {
		&self.data
	}

	/// Viewer settings.
	pub fn config(&self) -> &ViewerConfig {
		&self.config
	}

	/// Node by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.index
			.node_index(id)
			.and_then(|i| self.data.nodes.get(i))
	}

	/// Edge by dataset position.
	pub fn edge(&self, ordinal: usize) -> Option<&Edge> {
		self.data.links.get(ordinal)
	}

	/// Id of the hovered node.
	pub fn hovered(&self) -> Option<&str> {
		self.highlight.hovered()
	}

	/// Pointer entered `id`, or left every node when `None`.
	pub fn hover(&mut self, id: Option<&str>) -> HoverUpdate {
		if let Some(id) = id {
			debug!("hover {id}");
		}
		let cursor = self.highlight.set_hover(id);
		HoverUpdate {
			cursor,
			panel: NodePanel::new(id.and_then(|id| self.node(id))),
		}
	}

	/// Current color of node `id`.
	pub fn node_color(&self, id: &str) -> &str {
		self.highlight
			.node_color(&self.index, &self.config.palette, id)
	}

	/// Renderer value for node `id`, from its degree.
	pub fn node_size(&self, id: &str) -> f64 {
		node_size(self.node(id).and_then(|n| n.degree))
	}

	/// Style for the edge at `ordinal`; unknown ordinals get the plain style.
	pub fn edge_style(&self, ordinal: usize) -> EdgeStyle<'_> {
		let palette = &self.config.palette;
		match self.edge(ordinal) {
			Some(edge) => {
				self.highlight
					.edge_style(palette, self.config.renderer.hover_particles, edge)
			}
			None => EdgeStyle {
				color: &palette.link,
				particles: 0,
			},
		}
	}

	/// Edge clicked: remember it and build its card.
	pub fn select_edge(&mut self, ordinal: usize) -> Option<EdgeCard> {
		let Some(edge) = self.edge(ordinal) else {
			warn!("click on unknown edge #{ordinal}");
			return None;
		};
		debug!("selected edge {}", edge.key());
		let card = EdgeCard::new(edge, &self.data.nodes, &self.index);
		self.selected_edge = Some(ordinal);
		Some(card)
	}

	/// Edge whose card is open.
	pub fn selected_edge(&self) -> Option<&Edge> {
		self.selected_edge.and_then(|i| self.edge(i))
	}

	/// Card closed.
	pub fn close_edge_card(&mut self) {
		self.selected_edge = None;
	}

	/// Key pressed; ignored while typing.
	pub fn key_down(&mut self, key: &str, in_text_entry: bool) {
		self.keys.key_down(key, in_text_entry);
	}

	/// Key released.
	pub fn key_up(&mut self, key: &str) {
		self.keys.key_up(key);
	}

	/// One frame of keyboard navigation.
	pub fn tick_camera<R: CameraRig>(&self, rig: Option<&mut R>) -> TickOutcome {
		self.camera.tick(&self.keys, rig)
	}

	/// Transition framing a node at `position`.
	pub fn fly_to(&self, position: DVec3) -> CameraTransition {
		let transition = fly_to(position, &self.config.navigation);
		debug!(
			"fly to {:?} from {:?}",
			transition.look_at, transition.position
		);
		transition
	}

	/// Run a search query.
	pub fn search(&self, query: &str) -> SearchOutcome {
		let outcome = self.search.query(query);
		if let SearchOutcome::Matches(found) = &outcome {
			debug!("search {query:?}: {} hits", found.len());
		}
		outcome
	}

	/// A search hit was picked: frame it and treat it as hovered.
	pub fn select_search_result(
		&mut self,
		id: &str,
		position: DVec3,
	) -> Option<(CameraTransition, HoverUpdate)> {
		if self.node(id).is_none() {
			warn!("search result {id} is not in the dataset");
			return None;
		}
		let transition = self.fly_to(position);
		Some((transition, self.hover(Some(id))))
	}
}
