//! Viewer settings and their defaults.

use serde::Deserialize;

use super::types::LoadError;

/// Colors used by the style callbacks.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
	/// Default node color.
	pub node: String,
	/// Hovered node.
	pub node_hover: String,
	/// Neighbors of the hovered node.
	pub node_connected: String,
	/// Default link color.
	pub link: String,
	/// Links touching the hovered node.
	pub link_hover: String,
	/// Directional particles.
	pub particle: String,
	/// Scene background.
	pub background: String,
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			node: "#059669".into(),
			node_hover: "#ffe213".into(),
			node_connected: "#e37622".into(),
			link: "rgba(130, 168, 245, 0.8)".into(),
			link_hover: "#ffe213".into(),
			particle: "#ffe213".into(),
			background: "#0a0a0a".into(),
		}
	}
}

/// Keyboard navigation and fly-to tuning.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
	/// World units per frame while a movement key is held.
	pub move_speed: f64,
	/// Radians per frame while a rotation key is held.
	pub rotate_speed: f64,
	/// Standoff between camera and node after a fly-to.
	pub fly_distance: f64,
	/// Fly-to animation length.
	pub fly_duration_ms: f64,
}

impl Default for NavigationConfig {
	fn default() -> Self {
		Self {
			move_speed: 3.0,
			rotate_speed: 0.015,
			fly_distance: 200.0,
			fly_duration_ms: 1500.0,
		}
	}
}

/// Search box behavior.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
	/// Quiet time after the last keystroke before a query runs.
	pub debounce_ms: u64,
	/// Trimmed queries shorter than this clear the result list.
	pub min_query_chars: usize,
	/// Cap on listed hits.
	pub max_results: usize,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			debounce_ms: 200,
			min_query_chars: 2,
			max_results: 15,
		}
	}
}

/// Values handed straight to the 3D renderer and its force engine.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
	/// Node sphere opacity.
	pub node_opacity: f64,
	/// Link line width.
	pub link_width: f64,
	/// Link line opacity.
	pub link_opacity: f64,
	/// Direction arrow length; zero hides arrows.
	pub arrow_length: f64,
	/// Arrow position along the link, 0 at source and 1 at target.
	pub arrow_rel_pos: f64,
	/// Particle size.
	pub particle_width: f64,
	/// Particles on links touching the hovered node.
	pub hover_particles: u32,
	/// Layout ticks run before the first frame.
	pub warmup_ticks: u32,
	/// Layout ticks before the engine stops.
	pub cooldown_ticks: u32,
	/// Wall-clock limit on the layout.
	pub cooldown_time_ms: f64,
	/// d3 alpha decay.
	pub alpha_decay: f64,
	/// d3 velocity decay.
	pub velocity_decay: f64,
	/// Many-body charge; negative repels.
	pub charge_strength: f64,
	/// Rest length of the link force.
	pub link_distance: f64,
	/// Zoom-to-fit animation once the layout settles.
	pub zoom_to_fit_ms: f64,
	/// Padding around the fitted graph.
	pub zoom_to_fit_padding: f64,
	/// Delay before the loading overlay fades.
	pub loading_overlay_ms: u64,
}

impl Default for RendererConfig {
	fn default() -> Self {
		Self {
			node_opacity: 0.9,
			link_width: 2.0,
			link_opacity: 0.5,
			arrow_length: 6.0,
			arrow_rel_pos: 0.5,
			particle_width: 1.2,
			hover_particles: 2,
			warmup_ticks: 80,
			cooldown_ticks: 200,
			cooldown_time_ms: 8000.0,
			alpha_decay: 0.03,
			velocity_decay: 0.4,
			charge_strength: -30.0,
			link_distance: 60.0,
			zoom_to_fit_ms: 1000.0,
			zoom_to_fit_padding: 50.0,
			loading_overlay_ms: 1500,
		}
	}
}

/// Everything tunable about the viewer. Partial JSON overrides the defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
	/// Colors.
	pub palette: Palette,
	/// Keyboard navigation and fly-to.
	pub navigation: NavigationConfig,
	/// Search box.
	pub search: SearchConfig,
	/// Renderer and force engine.
	pub renderer: RendererConfig,
}

impl ViewerConfig {
	/// Parse a (possibly partial) JSON override.
	pub fn from_json(json: &str) -> Result<Self, LoadError> {
		serde_json::from_str(json).map_err(LoadError::Config)
	}
}
