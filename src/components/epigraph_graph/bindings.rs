//! Imports from the `3d-force-graph` bundle (global `ForceGraph3D`) and the
//! bits of three.js it hands back.

use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
	/// A mounted 3D force graph. Setters return the instance for chaining.
	#[derive(Clone, Debug)]
	pub type ForceGraph3D;

	#[wasm_bindgen(constructor)]
	pub fn new(element: &HtmlElement) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = graphData)]
	pub fn graph_data(this: &ForceGraph3D, data: &JsValue) -> ForceGraph3D;

	/// Current data with live node positions.
	#[wasm_bindgen(method, js_name = graphData)]
	pub fn current_graph_data(this: &ForceGraph3D) -> JsValue;

	#[wasm_bindgen(method, js_name = backgroundColor)]
	pub fn background_color(this: &ForceGraph3D, color: &str) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = nodeVal)]
	pub fn node_val(this: &ForceGraph3D, f: &Function) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = nodeColor)]
	pub fn node_color(this: &ForceGraph3D, f: &Function) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = nodeOpacity)]
	pub fn node_opacity(this: &ForceGraph3D, opacity: f64) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = nodeLabel)]
	pub fn node_label(this: &ForceGraph3D, label: &str) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = linkWidth)]
	pub fn link_width(this: &ForceGraph3D, width: f64) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = linkOpacity)]
	pub fn link_opacity(this: &ForceGraph3D, opacity: f64) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = linkColor)]
	pub fn link_color(this: &ForceGraph3D, f: &Function) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = linkDirectionalArrowLength)]
	pub fn link_directional_arrow_length(this: &ForceGraph3D, length: f64) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = linkDirectionalArrowRelPos)]
	pub fn link_directional_arrow_rel_pos(this: &ForceGraph3D, pos: f64) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = linkDirectionalArrowColor)]
	pub fn link_directional_arrow_color(this: &ForceGraph3D, f: &Function) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = linkDirectionalParticles)]
	pub fn link_directional_particles(this: &ForceGraph3D, f: &Function) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = linkDirectionalParticleWidth)]
	pub fn link_directional_particle_width(this: &ForceGraph3D, width: f64) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = linkDirectionalParticleColor)]
	pub fn link_directional_particle_color(this: &ForceGraph3D, f: &Function) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = onNodeHover)]
	pub fn on_node_hover(this: &ForceGraph3D, f: &Function) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = onNodeClick)]
	pub fn on_node_click(this: &ForceGraph3D, f: &Function) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = onLinkClick)]
	pub fn on_link_click(this: &ForceGraph3D, f: &Function) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = onEngineStop)]
	pub fn on_engine_stop(this: &ForceGraph3D, f: &Function) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = warmupTicks)]
	pub fn warmup_ticks(this: &ForceGraph3D, ticks: u32) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = cooldownTicks)]
	pub fn cooldown_ticks(this: &ForceGraph3D, ticks: u32) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = cooldownTime)]
	pub fn cooldown_time(this: &ForceGraph3D, ms: f64) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = d3AlphaDecay)]
	pub fn d3_alpha_decay(this: &ForceGraph3D, decay: f64) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = d3VelocityDecay)]
	pub fn d3_velocity_decay(this: &ForceGraph3D, decay: f64) -> ForceGraph3D;

	#[wasm_bindgen(method, js_name = d3Force)]
	pub fn d3_force(this: &ForceGraph3D, name: &str) -> Option<D3Force>;

	#[wasm_bindgen(method, js_name = zoomToFit)]
	pub fn zoom_to_fit(this: &ForceGraph3D, duration_ms: f64, padding: f64);

	/// Animate the camera to `position`, looking at `look_at`.
	#[wasm_bindgen(method, js_name = cameraPosition)]
	pub fn camera_position(this: &ForceGraph3D, position: &JsValue, look_at: &JsValue, duration_ms: f64);

	#[wasm_bindgen(method)]
	pub fn camera(this: &ForceGraph3D) -> Option<Camera>;

	#[wasm_bindgen(method)]
	pub fn controls(this: &ForceGraph3D) -> Option<OrbitControls>;

	/// A d3 force (`charge`, `link`, ...).
	#[derive(Clone, Debug)]
	pub type D3Force;

	#[wasm_bindgen(method)]
	pub fn strength(this: &D3Force, strength: f64) -> D3Force;

	#[wasm_bindgen(method)]
	pub fn distance(this: &D3Force, distance: f64) -> D3Force;

	/// `THREE.PerspectiveCamera`.
	#[derive(Clone, Debug)]
	pub type Camera;

	#[wasm_bindgen(method, getter)]
	pub fn position(this: &Camera) -> Vector3;

	#[wasm_bindgen(method, getter)]
	pub fn up(this: &Camera) -> Vector3;

	#[wasm_bindgen(method, js_name = getWorldDirection)]
	pub fn get_world_direction(this: &Camera, target: &Vector3) -> Vector3;

	#[wasm_bindgen(method, js_name = lookAt)]
	pub fn look_at(this: &Camera, x: f64, y: f64, z: f64);

	/// `THREE.Vector3`.
	#[derive(Clone, Debug)]
	pub type Vector3;

	#[wasm_bindgen(method, getter)]
	pub fn x(this: &Vector3) -> f64;

	#[wasm_bindgen(method, getter)]
	pub fn y(this: &Vector3) -> f64;

	#[wasm_bindgen(method, getter)]
	pub fn z(this: &Vector3) -> f64;

	#[wasm_bindgen(method)]
	pub fn set(this: &Vector3, x: f64, y: f64, z: f64) -> Vector3;

	#[wasm_bindgen(method, js_name = clone)]
	pub fn duplicate(this: &Vector3) -> Vector3;

	/// The orbit/trackball controls attached to the camera.
	#[derive(Clone, Debug)]
	pub type OrbitControls;

	#[wasm_bindgen(method, getter)]
	pub fn target(this: &OrbitControls) -> Option<Vector3>;
}
