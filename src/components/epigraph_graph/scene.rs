//! Glue between the session and the 3D renderer.

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec3;
use js_sys::{Function, Reflect};
use log::warn;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use super::bindings::{Camera, ForceGraph3D, OrbitControls, Vector3};
use super::camera::{CameraRig, CameraTransition};
use super::panel::{EdgeCard, NodePanel};
use super::session::GraphSession;

/// What the renderer receives: ids only. Styling resolves through the session.
#[derive(Serialize)]
struct ScenePayload<'a> {
	nodes: Vec<SceneNode<'a>>,
	links: Vec<SceneLink<'a>>,
}

#[derive(Serialize)]
struct SceneNode<'a> {
	id: &'a str,
}

#[derive(Debug, PartialEq, Serialize)]
struct SceneLink<'a> {
	source: &'a str,
	target: &'a str,
	ordinal: usize,
}

/// Links whose endpoints both exist, keeping their dataset ordinals. The
/// layout engine rejects links to unknown nodes.
fn scene_links(session: &GraphSession) -> Vec<SceneLink<'_>> {
	session
		.data()
		.links
		.iter()
		.enumerate()
		.filter(|(ordinal, l)| {
			let known = session.node(&l.source).is_some() && session.node(&l.target).is_some();
			if !known {
				warn!("skipping dangling edge #{ordinal} {}", l.key());
			}
			known
		})
		.map(|(ordinal, l)| SceneLink {
			source: &l.source,
			target: &l.target,
			ordinal,
		})
		.collect()
}

/// Build the JS `{nodes, links}` object handed to `graphData`.
pub fn payload(session: &GraphSession) -> Result<JsValue, serde_wasm_bindgen::Error> {
	let payload = ScenePayload {
		nodes: session
			.data()
			.nodes
			.iter()
			.map(|n| SceneNode { id: &n.id })
			.collect(),
		links: scene_links(session),
	};
	serde_wasm_bindgen::to_value(&payload)
}

fn prop(obj: &JsValue, key: &str) -> JsValue {
	Reflect::get(obj, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

/// Id of a renderer node, `None` for null/undefined.
pub fn node_id(node: &JsValue) -> Option<String> {
	if node.is_null() || node.is_undefined() {
		return None;
	}
	prop(node, "id").as_string()
}

/// Live layout position; missing coordinates count as zero.
pub fn node_position(node: &JsValue) -> DVec3 {
	let axis = |k| prop(node, k).as_f64().unwrap_or(0.0);
	DVec3::new(axis("x"), axis("y"), axis("z"))
}

fn link_ordinal(link: &JsValue) -> Option<usize> {
	prop(link, "ordinal").as_f64().map(|n| n as usize)
}

/// Find a node by id in the renderer's current data.
pub fn find_node(graph: &ForceGraph3D, id: &str) -> Option<JsValue> {
	let nodes = prop(&graph.current_graph_data(), "nodes");
	let nodes: &js_sys::Array = nodes.dyn_ref()?;
	nodes
		.iter()
		.find(|n| node_id(n).as_deref() == Some(id))
}

fn xyz(v: DVec3) -> JsValue {
	let obj = js_sys::Object::new();
	for (k, n) in [("x", v.x), ("y", v.y), ("z", v.z)] {
		let _ = Reflect::set(&obj, &JsValue::from_str(k), &JsValue::from_f64(n));
	}
	obj.into()
}

/// Hand a transition to the renderer's own camera animation.
pub fn animate_camera(graph: &ForceGraph3D, t: &CameraTransition) {
	graph.camera_position(&xyz(t.position), &xyz(t.look_at), t.duration_ms);
}

/// Long-lived JS callback. The renderer keeps it for the page's lifetime.
fn callback(f: impl FnMut(JsValue) -> JsValue + 'static) -> Function {
	Closure::<dyn FnMut(JsValue) -> JsValue>::new(f)
		.into_js_value()
		.unchecked_into()
}

fn no_arg_callback(f: impl FnMut() + 'static) -> Function {
	Closure::<dyn FnMut()>::new(f)
		.into_js_value()
		.unchecked_into()
}

/// Camera and controls of a live renderer.
pub struct JsCameraRig {
	camera: Camera,
	controls: Option<OrbitControls>,
}

impl JsCameraRig {
	/// `None` until the renderer has created its camera.
	pub fn attach(graph: &ForceGraph3D) -> Option<Self> {
		let camera = graph.camera()?;
		Some(Self {
			camera,
			controls: graph.controls(),
		})
	}
}

fn to_dvec3(v: &Vector3) -> DVec3 {
	DVec3::new(v.x(), v.y(), v.z())
}

impl CameraRig for JsCameraRig {
	fn position(&self) -> DVec3 {
		to_dvec3(&self.camera.position())
	}

	fn set_position(&mut self, p: DVec3) {
		self.camera.position().set(p.x, p.y, p.z);
	}

	fn forward(&self) -> DVec3 {
		let scratch = self.camera.position().duplicate();
		to_dvec3(&self.camera.get_world_direction(&scratch))
	}

	fn up(&self) -> DVec3 {
		to_dvec3(&self.camera.up())
	}

	fn target(&self) -> Option<DVec3> {
		self.controls
			.as_ref()
			.and_then(OrbitControls::target)
			.map(|t| to_dvec3(&t))
	}

	fn set_target(&mut self, t: DVec3) {
		if let Some(target) = self.controls.as_ref().and_then(OrbitControls::target) {
			target.set(t.x, t.y, t.z);
		}
	}

	fn look_at(&mut self, t: DVec3) {
		self.camera.look_at(t.x, t.y, t.z);
	}
}

/// UI updates the renderer callbacks push out to the page.
pub struct SceneEvents {
	pub on_hover: Box<dyn Fn(&'static str, NodePanel)>,
	pub on_edge: Box<dyn Fn(EdgeCard)>,
}

/// Mount the renderer in `element` and wire every callback to `session`.
pub fn mount(
	element: &HtmlElement,
	session: Rc<RefCell<GraphSession>>,
	events: SceneEvents,
) -> Result<ForceGraph3D, JsValue> {
	let s = session.borrow();
	let config = s.config().clone();
	let data = payload(&s)?;
	drop(s);

	let (palette, renderer) = (&config.palette, &config.renderer);
	let graph = ForceGraph3D::new(element);
	let graph_handle = graph.clone();

	let size_session = session.clone();
	let color_session = session.clone();
	let link_session = session.clone();
	let arrow_session = session.clone();
	let particle_session = session.clone();
	let hover_session = session.clone();
	let click_session = session.clone();
	let edge_session = session;
	let particle_color = JsValue::from_str(&palette.particle);
	let (zoom_ms, zoom_padding) = (renderer.zoom_to_fit_ms, renderer.zoom_to_fit_padding);
	let SceneEvents { on_hover, on_edge } = events;

	let link_color = |s: &Rc<RefCell<GraphSession>>, link: &JsValue| -> JsValue {
		let s = s.borrow();
		match link_ordinal(link) {
			Some(i) => JsValue::from_str(s.edge_style(i).color),
			None => JsValue::from_str(&s.config().palette.link),
		}
	};

	graph
		.graph_data(&data)
		.background_color(&palette.background)
		.node_val(&callback(move |node| {
			let size = node_id(&node).map_or(1.0, |id| size_session.borrow().node_size(&id));
			JsValue::from_f64(size)
		}))
		.node_color(&callback(move |node| {
			let s = color_session.borrow();
			let id = node_id(&node).unwrap_or_default();
			JsValue::from_str(s.node_color(&id))
		}))
		.node_opacity(renderer.node_opacity)
		.node_label("")
		.link_width(renderer.link_width)
		.link_opacity(renderer.link_opacity)
		.link_directional_arrow_length(renderer.arrow_length)
		.link_directional_arrow_rel_pos(renderer.arrow_rel_pos)
		.link_directional_arrow_color(&callback(move |link| link_color(&arrow_session, &link)))
		.link_color(&callback(move |link| link_color(&link_session, &link)))
		.link_directional_particles(&callback(move |link| {
			let s = particle_session.borrow();
			let particles = link_ordinal(&link).map_or(0, |i| s.edge_style(i).particles);
			JsValue::from_f64(f64::from(particles))
		}))
		.link_directional_particle_width(renderer.particle_width)
		.link_directional_particle_color(&callback(move |_| particle_color.clone()))
		.on_node_hover(&callback(move |node| {
			let id = node_id(&node);
			let update = hover_session.borrow_mut().hover(id.as_deref());
			on_hover(update.cursor.as_css(), update.panel);
			JsValue::UNDEFINED
		}))
		.on_node_click(&callback(move |node| {
			if node_id(&node).is_some() {
				let t = click_session.borrow().fly_to(node_position(&node));
				animate_camera(&graph_handle, &t);
			}
			JsValue::UNDEFINED
		}))
		.on_link_click(&callback(move |link| {
			let card = link_ordinal(&link).and_then(|i| edge_session.borrow_mut().select_edge(i));
			match card {
				Some(card) => on_edge(card),
				None => warn!("edge click without a known ordinal"),
			}
			JsValue::UNDEFINED
		}))
		.warmup_ticks(renderer.warmup_ticks)
		.cooldown_ticks(renderer.cooldown_ticks)
		.cooldown_time(renderer.cooldown_time_ms)
		.d3_alpha_decay(renderer.alpha_decay)
		.d3_velocity_decay(renderer.velocity_decay);

	let zoom_handle = graph.clone();
	graph.on_engine_stop(&no_arg_callback(move || {
		zoom_handle.zoom_to_fit(zoom_ms, zoom_padding);
	}));

	match graph.d3_force("charge") {
		Some(charge) => {
			charge.strength(renderer.charge_strength);
		}
		None => warn!("renderer has no charge force"),
	}
	match graph.d3_force("link") {
		Some(link) => {
			link.distance(renderer.link_distance);
		}
		None => warn!("renderer has no link force"),
	}

	Ok(graph)
}
