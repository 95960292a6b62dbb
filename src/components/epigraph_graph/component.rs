use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, HtmlElement, KeyboardEvent, MouseEvent};

use super::bindings::ForceGraph3D;
use super::config::ViewerConfig;
use super::debounce::{BrowserScheduler, Debouncer};
use super::panel::{EdgeCard, NodePanel, search_results_html};
use super::scene::{self, JsCameraRig, SceneEvents};
use super::search::SearchResults;
use super::session::GraphSession;
use super::types::GraphData;

type Listener = Closure<dyn FnMut(Event)>;

fn is_text_entry(target: Option<EventTarget>) -> bool {
	target
		.and_then(|t| t.dyn_into::<Element>().ok())
		.is_some_and(|el| {
			let tag = el.tag_name();
			tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea")
		})
}

fn set_body_cursor(cursor: &str) {
	match document().body() {
		Some(body) => {
			let _ = body.style().set_property("cursor", cursor);
		}
		None => warn!("no <body> to set cursor on"),
	}
}

fn listen(target: &EventTarget, event: &str, listeners: &RefCell<Vec<Listener>>, f: impl FnMut(Event) + 'static) {
	let cb = Listener::new(f);
	if let Err(e) = target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
		warn!("failed to listen for {event}: {e:?}");
		return;
	}
	listeners.borrow_mut().push(cb);
}

/// 3D citation graph with hover panel, edge card, search box and keyboard
/// navigation.
#[component]
pub fn EpigraphGraph(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional)] config: ViewerConfig,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let input_ref = NodeRef::<leptos::html::Input>::new();

	let node_panel = RwSignal::new(NodePanel::Placeholder);
	let edge_card = RwSignal::new(None::<EdgeCard>);
	let results = RwSignal::new(SearchResults::default());
	let loaded = RwSignal::new(false);

	let session = Rc::new(RefCell::new(GraphSession::new(
		data.get_untracked(),
		config.clone(),
	)));
	let graph: Rc<RefCell<Option<ForceGraph3D>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let listeners: Rc<RefCell<Vec<Listener>>> = Rc::new(RefCell::new(Vec::new()));
	let debouncer = Rc::new(Debouncer::new(
		BrowserScheduler,
		Duration::from_millis(config.search.debounce_ms),
	));

	let (session_init, graph_init, animate_init, listeners_init, config_init) = (
		session.clone(),
		graph.clone(),
		animate.clone(),
		listeners.clone(),
		config.clone(),
	);

	Effect::new(move |_| {
		let data = data.get();
		let Some(container) = container_ref.get() else {
			return;
		};

		// Dataset swapped after mount: rebuild the session, keep the renderer.
		if let Some(g) = graph_init.borrow().as_ref() {
			info!(
				"reloading graph: {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			*session_init.borrow_mut() = GraphSession::new(data, config_init.clone());
			node_panel.set(NodePanel::Placeholder);
			edge_card.set(None);
			results.set(SearchResults::default());
			match scene::payload(&session_init.borrow()) {
				Ok(payload) => {
					g.graph_data(&payload);
				}
				Err(e) => warn!("failed to serialize graph: {e}"),
			}
			return;
		}

		let element: HtmlElement = container.into();
		let events = SceneEvents {
			on_hover: Box::new(move |cursor, panel| {
				set_body_cursor(cursor);
				node_panel.set(panel);
			}),
			on_edge: Box::new(move |card| edge_card.set(Some(card))),
		};
		match scene::mount(&element, session_init.clone(), events) {
			Ok(g) => *graph_init.borrow_mut() = Some(g),
			Err(e) => {
				warn!("failed to mount 3D graph: {e:?}");
				return;
			}
		}
		info!(
			"graph mounted: {} nodes, {} links",
			data.nodes.len(),
			data.links.len()
		);

		set_timeout(
			move || loaded.set(true),
			Duration::from_millis(config_init.renderer.loading_overlay_ms),
		);

		let doc: EventTarget = document().into();
		let session_kd = session_init.clone();
		listen(&doc, "keydown", &listeners_init, move |ev| {
			if let Some(key) = ev.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
				session_kd
					.borrow_mut()
					.key_down(&key, is_text_entry(ev.target()));
			}
		});
		let session_ku = session_init.clone();
		listen(&doc, "keyup", &listeners_init, move |ev| {
			if let Some(key) = ev.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
				session_ku.borrow_mut().key_up(&key);
			}
		});
		listen(&doc, "click", &listeners_init, move |ev| {
			let inside = ev
				.target()
				.and_then(|t| t.dyn_into::<Element>().ok())
				.and_then(|el| el.closest("#search-container").ok().flatten())
				.is_some();
			if !inside {
				results.update(|r| r.hide());
			}
		});

		// Keyboard navigation runs every frame, camera or not.
		let (session_anim, graph_anim, animate_inner) =
			(session_init.clone(), graph_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let mut rig = graph_anim.borrow().as_ref().and_then(JsCameraRig::attach);
			session_anim.borrow().tick_camera(rig.as_mut());
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = window().request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window().request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let session_search = session.clone();
	let on_search_input = move || {
		let Some(input) = input_ref.get() else {
			return;
		};
		let text = input.value();
		let session = session_search.clone();
		debouncer.call(move || {
			let s = session.borrow();
			let outcome = s.search(&text);
			results.update(|r| r.show(outcome, &s.data().nodes));
		});
	};

	let (session_pick, graph_pick) = (session.clone(), graph.clone());
	let on_result_click = move |ev: MouseEvent| {
		let item = ev
			.target()
			.and_then(|t| t.dyn_into::<Element>().ok())
			.and_then(|el| el.closest(".search-result-item").ok().flatten());
		let Some(id) = item.and_then(|el| el.get_attribute("data-id")) else {
			return;
		};

		if let Some(g) = graph_pick.borrow().as_ref() {
			match scene::find_node(g, &id) {
				Some(node) => {
					let picked = session_pick
						.borrow_mut()
						.select_search_result(&id, scene::node_position(&node));
					if let Some((transition, update)) = picked {
						scene::animate_camera(g, &transition);
						node_panel.set(update.panel);
					}
				}
				None => warn!("search result {id} has no rendered node"),
			}
		}
		results.update(|r| r.hide());
		if let Some(input) = input_ref.get() {
			input.set_value("");
		}
	};

	let session_close = session;
	let on_close_card = move |_: MouseEvent| {
		session_close.borrow_mut().close_edge_card();
		edge_card.set(None);
	};

	view! {
		<div class="epigraph-graph">
			<div node_ref=container_ref class="graph-container"></div>

			<div class="loading-overlay" class:hidden=move || loaded.get()>
				<div class="spinner"></div>
				<p>"Loading graph…"</p>
			</div>

			<div id="search-container" class="search-container">
				<input
					node_ref=input_ref
					type="text"
					class="search-input"
					placeholder="Search works or authors…"
					autocomplete="off"
					on:input=move |_| on_search_input()
					on:keydown=|ev: KeyboardEvent| ev.stop_propagation()
				/>
				<div
					class="search-results"
					class:visible=move || results.with(|r| r.visible)
					inner_html=move || results.with(|r| search_results_html(&r.content))
					on:click=on_result_click
				></div>
			</div>

			<div class="node-panel" inner_html=move || node_panel.with(NodePanel::to_html)></div>

			<div class="edge-card" class:visible=move || edge_card.with(Option::is_some)>
				<button class="close-btn" on:click=on_close_card>
					"×"
				</button>
				<div
					class="edge-card-body"
					inner_html=move || {
						edge_card.with(|c| c.as_ref().map(EdgeCard::to_html).unwrap_or_default())
					}
				></div>
			</div>

			<p class="controls-hint">"W A S D to move · arrow keys to orbit · click a node to fly to it"</p>
		</div>
	}
}
