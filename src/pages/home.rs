use leptos::prelude::*;
use log::info;

use crate::components::epigraph_graph::{EpigraphGraph, GraphData, LoadError, ViewerConfig};

const DATASET: &str = include_str!("../../data/graph.json");
const VIEWER_CONFIG: &str = include_str!("../../data/viewer.json");

/// Parse the bundled dataset and viewer overrides.
fn load() -> Result<(GraphData, ViewerConfig), LoadError> {
	let data = GraphData::from_json(DATASET)?;
	let config = ViewerConfig::from_json(VIEWER_CONFIG)?;
	info!(
		"dataset loaded: {} works, {} epigraphs",
		data.nodes.len(),
		data.links.len()
	);
	Ok((data, config))
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let loaded = load();

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! The graph could not be loaded."</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{loaded
				.map(|(data, config)| {
					view! {
						<div class="fullscreen-graph">
							<EpigraphGraph data=data config=config />
							<div class="graph-overlay">
								<h1>"Epigraph Graph"</h1>
								<p class="subtitle">
									"Works linked by the epigraphs they borrow. Hover a node for details, click an edge to read the epigraph."
								</p>
							</div>
						</div>
					}
				})}
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::epigraph_graph::GraphSession;
	use crate::components::epigraph_graph::search::SearchOutcome;

	#[test]
	fn bundled_dataset_loads() {
		let (data, config) = load().unwrap();
		assert_eq!(config, ViewerConfig::default());

		let session = GraphSession::new(data, config);
		let SearchOutcome::Matches(eliot) = session.search("eliot") else {
			panic!("expected matches");
		};
		assert_eq!(eliot.len(), 3);
		for link in &session.data().links {
			assert!(session.node(&link.source).is_some(), "{}", link.source);
			assert!(session.node(&link.target).is_some(), "{}", link.target);
		}
	}
}
