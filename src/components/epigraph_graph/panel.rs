//! Detail panel models and their markup.
//!
//! Models are plain data; `to_html` renders them with every dataset string
//! escaped. The page injects the markup as-is, so nothing else may build
//! these strings.

use std::fmt::Write;

use super::adjacency::AdjacencyIndex;
use super::search::ResultList;
use super::types::{Edge, Node};

const PLACEHOLDER: &str = "Hover over a node to see details";

/// Escape for element text content.
pub fn escape_text(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	for c in s.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			c => out.push(c),
		}
	}
	out
}

/// Escape for a quoted attribute value.
pub fn escape_attr(s: &str) -> String {
	escape_text(s).replace('\'', "&#39;")
}

/// Contents of the hover panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NodePanel {
	/// Nothing hovered.
	#[default]
	Placeholder,
	/// The hovered work.
	Work {
		/// Title of the work.
		title: String,
		/// Author of the work.
		author: String,
		/// Year, genre, country and medium joined with ` · `; absent when
		/// none of them is known.
		meta: Option<String>,
		/// Degree.
		connections: u32,
	},
}

impl NodePanel {
	/// Panel for `node`, or the placeholder.
	pub fn new(node: Option<&Node>) -> Self {
		let Some(node) = node else {
			return NodePanel::Placeholder;
		};
		let parts: Vec<String> = node
			.year
			.map(|y| y.to_string())
			.into_iter()
			.chain(node.genre.clone())
			.chain(node.country.clone())
			.chain(node.medium.clone())
			.collect();
		NodePanel::Work {
			title: node.title.clone(),
			author: node.author.clone(),
			meta: (!parts.is_empty()).then(|| parts.join(" · ")),
			connections: node.degree.unwrap_or(0),
		}
	}

	/// Escaped panel markup.
	pub fn to_html(&self) -> String {
		match self {
			NodePanel::Placeholder => format!(r#"<h2 class="np-default-msg">{PLACEHOLDER}</h2>"#),
			NodePanel::Work {
				title,
				author,
				meta,
				connections,
			} => {
				let mut html = format!(
					"<h2>{}</h2><h3>by {}</h3>",
					escape_text(title),
					escape_text(author)
				);
				if let Some(meta) = meta {
					let _ = write!(html, r#"<div class="meta">{}</div>"#, escape_text(meta));
				}
				let _ = write!(
					html,
					r#"<div class="meta connections">Connections: {connections}</div>"#
				);
				html
			}
		}
	}
}

/// One end of an edge as shown on the card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkRef {
	/// Title, or the raw id when the node is unknown.
	pub title: String,
	/// `None` when the node is unknown.
	pub author: Option<String>,
	/// Publication year.
	pub year: Option<i32>,
}

impl WorkRef {
	fn resolve(id: &str, nodes: &[Node], index: &AdjacencyIndex) -> (Self, Option<String>) {
		match index.node_index(id).and_then(|i| nodes.get(i)) {
			Some(node) => (
				Self {
					title: node.title.clone(),
					author: Some(node.author.clone()),
					year: node.year,
				},
				node.genre.clone(),
			),
			None => (
				Self {
					title: id.to_owned(),
					author: None,
					year: None,
				},
				None,
			),
		}
	}

	fn write_html(&self, html: &mut String, label: &str) {
		let _ = write!(
			html,
			r#"<div class="label">{label}</div><div class="value"><strong>{}</strong><br/>by {}"#,
			escape_text(&self.title),
			escape_text(self.author.as_deref().unwrap_or("Unknown")),
		);
		if let Some(year) = self.year {
			let _ = write!(html, " ({year})");
		}
		html.push_str("</div>");
	}
}

/// Card shown after clicking an edge: source, epigraph, then target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeCard {
	/// Cited work.
	pub source: WorkRef,
	/// Quoted text.
	pub epigraph: Option<String>,
	/// Citing work.
	pub target: WorkRef,
	/// Genre of the citing work.
	pub target_genre: Option<String>,
}

impl EdgeCard {
	/// Endpoints missing from the dataset fall back to their raw ids.
	pub fn new(edge: &Edge, nodes: &[Node], index: &AdjacencyIndex) -> Self {
		let (source, _) = WorkRef::resolve(&edge.source, nodes, index);
		let (target, target_genre) = WorkRef::resolve(&edge.target, nodes, index);
		Self {
			source,
			epigraph: edge.epigraph.clone(),
			target,
			target_genre,
		}
	}

	/// Escaped card markup.
	pub fn to_html(&self) -> String {
		let mut html = String::new();
		self.source.write_html(&mut html, "Epigraph Source");
		if let Some(text) = &self.epigraph {
			let _ = write!(
				html,
				r#"<div class="divider"></div><div class="label">Epigraph Text</div><div class="epigraph-text">"{}"</div>"#,
				escape_text(text)
			);
		}
		html.push_str(r#"<div class="arrow-indicator">↓</div>"#);
		self.target.write_html(&mut html, "Referenced By");
		if let Some(genre) = &self.target_genre {
			let _ = write!(
				html,
				r#"<div class="value genre">Genre: {}</div>"#,
				escape_text(genre)
			);
		}
		html
	}
}

/// Markup for the search dropdown.
pub fn search_results_html(list: &ResultList) -> String {
	match list {
		ResultList::Empty => String::new(),
		ResultList::NoMatches => r#"<div class="search-empty">No results found</div>"#.into(),
		ResultList::Hits(hits) => {
			let mut html = String::new();
			for hit in hits {
				let _ = write!(
					html,
					r#"<div class="search-result-item" data-id="{}"><div class="sr-title">{}</div><div class="sr-author">{}"#,
					escape_attr(&hit.id),
					escape_text(&hit.title),
					escape_text(&hit.author),
				);
				if let Some(year) = hit.year {
					let _ = write!(html, " · {year}");
				}
				html.push_str("</div></div>");
			}
			html
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::epigraph_graph::search::SearchHit;

	fn work(id: &str) -> Node {
		Node {
			id: id.into(),
			title: format!("Title {id}"),
			author: format!("Author {id}"),
			..Node::default()
		}
	}

	#[test]
	fn escaping_by_context() {
		let input = "O'Brien & <Sons>";
		assert_eq!(escape_attr(input), "O&#39;Brien &amp; &lt;Sons&gt;");
		assert_eq!(escape_text(input), "O'Brien &amp; &lt;Sons&gt;");
		assert_eq!(escape_text(r#"say "hi""#), "say &quot;hi&quot;");
		assert_eq!(escape_text("&amp;"), "&amp;amp;");
	}

	#[test]
	fn placeholder_without_node() {
		assert_eq!(NodePanel::new(None), NodePanel::Placeholder);
		assert!(NodePanel::Placeholder.to_html().contains(PLACEHOLDER));
	}

	#[test]
	fn meta_line_joins_known_fields_in_order() {
		let node = Node {
			year: Some(1922),
			country: Some("Ireland".into()),
			medium: Some("Novel".into()),
			degree: Some(4),
			..work("u")
		};
		let NodePanel::Work {
			meta, connections, ..
		} = NodePanel::new(Some(&node))
		else {
			panic!("expected a work panel");
		};
		assert_eq!(meta.as_deref(), Some("1922 · Ireland · Novel"));
		assert_eq!(connections, 4);
	}

	#[test]
	fn meta_line_omitted_when_empty() {
		let panel = NodePanel::new(Some(&work("x")));
		assert!(matches!(panel, NodePanel::Work { meta: None, connections: 0, .. }));
		let html = panel.to_html();
		assert_eq!(html.matches(r#"class="meta""#).count(), 0);
		assert!(html.contains("Connections: 0"));
	}

	#[test]
	fn panel_markup_is_escaped() {
		let node = Node {
			title: "<script>".into(),
			author: "A & B".into(),
			..work("x")
		};
		let html = NodePanel::new(Some(&node)).to_html();
		assert!(html.contains("<h2>&lt;script&gt;</h2>"));
		assert!(html.contains("by A &amp; B"));
	}

	#[test]
	fn edge_card_sections_in_order() {
		let nodes = vec![
			Node {
				year: Some(1611),
				..work("s")
			},
			Node {
				genre: Some("Modernist".into()),
				..work("t")
			},
		];
		let edge = Edge {
			source: "s".into(),
			target: "t".into(),
			epigraph: Some("Full fathom five".into()),
		};
		let index = AdjacencyIndex::build(&nodes, std::slice::from_ref(&edge));
		let card = EdgeCard::new(&edge, &nodes, &index);
		assert_eq!(card.target_genre.as_deref(), Some("Modernist"));

		let html = card.to_html();
		assert!(html.contains("by Author s (1611)"));
		let source = html.find("Title s").unwrap();
		let quote = html.find("Full fathom five").unwrap();
		let target = html.find("Title t").unwrap();
		assert!(source < quote && quote < target);
		assert!(html.contains("Genre: Modernist"));
	}

	#[test]
	fn dangling_edge_shows_raw_ids() {
		let edge = Edge {
			source: "ghost-1".into(),
			target: "ghost-2".into(),
			epigraph: None,
		};
		let index = AdjacencyIndex::build(&[], std::slice::from_ref(&edge));
		let card = EdgeCard::new(&edge, &[], &index);
		assert_eq!(card.source.title, "ghost-1");
		assert_eq!(card.target.title, "ghost-2");

		let html = card.to_html();
		assert!(html.contains("by Unknown"));
		assert!(!html.contains("Epigraph Text"));
		assert!(!html.contains("Genre:"));
	}

	#[test]
	fn search_items_carry_attr_escaped_ids() {
		let list = ResultList::Hits(vec![SearchHit {
			id: "O'Brien|||x".into(),
			title: "T".into(),
			author: "A".into(),
			year: Some(1990),
		}]);
		let html = search_results_html(&list);
		assert!(html.contains(r#"data-id="O&#39;Brien|||x""#));
		assert!(html.contains("A · 1990"));
		assert!(search_results_html(&ResultList::NoMatches).contains("No results found"));
		assert!(search_results_html(&ResultList::Empty).is_empty());
	}
}
