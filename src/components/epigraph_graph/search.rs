//! Title and author search.

use super::config::SearchConfig;
use super::types::Node;

/// Substring search over titles and authors.
#[derive(Clone, Debug)]
pub struct SearchIndex {
	min_chars: usize,
	limit: usize,
	/// Lowercased `(title, author)` per node, in dataset order.
	haystack: Vec<(String, String)>,
}

/// Outcome of running a query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
	/// Query too short: clear and hide the result list.
	Cleared,
	/// Dataset positions of the matches, in dataset order, capped.
	Matches(Vec<usize>),
}

impl SearchIndex {
	/// Index `nodes` in dataset order.
	pub fn new(nodes: &[Node], config: &SearchConfig) -> Self {
		let haystack = nodes
			.iter()
			.map(|n| (n.title.to_lowercase(), n.author.to_lowercase()))
			.collect();
		Self {
			min_chars: config.min_query_chars,
			limit: config.max_results,
			haystack,
		}
	}

	/// Case-insensitive substring match on title or author.
	pub fn query(&self, text: &str) -> SearchOutcome {
		let needle = text.trim().to_lowercase();
		if needle.chars().count() < self.min_chars {
			return SearchOutcome::Cleared;
		}
		let matches = self
			.haystack
			.iter()
			.enumerate()
			.filter(|(_, (title, author))| title.contains(&needle) || author.contains(&needle))
			.map(|(i, _)| i)
			.take(self.limit)
			.collect();
		SearchOutcome::Matches(matches)
	}
}

/// One rendered search hit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchHit {
	/// Node id, carried as `data-id`.
	pub id: String,
	/// Title of the work.
	pub title: String,
	/// Author of the work.
	pub author: String,
	/// Publication year.
	pub year: Option<i32>,
}

impl From<&Node> for SearchHit {
	fn from(node: &Node) -> Self {
		Self {
			id: node.id.clone(),
			title: node.title.clone(),
			author: node.author.clone(),
			year: node.year,
		}
	}
}

/// What the result list holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ResultList {
	/// Nothing to show.
	#[default]
	Empty,
	/// A query ran and found nothing.
	NoMatches,
	/// Matches in dataset order.
	Hits(Vec<SearchHit>),
}

/// Result dropdown. Content and visibility change independently: an outside
/// click hides the list but keeps what it shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResults {
	/// What the list shows.
	pub content: ResultList,
	/// Whether the dropdown is open.
	pub visible: bool,
}

impl SearchResults {
	/// Apply an executed query.
	pub fn show(&mut self, outcome: SearchOutcome, nodes: &[Node]) {
		match outcome {
			SearchOutcome::Cleared => {
				self.clear();
				self.hide();
			}
			SearchOutcome::Matches(found) if found.is_empty() => {
				self.content = ResultList::NoMatches;
				self.visible = true;
			}
			SearchOutcome::Matches(found) => {
				let hits = found
					.into_iter()
					.filter_map(|i| nodes.get(i))
					.map(SearchHit::from)
					.collect();
				self.content = ResultList::Hits(hits);
				self.visible = true;
			}
		}
	}

	/// Empty the list. Visibility is left alone.
	pub fn clear(&mut self) {
		self.content = ResultList::Empty;
	}

	/// Close the dropdown, keeping its content.
	pub fn hide(&mut self) {
		self.visible = false;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn work(id: &str, title: &str, author: &str) -> Node {
		Node {
			id: id.into(),
			title: title.into(),
			author: author.into(),
			..Node::default()
		}
	}

	fn index(nodes: &[Node]) -> SearchIndex {
		SearchIndex::new(nodes, &SearchConfig::default())
	}

	#[test]
	fn matches_title_or_author() {
		let nodes = vec![
			work("1", "Borges' Labyrinth", "Someone"),
			work("2", "Ficciones", "Jorge Luis Borges"),
			work("3", "Unrelated", "Nobody"),
		];
		assert_eq!(index(&nodes).query("bor"), SearchOutcome::Matches(vec![0, 1]));
		assert_eq!(index(&nodes).query("  BOR "), SearchOutcome::Matches(vec![0, 1]));
	}

	#[test]
	fn results_are_capped_in_dataset_order() {
		let nodes: Vec<Node> = (0..100)
			.map(|i| work(&i.to_string(), &format!("Book {i}"), "Anon"))
			.collect();
		let SearchOutcome::Matches(found) = index(&nodes).query("book") else {
			panic!("expected matches");
		};
		assert_eq!(found, (0..15).collect::<Vec<_>>());
	}

	#[test]
	fn short_queries_clear() {
		let nodes = vec![work("1", "A", "B")];
		assert_eq!(index(&nodes).query("a"), SearchOutcome::Cleared);
		assert_eq!(index(&nodes).query("  a  "), SearchOutcome::Cleared);
		assert_eq!(index(&nodes).query(""), SearchOutcome::Cleared);
	}

	#[test]
	fn no_matches_is_visible() {
		let nodes = vec![work("1", "Ulysses", "Joyce")];
		let mut results = SearchResults::default();
		results.show(index(&nodes).query("zz"), &nodes);
		assert_eq!(results.content, ResultList::NoMatches);
		assert!(results.visible);
	}

	#[test]
	fn hide_keeps_content_and_clear_keeps_visibility() {
		let nodes = vec![work("1", "Ulysses", "Joyce")];
		let mut results = SearchResults::default();
		results.show(index(&nodes).query("uly"), &nodes);
		assert!(matches!(&results.content, ResultList::Hits(h) if h[0].id == "1"));

		results.hide();
		assert!(!results.visible);
		assert!(matches!(results.content, ResultList::Hits(_)));

		results.visible = true;
		results.clear();
		assert!(results.visible);
		assert_eq!(results.content, ResultList::Empty);

		results.show(SearchOutcome::Cleared, &nodes);
		assert_eq!(results, SearchResults::default());
	}
}
