//! Dataset model: literary works (nodes) and epigraph citations (edges).

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Errors raised while loading the bundled dataset or viewer config.
#[derive(Debug, Error)]
pub enum LoadError {
	/// The dataset is not valid JSON or does not match the schema.
	#[error("malformed graph dataset: {0}")]
	Malformed(#[from] serde_json::Error),
	/// Two nodes share an id.
	#[error("duplicate node id `{0}`")]
	DuplicateNode(String),
	/// The viewer config override could not be parsed.
	#[error("malformed viewer config: {0}")]
	Config(#[source] serde_json::Error),
}

/// A literary work.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Node {
	/// Unique identifier. Numeric ids are read as their decimal string.
	#[serde(deserialize_with = "id")]
	pub id: String,
	/// Title of the work.
	#[serde(default)]
	pub title: String,
	/// Author of the work.
	#[serde(default)]
	pub author: String,
	/// Publication year.
	#[serde(default, deserialize_with = "year")]
	pub year: Option<i32>,
	/// Genre.
	#[serde(default, deserialize_with = "text")]
	pub genre: Option<String>,
	/// Country or nationality.
	#[serde(default, deserialize_with = "text")]
	pub country: Option<String>,
	/// Medium (novel, poem, scripture, ...).
	#[serde(default, deserialize_with = "text")]
	pub medium: Option<String>,
	/// Number of incident edges.
	#[serde(default)]
	pub degree: Option<u32>,
}

/// A directed epigraph citation: `source` is the cited work, `target` the
/// work that carries the epigraph.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Edge {
	/// Id of the cited work.
	#[serde(deserialize_with = "endpoint")]
	pub source: String,
	/// Id of the citing work.
	#[serde(deserialize_with = "endpoint")]
	pub target: String,
	/// Quoted epigraph text.
	#[serde(default, deserialize_with = "text")]
	pub epigraph: Option<String>,
}

impl Edge {
	/// Key identifying the endpoint pair, `source__target`.
	pub fn key(&self) -> String {
		format!("{}__{}", self.source, self.target)
	}
}

/// The whole dataset as shipped to the browser.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	/// All works.
	pub nodes: Vec<Node>,
	/// All citations, in dataset order.
	#[serde(default)]
	pub links: Vec<Edge>,
}

impl GraphData {
	/// Parse a `{nodes, links}` JSON document, filling in missing degrees.
	pub fn from_json(json: &str) -> Result<Self, LoadError> {
		let mut data: GraphData = serde_json::from_str(json)?;
		let mut seen = HashSet::with_capacity(data.nodes.len());
		for node in &data.nodes {
			if !seen.insert(node.id.as_str()) {
				return Err(LoadError::DuplicateNode(node.id.clone()));
			}
		}
		data.fill_degrees();
		Ok(data)
	}

	fn fill_degrees(&mut self) {
		if self.nodes.iter().all(|n| n.degree.is_some()) {
			return;
		}
		let mut degree: HashMap<&str, u32> = HashMap::new();
		for link in &self.links {
			*degree.entry(link.source.as_str()).or_default() += 1;
			*degree.entry(link.target.as_str()).or_default() += 1;
		}
		let counted: Vec<u32> = self
			.nodes
			.iter()
			.map(|n| degree.get(n.id.as_str()).copied().unwrap_or(0))
			.collect();
		for (node, count) in self.nodes.iter_mut().zip(counted) {
			node.degree.get_or_insert(count);
		}
	}
}

/// Ids are strings or integers; integers become their decimal string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
	Text(String),
	Number(i64),
}

impl From<RawId> for String {
	fn from(id: RawId) -> Self {
		match id {
			RawId::Text(s) => s,
			RawId::Number(n) => n.to_string(),
		}
	}
}

fn id<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
	RawId::deserialize(de).map(String::from)
}

/// Endpoints arrive either as a bare id or as a node-shaped object.
fn endpoint<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Endpoint {
		Id(RawId),
		Node { id: RawId },
	}

	Ok(match Endpoint::deserialize(de)? {
		Endpoint::Id(id) | Endpoint::Node { id } => id.into(),
	})
}

/// Empty strings count as absent.
fn text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
	let value = Option::<String>::deserialize(de)?;
	Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Years come as numbers or numeric strings; zero and garbage count as absent.
fn year<'de, D: Deserializer<'de>>(de: D) -> Result<Option<i32>, D::Error> {
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Year {
		Number(i64),
		Float(f64),
		Text(String),
	}

	let year = match Option::<Year>::deserialize(de)? {
		Some(Year::Number(n)) => i32::try_from(n).ok(),
		Some(Year::Float(f)) if f.fract() == 0.0 => i32::try_from(f as i64).ok(),
		Some(Year::Float(_)) => None,
		Some(Year::Text(s)) => s.trim().parse().ok(),
		None => None,
	};
	Ok(year.filter(|y| *y != 0))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoints_normalize_to_ids() {
		let data = GraphData::from_json(
			r#"{
				"nodes": [{"id": "a", "title": "A"}, {"id": "b", "title": "B"}],
				"links": [
					{"source": "a", "target": "b"},
					{"source": {"id": "b", "x": 1.0}, "target": {"id": "a"}}
				]
			}"#,
		)
		.unwrap();
		assert_eq!(data.links[0].key(), "a__b");
		assert_eq!(data.links[1].source, "b");
		assert_eq!(data.links[1].target, "a");
	}

	#[test]
	fn numeric_ids_match_numeric_endpoints() {
		let data = GraphData::from_json(
			r#"{
				"nodes": [{"id": 1, "title": "A"}, {"id": "2", "title": "B"}],
				"links": [{"source": 1, "target": {"id": 2}}]
			}"#,
		)
		.unwrap();
		assert_eq!(data.nodes[0].id, "1");
		assert_eq!(data.links[0].key(), "1__2");
		assert_eq!(data.nodes[0].degree, Some(1));
		assert_eq!(data.nodes[1].degree, Some(1));
	}

	#[test]
	fn numeric_and_text_ids_collide() {
		let err =
			GraphData::from_json(r#"{"nodes": [{"id": 7}, {"id": "7"}]}"#).unwrap_err();
		assert!(matches!(err, LoadError::DuplicateNode(id) if id == "7"));
	}

	#[test]
	fn falsy_optionals_are_absent() {
		let data = GraphData::from_json(
			r#"{"nodes": [{"id": "a", "title": "A", "author": "X",
				"year": 0, "genre": "", "country": null, "medium": "Poem",
				"type": "source", "isbn": null}],
				"links": []}"#,
		)
		.unwrap();
		let node = &data.nodes[0];
		assert_eq!(node.year, None);
		assert_eq!(node.genre, None);
		assert_eq!(node.country, None);
		assert_eq!(node.medium.as_deref(), Some("Poem"));
	}

	#[test]
	fn string_years_parse() {
		let data =
			GraphData::from_json(r#"{"nodes": [{"id": "a", "year": "1922"}], "links": []}"#)
				.unwrap();
		assert_eq!(data.nodes[0].year, Some(1922));
	}

	#[test]
	fn missing_degrees_are_counted() {
		let data = GraphData::from_json(
			r#"{"nodes": [{"id": "a"}, {"id": "b", "degree": 7}, {"id": "c"}],
				"links": [{"source": "a", "target": "b"}, {"source": "a", "target": "b"}]}"#,
		)
		.unwrap();
		assert_eq!(data.nodes[0].degree, Some(2));
		assert_eq!(data.nodes[1].degree, Some(7));
		assert_eq!(data.nodes[2].degree, Some(0));
	}

	#[test]
	fn duplicate_ids_are_rejected() {
		let err = GraphData::from_json(r#"{"nodes": [{"id": "a"}, {"id": "a"}]}"#).unwrap_err();
		assert!(matches!(err, LoadError::DuplicateNode(id) if id == "a"));
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(matches!(
			GraphData::from_json("{nodes: }"),
			Err(LoadError::Malformed(_))
		));
	}
}
