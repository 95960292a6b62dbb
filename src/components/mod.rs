//! UI components.

pub mod epigraph_graph;
