//! Viewer components.

pub mod force_graph;
