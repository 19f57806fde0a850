//! Pass graph construction (per team, per match)

pub mod builder;
pub mod pass_graph;

pub use builder::GraphBuilder;
pub use pass_graph::PassGraph;
