//! Centrality Analysis
//!
//! Per-player scores of one pass graph:
//! - **Betweenness**: weighted shortest-path betweenness (Brandes)
//! - **PageRank**: weighted, dangling mass redistributed uniformly
//! - **Degree**: unnormalized in + out weight
//!
//! plus whole-graph descriptors (`GraphMetrics`).

pub mod betweenness;
pub mod degree;
pub mod engine;
pub mod graph_metrics;
pub mod pagerank;

pub use engine::{CentralityEngine, CentralityResult};
pub use graph_metrics::GraphMetrics;
pub use pagerank::{PageRankEngine, PageRankSettings};
