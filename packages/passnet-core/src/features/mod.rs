//! Feature modules, leaf-first
//!
//! - ingest         - raw event JSON to canonical `Event`s
//! - graph_builder  - one team's passes to a weighted `PassGraph`
//! - centrality     - betweenness, PageRank, degree, graph metrics
//! - enrichment     - per-player counting stats from event tags
//! - selection      - pure option pickers (competitions, matches)
//! - ranking        - top players by per-game averages

pub mod centrality;
pub mod enrichment;
pub mod graph_builder;
pub mod ingest;
pub mod ranking;
pub mod selection;
