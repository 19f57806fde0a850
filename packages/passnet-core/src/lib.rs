/*
 * passnet-core - passing-network centrality per team and match
 *
 * Feature-first layout:
 * - shared/      : Common models (ids, Event, tag codes)
 * - features/    : ingest → graph_builder → centrality, enrichment, selection, ranking
 * - pipeline/    : StatsPipeline (one match/team) and BatchRunner (many)
 * - config/      : YAML v1 configuration
 *
 * Per-player totals live behind `passnet_storage::AggregateStore`.
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::PassnetConfig;
pub use errors::{PassnetError, Result};
pub use features::centrality::{CentralityEngine, CentralityResult, GraphMetrics};
pub use features::graph_builder::{GraphBuilder, PassGraph};
pub use pipeline::{BatchReport, BatchRunner, Outcome, StatsPipeline, UpsertFailure};
pub use shared::models::{Event, EventKind, MatchId, MatchTeam, PlayerId, TeamId};
