#![doc = document_features::document_features!()]
//! Shelf-based nesting of irregular pieces onto a rectangular fabric sheet.
//!
//! Every heuristic is an independent, deterministic function of
//! (pieces, [`Fabric`](entities::Fabric), [`EngineConfig`](util::EngineConfig))
//! returning a [`PackingResult`](entities::PackingResult).

/// Typed errors raised by the engine
pub mod error;

/// Entities: pieces, fabric, shelves, placements and results
pub mod entities;

/// Geometric primitives and base algorithms
pub mod geometry;

/// The placement heuristics
pub mod heuristics;

/// Importing inputs into and exporting results out of this library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
