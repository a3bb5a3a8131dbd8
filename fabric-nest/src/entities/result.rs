use std::collections::HashMap;

use crate::entities::{Fabric, PieceMeta, Placement};
use log::info;

/// Snapshot of a shelf at the end of a run
#[derive(Clone, Debug, PartialEq)]
pub struct ShelfRecord {
    pub y: f64,
    pub height: f64,
    pub margin: f64,
    pub floor_cursor: f64,
    /// Only defined for closed floor-ceiling shelves
    pub ceiling_cursor: Option<f64>,
    /// Only defined for floor-ceiling shelves
    pub closed: Option<bool>,
}

/// Outcome of a single heuristic invocation.
/// Pieces which could not be placed are only visible through `total_count > placed_count`.
#[derive(Clone, Debug, PartialEq)]
pub struct PackingResult {
    /// Display name of the heuristic which produced the result
    pub heuristic: String,
    pub fabric_width: f64,
    pub fabric_length: f64,
    pub placements: Vec<Placement>,
    /// Empty for heuristics which do not work with shelves
    pub shelves: Vec<ShelfRecord>,
    pub placed_count: usize,
    pub total_count: usize,
    /// Sum of the polygon areas of all placed pieces
    pub placed_area: f64,
    /// `fabric_width * fabric_length - placed_area`
    pub waste_area: f64,
}

impl PackingResult {
    /// Assembles the result of a run out of its placements and final shelf state.
    /// `pieces` is the full set of pieces handed to the heuristic.
    pub fn assemble(
        heuristic: &str,
        fabric: &Fabric,
        pieces: &[PieceMeta],
        placements: Vec<Placement>,
        shelves: Vec<ShelfRecord>,
    ) -> Self {
        let areas: HashMap<&str, f64> = pieces.iter().map(|p| (p.id.as_str(), p.area)).collect();

        let placed_area = placements
            .iter()
            .map(|pl| areas.get(pl.id.as_str()).copied().unwrap_or(0.0))
            .fold(0.0, |acc, a| acc + a);

        let result = PackingResult {
            heuristic: heuristic.to_string(),
            fabric_width: fabric.width,
            fabric_length: fabric.length,
            placed_count: placements.len(),
            total_count: pieces.len(),
            placed_area,
            waste_area: fabric.area() - placed_area,
            placements,
            shelves,
        };

        info!(
            "[{}] placed {}/{} pieces on {} shelves, utilization: {:.3}%",
            result.heuristic,
            result.placed_count,
            result.total_count,
            result.shelves.len(),
            result.utilization() * 100.0
        );

        result
    }

    pub fn fabric_area(&self) -> f64 {
        self.fabric_width * self.fabric_length
    }

    /// Placed area divided by the fabric area
    pub fn utilization(&self) -> f64 {
        self.placed_area / self.fabric_area()
    }

    pub fn skipped_count(&self) -> usize {
        self.total_count - self.placed_count
    }

    pub fn placement(&self, id: &str) -> Option<&Placement> {
        self.placements.iter().find(|pl| pl.id == id)
    }
}
