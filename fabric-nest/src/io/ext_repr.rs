use crate::entities::ShelfSide;
use serde::{Deserialize, Serialize};

/// External representation of a nesting input: the fabric and the pieces to nest onto it.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtInput {
    #[serde(alias = "fabric_width_cm")]
    pub fabric_width: f64,
    #[serde(alias = "fabric_length_cm")]
    pub fabric_length: f64,
    /// Gap between pieces and between shelves, zero if not specified
    #[serde(alias = "fabric_margin_cm", default)]
    pub fabric_margin: f64,
    pub pieces: Vec<ExtPiece>,
}

/// External representation of a [`Piece`](crate::entities::Piece).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPiece {
    /// Unique identifier of the piece
    pub id: String,
    /// Outline of the piece, in fabric units
    #[serde(alias = "vertices_cm")]
    pub vertices: Vec<(f64, f64)>,
}

/// External representation of a [`PackingResult`](crate::entities::PackingResult).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPackingResult {
    /// Name of the heuristic which produced the result
    pub heuristic: String,
    pub fabric_width: f64,
    pub fabric_length: f64,
    pub placed_count: usize,
    pub total_count: usize,
    /// Total polygon area of the placed pieces, rounded to 2 decimals
    pub placed_area: f64,
    /// Fabric area not covered by any piece, rounded to 2 decimals
    pub waste_area: f64,
    /// Fraction of the fabric covered by pieces, rounded to 4 decimals
    pub utilization: f64,
    pub placements: Vec<ExtPlacement>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub shelves: Vec<ExtShelf>,
}

/// External representation of a [`Placement`](crate::entities::Placement).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPlacement {
    pub id: String,
    /// Lower-left corner of the placed bounding box
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotated: bool,
    /// Outline in the placed orientation, relative to (x, y)
    pub vertices: Vec<(f64, f64)>,
    /// 1-based position in the placement sequence
    pub order: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub shelf: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub side: Option<ShelfSide>,
}

/// External representation of a [`ShelfRecord`](crate::entities::ShelfRecord).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtShelf {
    pub y: f64,
    pub height: f64,
    pub floor_cursor: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ceiling_cursor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub closed: Option<bool>,
}
