use crate::entities::PieceMeta;
use crate::geometry::primitives::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Side of a shelf a piece was allocated from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShelfSide {
    /// Bottom-aligned, growing left to right
    Floor,
    /// Top-aligned, growing right to left
    Ceiling,
}

/// The shelf (index in creation order) and side a placement belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShelfSlot {
    pub shelf: usize,
    pub side: ShelfSide,
}

/// A piece placed on the fabric.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub id: String,
    /// Lower-left corner of the placed bounding box
    pub x: f64,
    pub y: f64,
    /// Bounding box dimensions in the placed orientation
    pub width: f64,
    pub height: f64,
    /// Whether width and height are swapped relative to the [`PieceMeta`]
    pub rotated: bool,
    /// Normalized vertices, transposed if rotated. Not translated to (x, y).
    pub placed_vertices: Vec<Point>,
    /// 1-based sequence number in decision order
    pub order: usize,
    /// `None` for heuristics which do not work with shelves
    pub slot: Option<ShelfSlot>,
}

impl Placement {
    pub fn new(
        meta: &PieceMeta,
        (x, y): (f64, f64),
        rotated: bool,
        order: usize,
        slot: Option<ShelfSlot>,
    ) -> Self {
        let (width, height) = meta.dims(rotated);
        Placement {
            id: meta.id.clone(),
            x,
            y,
            width,
            height,
            rotated,
            placed_vertices: meta.vertices(rotated),
            order,
            slot,
        }
    }

    /// Bounding box of the placed piece in fabric coordinates
    pub fn bbox(&self) -> Rect {
        Rect::from_origin_and_size(self.x, self.y, self.width, self.height)
    }

    /// Horizontal interval `[x, x + width]` occupied by the piece
    pub fn x_interval(&self) -> (f64, f64) {
        (self.x, self.x + self.width)
    }

    /// The polygon in fabric coordinates
    pub fn fabric_vertices(&self) -> Vec<Point> {
        self.placed_vertices
            .iter()
            .map(|p| p.translate(self.x, self.y))
            .collect()
    }
}
