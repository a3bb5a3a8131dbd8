use crate::entities::{PackingResult, Placement, ShelfRecord};
use crate::io::ext_repr::{ExtPackingResult, ExtPlacement, ExtShelf};
use crate::util::round_to;
use itertools::Itertools;

/// Exports a [`PackingResult`] by composing an [`ExtPackingResult`] from it.
/// Areas are rounded to 2 decimals and utilization to 4, coordinates are kept at full precision.
pub fn export_result(result: &PackingResult) -> ExtPackingResult {
    ExtPackingResult {
        heuristic: result.heuristic.clone(),
        fabric_width: result.fabric_width,
        fabric_length: result.fabric_length,
        placed_count: result.placed_count,
        total_count: result.total_count,
        placed_area: round_to(result.placed_area, 2),
        waste_area: round_to(result.waste_area, 2),
        utilization: round_to(result.utilization(), 4),
        placements: result.placements.iter().map(export_placement).collect_vec(),
        shelves: result.shelves.iter().map(export_shelf).collect_vec(),
    }
}

pub fn export_placement(placement: &Placement) -> ExtPlacement {
    ExtPlacement {
        id: placement.id.clone(),
        x: placement.x,
        y: placement.y,
        width: placement.width,
        height: placement.height,
        rotated: placement.rotated,
        vertices: placement.placed_vertices.iter().map(|&p| p.into()).collect_vec(),
        order: placement.order,
        shelf: placement.slot.map(|s| s.shelf),
        side: placement.slot.map(|s| s.side),
    }
}

pub fn export_shelf(shelf: &ShelfRecord) -> ExtShelf {
    ExtShelf {
        y: shelf.y,
        height: shelf.height,
        floor_cursor: shelf.floor_cursor,
        ceiling_cursor: shelf.ceiling_cursor,
        closed: shelf.closed,
    }
}
