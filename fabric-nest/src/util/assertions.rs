use std::collections::HashSet;

use crate::entities::{PackingResult, Placement, ShelfSide};
use crate::geometry::primitives::Rect;
use crate::util::FPA;
use itertools::Itertools;
use log::error;
//Various checks to verify correctness of the results of the heuristics
//Used in debug_assert!() blocks and in tests

/// All counters and areas agree with the placements
pub fn result_is_consistent(result: &PackingResult) -> bool {
    let ids_unique = result.placements.iter().map(|pl| &pl.id).all_unique();
    let orders_sequential = result
        .placements
        .iter()
        .enumerate()
        .all(|(i, pl)| pl.order == i + 1);

    ids_unique
        && orders_sequential
        && result.placed_count == result.placements.len()
        && result.placed_count <= result.total_count
        && FPA(result.placed_area + result.waste_area) == FPA(result.fabric_area())
        && FPA(result.placed_area) <= FPA(result.fabric_area())
}

/// Every placed bounding box lies on the fabric
pub fn placements_within_fabric(result: &PackingResult) -> bool {
    let fabric = Rect::from_origin_and_size(
        0.0,
        0.0,
        result.fabric_width,
        result.fabric_length,
    );
    result.placements.iter().all(|pl| {
        let inside = fabric.almost_contains(&pl.bbox());
        if !inside {
            error!("placement of '{}' exceeds the fabric: {:?}", pl.id, pl.bbox());
        }
        inside
    })
}

/// No two placed bounding boxes overlap (touching is allowed)
pub fn bboxes_disjoint(result: &PackingResult) -> bool {
    result
        .placements
        .iter()
        .tuple_combinations()
        .all(|(a, b): (&Placement, &Placement)| {
            let overlap = a.bbox().almost_overlaps(&b.bbox());
            if overlap {
                let area = Rect::intersection(a.bbox(), b.bbox()).map_or(0.0, |r| r.area());
                error!("placements '{}' and '{}' overlap, area: {area:.6}", a.id, b.id);
            }
            !overlap
        })
}

/// On every shelf, the horizontal intervals of floor and ceiling pieces are pairwise disjoint
/// and every piece lies vertically within its shelf.
pub fn shelf_intervals_disjoint(result: &PackingResult) -> bool {
    let shelf_indices = result
        .placements
        .iter()
        .filter_map(|pl| pl.slot.map(|s| s.shelf))
        .collect::<HashSet<usize>>();

    shelf_indices.into_iter().all(|shelf_idx| {
        let on_shelf = result
            .placements
            .iter()
            .filter(|pl| pl.slot.is_some_and(|s| s.shelf == shelf_idx))
            .collect_vec();

        let Some(shelf) = result.shelves.get(shelf_idx) else {
            error!("placement refers to unknown shelf {shelf_idx}");
            return false;
        };

        let within_shelf = on_shelf.iter().all(|pl| {
            FPA(pl.y) >= FPA(shelf.y) && FPA(pl.y + pl.height) <= FPA(shelf.y + shelf.height)
        });

        let disjoint = on_shelf.iter().tuple_combinations().all(|(a, b)| {
            let (a_start, a_end) = a.x_interval();
            let (b_start, b_end) = b.x_interval();
            FPA(a_end) <= FPA(b_start) || FPA(b_end) <= FPA(a_start)
        });

        within_shelf && disjoint
    })
}

/// Ceiling pieces touch the ceiling of their shelf
pub fn ceiling_pieces_top_aligned(result: &PackingResult) -> bool {
    result
        .placements
        .iter()
        .filter_map(|pl| pl.slot.map(|s| (pl, s)))
        .filter(|(_, s)| s.side == ShelfSide::Ceiling)
        .all(|(pl, s)| {
            result
                .shelves
                .get(s.shelf)
                .is_some_and(|shelf| FPA(pl.y + pl.height) == FPA(shelf.y + shelf.height))
        })
}
