use crate::entities::{
    Fabric, PackingResult, PieceMeta, Placement, Shelf, ShelfRecord, ShelfSide, ShelfSlot,
};
use crate::heuristics::{PackingHeuristic, sorted_desc_by};
use log::debug;

/// Rule used to choose among the existing shelves a piece fits on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShelfPolicy {
    /// The first shelf (in creation order) with enough room
    FirstFit,
    /// The shelf with the least floor width left after placement
    BestWidth,
    /// The shelf with the least headroom above the piece
    BestHeight,
}

impl ShelfPolicy {
    /// Index of the selected shelf, `None` if the piece fits on none of them.
    /// Ties go to the earliest shelf.
    pub fn select(&self, shelves: &[Shelf], width: f64, height: f64, fabric_width: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, shelf) in shelves.iter().enumerate() {
            let Some(leftover) = shelf.floor_leftover(width, height, fabric_width) else {
                continue;
            };
            let score = match self {
                ShelfPolicy::FirstFit => return Some(idx),
                ShelfPolicy::BestWidth => leftover,
                ShelfPolicy::BestHeight => shelf.height - height,
            };
            if best.is_none_or(|(_, best_score)| score < best_score) {
                best = Some((idx, score));
            }
        }
        best.map(|(idx, _)| idx)
    }
}

/// Single-sided shelf packing of `sequence` (a permutation of `pieces`) in the given order.
/// Pieces are never rotated. When the policy finds no shelf, a new one is opened on top of the last
/// with the height of the piece; the piece is skipped if that shelf would not fit on the fabric.
fn pack_on_shelves(
    name: &str,
    pieces: &[PieceMeta],
    sequence: &[&PieceMeta],
    fabric: &Fabric,
    policy: ShelfPolicy,
) -> PackingResult {
    let mut shelves: Vec<Shelf> = vec![];
    let mut placements: Vec<Placement> = vec![];

    for &piece in sequence {
        let (width, height) = (piece.width, piece.height);

        let (shelf_idx, x, y) = match policy.select(&shelves, width, height, fabric.width) {
            Some(idx) => {
                let shelf = &mut shelves[idx];
                (idx, shelf.place_on_floor(width), shelf.y)
            }
            None => {
                let y = shelves.last().map_or(0.0, Shelf::next_y);
                if y + height > fabric.length || width > fabric.width {
                    debug!(
                        "[{name}] skipping '{}' ({width:.2} x {height:.2}), no room for a new shelf at y = {y:.2}",
                        piece.id
                    );
                    continue;
                }
                let mut shelf = Shelf::new(y, height, fabric.margin);
                let x = shelf.place_on_floor(width);
                shelves.push(shelf);
                debug!("[{name}] opened shelf {} at y = {y:.2}, height: {height:.2}", shelves.len() - 1);
                (shelves.len() - 1, x, y)
            }
        };

        let slot = ShelfSlot {
            shelf: shelf_idx,
            side: ShelfSide::Floor,
        };
        placements.push(Placement::new(
            piece,
            (x, y),
            false,
            placements.len() + 1,
            Some(slot),
        ));
        debug!("[{name}] placed '{}' on shelf {shelf_idx} at ({x:.2}, {y:.2})", piece.id);
    }

    for (idx, shelf) in shelves.iter().enumerate() {
        let ids = placements
            .iter()
            .filter(|pl| pl.slot.is_some_and(|s| s.shelf == idx))
            .map(|pl| pl.id.as_str())
            .collect::<Vec<_>>();
        debug!(
            "[{name}] shelf {idx} (y = {:.2}, height = {:.2}): {ids:?}",
            shelf.y, shelf.height
        );
    }

    let shelf_records = shelves.iter().map(ShelfRecord::from).collect();
    PackingResult::assemble(name, fabric, pieces, placements, shelf_records)
}

/// Shelf First-Fit: pieces sorted by descending width, each placed on the first shelf it fits on.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShelfFirstFit;

impl PackingHeuristic for ShelfFirstFit {
    fn name(&self) -> &'static str {
        "Shelf Fit First-Fit"
    }

    fn pack(&self, pieces: &[PieceMeta], fabric: &Fabric) -> PackingResult {
        let sequence = sorted_desc_by(pieces, |p| p.width);
        pack_on_shelves(self.name(), pieces, &sequence, fabric, ShelfPolicy::FirstFit)
    }
}

/// Shelf Best-Width-Fit: pieces in input order, each placed on the shelf leaving the least floor width.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShelfBwf;

impl PackingHeuristic for ShelfBwf {
    fn name(&self) -> &'static str {
        "Shelf Fit BWF"
    }

    fn pack(&self, pieces: &[PieceMeta], fabric: &Fabric) -> PackingResult {
        let sequence = pieces.iter().collect::<Vec<_>>();
        pack_on_shelves(self.name(), pieces, &sequence, fabric, ShelfPolicy::BestWidth)
    }
}

/// Shelf Best-Fit-Decreasing-Height: [`ShelfBwf`] on the pieces sorted by descending height.
/// Taller pieces claim shelf height before shorter ones arrive.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShelfBfdh;

impl PackingHeuristic for ShelfBfdh {
    fn name(&self) -> &'static str {
        "Shelf Fit BFDH"
    }

    fn pack(&self, pieces: &[PieceMeta], fabric: &Fabric) -> PackingResult {
        let sequence = sorted_desc_by(pieces, |p| p.height);
        pack_on_shelves(self.name(), pieces, &sequence, fabric, ShelfPolicy::BestWidth)
    }
}

/// Shelf Best-Height-Fit: pieces in input order, each placed on the shelf with the tightest vertical fit.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShelfBhf;

impl PackingHeuristic for ShelfBhf {
    fn name(&self) -> &'static str {
        "Shelf Fit BHF"
    }

    fn pack(&self, pieces: &[PieceMeta], fabric: &Fabric) -> PackingResult {
        let sequence = pieces.iter().collect::<Vec<_>>();
        pack_on_shelves(self.name(), pieces, &sequence, fabric, ShelfPolicy::BestHeight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Piece;
    use crate::geometry::primitives::Point;

    fn rect_meta(id: &str, w: f64, h: f64) -> PieceMeta {
        let piece = Piece::new(
            id,
            vec![Point(0.0, 0.0), Point(w, 0.0), Point(w, h), Point(0.0, h)],
        );
        PieceMeta::try_from_piece(&piece).unwrap()
    }

    fn position(result: &PackingResult, id: &str) -> (f64, f64) {
        let pl = result.placement(id).unwrap();
        (pl.x, pl.y)
    }

    #[test]
    fn bwf_reference_scenario() {
        let fabric = Fabric::try_new(100.0, 100.0, 0.0).unwrap();
        let pieces = vec![
            rect_meta("p1", 60.0, 40.0),
            rect_meta("p2", 50.0, 40.0),
            rect_meta("p3", 40.0, 40.0),
        ];
        let result = ShelfBwf.pack(&pieces, &fabric);

        assert_eq!(position(&result, "p1"), (0.0, 0.0));
        assert_eq!(position(&result, "p2"), (0.0, 40.0));
        // shelf 0 leaves 0 width, shelf 1 would leave 10
        assert_eq!(position(&result, "p3"), (60.0, 0.0));
        assert_eq!(result.shelves.len(), 2);
        assert_eq!(result.placed_area, 6000.0);
        assert_eq!(result.waste_area, 4000.0);
    }

    #[test]
    fn bwf_ties_go_to_the_earliest_shelf() {
        let fabric = Fabric::try_new(100.0, 100.0, 0.0).unwrap();
        let pieces = vec![
            rect_meta("a", 70.0, 20.0),
            rect_meta("b", 70.0, 20.0),
            rect_meta("c", 10.0, 10.0),
        ];
        let result = ShelfBwf.pack(&pieces, &fabric);
        assert_eq!(position(&result, "c"), (70.0, 0.0));
    }

    #[test]
    fn bhf_prefers_the_tightest_shelf() {
        let fabric = Fabric::try_new(100.0, 100.0, 2.0).unwrap();
        let pieces = vec![
            rect_meta("tall", 30.0, 40.0),
            rect_meta("short", 30.0, 15.0),
            rect_meta("wide", 90.0, 10.0),
            rect_meta("probe", 20.0, 14.0),
        ];
        let result = ShelfBhf.pack(&pieces, &fabric);

        assert_eq!(position(&result, "tall"), (0.0, 0.0));
        assert_eq!(position(&result, "short"), (32.0, 0.0));
        // no room on shelf 0 (64 + 90 > 100), new shelf of height 10 at 40 + 2
        assert_eq!(position(&result, "wide"), (0.0, 42.0));
        // fits shelf 0 (headroom 26) and not shelf 1 (too short), shelf 0 it is
        assert_eq!(position(&result, "probe"), (64.0, 0.0));

        let bwf = ShelfBwf.pack(&pieces, &fabric);
        assert_eq!(position(&bwf, "probe"), (64.0, 0.0));
    }

    #[test]
    fn bhf_and_bwf_diverge() {
        let fabric = Fabric::try_new(100.0, 200.0, 0.0).unwrap();
        let pieces = vec![
            rect_meta("s0", 10.0, 20.0),
            rect_meta("s1", 90.0, 50.0),
            rect_meta("x", 5.0, 18.0),
        ];
        // shelf 0: leftover 85, headroom 2 / shelf 1: leftover 5, headroom 32
        let bwf = ShelfBwf.pack(&pieces, &fabric);
        let bhf = ShelfBhf.pack(&pieces, &fabric);
        assert_eq!(position(&bwf, "x"), (90.0, 20.0));
        assert_eq!(position(&bhf, "x"), (10.0, 0.0));
    }

    #[test]
    fn bfdh_is_bwf_on_height_sorted_pieces() {
        let fabric = Fabric::try_new(120.0, 90.0, 1.5).unwrap();
        let pieces = (0..25)
            .map(|i| {
                rect_meta(
                    &format!("p{i}"),
                    4.0 + (i * 13 % 29) as f64,
                    2.0 + (i * 7 % 5) as f64 * 6.0,
                )
            })
            .collect::<Vec<_>>();

        let bfdh = ShelfBfdh.pack(&pieces, &fabric);
        let presorted = sorted_desc_by(&pieces, |p| p.height)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();
        let bwf = ShelfBwf.pack(&presorted, &fabric);

        assert_eq!(bfdh.placements, bwf.placements);
        assert_eq!(bfdh.shelves, bwf.shelves);
        assert_eq!(bfdh.placed_area, bwf.placed_area);
        assert_ne!(bfdh.heuristic, bwf.heuristic);
    }

    #[test]
    fn first_fit_takes_the_first_shelf() {
        let fabric = Fabric::try_new(100.0, 100.0, 0.0).unwrap();
        let pieces = vec![
            rect_meta("a", 60.0, 30.0),
            rect_meta("b", 50.0, 40.0),
            rect_meta("c", 30.0, 10.0),
        ];
        // sorted by width: a, b, c
        let result = ShelfFirstFit.pack(&pieces, &fabric);
        assert_eq!(position(&result, "a"), (0.0, 0.0));
        assert_eq!(position(&result, "b"), (0.0, 30.0));
        assert_eq!(position(&result, "c"), (60.0, 0.0));
        assert_eq!(
            result.placements.iter().map(|pl| pl.order).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn pieces_that_cannot_open_a_shelf_are_skipped() {
        let fabric = Fabric::try_new(50.0, 30.0, 0.0).unwrap();
        let pieces = vec![
            rect_meta("ok", 20.0, 20.0),
            rect_meta("too_tall", 10.0, 31.0),
            rect_meta("too_wide", 51.0, 5.0),
            rect_meta("no_room", 40.0, 11.0),
            rect_meta("fits", 30.0, 10.0),
        ];
        for result in [ShelfBwf.pack(&pieces, &fabric), ShelfBhf.pack(&pieces, &fabric)] {
            assert_eq!(result.total_count, 5);
            assert_eq!(result.placed_count, 2);
            assert_eq!(result.skipped_count(), 3);
            assert!(result.placement("too_tall").is_none());
            assert!(result.placement("too_wide").is_none());
            assert!(result.placement("no_room").is_none());
            assert_eq!(position(&result, "fits"), (20.0, 0.0));
        }
    }
}
