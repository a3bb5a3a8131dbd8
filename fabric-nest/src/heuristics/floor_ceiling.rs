use crate::entities::{
    Fabric, FcShelf, PackingResult, PieceMeta, Placement, ShelfRecord, ShelfSide, ShelfSlot,
};
use crate::heuristics::{PackingHeuristic, orientations, sorted_desc_by};
use log::debug;

/// Shelf Floor-Ceiling.
///
/// Pieces are sorted by descending longest side and placed on the floor of the most recent shelf.
/// A shelf is closed as soon as a piece does not fit on its floor, after which the headroom left
/// above its shorter floor pieces is filled from the ceiling down, right to left.
/// New shelves are opened as low as possible: the first piece is oriented with its shorter side vertical,
/// unless that orientation is wider than the fabric.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShelfFloorCeiling;

impl ShelfFloorCeiling {
    fn try_floor(piece: &PieceMeta, shelf: &mut FcShelf, fabric: &Fabric) -> Option<(f64, f64, bool)> {
        orientations(piece).find_map(|rotated| {
            let (w, h) = piece.dims(rotated);
            shelf
                .try_place_on_floor(w, h, fabric.width)
                .map(|(x, y)| (x, y, rotated))
        })
    }

    fn try_ceiling(piece: &PieceMeta, shelves: &mut [FcShelf]) -> Option<(usize, f64, f64, bool)> {
        shelves
            .iter_mut()
            .enumerate()
            .filter(|(_, shelf)| !shelf.is_open())
            .find_map(|(idx, shelf)| {
                orientations(piece).find_map(|rotated| {
                    let (w, h) = piece.dims(rotated);
                    shelf
                        .try_place_on_ceiling(w, h)
                        .map(|(x, y)| (idx, x, y, rotated))
                })
            })
    }
}

impl PackingHeuristic for ShelfFloorCeiling {
    fn name(&self) -> &'static str {
        "Shelf Floor-Ceiling"
    }

    fn pack(&self, pieces: &[PieceMeta], fabric: &Fabric) -> PackingResult {
        let name = self.name();
        let mut shelves: Vec<FcShelf> = vec![];
        let mut placements: Vec<Placement> = vec![];

        for piece in sorted_desc_by(pieces, PieceMeta::longest_side) {
            let order = placements.len() + 1;

            //floor of the most recent shelf, if it is still open
            let last_idx = shelves.len().checked_sub(1);
            if let Some(idx) = last_idx {
                let shelf = &mut shelves[idx];
                if shelf.is_open() {
                    if let Some((x, y, rotated)) = Self::try_floor(piece, shelf, fabric) {
                        let slot = ShelfSlot {
                            shelf: idx,
                            side: ShelfSide::Floor,
                        };
                        placements.push(Placement::new(piece, (x, y), rotated, order, Some(slot)));
                        debug!("[{name}] placed '{}' on the floor of shelf {idx}", piece.id);
                        continue;
                    }
                    shelf.close(fabric.width);
                    debug!("[{name}] closed shelf {idx}");
                }
            }

            //ceiling of any closed shelf, in creation order
            if let Some((idx, x, y, rotated)) = Self::try_ceiling(piece, &mut shelves) {
                let slot = ShelfSlot {
                    shelf: idx,
                    side: ShelfSide::Ceiling,
                };
                placements.push(Placement::new(piece, (x, y), rotated, order, Some(slot)));
                debug!("[{name}] placed '{}' on the ceiling of shelf {idx}", piece.id);
                continue;
            }

            //new shelf, as low as possible unless lying down is too wide for the fabric
            let lying = piece.height > piece.width;
            let rotated = match piece.dims(lying).0 > fabric.width {
                true => !lying,
                false => lying,
            };
            let (w, h) = piece.dims(rotated);
            let y = shelves.last().map_or(0.0, FcShelf::next_y);
            if y + h > fabric.length || w > fabric.width {
                debug!(
                    "[{name}] skipping '{}', no room for a new shelf at y = {y:.2}",
                    piece.id
                );
                continue;
            }

            let idx = shelves.len();
            let mut shelf = FcShelf::new(y, h, fabric.margin);
            let pos = shelf
                .try_place_on_floor(w, h, fabric.width)
                .expect("first piece always fits on a fresh shelf");
            shelves.push(shelf);

            let slot = ShelfSlot {
                shelf: idx,
                side: ShelfSide::Floor,
            };
            placements.push(Placement::new(piece, pos, rotated, order, Some(slot)));
            debug!(
                "[{name}] opened shelf {idx} at y = {y:.2} (height {h:.2}) for '{}'",
                piece.id
            );
        }

        let shelves = shelves.iter().map(ShelfRecord::from).collect();
        PackingResult::assemble(name, fabric, pieces, placements, shelves)
    }
}
