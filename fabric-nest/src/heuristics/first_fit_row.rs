use crate::entities::{Fabric, PackingResult, PieceMeta, Placement};
use crate::heuristics::{PackingHeuristic, sorted_desc_by};
use log::debug;

/// First-Fit Row-Wise: the baseline.
///
/// Pieces are sorted by descending width and laid out left to right in rows.
/// A row is closed as soon as the next piece does not fit in its remaining width;
/// the next row starts above the tallest piece of the closed one.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstFitRowWise;

impl PackingHeuristic for FirstFitRowWise {
    fn name(&self) -> &'static str {
        "First-Fit Row-Wise"
    }

    fn pack(&self, pieces: &[PieceMeta], fabric: &Fabric) -> PackingResult {
        let name = self.name();
        let mut placements: Vec<Placement> = vec![];

        let mut x_cursor = 0.0;
        let mut y_cursor = 0.0;
        let mut max_row_height: f64 = 0.0;

        for piece in sorted_desc_by(pieces, |p| p.width) {
            let (width, height) = (piece.width, piece.height);

            if width > fabric.width {
                debug!("[{name}] skipping '{}', wider than the fabric", piece.id);
                continue;
            }

            if x_cursor + width > fabric.width {
                // close the row
                x_cursor = 0.0;
                y_cursor += max_row_height + fabric.margin;
                max_row_height = 0.0;
            }

            if y_cursor + height > fabric.length {
                debug!(
                    "[{name}] skipping '{}', no vertical space at y = {y_cursor:.2}",
                    piece.id
                );
                continue;
            }

            placements.push(Placement::new(
                piece,
                (x_cursor, y_cursor),
                false,
                placements.len() + 1,
                None,
            ));
            debug!(
                "[{name}] placed '{}' at ({x_cursor:.2}, {y_cursor:.2})",
                piece.id
            );

            x_cursor += width + fabric.margin;
            max_row_height = max_row_height.max(height);
        }

        PackingResult::assemble(name, fabric, pieces, placements, vec![])
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

    #[test]
    fn rows_are_filled_widest_first() {
        let fabric = Fabric::try_new(100.0, 100.0, 5.0).unwrap();
        let pieces = vec![
            rect_meta("small", 20.0, 10.0),
            rect_meta("wide", 60.0, 30.0),
            rect_meta("mid", 30.0, 40.0),
            rect_meta("mid2", 30.0, 20.0),
        ];
        let result = FirstFitRowWise.pack(&pieces, &fabric);

        let order = result.placements.iter().map(|pl| pl.id.as_str()).collect::<Vec<_>>();
        assert_eq!(order, vec!["wide", "mid", "mid2", "small"]);

        let pos = |id: &str| {
            let pl = result.placement(id).unwrap();
            (pl.x, pl.y)
        };
        assert_eq!(pos("wide"), (0.0, 0.0));
        assert_eq!(pos("mid"), (65.0, 0.0));
        // 95 + 30 > 100: new row above the tallest piece (40) plus the margin
        assert_eq!(pos("mid2"), (0.0, 45.0));
        assert_eq!(pos("small"), (35.0, 45.0));
        assert!(result.shelves.is_empty());
        assert!(result.placements.iter().all(|pl| pl.slot.is_none()));
    }

    #[test]
    fn overflowing_pieces_are_skipped_without_error() {
        let fabric = Fabric::try_new(50.0, 40.0, 0.0).unwrap();
        let pieces = vec![
            rect_meta("a", 30.0, 30.0),
            rect_meta("b", 30.0, 20.0),
            rect_meta("too_wide", 60.0, 5.0),
            rect_meta("too_tall", 5.0, 41.0),
            rect_meta("c", 10.0, 5.0),
        ];
        let result = FirstFitRowWise.pack(&pieces, &fabric);

        // b closes the first row and would need y = 30 + 20 > 40
        assert!(result.placement("b").is_none());
        assert!(result.placement("too_wide").is_none());
        assert!(result.placement("too_tall").is_none());
        let c = result.placement("c").unwrap();
        assert_eq!((c.x, c.y), (0.0, 30.0));
        assert_eq!(result.placed_count, 2);
        assert_eq!(result.total_count, 5);
    }

    #[test]
    fn empty_input_gives_an_empty_result() {
        let fabric = Fabric::try_new(10.0, 10.0, 1.0).unwrap();
        let result = FirstFitRowWise.pack(&[], &fabric);
        assert_eq!(result.placed_count, 0);
        assert_eq!(result.total_count, 0);
        assert_eq!(result.waste_area, 100.0);
    }
}
