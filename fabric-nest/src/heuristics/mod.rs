use std::cmp::Reverse;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::entities::{Fabric, PackingResult, PieceMeta};
use crate::util::EngineConfig;
use crate::util::assertions;
use itertools::Itertools;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

mod first_fit_row;
mod floor_ceiling;
mod rect_delegate;
mod shelf_fit;

#[doc(inline)]
pub use first_fit_row::FirstFitRowWise;
#[doc(inline)]
pub use floor_ceiling::ShelfFloorCeiling;
#[cfg(feature = "rect-delegate")]
#[doc(inline)]
pub use rect_delegate::CrunchOracle;
#[doc(inline)]
pub use rect_delegate::{PackedRect, RectDelegate, RectOracle, RectRequest};
#[doc(inline)]
pub use shelf_fit::{ShelfBfdh, ShelfBhf, ShelfBwf, ShelfFirstFit, ShelfPolicy};

/// A placement heuristic: a deterministic function of the pieces and the fabric.
///
/// Implementations own all of their placement state for the duration of [`PackingHeuristic::pack`],
/// so independent heuristics can safely run side by side.
pub trait PackingHeuristic {
    /// Display name, used in results and logs
    fn name(&self) -> &'static str;

    /// Decides for every piece (in the heuristic's own order) to place or skip it.
    fn pack(&self, pieces: &[PieceMeta], fabric: &Fabric) -> PackingResult;
}

/// All heuristics this library provides, selectable from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    FirstFitRowWise,
    ShelfFirstFit,
    ShelfBwf,
    ShelfBfdh,
    ShelfBhf,
    ShelfFloorCeiling,
    #[cfg(feature = "rect-delegate")]
    RectDelegate,
}

impl HeuristicKind {
    #[cfg(feature = "rect-delegate")]
    pub const ALL: [HeuristicKind; 7] = [
        HeuristicKind::FirstFitRowWise,
        HeuristicKind::ShelfFirstFit,
        HeuristicKind::ShelfBwf,
        HeuristicKind::ShelfBfdh,
        HeuristicKind::ShelfBhf,
        HeuristicKind::ShelfFloorCeiling,
        HeuristicKind::RectDelegate,
    ];

    #[cfg(not(feature = "rect-delegate"))]
    pub const ALL: [HeuristicKind; 6] = [
        HeuristicKind::FirstFitRowWise,
        HeuristicKind::ShelfFirstFit,
        HeuristicKind::ShelfBwf,
        HeuristicKind::ShelfBfdh,
        HeuristicKind::ShelfBhf,
        HeuristicKind::ShelfFloorCeiling,
    ];

    /// Identifier used in configuration files and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            HeuristicKind::FirstFitRowWise => "first_fit_row_wise",
            HeuristicKind::ShelfFirstFit => "shelf_first_fit",
            HeuristicKind::ShelfBwf => "shelf_bwf",
            HeuristicKind::ShelfBfdh => "shelf_bfdh",
            HeuristicKind::ShelfBhf => "shelf_bhf",
            HeuristicKind::ShelfFloorCeiling => "shelf_floor_ceiling",
            #[cfg(feature = "rect-delegate")]
            HeuristicKind::RectDelegate => "rect_delegate",
        }
    }

    pub fn heuristic(&self, config: &EngineConfig) -> Box<dyn PackingHeuristic + Send + Sync> {
        match self {
            HeuristicKind::FirstFitRowWise => Box::new(FirstFitRowWise),
            HeuristicKind::ShelfFirstFit => Box::new(ShelfFirstFit),
            HeuristicKind::ShelfBwf => Box::new(ShelfBwf),
            HeuristicKind::ShelfBfdh => Box::new(ShelfBfdh),
            HeuristicKind::ShelfBhf => Box::new(ShelfBhf),
            HeuristicKind::ShelfFloorCeiling => Box::new(ShelfFloorCeiling),
            #[cfg(feature = "rect-delegate")]
            HeuristicKind::RectDelegate => Box::new(RectDelegate::new(CrunchOracle::new(
                config.delegate_resolution,
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        self.heuristic(&EngineConfig::default()).name()
    }

    /// Runs the heuristic on `pieces`.
    pub fn pack(
        &self,
        pieces: &[PieceMeta],
        fabric: &Fabric,
        config: &EngineConfig,
    ) -> PackingResult {
        let result = self.heuristic(config).pack(pieces, fabric);

        debug_assert!(assertions::result_is_consistent(&result));
        debug_assert!(assertions::placements_within_fabric(&result));
        debug_assert!(assertions::bboxes_disjoint(&result));
        debug_assert!(assertions::shelf_intervals_disjoint(&result));
        debug_assert!(assertions::ceiling_pieces_top_aligned(&result));

        result
    }
}

impl Display for HeuristicKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for HeuristicKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeuristicKind::ALL
            .into_iter()
            .find(|k| k.key() == s)
            .ok_or_else(|| {
                format!(
                    "unknown heuristic '{s}', expected one of: {}",
                    HeuristicKind::ALL.iter().map(|k| k.key()).join(", ")
                )
            })
    }
}

/// Runs every heuristic in `kinds` on the same pieces.
/// The heuristics share no state, with [`EngineConfig::parallel`] they run on the rayon thread pool.
/// Results are returned in the order of `kinds`.
pub fn run_heuristics(
    kinds: &[HeuristicKind],
    pieces: &[PieceMeta],
    fabric: &Fabric,
    config: &EngineConfig,
) -> Vec<PackingResult> {
    match config.parallel {
        true => kinds
            .par_iter()
            .map(|kind| kind.pack(pieces, fabric, config))
            .collect(),
        false => kinds
            .iter()
            .map(|kind| kind.pack(pieces, fabric, config))
            .collect(),
    }
}

/// Stable sort of `pieces` by descending `key`, ties keep their input order.
pub(crate) fn sorted_desc_by<F>(pieces: &[PieceMeta], key: F) -> Vec<&PieceMeta>
where
    F: Fn(&PieceMeta) -> f64,
{
    pieces
        .iter()
        .sorted_by_key(|p| Reverse(OrderedFloat(key(p))))
        .collect()
}

/// Orientations worth trying for a piece: upright first, rotated only if it changes the bounding box
pub(crate) fn orientations(piece: &PieceMeta) -> impl Iterator<Item = bool> {
    [false, true]
        .into_iter()
        .filter(move |&rotated| !rotated || !piece.is_square())
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
    fn heuristic_keys_round_trip() {
        for kind in HeuristicKind::ALL {
            assert_eq!(kind.key().parse::<HeuristicKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.key());
        }
        assert!("best_fit".parse::<HeuristicKind>().is_err());
    }

    #[test]
    fn descending_sort_is_stable() {
        let pieces = vec![
            rect_meta("a", 10.0, 5.0),
            rect_meta("b", 20.0, 5.0),
            rect_meta("c", 10.0, 7.0),
            rect_meta("d", 20.0, 1.0),
        ];
        let by_width = sorted_desc_by(&pieces, |p| p.width)
            .into_iter()
            .map(|p| p.id.as_str())
            .collect_vec();
        assert_eq!(by_width, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn square_pieces_are_not_rotated() {
        assert_eq!(orientations(&rect_meta("sq", 4.0, 4.0)).collect_vec(), vec![false]);
        assert_eq!(
            orientations(&rect_meta("r", 4.0, 5.0)).collect_vec(),
            vec![false, true]
        );
    }

    #[test]
    fn parallel_and_sequential_runs_agree() {
        let pieces = (0..30)
            .map(|i| rect_meta(&format!("p{i}"), 5.0 + (i * 7 % 23) as f64, 3.0 + (i * 11 % 17) as f64))
            .collect_vec();
        let fabric = Fabric::try_new(100.0, 120.0, 1.0).unwrap();
        let sequential = run_heuristics(&HeuristicKind::ALL, &pieces, &fabric, &EngineConfig::default());
        let parallel_config = EngineConfig {
            parallel: true,
            ..EngineConfig::default()
        };
        let parallel = run_heuristics(&HeuristicKind::ALL, &pieces, &fabric, &parallel_config);
        assert_eq!(sequential, parallel);
        assert_eq!(
            sequential.iter().map(|r| r.heuristic.as_str()).collect_vec(),
            HeuristicKind::ALL.iter().map(|k| k.name()).collect_vec()
        );
    }
}
