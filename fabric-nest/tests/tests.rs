#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;

    use anyhow::{Context, Result};
    use fabric_nest::entities::{Fabric, Piece, PieceMeta};
    use fabric_nest::geometry::primitives::Point;
    use fabric_nest::heuristics::{HeuristicKind, run_heuristics};
    use fabric_nest::io::ext_repr::ExtInput;
    use fabric_nest::io::import::{Importer, InvalidPiecePolicy};
    use fabric_nest::util::{EngineConfig, assertions};
    use float_cmp::approx_eq;
    use log::info;
    use test_case::test_case;

    fn init_logger() {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .is_test(true)
            .try_init();
    }

    fn read_input(path: &Path) -> Result<ExtInput> {
        let file = File::open(path).with_context(|| format!("could not open {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file)).context("could not parse input")
    }

    fn rect_meta(id: &str, w: f64, h: f64) -> PieceMeta {
        let piece = Piece::new(
            id,
            vec![Point(0.0, 0.0), Point(w, 0.0), Point(w, h), Point(0.0, h)],
        );
        PieceMeta::try_from_piece(&piece).unwrap()
    }

    #[test_case("../assets/garment_panels.json"; "garment_panels")]
    #[test_case("../assets/legacy_shirt.json"; "legacy_shirt")]
    fn test_instance(instance_path: &str) -> Result<()> {
        init_logger();
        let ext_input = read_input(Path::new(instance_path))?;
        let (fabric, pieces) = Importer::new(InvalidPiecePolicy::Skip).import(&ext_input)?;

        let results = run_heuristics(&HeuristicKind::ALL, &pieces, &fabric, &EngineConfig::default());
        assert_eq!(results.len(), HeuristicKind::ALL.len());

        for result in &results {
            info!(
                "{}: {}/{} placed, utilization {:.3}",
                result.heuristic,
                result.placed_count,
                result.total_count,
                result.utilization()
            );
            assert_eq!(result.total_count, pieces.len());
            assert_eq!(result.placed_count + result.skipped_count(), result.total_count);
            assert!(result.placed_area <= fabric.area());
            assert!(approx_eq!(
                f64,
                result.placed_area + result.waste_area,
                fabric.area(),
                epsilon = 1e-6
            ));
            assert!(assertions::result_is_consistent(result));
            assert!(assertions::placements_within_fabric(result));
            assert!(assertions::bboxes_disjoint(result));
            assert!(assertions::shelf_intervals_disjoint(result));
            assert!(assertions::ceiling_pieces_top_aligned(result));
        }
        Ok(())
    }

    #[test]
    fn legacy_input_drops_degenerate_and_oversized_pieces() -> Result<()> {
        init_logger();
        let ext_input = read_input(Path::new("../assets/legacy_shirt.json"))?;
        assert!(
            Importer::new(InvalidPiecePolicy::Abort)
                .import(&ext_input)
                .is_err()
        );

        let (fabric, pieces) = Importer::new(InvalidPiecePolicy::Skip).import(&ext_input)?;
        assert_eq!(fabric.margin, 0.5);
        assert_eq!(pieces.len(), 7);
        assert!(pieces.iter().all(|p| p.id != "degenerate"));

        for kind in HeuristicKind::ALL {
            let result = kind.pack(&pieces, &fabric, &EngineConfig::default());
            assert!(
                result.placement("oversized").is_none(),
                "{kind} placed a piece which cannot fit"
            );
            assert!(result.placement("collar").is_some(), "{kind} left the collar out");
        }
        Ok(())
    }

    #[test_case(HeuristicKind::FirstFitRowWise; "first_fit_row_wise")]
    #[test_case(HeuristicKind::ShelfFirstFit; "shelf_first_fit")]
    #[test_case(HeuristicKind::ShelfBwf; "shelf_bwf")]
    #[test_case(HeuristicKind::ShelfBfdh; "shelf_bfdh")]
    #[test_case(HeuristicKind::ShelfBhf; "shelf_bhf")]
    #[test_case(HeuristicKind::ShelfFloorCeiling; "shelf_floor_ceiling")]
    fn too_tall_piece_is_skipped(kind: HeuristicKind) {
        init_logger();
        let fabric = Fabric::try_new(100.0, 50.0, 1.0).unwrap();
        // even lying down, the tower is wider than the fabric
        let pieces = vec![
            rect_meta("a", 20.0, 10.0),
            rect_meta("tower", 10.0, 120.0),
            rect_meta("b", 30.0, 15.0),
        ];
        let result = kind.pack(&pieces, &fabric, &EngineConfig::default());
        assert!(result.placement("tower").is_none());
        assert!(result.placement("a").is_some());
        assert!(result.placement("b").is_some());
        assert_eq!(result.skipped_count(), 1);
    }

    #[test_case(HeuristicKind::FirstFitRowWise; "first_fit_row_wise")]
    #[test_case(HeuristicKind::ShelfBwf; "shelf_bwf")]
    #[test_case(HeuristicKind::ShelfBhf; "shelf_bhf")]
    #[test_case(HeuristicKind::ShelfFloorCeiling; "shelf_floor_ceiling")]
    fn runs_are_reproducible(kind: HeuristicKind) -> Result<()> {
        let ext_input = read_input(Path::new("../assets/garment_panels.json"))?;
        let (fabric, pieces) = Importer::default().import(&ext_input)?;
        let config = EngineConfig::default();
        assert_eq!(
            kind.pack(&pieces, &fabric, &config),
            kind.pack(&pieces, &fabric, &config)
        );
        Ok(())
    }

    #[test]
    fn zero_pieces_give_an_empty_result_everywhere() {
        let fabric = Fabric::try_new(10.0, 10.0, 0.0).unwrap();
        for kind in HeuristicKind::ALL {
            let result = kind.pack(&[], &fabric, &EngineConfig::default());
            assert_eq!(result.placed_count, 0);
            assert_eq!(result.waste_area, 100.0);
        }
    }

    #[cfg(feature = "rect-delegate")]
    #[test]
    fn delegate_keeps_the_margin_free() -> Result<()> {
        let ext_input = read_input(Path::new("../assets/garment_panels.json"))?;
        let (fabric, pieces) = Importer::default().import(&ext_input)?;
        let result = HeuristicKind::RectDelegate.pack(&pieces, &fabric, &EngineConfig::default());
        assert!(result.placed_count > 0);
        for pl in &result.placements {
            assert!(pl.x >= fabric.margin && pl.y >= fabric.margin);
            assert!(pl.x + pl.width <= fabric.width - fabric.margin + 1e-9);
            assert!(pl.y + pl.height <= fabric.length - fabric.margin + 1e-9);
            assert!(pl.slot.is_none());
        }
        Ok(())
    }
}
