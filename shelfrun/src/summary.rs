use fabric_nest::entities::PackingResult;
use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};
use thousands::Separable;

/// Human-readable statistics of a single [`PackingResult`], in meters
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SummaryRow {
    pub heuristic: String,
    pub placed_count: usize,
    pub total_count: usize,
    pub fabric_width_m: f64,
    pub fabric_length_m: f64,
    pub total_area_m2: f64,
    pub used_area_m2: f64,
    pub waste_area_m2: f64,
    /// Used area as a percentage of the fabric area
    pub utilization_pct: f64,
}

impl SummaryRow {
    /// `units_per_meter`: how many input length units make up a meter
    pub fn new(result: &PackingResult, units_per_meter: f64) -> Self {
        let sq_units_per_m2 = units_per_meter * units_per_meter;
        let fabric_width_m = result.fabric_width / units_per_meter;
        let fabric_length_m = result.fabric_length / units_per_meter;
        SummaryRow {
            heuristic: result.heuristic.clone(),
            placed_count: result.placed_count,
            total_count: result.total_count,
            fabric_width_m,
            fabric_length_m,
            total_area_m2: fabric_width_m * fabric_length_m,
            used_area_m2: result.placed_area / sq_units_per_m2,
            waste_area_m2: result.waste_area / sq_units_per_m2,
            utilization_pct: result.utilization() * 100.0,
        }
    }

    pub fn log(&self) {
        info!(
            "[SUMMARY] {}: placed {}/{} pieces | fabric: {:.2} m x {:.2} m ({:.2} m²) | used: {:.3} m², waste: {:.3} m², utilization: {:.1}%",
            self.heuristic,
            self.placed_count.separate_with_commas(),
            self.total_count.separate_with_commas(),
            self.fabric_width_m,
            self.fabric_length_m,
            self.total_area_m2,
            self.used_area_m2,
            self.waste_area_m2,
            self.utilization_pct,
        );
    }
}

const HEADER: [&str; 5] = ["heuristic", "placed", "used [m²]", "waste [m²]", "utilization"];

/// Renders the rows as a plain text table, best utilization marked with `*`
pub fn format_table(rows: &[SummaryRow]) -> String {
    //first of the best on ties
    let best = rows
        .iter()
        .position_min_by(|a, b| b.utilization_pct.total_cmp(&a.utilization_pct));

    let cells = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let marker = if Some(i) == best { "*" } else { "" };
            [
                format!("{}{marker}", row.heuristic),
                format!(
                    "{}/{}",
                    row.placed_count.separate_with_commas(),
                    row.total_count.separate_with_commas()
                ),
                format!("{:.3}", row.used_area_m2),
                format!("{:.3}", row.waste_area_m2),
                format!("{:.1}%", row.utilization_pct),
            ]
        })
        .collect_vec();

    let widths = (0..HEADER.len())
        .map(|col| {
            cells
                .iter()
                .map(|c| c[col].chars().count())
                .chain([HEADER[col].chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect_vec();

    let format_line = |line: &[String]| {
        line.iter()
            .zip(&widths)
            .enumerate()
            .map(|(col, (cell, &w))| match col {
                0 => format!("{cell:<w$}"),
                _ => format!("{cell:>w$}"),
            })
            .join(" | ")
    };

    let header = HEADER.map(String::from);
    let separator = widths.iter().map(|&w| "-".repeat(w)).join("-+-");

    [format_line(&header), separator]
        .into_iter()
        .chain(cells.iter().map(|c| format_line(c)))
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabric_nest::entities::{Fabric, Piece, PieceMeta};
    use fabric_nest::geometry::primitives::Point;
    use fabric_nest::heuristics::{FirstFitRowWise, PackingHeuristic, ShelfBwf};
    use float_cmp::approx_eq;

    fn results() -> Vec<PackingResult> {
        let square = |id: &str, s: f64| {
            let piece = Piece::new(
                id,
                vec![Point(0.0, 0.0), Point(s, 0.0), Point(s, s), Point(0.0, s)],
            );
            PieceMeta::try_from_piece(&piece).unwrap()
        };
        let pieces = vec![square("a", 100.0), square("b", 50.0)];
        let fabric = Fabric::try_new(150.0, 200.0, 0.0).unwrap();
        vec![FirstFitRowWise.pack(&pieces, &fabric), ShelfBwf.pack(&pieces, &fabric)]
    }

    #[test]
    fn areas_are_converted_to_square_meters() {
        let row = SummaryRow::new(&results()[0], 100.0);
        assert_eq!((row.fabric_width_m, row.fabric_length_m), (1.5, 2.0));
        assert!(approx_eq!(f64, row.total_area_m2, 3.0, ulps = 4));
        assert!(approx_eq!(f64, row.used_area_m2, 1.25, ulps = 4));
        assert!(approx_eq!(f64, row.waste_area_m2, 1.75, ulps = 4));
        assert!(approx_eq!(f64, row.utilization_pct, 1.25 / 3.0 * 100.0, epsilon = 1e-9));
    }

    #[test]
    fn table_has_a_line_per_result() {
        let rows = results()
            .iter()
            .map(|r| SummaryRow::new(r, 100.0))
            .collect_vec();
        let table = format_table(&rows);
        let lines = table.lines().collect_vec();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("heuristic"));
        // both place everything, the first one reaching the maximum is marked
        assert!(lines[2].starts_with("First-Fit Row-Wise*"));
        assert!(lines[3].contains("2/2"));
        assert!(lines.iter().skip(1).map(|l| l.chars().count()).all_equal());
    }
}
