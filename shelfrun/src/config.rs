use fabric_nest::heuristics::HeuristicKind;
use fabric_nest::io::import::InvalidPiecePolicy;
use fabric_nest::io::svg::SvgDrawOptions;
use fabric_nest::util::EngineConfig;
use serde::{Deserialize, Serialize};

/// Configuration of a run of the nesting heuristics
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RunConfig {
    /// Heuristics to run, in order. All of them if not specified
    pub heuristics: Vec<HeuristicKind>,
    /// What to do with pieces whose geometry cannot be nested
    pub invalid_piece_policy: InvalidPiecePolicy,
    /// Configuration passed on to the heuristics
    pub engine: EngineConfig,
    pub svg_draw_options: SvgDrawOptions,
    /// Write an SVG next to every JSON result
    pub write_svg: bool,
    /// Unit of all input lengths, only used for reporting
    pub unit_label: String,
    /// How many input units make up a meter, the summary is reported in m and m²
    pub units_per_meter: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            heuristics: HeuristicKind::ALL.to_vec(),
            invalid_piece_policy: InvalidPiecePolicy::Skip,
            engine: EngineConfig::default(),
            svg_draw_options: SvgDrawOptions::default(),
            write_svg: true,
            unit_label: "cm".to_string(),
            units_per_meter: 100.0,
        }
    }
}
