use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use fabric_nest::heuristics::run_heuristics;
use fabric_nest::io::export::export_result;
use fabric_nest::io::import::Importer;
use fabric_nest::io::svg::result_to_svg;
use itertools::Itertools;
use log::{info, warn};
use shelfrun::config::RunConfig;
use shelfrun::io::cli::Cli;
use shelfrun::io::output::RunOutput;
use shelfrun::summary::{SummaryRow, format_table};
use shelfrun::{EPOCH, io};

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let mut config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            RunConfig::default()
        }
        Some(config_file) => {
            let file = File::open(&config_file)
                .with_context(|| format!("could not open config file: {}", config_file.display()))?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };
    if !args.heuristics.is_empty() {
        config.heuristics = args.heuristics;
    }

    info!("[MAIN] Successfully parsed RunConfig: {config:?}");

    let input_file_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("invalid input file name: {}", args.input_file.display()))?;

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    let ext_input = io::read_input(&args.input_file)?;
    let importer = Importer::new(config.invalid_piece_policy);
    let (fabric, pieces) = importer.import(&ext_input)?;
    info!(
        "[MAIN] Imported {} pieces on a {} x {} {} fabric (margin {})",
        pieces.len(),
        fabric.width,
        fabric.length,
        config.unit_label,
        fabric.margin
    );

    let results = run_heuristics(&config.heuristics, &pieces, &fabric, &config.engine);

    for (kind, result) in config.heuristics.iter().zip(&results) {
        let stem = format!("{input_file_stem}_{}", kind.key());

        let json_path = args.solution_folder.join(format!("{stem}.json"));
        io::write_json(&export_result(result), Path::new(&json_path))?;

        if config.write_svg {
            let svg_path = args.solution_folder.join(format!("{stem}.svg"));
            let svg = result_to_svg(result, config.svg_draw_options);
            io::write_svg(&svg, Path::new(&svg_path))?;
        }
    }

    let summary = results
        .iter()
        .map(|r| SummaryRow::new(r, config.units_per_meter))
        .collect_vec();
    summary.iter().for_each(SummaryRow::log);
    println!("{}", format_table(&summary));

    let output = RunOutput {
        input: ext_input,
        summary,
        results: results.iter().map(export_result).collect(),
        run_time_ms: EPOCH.elapsed().as_millis() as u64,
        config,
    };
    let summary_path = args
        .solution_folder
        .join(format!("{input_file_stem}_summary.json"));
    io::write_json(&output, Path::new(&summary_path))?;

    Ok(())
}
