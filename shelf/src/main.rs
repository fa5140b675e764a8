use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use gangsheet::io::ext_repr::ExtNestInstance;
use gangsheet::io::svg::sheet_to_svg;
use gangsheet::io::{Importer, export_solution};
use itertools::Itertools;
use log::{info, warn};
use shelf::config::NestConfig;
use shelf::io::cli::Cli;
use shelf::io::output::NestOutput;
use shelf::opt::nester::Nester;
use shelf::{EPOCH, io};

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            NestConfig::default()
        }
        Some(config_file) => io::read_config(&config_file)?,
    };

    info!("Successfully parsed NestConfig: {config:?}");

    let input_file_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no valid name")?;

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {:?}",
                args.solution_folder
            )
        })?;
    }

    let ext_instance = io::read_instance(args.input_file.as_path())?;
    main_nest(ext_instance, config, input_file_stem, args.solution_folder)
}

fn main_nest(
    ext_instance: ExtNestInstance,
    config: NestConfig,
    input_stem: &str,
    output_folder: PathBuf,
) -> Result<()> {
    let (sheet_size, items) = Importer::new().import_instance(&ext_instance)?;
    let outcome = Nester::new(config).nest_all(&items, &sheet_size);

    for warning in &outcome.warnings {
        warn!("[MAIN] {warning}");
    }

    {
        let solution = export_solution(
            &outcome.sheets,
            &outcome.unplaced,
            outcome.warnings.iter().map(|w| w.to_string()).collect_vec(),
            config.padding,
            EPOCH.elapsed(),
        );
        let output = NestOutput {
            instance: ext_instance,
            solution,
            config,
        };

        let solution_path = output_folder.join(format!("sol_{input_stem}.json"));

        io::write_json(&output, Path::new(&solution_path))?;
    }

    {
        for (i, sheet) in outcome.sheets.iter().enumerate() {
            let svg_path = output_folder.join(format!("sol_{input_stem}_{i}.svg"));
            let svg = sheet_to_svg(sheet, config.padding, config.svg_draw_options, &sheet.name);

            io::write_svg(&svg, Path::new(&svg_path))?;
        }
    }

    Ok(())
}
