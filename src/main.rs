//! objbom - convert OBJ/MTL models into BOM containers
//!
//! # Commands
//!
//! - `objbom convert <output.bom> <input.obj>...` - Parse geometry documents
//!   (and the material libraries they reference) into one container
//! - `objbom inspect <file.bom>` - Print a summary of a container
//!
//! Material libraries are resolved relative to the geometry document that
//! references them. Set `RUST_LOG` or pass `-v` for more output.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use objbom::{Container, Converter, DirectoryResolver, ParserConfig, VertexMode};

/// Convert OBJ/MTL models into BOM containers
#[derive(Parser)]
#[command(name = "objbom")]
#[command(about = "Convert OBJ/MTL models into BOM containers")]
#[command(version)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert geometry documents into one container
    Convert(ConvertArgs),

    /// Print a summary of a container
    Inspect(InspectArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// Output container path
    output: Option<PathBuf>,

    /// Input geometry documents, one asset each
    inputs: Vec<PathBuf>,

    /// Emit one vertex per face corner instead of sharing identical corners
    #[arg(long)]
    expanded: bool,
}

#[derive(Args)]
struct InspectArgs {
    /// Container to decode
    file: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::builder()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let result = match cli.command {
        Commands::Convert(args) => convert(args),
        Commands::Inspect(args) => inspect(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn convert(args: ConvertArgs) -> objbom::Result<()> {
    let Some(output) = args.output else {
        log::warn!("No output path given, nothing to do");
        return Ok(());
    };
    if args.inputs.is_empty() {
        log::warn!("No input documents given, nothing to do");
        return Ok(());
    }

    let mode = if args.expanded {
        VertexMode::Expanded
    } else {
        VertexMode::Deduplicated
    };
    let mut converter = Converter::new(ParserConfig::new().with_vertex_mode(mode));
    let mut dropped = 0;

    for input in &args.inputs {
        let file = match File::open(input) {
            Ok(file) => file,
            Err(err) => {
                log::error!("Skipping '{}': {}", input.display(), err);
                dropped += 1;
                continue;
            }
        };
        let name = asset_name(input);
        let resolver = DirectoryResolver::new(input.parent().unwrap_or(Path::new("")));
        // the converter logs the reason
        if converter
            .add_document(&name, BufReader::new(file), &resolver)
            .is_err()
        {
            dropped += 1;
        }
    }

    let container = converter.finish();
    container.write_to_file(&output)?;
    log::info!(
        "Wrote '{}': {} material(s), {} asset(s), {} input(s) dropped",
        output.display(),
        container.material_count(),
        container.assets.len(),
        dropped
    );
    Ok(())
}

fn asset_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn inspect(args: InspectArgs) -> objbom::Result<()> {
    let container = Container::read_from_file(&args.file)?;

    println!(
        "{}: {} material(s), {} asset(s)",
        args.file.display(),
        container.material_count(),
        container.assets.len()
    );
    for material in container.materials() {
        println!(
            "  material {} '{}' (attributes {:#07x})",
            material.id,
            material.name,
            material.attributes().bits()
        );
    }
    for asset in &container.assets {
        println!(
            "  asset '{}': {} object(s)",
            asset.name.as_deref().unwrap_or("<unnamed>"),
            asset.objects.len()
        );
        for (index, object) in asset.objects.iter().enumerate() {
            println!(
                "    object {}: {} vertices{}{}{}",
                index,
                object.vertex_count(),
                if object.normals.is_empty() { "" } else { ", normals" },
                if object.uvs.is_empty() { "" } else { ", uvs" },
                if object.uvs2.is_empty() { "" } else { ", uvs2" },
            );
            for group in &object.groups {
                println!(
                    "      group '{}': {} face(s), smoothing {}, material {}",
                    group.name.as_deref().unwrap_or("<unnamed>"),
                    group.faces.len(),
                    group.smoothing,
                    group
                        .material
                        .map_or_else(|| "none".to_string(), |id| id.to_string())
                );
            }
        }
    }
    Ok(())
}
