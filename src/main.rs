//! Command-line entry point for the icon build pipeline.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use iconsmith::{
    ExportOptions, GridOptions, IconCollection, IconSpecification, MissingShapePolicy,
    ShapeStore, load_combinations, load_icon_specifications,
};

#[derive(Parser)]
#[command(name = "iconsmith", about = "Icon-asset build pipeline", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build all icons, grid sheets, and raster renditions.
    Generate(GenerateArguments),
}

#[derive(Args)]
struct GenerateArguments {
    /// Sketch SVG file to extract shapes from; repeatable.
    #[arg(long = "sketch")]
    sketches: Vec<PathBuf>,

    /// Flat JSON shape atlas.
    #[arg(long)]
    atlas: Option<PathBuf>,

    /// Hierarchical icon configuration.
    #[arg(long)]
    config: PathBuf,

    /// Shape combination overlays.
    #[arg(long)]
    combinations: Option<PathBuf>,

    /// Directory for per-icon SVG files.
    #[arg(long, default_value = "out")]
    output: PathBuf,

    /// Directory for grid sheets.
    #[arg(long, default_value = "doc")]
    doc: PathBuf,

    /// License file copied next to exported icons.
    #[arg(long, default_value = "LICENSE")]
    license: PathBuf,

    /// Version marker copied next to exported icons.
    #[arg(long = "version-file", default_value = "VERSION")]
    version_file: PathBuf,

    /// Also export icons under human-readable names with this prefix.
    #[arg(long)]
    name_prefix: Option<String>,

    /// PNG size to render per icon; repeatable.
    #[arg(long = "raster-size")]
    raster_sizes: Vec<u32>,

    /// Substitute the default shape for unknown ids instead of failing.
    #[arg(long)]
    lenient: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Generate(arguments) => generate(&arguments),
    };
    if let Err(error) = result {
        log::error!("{error}");
        std::process::exit(1);
    }
}

fn generate(arguments: &GenerateArguments) -> iconsmith::Result<()> {
    let mut store = ShapeStore::new();
    if arguments.lenient {
        store = store.with_missing_shape_policy(MissingShapePolicy::SubstituteDefault);
    }
    for sketch in &arguments.sketches {
        store.add_from_file(sketch)?;
    }
    if let Some(atlas) = &arguments.atlas {
        store.add_from_json(atlas)?;
    }

    let icons = load_icon_specifications(&arguments.config)?;
    let mut collection = IconCollection::from_specifications(
        icons,
        Some(&|icon: &IconSpecification| !icon.is_part),
    );
    if let Some(combinations) = &arguments.combinations {
        collection.add_combinations(load_combinations(combinations)?);
    }
    collection.sort();

    let options = ExportOptions {
        raster_sizes: arguments.raster_sizes.clone(),
        ..ExportOptions::default()
    };
    collection.draw_icons(
        &arguments.output.join("icons"),
        &store,
        &arguments.license,
        &arguments.version_file,
        &options,
    )?;

    if let Some(prefix) = &arguments.name_prefix {
        let by_name = ExportOptions {
            by_name: true,
            name_prefix: prefix.clone(),
            raster_sizes: arguments.raster_sizes.clone(),
            ..ExportOptions::default()
        };
        collection.draw_icons(
            &arguments.output.join("icons_by_name"),
            &store,
            &arguments.license,
            &arguments.version_file,
            &by_name,
        )?;
    }

    std::fs::create_dir_all(&arguments.doc)?;
    collection.draw_grid(&arguments.doc.join("grid.svg"), &store, &GridOptions::default())?;
    collection.draw_grid(
        &arguments.doc.join("grid_sketch.svg"),
        &store,
        &GridOptions {
            only_sketch: true,
            ..GridOptions::default()
        },
    )?;

    Ok(())
}
