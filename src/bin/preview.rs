//! Terminal preview of a generated band map.
//!
//! Prints the seed that was used, how many cells fell into each band and,
//! with `--ascii`, one glyph per cell.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use heightbands::seed::DEFAULT_SEED_DIGITS;
use heightbands::terrain::CleanupConfig;
use heightbands::{
    GeneratedMap, GenerationRequest, GeneratorConfig, MapSize, SeedSource, TerrainBand,
    TerrainGenerator,
};

/// Generate a terrain band map and print a summary.
#[derive(Parser)]
#[command(name = "preview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Side length of a square map (64, 128, 256 or any positive value).
    #[arg(long, default_value = "64")]
    size: MapSize,

    /// Map width, overrides --size.
    #[arg(long)]
    width: Option<usize>,

    /// Map height, overrides --size.
    #[arg(long)]
    height: Option<usize>,

    /// Decimal seed. Leave out for a random one.
    #[arg(short, long)]
    seed: Option<String>,

    /// Print a fresh random seed string and use it.
    #[arg(long, conflicts_with = "seed")]
    random_seed: bool,

    /// Water slider level, 0-100.
    #[arg(long)]
    water: Option<f64>,

    /// Grass slider level, 0-100.
    #[arg(long)]
    grass: Option<f64>,

    /// Mountain slider level, 0-100.
    #[arg(long)]
    mountain: Option<f64>,

    /// TOML generator configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the shoreline cleanup passes.
    #[arg(long)]
    no_cleanup: bool,

    /// Print the map itself.
    #[arg(long)]
    ascii: bool,
}

fn glyph(band: TerrainBand) -> char {
    match band {
        TerrainBand::Water => '~',
        TerrainBand::Shore => '.',
        TerrainBand::Lowland => ',',
        TerrainBand::Midland => '-',
        TerrainBand::Highland => '=',
        TerrainBand::Hills => 'n',
        TerrainBand::Mountains => '^',
    }
}

fn load_config(cli: &Cli) -> Result<GeneratorConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_toml(&std::fs::read_to_string(path)?)?,
        None => GeneratorConfig::default(),
    };

    if let Some(level) = cli.water {
        config.adjustments.water = level;
    }
    if let Some(level) = cli.grass {
        config.adjustments.grass = level;
    }
    if let Some(level) = cli.mountain {
        config.adjustments.mountain = level;
    }
    if cli.no_cleanup {
        config.cleanup = CleanupConfig {
            enabled: false,
            ..config.cleanup
        };
    }
    Ok(config)
}

fn print_summary(map: &GeneratedMap) {
    let total = (map.width() * map.height()) as f64;
    println!("Band counts:");
    for (band, count) in TerrainBand::ALL.iter().zip(map.band_counts()) {
        println!(
            "  {} {:<10} {:>7} ({:.1}%)",
            glyph(*band),
            band.name(),
            count,
            count as f64 * 100.0 / total
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let table = config.threshold_table();

    let mut seeds = SeedSource::from_entropy();
    let seed_text = if cli.random_seed {
        Some(seeds.seed_string(DEFAULT_SEED_DIGITS))
    } else {
        cli.seed.clone()
    };

    let mut request = GenerationRequest::new(
        cli.width.unwrap_or(cli.size.side()),
        cli.height.unwrap_or(cli.size.side()),
    );
    if let Some(text) = &seed_text {
        request = request.with_seed_str(text)?;
    }

    let generator = TerrainGenerator::new(config);
    let start = Instant::now();
    let map = generator.generate(&request, &table, &mut seeds)?;
    log::info!(
        "Generated {}x{} map in {:.2?}",
        map.width(),
        map.height(),
        start.elapsed()
    );

    println!("Seed: {}", map.seed);
    println!("Offset: ({}, {})", map.offset.dx, map.offset.dy);
    print_summary(&map);

    if cli.ascii {
        println!();
        for row in map.bands.rows() {
            let line: String = row.iter().map(|&band| glyph(band)).collect();
            println!("{}", line);
        }
    }

    Ok(())
}
