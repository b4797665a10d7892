use std::path::PathBuf;

use clap::Parser;
use tote_optimizer::admission::{Tote, load_records};
use tote_optimizer::render;
use tote_optimizer::types::Dims;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "tote_optimizer",
    about = "Pick the most valuable, lightest set of products that fits one tote"
)]
struct Cli {
    /// Product feed, one `id,price,length,width,height,weight` row per line
    #[arg(long, default_value = "products.csv")]
    products: PathBuf,

    /// Tote dimensions (LxWxH, e.g. 30x35x45)
    #[arg(long, default_value = "30x35x45", value_parser = parse_dimensions)]
    tote: Dims,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

fn parse_dimensions(s: &str) -> Result<Dims, String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 3 {
        return Err(format!("invalid dimensions '{}', expected LxWxH", s));
    }
    let mut sides = [0u32; 3];
    for (side, raw) in sides.iter_mut().zip(&parts) {
        *side = raw
            .parse::<u32>()
            .map_err(|_| format!("invalid side '{}' in '{}'", raw, s))?;
    }
    Ok(Dims::new(sides[0], sides[1], sides[2]))
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let tote = Tote::new(cli.tote).unwrap_or_else(|e| fail(e));
    let records = load_records(&cli.products).unwrap_or_else(|e| fail(e));
    let report = tote_optimizer::pack(&records, &tote).unwrap_or_else(|e| fail(e));

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(e),
        }
    } else {
        print!("{}", render::render_report(&report));
    }
}
