use std::{
    fs::{write, File},
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use itertools::Itertools;
use tracing::{info, warn};

use crate::{
    model::{Listing, Product},
    utils::row_spinner,
};

mod images;
mod model;
mod products;
mod utils;

const COLUMNS: [&str; 4] = ["image", "name", "cost", "gender"];

/// Group the product listings in a CSV file into the media feed JSON.
#[derive(Debug, Parser)]
struct Cli {
    #[arg(long, default_value = "public/products.csv")]
    input: PathBuf,

    #[arg(long, default_value = "public/media.json")]
    output: PathBuf,

    /// More logging (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match verbose {
        0 => "convert_products=info",
        1 => "convert_products=debug",
        _ => "convert_products=trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let listings = load_listings(&cli.input)?;
    info!("Read {} rows from {}", listings.len(), cli.input.display());

    let products = products::transform(listings);
    info!("Grouped into {} products", products.len());

    let hidden = products::missing_primary(&products);
    if !hidden.is_empty() {
        warn!(
            "{} products have no model1 image and won't show in the feed: {}",
            hidden.len(),
            hidden.iter().take(5).map(|x| &x.name).join(", ")
        );
    }

    let output = render(&products)?;
    write(&cli.output, output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    println!(
        "✓ Successfully converted {} products from CSV to JSON",
        products.len()
    );
    println!("✓ Output written to {}", cli.output.display());

    Ok(())
}

fn load_listings(path: &Path) -> Result<Vec<Listing>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    read_listings(file).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_listings(reader: impl Read) -> Result<Vec<Listing>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    for column in COLUMNS {
        ensure!(
            headers.iter().any(|x| x == column),
            "Missing column: {column}"
        );
    }

    let pb = row_spinner();
    let mut listings = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let listing: Listing = result.with_context(|| format!("Invalid row {}", i + 1))?;
        listings.push(listing);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(listings)
}

/// Pretty JSON with a trailing newline. Non-ASCII text is written as UTF-8
/// rather than `\u` escaped, so names outside ASCII won't match the old
/// Python output byte for byte.
fn render(products: &[Product]) -> Result<String> {
    let mut output = serde_json::to_string_pretty(products)?;
    output.push('\n');
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_any_column_order() {
        let csv = "gender,cost,extra,image,name\nM,10,x,a_model1,Shirt\nF,5,y,b,Hat\n";
        let listings = read_listings(csv.as_bytes()).unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].image, "a_model1");
        assert_eq!(listings[0].name, "Shirt");
        assert_eq!(listings[0].cost, "10");
        assert_eq!(listings[0].gender, "M");
        assert_eq!(listings[1].image, "b");
    }

    #[test]
    fn read_quoted_fields() {
        let csv = "image,name,cost,gender\n\"a_model1\",\"Shirt, Blue\",\"$10.00\",\n";
        let listings = read_listings(csv.as_bytes()).unwrap();
        assert_eq!(listings[0].name, "Shirt, Blue");
        assert_eq!(listings[0].cost, "$10.00");
        assert_eq!(listings[0].gender, "");
    }

    #[test]
    fn missing_column() {
        let csv = "image,name,cost\na_model1,Shirt,10\n";
        let err = read_listings(csv.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "Missing column: gender");
    }

    #[test]
    fn empty_file() {
        let listings = read_listings("".as_bytes()).unwrap();
        assert!(listings.is_empty());
        assert_eq!(render(&products::transform(listings)).unwrap(), "[]\n");
    }

    #[test]
    fn render_non_ascii() {
        let csv = "image,name,cost,gender\na_model1,Caf\u{e9} Tee,\u{20ac}10,F\n";
        let products = products::transform(read_listings(csv.as_bytes()).unwrap());
        let output = render(&products).unwrap();
        assert!(output.contains("\"name\": \"Caf\u{e9} Tee\""));
        assert!(output.contains("\"price\": \"\u{20ac}10\""));
    }

    #[test]
    fn short_row() {
        let csv = "image,name,cost,gender\na_model1,Shirt,10\n";
        let err = read_listings(csv.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid row 1");
    }

    #[test]
    fn header_only() {
        let csv = "image,name,cost,gender\n";
        assert!(read_listings(csv.as_bytes()).unwrap().is_empty());
        assert_eq!(render(&products::transform(Vec::new())).unwrap(), "[]\n");
    }

    #[test]
    fn render_products() {
        let csv = "image,name,cost,gender\na_model1,Shirt,10,M\na_prod2,Shirt,10,M\nx,Hat,5,F\n";
        let products = products::transform(read_listings(csv.as_bytes()).unwrap());
        let expected = r#"[
  {
    "id": 1,
    "type": "image",
    "url": "",
    "name": "Hat",
    "price": "5",
    "gender": "F",
    "images": {}
  },
  {
    "id": 2,
    "type": "image",
    "url": "a_model1",
    "name": "Shirt",
    "price": "10",
    "gender": "M",
    "images": {
      "model1": "a_model1",
      "prod2": "a_prod2"
    }
  }
]
"#;
        assert_eq!(render(&products).unwrap(), expected);

        let parsed: Vec<Product> = serde_json::from_str(expected).unwrap();
        assert_eq!(parsed, products);
    }
}
