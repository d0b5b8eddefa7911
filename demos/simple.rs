//! Basic table encoding.
//!
//! Run with: cargo run --example simple

use delimwrite::{table, to_string, to_string_with_options, DelimOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let sensors = table! {
        "id" => vec![Some(1), Some(2), None],
        "location" => vec![Some("Lab, east wing"), Some("Roof"), None],
        "reading" => vec![Some(21.5), Some(f64::NAN), Some(1e-9)],
        "online" => vec![Some(true), Some(false), None],
    };

    // Comma separated, header on, NA for missing values
    let csv = to_string(&sensors)?;
    println!("CSV output:\n{}", csv);

    // Tab separated, empty string for missing values
    let options = DelimOptions::tsv().with_na("");
    let tsv = to_string_with_options(&sensors, &options)?;
    println!("TSV output:\n{}", tsv);

    // Every double reads back to the exact same value
    for line in csv.lines().skip(1) {
        let reading = line.rsplit(',').nth(1).unwrap_or_default();
        if let Ok(v) = reading.parse::<f64>() {
            println!("✓ {} parses back to {:e}", reading, v);
        }
    }

    Ok(())
}
