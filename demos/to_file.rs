//! Writing to files: truncate, then append without repeating the header.
//!
//! Run with: cargo run --example to_file

use delimwrite::{encode, table, DelimOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join("delimwrite-demo.csv");
    let path_str = path.to_str().ok_or("temp path is not valid UTF-8")?;

    let first = table! { "step" => vec![1, 2], "loss" => vec![0.693, 0.41] };
    let second = table! { "step" => vec![3, 4], "loss" => vec![0.2875, 0.125] };

    // Empty destination returns the text instead of writing a file
    let preview = encode(&first, "", &DelimOptions::new())?;
    println!("Preview:\n{}", preview);

    encode(&first, path_str, &DelimOptions::new())?;
    let append = DelimOptions::new().with_header(false).with_append(true);
    encode(&second, path_str, &append)?;

    println!("{}:\n{}", path.display(), std::fs::read_to_string(&path)?);

    // Opening a path that cannot exist reports the path
    let bad = path.join("not-a-dir.csv");
    if let Err(err) = encode(&first, bad.to_str().unwrap_or("?"), &DelimOptions::new()) {
        println!("Expected failure: {}", err);
    }

    std::fs::remove_file(&path)?;
    Ok(())
}
