//! Example: Sanity-check a metadata file with metasane.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path> [vocab_dir]
//!
//! Example:
//!   cargo run --example analyze -- sample_metadata.tsv vocabs/

use std::env;
use std::path::Path;

use metasane::{Parser, VocabularyLookup, VocabularySet};

fn main() -> metasane::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path> [vocab_dir]");
        std::process::exit(1);
    }

    let file_path = Path::new(&args[1]);
    if !file_path.exists() {
        eprintln!("Error: File not found: {}", file_path.display());
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Metasane Analysis: {}", file_path.display());
    println!("{}", separator);
    println!();

    let parser = Parser::new();
    let (table, source) = parser.parse_file(file_path)?;

    println!("## Source Metadata");
    println!("  File: {}", source.file);
    println!("  Format: {}", source.format);
    println!("  Rows: {}", source.row_count);
    println!("  Columns: {}", source.column_count);
    println!();

    let types = table.field_types();
    println!("## Field Types");
    for name in table.field_names() {
        let bucket = if types.numeric.contains(name) {
            "numeric"
        } else if types.timestamp.contains(name) {
            "timestamp"
        } else {
            "categorical"
        };
        println!("  {:30} {}", name, bucket);
    }
    println!();

    if args.len() > 2 {
        let vocabs = VocabularySet::from_dir(&args[2])?;
        println!("## Controlled Vocabularies ({} loaded)", vocabs.count());

        match table.validate_controlled_fields(&vocabs) {
            Ok(report) if report.is_clean() => {
                println!("  All controlled cells resolve to known terms.");
            }
            Ok(report) => {
                println!("  {} invalid cell(s):", report.invalid_cell_count);
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            Err(err) => println!("  Validation failed: {}", err),
        }
        println!();
    } else {
        let candidates = table.candidate_controlled_fields(None);
        println!("## Candidate Controlled Fields");
        for (field, vocab_ids) in &candidates {
            println!("  {:30} {:?}", field, vocab_ids);
        }
        println!();
    }

    let discrepancies = table.find_discrepancies();
    println!("## Discrepancies");
    if discrepancies.is_clean() {
        println!("  None found.");
    } else {
        println!("{}", serde_json::to_string_pretty(&discrepancies)?);
    }
    println!();

    println!("{}", separator);

    Ok(())
}
