//! unlayout CLI - converts layout analysis results to indexable documents

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use unlayout::{convert_json_file, ConvertOptions, IdHashKey};

#[derive(Parser)]
#[command(name = "unlayout")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert a layout analysis result to indexable documents", long_about = None)]
struct Cli {
    /// Input analysis result (JSON)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Number of context lines before each table
    #[arg(long, default_value = "3", value_name = "N")]
    preceding_context: usize,

    /// Number of context lines after each table
    #[arg(long, default_value = "3", value_name = "N")]
    following_context: usize,

    /// Keep stacked column header rows as separate rows
    #[arg(long)]
    no_merge_headers: bool,

    /// Do not record page numbers in table metadata
    #[arg(long)]
    no_page_numbers: bool,

    /// Treat zero or absent cell spans as spans of one
    #[arg(long)]
    zero_span_as_one: bool,

    /// Also hash document metadata into document ids
    #[arg(long)]
    hash_meta: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> unlayout::Result<()> {
    let mut options = ConvertOptions::new()
        .with_preceding_context_len(cli.preceding_context)
        .with_following_context_len(cli.following_context)
        .with_merge_column_headers(!cli.no_merge_headers)
        .with_page_numbers(!cli.no_page_numbers);

    if cli.zero_span_as_one {
        options = options.zero_span_as_one();
    }
    if cli.hash_meta {
        options = options.with_id_hash_keys([IdHashKey::Content, IdHashKey::Meta]);
    }

    let documents = convert_json_file(&cli.input, &options)?;
    log::info!(
        "converted {} into {} documents",
        cli.input.display(),
        documents.len()
    );

    let json = if cli.compact {
        serde_json::to_string(&documents)?
    } else {
        serde_json::to_string_pretty(&documents)?
    };

    match &cli.output {
        Some(path) => fs::write(path, json)?,
        None => println!("{}", json),
    }

    Ok(())
}
