// src/main.rs
mod edgar;
mod extractors;
mod storage;
mod utils;

use clap::Parser;
use edgar::client;
use extractors::facts::FactIndex;
use extractors::report::extract_report;
use std::path::PathBuf;
use storage::StorageManager;
use utils::AppError;

/// Command Line Interface for the SEC XBRL report extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of an XBRL instance document on EDGAR
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Path to an already-downloaded XBRL instance document
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output directory for extracted report items
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Debug mode - dump the parsed fact table alongside the output
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Obtain the document body. Fetching is the crawl collaborator's
    //    job; the extractor itself only ever sees URL + body text.
    let (source, body) = if let Some(path) = &args.file {
        let body = std::fs::read_to_string(path)?;
        (path.display().to_string(), body)
    } else if let Some(url) = &args.url {
        let body = client::download_filing_doc(url).await?;
        (url.clone(), body)
    } else {
        return Err(AppError::Config(
            "Provide either --file or --url".to_string(),
        ));
    };
    tracing::info!("Loaded document ({} bytes) from {}", body.len(), source);

    // 4. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 5. Optionally dump the parsed fact table for debugging
    if args.debug {
        match FactIndex::build(&body) {
            Ok(index) => {
                let dump_path = PathBuf::from(&args.output_dir).join("fact_table.tsv");
                if let Err(e) = utils::xml_debug::dump_fact_table(&index, &dump_path) {
                    tracing::warn!("Failed to write fact table dump: {}", e);
                } else {
                    tracing::info!("Wrote fact table dump to {}", dump_path.display());
                }
            }
            Err(e) => tracing::warn!("Skipping fact table dump: {}", e),
        }
    }

    // 6. Extract the report
    match extract_report(&source, &body)? {
        Some(item) => {
            tracing::info!(
                "Extracted {} {} {} ending {}",
                item.symbol,
                item.doc_type,
                item.period_focus,
                item.end_date
            );
            println!(
                "{}",
                serde_json::to_string_pretty(&item)
                    .map_err(|e| AppError::Config(e.to_string()))?
            );
            let path = storage.save_report(&item)?;
            tracing::info!("Saved report to: {}", path.display());
        }
        None => {
            tracing::warn!(
                "Document at {} is unsupported (obsolete schema generation or non-10-K/Q); no report produced",
                source
            );
        }
    }

    Ok(())
}
