use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use press_extract::feed::{self, Document};
use press_extract::report::{self, ReportOptions};
use press_extract::{extract_traced, ExtractedContent, Trace};

#[derive(Parser)]
#[command(name = "press_extract", about = "Structured content from MFN press releases")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one release (raw HTML, or a feed page / news item as JSON)
    Extract {
        path: PathBuf,
        /// Print JSON instead of the readable report
        #[arg(long)]
        json: bool,
        /// Max chars of the about text to show
        #[arg(long, default_value = "500")]
        about_chars: usize,
        /// Max chars of each section body to show
        #[arg(long, default_value = "200")]
        preview_chars: usize,
    },
    /// Extract every .html/.htm/.json file in a directory
    Batch {
        dir: PathBuf,
        /// Max files to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Print one JSON object per document
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            path,
            json,
            about_chars,
            preview_chars,
        } => {
            let docs = feed::load_documents(&path)?;
            if docs.is_empty() {
                println!("No documents in {}.", path.display());
                return Ok(());
            }
            let opts = ReportOptions {
                about_chars,
                preview_chars,
            };
            for doc in &docs {
                let (content, trace) = extract_traced(&doc.html);
                log_trace(&doc.label, &trace);
                if json {
                    println!("{}", serde_json::to_string_pretty(&json_record(doc, &content))?);
                } else {
                    println!("{}", report::render(doc, &content, opts));
                }
            }
            Ok(())
        }
        Commands::Batch { dir, limit, json } => {
            let paths = feed::collect_inputs(&dir, limit)?;
            if paths.is_empty() {
                println!("No input files in {}.", dir.display());
                return Ok(());
            }
            info!("Extracting {} files from {}", paths.len(), dir.display());
            let counts = process_files(&paths, json)?;
            counts.print();
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

#[derive(Default)]
struct BatchCounts {
    files: usize,
    skipped: usize,
    documents: usize,
    contacts: usize,
    with_about: usize,
    with_adviser: usize,
    with_disclosure: usize,
    sections: usize,
}

impl BatchCounts {
    fn add(&mut self, content: &ExtractedContent) {
        self.documents += 1;
        self.contacts += content.contacts.len();
        self.sections += content.sections.len();
        self.with_about += content.about_company.is_some() as usize;
        self.with_adviser += content.certified_adviser.is_some() as usize;
        self.with_disclosure += content.regulatory_disclosure.is_some() as usize;
    }

    fn print(&self) {
        eprintln!(
            "Read {} files ({} skipped): {} documents, {} contacts, {} sections.",
            self.files, self.skipped, self.documents, self.contacts, self.sections,
        );
        eprintln!(
            "With about: {} | adviser: {} | disclosure: {}",
            self.with_about, self.with_adviser, self.with_disclosure,
        );
    }
}

struct Extracted {
    doc: Document,
    content: ExtractedContent,
    trace: Trace,
}

fn process_files(paths: &[PathBuf], json: bool) -> anyhow::Result<BatchCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .context("invalid progress template")?
            .progress_chars("#>-"),
    );

    let mut counts = BatchCounts::default();

    for chunk in paths.chunks(500) {
        let results: Vec<_> = chunk.par_iter().map(|p| extract_file(p)).collect();

        for (path, result) in chunk.iter().zip(results) {
            counts.files += 1;
            let extracted = match result {
                Ok(extracted) => extracted,
                Err(e) => {
                    counts.skipped += 1;
                    warn!("Skipping {}: {:#}", path.display(), e);
                    continue;
                }
            };
            for Extracted { doc, content, trace } in extracted {
                log_trace(&doc.label, &trace);
                counts.add(&content);
                if json {
                    println!("{}", serde_json::to_string(&json_record(&doc, &content))?);
                }
            }
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(counts)
}

fn extract_file(path: &Path) -> anyhow::Result<Vec<Extracted>> {
    let docs = feed::load_documents(path)?;
    Ok(docs
        .into_iter()
        .map(|doc| {
            let (content, trace) = extract_traced(&doc.html);
            Extracted { doc, content, trace }
        })
        .collect())
}

fn json_record(doc: &Document, content: &ExtractedContent) -> serde_json::Value {
    serde_json::json!({
        "document": doc.label,
        "newsId": doc.item.as_ref().map(|i| i.news_id.as_str()),
        "content": content,
    })
}

fn log_trace(label: &str, trace: &Trace) {
    debug!(
        document = label,
        contacts = trace.contacts.unwrap_or("-"),
        about = trace.about.unwrap_or("-"),
        regulatory = trace.regulatory.unwrap_or("-"),
        lines = trace.contact_lines,
        patterns = ?trace.patterns,
        "located blocks"
    );
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
