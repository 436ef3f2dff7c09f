//! FIR analysis CLI.
//!
//! Usage:
//!     fira analyze "The accused murdered the victim" --format json
//!     fira analyze --file fir.txt --complainant "R. Sharma"
//!     fira ocr scanned_fir.jpg
//!     fira sections

use anyhow::Result;
use clap::{Parser, Subcommand};
use fira_dataset::{builtin_sections, load_sections_or_empty};
use fira_engine::Analyser;
use fira_model::{AnalysisReport, IncidentForm};
use fira_ocr::{OcrSpaceClient, OcrSpaceConfig, TextSource};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fira")]
#[command(about = "Analyse FIR narratives against the penal-code reference table")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON reference-table file; the built-in table is used
    /// when omitted
    #[arg(long)]
    dataset: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a narrative
    Analyze {
        /// Narrative text (or use --file)
        text: Option<String>,

        /// Read the narrative from a text file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Complainant name
        #[arg(long)]
        complainant: Option<String>,

        /// Incident location
        #[arg(long)]
        location: Option<String>,

        /// Incident date
        #[arg(long)]
        date: Option<String>,

        /// Accused name
        #[arg(long)]
        accused: Option<String>,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Extract text from a scanned document via OCR.space
    Ocr {
        /// Image file to scan
        image: PathBuf,

        /// OCR.space API key
        #[arg(long, default_value = "helloworld")]
        api_key: String,

        /// Analyse the extracted text as well
        #[arg(long)]
        analyze: bool,
    },

    /// List the loaded reference table
    Sections,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fira=debug".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let table = match &cli.dataset {
        Some(path) => load_sections_or_empty(path),
        None => builtin_sections(),
    };

    match cli.command {
        Commands::Analyze {
            text,
            file,
            complainant,
            location,
            date,
            accused,
            format,
        } => {
            let narrative = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(path)?,
                (None, None) => String::new(),
            };

            let form = build_form(complainant, location, date, accused);
            let engine = Analyser::new(table);
            let report = engine.analyse(&narrative, form.as_ref());
            print_report(&report, &format)?;
        }
        Commands::Ocr {
            image,
            api_key,
            analyze,
        } => {
            run_ocr(table, &image, api_key, analyze).await?;
        }
        Commands::Sections => {
            run_sections(&table);
        }
    }

    Ok(())
}

fn build_form(
    complainant: Option<String>,
    location: Option<String>,
    date: Option<String>,
    accused: Option<String>,
) -> Option<IncidentForm> {
    if complainant.is_none() && location.is_none() && date.is_none() && accused.is_none() {
        return None;
    }
    Some(IncidentForm {
        complainant_name: complainant,
        incident_location: location,
        incident_date: date,
        accused_name: accused,
        ..Default::default()
    })
}

fn print_report(report: &AnalysisReport, format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("Severity: {}", report.severity.label());
    println!("Priority: {}", report.priority.label());
    println!("Confidence: {}%", report.confidence);
    println!("Crimes: {}", report.crime_labels.join(", "));
    println!("---");

    if report.matched_sections.is_empty() {
        println!("No applicable sections found.");
    } else {
        for (i, hit) in report.matched_sections.iter().enumerate() {
            println!("\n{}. Section {} - {}", i + 1, hit.section.code, hit.section.title);
            println!("   Score: {}", hit.score);
            println!(
                "   Matched via: {}",
                hit.reasons
                    .iter()
                    .map(|r| r.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!("   Punishment: {}", hit.section.punishment_text());
        }
    }

    if !report.suggestions.is_empty() {
        println!("\nSuggestions:");
        for suggestion in &report.suggestions {
            println!("- {}", suggestion);
        }
    }

    println!("\nComplainant: {}", report.extracted_info.complainant);
    println!("Location: {}", report.extracted_info.location);
    println!("Date: {}", report.extracted_info.date);
    println!("Accused: {}", report.extracted_info.accused);

    Ok(())
}

async fn run_ocr(
    table: Vec<fira_model::Section>,
    image: &PathBuf,
    api_key: String,
    analyze: bool,
) -> Result<()> {
    let client = OcrSpaceClient::new(OcrSpaceConfig {
        api_key,
        ..Default::default()
    });

    let bytes = std::fs::read(image)?;
    let file_name = image
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.jpg");

    println!("Scanning {} via {}...", image.display(), client.name());
    let text = client.extract_text(bytes, file_name).await?;

    println!("--- Extracted text ---");
    println!("{}", text);

    if analyze {
        println!("--- Analysis ---");
        let engine = Analyser::new(table);
        let report = engine.analyse(&text, None);
        print_report(&report, "text")?;
    }

    Ok(())
}

fn run_sections(table: &[fira_model::Section]) {
    println!("{} sections loaded", table.len());
    for section in table {
        println!("{:>6}  {}", section.code, section.title);
    }
}
