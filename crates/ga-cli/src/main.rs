//! GreenAudit CLI

use clap::{Parser, Subcommand};
use ga_core::report::{AnalyzedClaim, AuditReport, AuditSummary, ReportFormat};
use ga_core::{analyze_claim, calculate_global_score, compute_verdict_counts, Claim};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "ga-audit")]
#[command(about = "Anti-Greenwashing Claim Compliance Analysis Tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a JSON file of claims and emit an audit report
    Analyze {
        /// Path to the claims file
        #[arg(short, long)]
        file: PathBuf,

        /// Output format (json, markdown)
        #[arg(short, long, default_value = "markdown")]
        output: String,

        /// Output file (defaults to stdout)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Evaluate a single claim text against the six criteria
    Check {
        /// Claim text to evaluate
        #[arg(short, long)]
        text: String,
    },

    /// Compute the global score from verdict counts
    Score {
        #[arg(long)]
        conforming: u32,

        #[arg(long)]
        at_risk: u32,

        #[arg(long)]
        non_conforming: u32,
    },

    /// Print the lexical corpora used by the rules
    Lexicon,
}

/// Input file: audited company plus its claims
#[derive(Deserialize)]
struct AuditFile {
    company_name: String,
    sector: String,
    claims: Vec<Claim>,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    match cli.command {
        Commands::Analyze {
            file,
            output,
            output_file,
        } => cmd_analyze(file, output, output_file),
        Commands::Check { text } => cmd_check(text),
        Commands::Score {
            conforming,
            at_risk,
            non_conforming,
        } => cmd_score(conforming, at_risk, non_conforming),
        Commands::Lexicon => cmd_lexicon(),
    }
}

fn cmd_analyze(file: PathBuf, output_format: String, output_file: Option<PathBuf>) {
    info!("Analyzing claims file: {}", file.display());

    let content = match std::fs::read_to_string(&file) {
        Ok(content) => content,
        Err(e) => {
            error!("Cannot read {}: {}", file.display(), e);
            std::process::exit(1);
        }
    };

    let audit_file: AuditFile = match serde_json::from_str(&content) {
        Ok(audit_file) => audit_file,
        Err(e) => {
            error!("Invalid claims file: {}", e);
            std::process::exit(1);
        }
    };

    if audit_file.claims.is_empty() {
        error!("The claims file contains no claims");
        std::process::exit(1);
    }

    let analyzed: Vec<AnalyzedClaim> = audit_file
        .claims
        .into_iter()
        .map(|claim| {
            let analysis = analyze_claim(&claim);
            AnalyzedClaim {
                claim,
                overall: analysis.overall,
                results: analysis.results.to_vec(),
            }
        })
        .collect();

    let counts = compute_verdict_counts(analyzed.iter().map(|a| a.overall.as_str()));
    let (score, risk_level) =
        calculate_global_score(counts.conforme, counts.risque, counts.non_conforme);

    let summary = AuditSummary {
        audit_id: Uuid::new_v4(),
        company_name: audit_file.company_name,
        sector: audit_file.sector,
        total_claims: counts.total(),
        conforming_claims: counts.conforme,
        at_risk_claims: counts.risque,
        non_conforming_claims: counts.non_conforme,
        global_score: score,
        risk_level,
        completed_at: Some(chrono::Utc::now()),
    };

    let report = AuditReport::build(&summary, &analyzed);

    let format = match output_format.as_str() {
        "json" => ReportFormat::Json,
        "markdown" => ReportFormat::Markdown,
        other => {
            error!("Unknown output format: {} (expected json or markdown)", other);
            std::process::exit(1);
        }
    };

    let rendered = match ga_core::report::generate_report(&report, format) {
        Ok(rendered) => rendered,
        Err(e) => {
            error!("Report generation failed: {}", e);
            std::process::exit(1);
        }
    };

    match output_file {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, rendered) {
                error!("Cannot write {}: {}", path.display(), e);
                std::process::exit(1);
            }
            info!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    info!(
        "Score global : {:.2}/100 — Risque {}",
        score, risk_level
    );
}

fn cmd_check(text: String) {
    let claim = Claim {
        claim_text: text,
        ..Claim::default()
    };
    let analysis = analyze_claim(&claim);

    println!("{:<20} {:<15} Explication", "Critère", "Verdict");
    println!("{}", "-".repeat(80));
    for result in &analysis.results {
        println!(
            "{:<20} {:<15} {}",
            result.criterion.label(),
            result.verdict.label(),
            result.explanation
        );
    }
    println!("{}", "-".repeat(80));
    println!("Verdict global : {}", analysis.overall.label());
}

fn cmd_score(conforming: u32, at_risk: u32, non_conforming: u32) {
    let (score, risk_level) = calculate_global_score(conforming, at_risk, non_conforming);
    println!("Score global : {:.2}/100", score);
    println!("Niveau de risque : {}", risk_level);
}

fn cmd_lexicon() {
    println!("Termes génériques interdits :");
    for term in ga_core::lexicon::BLACKLIST_TERMS {
        println!("  - {}", term);
    }
    println!("\nTermes de neutralité carbone :");
    for term in ga_core::lexicon::CARBON_NEUTRAL_TERMS {
        println!("  - {}", term);
    }
    println!("\nMotifs de qualification mesurable :");
    for pattern in ga_core::lexicon::qualification_patterns() {
        println!("  - {}", pattern.as_str());
    }
    println!("\nMotifs d'aspect partiel :");
    for pattern in ga_core::lexicon::partial_scope_patterns() {
        println!("  - {}", pattern.as_str());
    }
}
