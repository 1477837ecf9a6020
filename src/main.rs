//! Resume ranker: rank resumes against a job description by textual similarity

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::error;
use resume_ranker::cli::{self, Cli, Commands, ConfigAction};
use resume_ranker::config::{Config, OutputFormat};
use resume_ranker::error::{Result, ResumeRankerError};
use resume_ranker::input::manager::InputManager;
use resume_ranker::output::formatter;
use resume_ranker::processing::analyzer::AnalysisEngine;
use resume_ranker::processing::{ranker, rewriter};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Rank {
            job,
            resumes,
            min_rank,
            max_rank,
            output,
            save,
            detailed,
        } => {
            // Validate input files
            cli::validate_file_extension(&job, &["txt", "md"]).map_err(|e| {
                ResumeRankerError::InvalidInput(format!("Job description file: {}", e))
            })?;
            for resume in &resumes {
                cli::validate_file_extension(resume, &["pdf", "txt", "md"])
                    .map_err(|e| ResumeRankerError::InvalidInput(format!("Resume file: {}", e)))?;
            }

            let output_format =
                cli::parse_output_format(&output).map_err(ResumeRankerError::InvalidInput)?;

            // Extract the job description and the resume batch
            let mut input_manager = InputManager::new();
            let job_text = input_manager.extract_text(&job).await?;
            if job_text.trim().is_empty() {
                return Err(ResumeRankerError::InvalidInput(format!(
                    "Job description is empty: {}",
                    job.display()
                )));
            }

            let progress = ProgressBar::new(resumes.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len}")
                    .expect("Invalid progress template")
                    .progress_chars("=> "),
            );
            progress.set_message("Extracting resumes");
            let extraction = input_manager
                .load_batch(&resumes, |_| progress.inc(1))
                .await;
            progress.finish_and_clear();

            // Score, analyze, and rank
            let engine = AnalysisEngine::new(&config)?;
            let outcome = engine.analyze_batch(&job_text, extraction.resumes).await?;

            let mut skipped = extraction.skipped;
            skipped.extend(outcome.skipped);

            let filtered = ranker::filter_by_rank(&outcome.batch, min_rank, max_rank)?;

            let use_colors = config.output.color_output && save.is_none();
            let rendered = formatter::format_entries(
                &output_format,
                &filtered,
                &skipped,
                use_colors,
                detailed || config.output.detailed,
            )?;

            write_or_print(&rendered, save.as_ref()).await?;

            if save.is_none() && output_format == OutputFormat::Console {
                let summary = format!(
                    "Ranked {} of {} resumes against {}",
                    outcome.batch.len(),
                    outcome.batch.len() + skipped.len(),
                    job.display()
                );
                println!("\n{}", summary.bold());
            }
        }

        Commands::Rewrite { resume, job, save } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| ResumeRankerError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["txt", "md"]).map_err(|e| {
                ResumeRankerError::InvalidInput(format!("Job description file: {}", e))
            })?;

            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;
            if resume_text.trim().is_empty() {
                return Err(ResumeRankerError::EmptyDocument {
                    filename: resume.display().to_string(),
                });
            }
            let job_text = input_manager.extract_text(&job).await?;

            let engine = AnalysisEngine::new(&config)?;
            let skills = engine.analyze_skills(&resume_text, &job_text);
            let rewritten =
                rewriter::generate_ats_resume(&resume_text, &job_text, &skills.key_skills);

            write_or_print(&rewritten, save.as_ref()).await?;
        }

        Commands::Template { save } => {
            write_or_print(rewriter::create_template(), save.as_ref()).await?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let rendered = toml::to_string_pretty(&config).map_err(|e| {
                    ResumeRankerError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", rendered);
            }
            Some(ConfigAction::Reset) => {
                let default_config = Config::default();
                default_config.save()?;
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}

async fn write_or_print(content: &str, save: Option<&PathBuf>) -> Result<()> {
    match save {
        Some(path) => {
            tokio::fs::write(path, content).await?;
            println!("Saved to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
