// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::core::{ConfigManager, FsOps};
use crate::optimizer::{GeminiClient, ResumeOptimizer};
use crate::template_system::{list_templates, TemplateKind};
use crate::types::{OptimizationResult, ResumeData};
use crate::utils::export_resume;
use crate::web::{start_web_server, AppState};

/// Keywords shown in the optimization summary
const SUMMARY_KEYWORDS: usize = 15;

#[derive(Parser)]
#[command(name = "ats-resume")]
#[command(about = "Optimize resumes for applicant tracking systems and export them as DOCX")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Optimize a resume against a job description
    Optimize {
        /// Plain-text resume
        #[arg(long)]
        resume: PathBuf,
        /// Plain-text job description
        #[arg(long)]
        job: PathBuf,
        /// Write the full result as JSON
        #[arg(long)]
        output: Option<PathBuf>,
        /// Also export the optimized resume with this template
        #[arg(long)]
        export: Option<TemplateKind>,
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Render a resume JSON file to DOCX
    Render {
        /// ResumeData or OptimizationResult JSON
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = TemplateKind::Standard)]
        template: TemplateKind,
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Stamp the document with the current time instead of the fixed epoch
        #[arg(long)]
        timestamp: bool,
        /// Render even when required contact fields are blank
        #[arg(long)]
        allow_incomplete: bool,
    },
    /// List available templates
    Templates,
}

/// Either a bare resume or a full optimization result
#[derive(Deserialize)]
#[serde(untagged)]
enum ResumeInput {
    Result(Box<OptimizationResult>),
    Resume(Box<ResumeData>),
}

pub fn parse_resume_input(text: &str) -> Result<ResumeData> {
    let input: ResumeInput = serde_json::from_str(text)
        .context("Input is neither a ResumeData nor an OptimizationResult document")?;

    Ok(match input {
        ResumeInput::Result(result) => result.optimized_resume,
        ResumeInput::Resume(resume) => *resume,
    })
}

pub async fn handle_command(command: Command, config: ConfigManager) -> Result<()> {
    match command {
        Command::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            let client = GeminiClient::new(config.gemini_settings())?;
            config.ensure_directories().await?;

            let state = AppState {
                optimizer: Arc::new(client),
                render_options: config.render_options(),
            };
            start_web_server(state, port).await
        }

        Command::Optimize {
            resume,
            job,
            output,
            export,
            output_dir,
        } => {
            let resume_text = FsOps::read_file_safe(&resume).await?;
            let job_description = FsOps::read_file_safe(&job).await?;

            let client = GeminiClient::new(config.gemini_settings())?;
            let result = client
                .optimize(&resume_text, &job_description)
                .await
                .context("Optimization failed")?;

            print_summary(&result);

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(&result)
                    .context("Failed to serialize optimization result")?;
                FsOps::write_file_safe(&path, &json).await?;
                println!("Result written to {}", path.display());
            }

            if let Some(template) = export {
                let dir = output_dir.unwrap_or_else(|| config.output_path.clone());
                let path = export_resume(
                    &result.optimized_resume,
                    template,
                    &dir,
                    &config.render_options(),
                )
                .await?;
                println!("Exported {}", path.display());
            }

            Ok(())
        }

        Command::Render {
            input,
            template,
            output_dir,
            timestamp,
            allow_incomplete,
        } => {
            let resume = load_resume(&input).await?;
            let mut options = config.render_options();
            options.allow_incomplete |= allow_incomplete;
            if timestamp {
                options.created_at = Some(chrono::Utc::now());
            }

            let dir = output_dir.unwrap_or_else(|| config.output_path.clone());
            let path = export_resume(&resume, template, &dir, &options).await?;
            println!("Exported {}", path.display());
            Ok(())
        }

        Command::Templates => {
            for template in list_templates() {
                println!(
                    "{:<12} {:<26} {}{}",
                    template.id.id(),
                    template.name,
                    template.description,
                    if template.ats_safe {
                        ""
                    } else {
                        " (not ATS-safe)"
                    }
                );
            }
            Ok(())
        }
    }
}

async fn load_resume(path: &Path) -> Result<ResumeData> {
    let text = FsOps::read_file_safe(path).await?;
    let resume = parse_resume_input(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    info!(
        "Loaded resume for {} from {}",
        resume.personal_info.full_name,
        path.display()
    );
    Ok(resume)
}

fn print_summary(result: &OptimizationResult) {
    println!("ATS score: {}", result.ats_score);

    let matched = result.top_matched_keywords(SUMMARY_KEYWORDS);
    if !matched.is_empty() {
        let more = result.matched_keywords.len() - matched.len();
        print!("Matched keywords: {}", matched.join(", "));
        if more > 0 {
            print!(" (+{} more)", more);
        }
        println!();
    }
    if !result.missing_keywords.is_empty() {
        println!("Missing keywords: {}", result.missing_keywords.join(", "));
    }
    for suggestion in &result.suggestions {
        println!("  - {}", suggestion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::schema::samples::valid_result;
    use crate::types::resume_data::fixtures::sample_resume;

    #[test]
    fn test_parse_bare_resume() {
        let json = serde_json::to_string(&sample_resume()).unwrap();
        assert_eq!(parse_resume_input(&json).unwrap(), sample_resume());
    }

    #[test]
    fn test_parse_optimization_result() {
        let resume = parse_resume_input(&valid_result().to_string()).unwrap();
        assert_eq!(resume.personal_info.full_name, "Jane A. Doe");
        assert_eq!(resume.experience[0].description, vec!["Led team of 5"]);
    }

    #[test]
    fn test_parse_rejects_other_json() {
        assert!(parse_resume_input(r#"{"hello": "world"}"#).is_err());
    }

    #[test]
    fn test_cli_parses_render_arguments() {
        let cli = Cli::parse_from([
            "ats-resume",
            "render",
            "--input",
            "resume.json",
            "--template",
            "two_column",
            "--json-logs",
        ]);

        assert!(cli.json_logs);
        match cli.command {
            Command::Render {
                input, template, ..
            } => {
                assert_eq!(input, PathBuf::from("resume.json"));
                assert_eq!(template, TemplateKind::TwoColumn);
            }
            _ => panic!("expected render command"),
        }
    }

    #[tokio::test]
    async fn test_render_command_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("resume.json");
        std::fs::write(&input, serde_json::to_string(&sample_resume()).unwrap()).unwrap();

        let config = ConfigManager::from_sources(None, "local", |_| None).unwrap();
        handle_command(
            Command::Render {
                input,
                template: TemplateKind::Minimalist,
                output_dir: Some(dir.path().join("out")),
                timestamp: false,
                allow_incomplete: false,
            },
            config,
        )
        .await
        .unwrap();

        assert!(dir
            .path()
            .join("out/Jane_A._Doe_Resume_minimalist.docx")
            .exists());
    }
}
