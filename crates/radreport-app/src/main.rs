// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// radreport — Radiology report generator
//
// Entry point. Initialises logging, loads configuration, and dispatches the
// CLI subcommands. Every failure ends as a user-facing message and a non-zero
// exit code.

mod cli;

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use radreport_app::{ReportArtifact, ReportShell, ShellOutcome, Submission, Upload, report_file_name};
use radreport_core::error::ReportError;
use radreport_core::{AppConfig, DisplayMessage, Severity, humanize_error};
use radreport_document::{PdfInspector, ReportComposer};
use radreport_inference::CommandEngine;
use serde_json::json;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            if json {
                println!("{}", json!({ "ok": false, "message": message }));
            } else {
                let prefix = match message.severity {
                    Severity::Warning => "warning",
                    Severity::Error => "error",
                };
                eprintln!("{prefix}: {message}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), DisplayMessage> {
    let config_path = AppConfig::resolve_path(cli.config.as_deref());
    let config = AppConfig::load(&config_path).map_err(|err| humanize_error(&err))?;
    tracing::debug!(path = %config_path.display(), "Configuration loaded");

    match cli.command {
        Commands::Generate {
            frontal,
            lateral,
            patient,
            out,
        } => {
            let submission = Submission {
                frontal: frontal.map(Upload::from_path).transpose().map_err(human)?,
                lateral: lateral.map(Upload::from_path).transpose().map_err(human)?,
                patient_name: patient,
            };
            let shell = ReportShell::from_config(&config, CommandEngine::new(config.inference.clone()));
            match shell.handle(submission).await {
                ShellOutcome::Ready(artifact) => {
                    let path = save_artifact(&artifact, &out).map_err(human)?;
                    if cli.json {
                        println!(
                            "{}",
                            json!({ "ok": true, "path": path, "report": artifact.summary() })
                        );
                    } else {
                        println!("Report generated successfully!");
                        println!(
                            "{} ({} page(s), sha256 {})",
                            path.display(),
                            artifact.document.page_count(),
                            artifact.document.sha256()
                        );
                    }
                    Ok(())
                }
                ShellOutcome::Message(message) => Err(message),
            }
        }

        Commands::Compose {
            frontal,
            lateral,
            patient,
            summary_file,
            out,
        } => {
            let summary = read_summary(&summary_file).map_err(human)?;
            let document = ReportComposer::new(config.layout.clone())
                .compose_from_paths(&patient, &frontal, &lateral, &summary)
                .map_err(human)?;
            std::fs::create_dir_all(&out).map_err(|err| human(err.into()))?;
            let path = out.join(report_file_name(&patient));
            document.write_to(&path).map_err(human)?;
            if cli.json {
                println!(
                    "{}",
                    json!({
                        "ok": true,
                        "path": path,
                        "pages": document.page_count(),
                        "sha256": document.sha256(),
                    })
                );
            } else {
                println!("{} ({} page(s))", path.display(), document.page_count());
            }
            Ok(())
        }

        Commands::Inspect { pdf } => {
            let inspector = PdfInspector::open(&pdf).map_err(human)?;
            let (width, height) = inspector.page_size(1).map_err(human)?;
            if cli.json {
                println!(
                    "{}",
                    json!({
                        "pages": inspector.page_count(),
                        "width_pt": width,
                        "height_pt": height,
                    })
                );
            } else {
                println!("pages: {}", inspector.page_count());
                println!("page size: {width:.2} x {height:.2} pt");
            }
            Ok(())
        }

        Commands::Config => {
            let text = serde_json::to_string_pretty(&config).map_err(|err| human(err.into()))?;
            println!("{text}");
            Ok(())
        }
    }
}

fn human(err: ReportError) -> DisplayMessage {
    humanize_error(&err)
}

/// Write the artifact into `out_dir` under its download name.
fn save_artifact(artifact: &ReportArtifact, out_dir: &Path) -> radreport_core::Result<std::path::PathBuf> {
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(&artifact.file_name);
    artifact.document.write_to(&path)?;
    Ok(path)
}

fn read_summary(source: &Path) -> radreport_core::Result<String> {
    if source == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(source)?)
    }
}
