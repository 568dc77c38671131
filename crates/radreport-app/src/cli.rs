// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "radreport", version, about = "Radiology report generator")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Configuration file (default: $RADREPORT_CONFIG or ./radreport.json)"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the model on two images and write the PDF report.
    Generate {
        #[arg(long, help = "Frontal chest image (JPG or PNG)")]
        frontal: Option<PathBuf>,
        #[arg(long, help = "Lateral chest image (JPG or PNG)")]
        lateral: Option<PathBuf>,
        #[arg(long, help = "Patient name")]
        patient: Option<String>,
        #[arg(long, default_value = ".", help = "Directory for the report PDF")]
        out: PathBuf,
    },
    /// Build the PDF report from existing summary text, without the model.
    Compose {
        #[arg(long)]
        frontal: PathBuf,
        #[arg(long)]
        lateral: PathBuf,
        #[arg(long)]
        patient: String,
        #[arg(long, help = "File holding the summary text, or - for stdin")]
        summary_file: PathBuf,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Show page count and page size of a PDF.
    Inspect { pdf: PathBuf },
    /// Print the effective configuration.
    Config,
}
