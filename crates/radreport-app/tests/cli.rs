// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The `radreport` binary, driven end to end with a shell script standing in
// for the model.

#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::{Value, json};
use tempfile::TempDir;

struct TestEnv {
    tmp: TempDir,
    frontal: PathBuf,
    lateral: PathBuf,
    config: PathBuf,
}

impl TestEnv {
    /// `script` is the body of the stand-in model, run by `/bin/sh`.
    fn new(script: &str) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let frontal = tmp.path().join("frontal.png");
        let lateral = tmp.path().join("lateral.jpg");
        write_image(&frontal, ImageFormat::Png);
        write_image(&lateral, ImageFormat::Jpeg);

        let script_path = tmp.path().join("model.sh");
        fs::write(&script_path, script).expect("write script");

        let config = tmp.path().join("radreport.json");
        let body = json!({
            "work_dir": tmp.path().join("uploads"),
            "inference": {
                "program": "/bin/sh",
                "script_args": [script_path],
                "timeout_secs": 30
            }
        });
        fs::write(&config, body.to_string()).expect("write config");

        Self {
            tmp,
            frontal,
            lateral,
            config,
        }
    }

    fn dir(&self) -> &Path {
        self.tmp.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("radreport");
        cmd.current_dir(self.dir())
            .env_remove("RADREPORT_CONFIG")
            .env("RUST_LOG", "warn")
            .arg("--config")
            .arg(&self.config);
        cmd
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}

fn write_image(path: &Path, format: ImageFormat) {
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(40, 40, |x, y| {
        Rgb([(x * 6) as u8, (y * 6) as u8, 200])
    }));
    img.save_with_format(path, format).expect("write fixture image");
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

#[test]
fn generate_writes_named_report() {
    let env = TestEnv::new("echo 'the lungs are clear. no effusion.'\n");
    let out_dir = env.dir().join("reports");

    let report = env.run_json(&[
        "generate",
        "--frontal",
        path_str(&env.frontal),
        "--lateral",
        path_str(&env.lateral),
        "--patient",
        "Jane Doe",
        "--out",
        path_str(&out_dir),
    ]);

    assert_eq!(report["ok"], true);
    assert_eq!(report["report"]["file_name"], "Jane Doe_report.pdf");
    assert_eq!(report["report"]["pages"], 1);
    assert!(out_dir.join("Jane Doe_report.pdf").is_file());
}

#[test]
fn generate_prints_success_line() {
    let env = TestEnv::new("echo 'no acute findings.'\n");
    let out = env
        .cmd()
        .args(["generate", "--patient", "Jane Doe", "--frontal"])
        .arg(&env.frontal)
        .arg("--lateral")
        .arg(&env.lateral)
        .arg("--out")
        .arg(env.dir())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8_lossy(&out);
    assert!(stdout.starts_with("Report generated successfully!"));
}

#[test]
fn generate_without_lateral_warns() {
    let env = TestEnv::new("echo unused\n");
    let out = env
        .cmd()
        .args(["generate", "--patient", "Jane Doe", "--frontal"])
        .arg(&env.frontal)
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8_lossy(&out);
    assert!(stderr.contains(
        "warning: Please upload both images and enter the patient's name to proceed."
    ));
}

#[test]
fn generate_reports_model_failure() {
    let env = TestEnv::new("echo 'model checkpoint missing' >&2\nexit 1\n");
    let message = env
        .cmd()
        .args(["--json", "generate", "--patient", "Jane Doe", "--frontal"])
        .arg(&env.frontal)
        .arg("--lateral")
        .arg(&env.lateral)
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let message: Value = serde_json::from_slice(&message).expect("valid json output");

    assert_eq!(message["ok"], false);
    assert_eq!(message["message"]["severity"], "error");
    assert_eq!(
        message["message"]["text"],
        "Error in processing: model checkpoint missing"
    );
}

#[test]
fn compose_from_stdin_then_inspect() {
    let env = TestEnv::new("exit 1\n");
    let summary = vec!["x".repeat(90); 18].join(" ");

    let composed = env
        .cmd()
        .args(["--json", "compose", "--patient", "Jane Doe", "--summary-file", "-"])
        .arg("--frontal")
        .arg(&env.frontal)
        .arg("--lateral")
        .arg(&env.lateral)
        .arg("--out")
        .arg(env.dir())
        .write_stdin(summary)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let composed: Value = serde_json::from_slice(&composed).expect("valid json output");
    assert_eq!(composed["pages"], 2);

    let pdf = env.dir().join("Jane Doe_report.pdf");
    let info = env.run_json(&["inspect", path_str(&pdf)]);
    assert_eq!(info["pages"], 2);
    let width = info["width_pt"].as_f64().expect("width");
    let height = info["height_pt"].as_f64().expect("height");
    assert!((width - 595.28).abs() < 0.5, "width {width}");
    assert!((height - 841.89).abs() < 0.5, "height {height}");
}

#[test]
fn config_prints_effective_settings() {
    let env = TestEnv::new("exit 0\n");
    let config = env.run_json(&["config"]);
    assert_eq!(config["inference"]["program"], "/bin/sh");
    assert_eq!(config["inference"]["timeout_secs"], 30);
    assert_eq!(config["layout"]["margin"], 50.0);
}

#[test]
fn malformed_config_is_reported() {
    let env = TestEnv::new("exit 0\n");
    fs::write(&env.config, "{ not json").expect("overwrite config");
    let out = env
        .cmd()
        .arg("config")
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8_lossy(&out);
    assert!(stderr.contains("error: An unexpected error occurred:"));
}
