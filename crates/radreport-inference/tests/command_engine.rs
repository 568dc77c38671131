// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// CommandEngine against stand-in model scripts run by /bin/sh.

#![cfg(unix)]

use std::path::{Path, PathBuf};

use radreport_core::InferenceConfig;
use radreport_core::error::ReportError;
use radreport_inference::{CommandEngine, InferenceEngine, InferenceInput};
use tempfile::TempDir;

fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    path
}

fn engine_for(script: &Path, timeout_secs: u64) -> CommandEngine {
    CommandEngine::new(InferenceConfig {
        program: "/bin/sh".into(),
        script_args: vec![script.display().to_string()],
        timeout_secs,
        ..InferenceConfig::default()
    })
}

fn input(dir: &Path) -> InferenceInput {
    InferenceInput {
        frontal: dir.join("image1.png"),
        lateral: dir.join("image2.png"),
    }
}

#[tokio::test]
async fn stdout_becomes_report_text() {
    let dir = TempDir::new().unwrap();
    let script = script(
        dir.path(),
        "ok.sh",
        r#"echo "the lungs are clear. no effusion noted."
echo "loading checkpoint" >&2"#,
    );

    let output = engine_for(&script, 30).infer(&input(dir.path())).await.unwrap();
    assert_eq!(output.report_text, "the lungs are clear. no effusion noted.\n");
    assert_eq!(output.diagnostics, "loading checkpoint\n");
}

#[tokio::test]
async fn model_flags_reach_the_script() {
    let dir = TempDir::new().unwrap();
    let script = script(dir.path(), "args.sh", r#"printf '%s\n' "$@""#);
    let input = input(dir.path());

    let output = engine_for(&script, 30).infer(&input).await.unwrap();
    let args: Vec<&str> = output.report_text.lines().collect();
    assert_eq!(
        args,
        vec![
            "--checkpoint",
            "ran_models/1_best_model.pth",
            "--image_paths",
            input.frontal.to_str().unwrap(),
            input.lateral.to_str().unwrap(),
            "--ann_path",
            "data/iu_xray/annotation.json",
            "--threshold",
            "3",
        ]
    );
}

#[tokio::test]
async fn non_zero_exit_surfaces_stderr() {
    let dir = TempDir::new().unwrap();
    let script = script(
        dir.path(),
        "fail.sh",
        r#"echo "partial output"
echo "FileNotFoundError: ran_models/1_best_model.pth" >&2
exit 2"#,
    );

    match engine_for(&script, 30).infer(&input(dir.path())).await {
        Err(ReportError::Subprocess { code, stderr }) => {
            assert_eq!(code, Some(2));
            assert_eq!(stderr, "FileNotFoundError: ran_models/1_best_model.pth\n");
        }
        other => panic!("expected subprocess error, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_model_times_out() {
    let dir = TempDir::new().unwrap();
    let script = script(dir.path(), "slow.sh", "sleep 10");

    let started = std::time::Instant::now();
    let err = engine_for(&script, 1).infer(&input(dir.path())).await.unwrap_err();
    assert!(matches!(err, ReportError::InferenceTimeout { seconds: 1 }));
    assert!(started.elapsed() < std::time::Duration::from_secs(8));
}

#[tokio::test]
async fn runs_in_configured_working_dir() {
    let dir = TempDir::new().unwrap();
    let model_dir = dir.path().join("model");
    std::fs::create_dir_all(&model_dir).unwrap();
    let script = script(dir.path(), "pwd.sh", "pwd");

    let mut engine_config = engine_for(&script, 30).config().clone();
    engine_config.working_dir = Some(model_dir.clone());
    let output = CommandEngine::new(engine_config)
        .infer(&input(dir.path()))
        .await
        .unwrap();

    let reported = PathBuf::from(output.report_text.trim());
    assert_eq!(
        reported.canonicalize().unwrap(),
        model_dir.canonicalize().unwrap()
    );
}
