//! Command-line entrypoints
//!
//! One process invocation performs one full training or one full evaluation
//! and terminates. Both commands emit exactly one JSON object on stdout and
//! always succeed at the process level: failures become `{"error": ...}`
//! payloads, never a non-zero exit or an unhandled fault. Logs go to stderr
//! only.

use crate::config::Settings;
use crate::pipeline::{self, EvaluationRequest, TrainingRequest};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "medscreen", version, about = "Disease screening model training and evaluation")]
pub struct Cli {
    /// Dataset directory (overrides MEDSCREEN_DATASETS)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train a classifier; reads a JSON request from stdin, with the
    /// optional argument as a fallback for manual testing
    Train { input: Option<String> },
    /// Evaluate a weight artifact against a disease's hold-out split;
    /// input rules match `train`
    Evaluate { input: Option<String> },
}

/// Handle a training invocation.
pub fn cmd_train(input: Option<&str>, settings: &Settings) {
    println!("{}", train_output(&resolve_input(input), settings));
}

/// Handle an evaluation invocation.
pub fn cmd_evaluate(input: Option<&str>, settings: &Settings) {
    println!("{}", evaluate_output(&resolve_input(input), settings));
}

/// Run training on a raw JSON payload and render the response (or error)
/// as the single-line JSON object the caller contract expects.
pub fn train_output(payload: &str, settings: &Settings) -> String {
    if payload.trim().is_empty() {
        return error_payload("no input data provided");
    }
    match serde_json::from_str::<TrainingRequest>(payload) {
        Ok(request) => match pipeline::train(&request, settings) {
            Ok(response) => render(&response),
            Err(err) => error_payload(&err.to_string()),
        },
        Err(err) => error_payload(&format!("invalid JSON input: {err}")),
    }
}

/// Evaluation counterpart of [`train_output`].
pub fn evaluate_output(payload: &str, settings: &Settings) -> String {
    if payload.trim().is_empty() {
        return error_payload("no input data provided");
    }
    match serde_json::from_str::<EvaluationRequest>(payload) {
        Ok(request) => match pipeline::evaluate(&request, settings) {
            Ok(response) => render(&response),
            Err(err) => error_payload(&err.to_string()),
        },
        Err(err) => error_payload(&format!("invalid JSON input: {err}")),
    }
}

/// Piped stdin is the primary input channel; the positional argument is a
/// fallback for when stdin is a terminal or carries nothing. A missing
/// input on both channels yields an empty payload, which the output
/// builders turn into an error object rather than a usage failure.
fn resolve_input(arg: Option<&str>) -> String {
    if !std::io::stdin().is_terminal() {
        let mut buf = String::new();
        if std::io::stdin().read_to_string(&mut buf).is_ok() && !buf.trim().is_empty() {
            return buf;
        }
    }
    arg.unwrap_or_default().to_string()
}

fn render<T: Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(err) => error_payload(&format!("failed to serialize response: {err}")),
    }
}

fn error_payload(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}
