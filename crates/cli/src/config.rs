//! Flag, environment, file, and preset resolution.
//!
//! Precedence, highest first: command-line flag, environment variable
//! (clap's `env` fallback), config file value, preset default. The two
//! benchmark subcommands differ only in their preset.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use guardmark_core::prompts::{load_prompt_file, GENERAL_PROMPTS, PII_PROMPTS};
use guardmark_core::{GuardrailConfig, RunConfig, Variant, DEFAULT_MODEL_ID, DEFAULT_REGION};

use crate::SharedArgs;

/// Timed calls per (prompt, variant) pair unless overridden.
pub const DEFAULT_ITERATIONS: u32 = 3;

/// Guardrail version assumed when only an identifier is given.
const DEFAULT_GUARDRAIL_VERSION: &str = "1";

/// Fixed per-subcommand defaults.
pub struct Preset {
    /// Run label carried into the report and export.
    pub label: &'static str,
    /// Name of the built-in prompt set.
    pub prompt_set: &'static str,
    /// The built-in prompts themselves.
    pub builtin: &'static [&'static str],
    /// Variants the subcommand benchmarks.
    pub variants: &'static [Variant],
    /// Maximum completion tokens per call.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// Nucleus sampling parameter, when the pipeline uses one.
    pub top_p: Option<f64>,
    /// Default export path.
    pub default_out: &'static str,
}

/// Defaults for `guardmark guardrail`: baseline vs guardrail on the
/// general prompt set.
pub const GUARDRAIL_PRESET: Preset = Preset {
    label: "guardrail latency benchmark",
    prompt_set: "general",
    builtin: &GENERAL_PROMPTS,
    variants: &[Variant::Baseline, Variant::Guardrail],
    max_tokens: 512,
    temperature: 0.7,
    top_p: Some(0.9),
    default_out: "benchmark_results.json",
};

/// Defaults for `guardmark pii`: all three variants on the PII prompt set.
pub const PII_PRESET: Preset = Preset {
    label: "pii protection comparison",
    prompt_set: "pii",
    builtin: &PII_PROMPTS,
    variants: &[Variant::Baseline, Variant::Guardrail, Variant::LocalFilter],
    max_tokens: 256,
    temperature: 0.7,
    top_p: None,
    default_out: "pii_benchmark_results.json",
};

/// Optional TOML config file; every field fills in for an unset flag.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// AWS region.
    pub region: Option<String>,
    /// Model identifier.
    pub model_id: Option<String>,
    /// Endpoint override.
    pub endpoint: Option<String>,
    /// Timed calls per (prompt, variant) pair.
    pub iterations: Option<u32>,
    /// Prompt file to benchmark instead of the built-in set.
    pub prompts: Option<PathBuf>,
    /// Export path.
    pub out: Option<PathBuf>,
    /// Guardrail identifiers.
    pub guardrail: Option<FileGuardrail>,
}

/// The `[guardrail]` table of the config file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileGuardrail {
    /// Guardrail identifier.
    pub identifier: String,
    /// Guardrail version; defaults like the flag does.
    pub version: Option<String>,
}

impl FileConfig {
    /// Parse a config file. Unknown keys are rejected so typos fail loudly.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }
}

/// A fully resolved run: the validated configuration plus the export path.
#[derive(Debug)]
pub struct ResolvedRun {
    /// Validated run configuration.
    pub config: RunConfig,
    /// Where to write the JSON export.
    pub out: PathBuf,
}

/// Combine preset, flags, and an optional config file into a validated
/// [`RunConfig`].
pub fn resolve(preset: &Preset, args: &SharedArgs) -> Result<ResolvedRun> {
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let region = args
        .region
        .clone()
        .or(file.region)
        .unwrap_or_else(|| DEFAULT_REGION.to_string());
    let model_id = args
        .model_id
        .clone()
        .or(file.model_id)
        .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());
    let endpoint = args.endpoint.clone().or(file.endpoint);
    let iterations = args
        .iterations
        .or(file.iterations)
        .unwrap_or(DEFAULT_ITERATIONS);

    let (file_id, file_version) = match file.guardrail {
        Some(guardrail) => (Some(guardrail.identifier), guardrail.version),
        None => (None, None),
    };
    let identifier = args.guardrail_id.clone().or(file_id);
    let version = args.guardrail_version.clone().or(file_version);
    let guardrail = match identifier {
        Some(identifier) => Some(GuardrailConfig {
            identifier,
            version: version.unwrap_or_else(|| DEFAULT_GUARDRAIL_VERSION.to_string()),
        }),
        None => {
            if version.is_some() {
                bail!("--guardrail-version requires --guardrail-id");
            }
            None
        }
    };

    let (prompt_set, prompts) = match args.prompts.clone().or(file.prompts) {
        Some(path) => {
            let prompts = load_prompt_file(&path)
                .with_context(|| format!("failed to load prompts from {}", path.display()))?;
            (path.display().to_string(), prompts)
        }
        None => (
            preset.prompt_set.to_string(),
            preset.builtin.iter().map(|p| p.to_string()).collect(),
        ),
    };

    let out = args
        .out
        .clone()
        .or(file.out)
        .unwrap_or_else(|| PathBuf::from(preset.default_out));

    let config = RunConfig {
        label: preset.label.to_string(),
        region,
        model_id,
        endpoint,
        guardrail,
        prompt_set,
        prompts,
        iterations,
        variants: preset.variants.to_vec(),
        max_tokens: preset.max_tokens,
        temperature: preset.temperature,
        top_p: preset.top_p,
        warmup: !args.no_warmup,
    };
    config.validate()?;
    Ok(ResolvedRun { config, out })
}
