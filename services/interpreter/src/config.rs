//! Command-line and environment configuration.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use ecos_execution::{OracleConfig, SeedConvention};
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

/// Which LLM provider backs the interpretation routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    Gemini,
    Openai,
}

impl Provider {
    fn api_key_var(self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::Openai => "OPENAI_API_KEY",
        }
    }

    fn model_var(self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_MODEL",
            Provider::Openai => "OPENAI_MODEL",
        }
    }
}

/// Text that feeds the lucky-number seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SeedSourceArg {
    Dream,
    DreamWithPrompt,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host interface to bind.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on (overridden by `PORT`).
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    #[arg(long, value_enum, default_value_t = Provider::Gemini)]
    pub provider: Provider,

    /// Model name (defaults to `GEMINI_MODEL` / `OPENAI_MODEL`).
    #[arg(long)]
    pub model: Option<String>,

    /// API key (defaults to `GEMINI_API_KEY` / `OPENAI_API_KEY`).
    #[arg(long)]
    pub api_key: Option<String>,

    /// Override the provider base URL.
    #[arg(long)]
    pub upstream_url: Option<String>,

    /// Upstream request timeout in milliseconds.
    #[arg(long, default_value_t = 30_000)]
    pub timeout_ms: u64,

    #[arg(long, value_enum, default_value_t = SeedSourceArg::Dream)]
    pub seed_source: SeedSourceArg,

    /// Use the rolling-hash seed and linear-congruential generator.
    #[arg(long, default_value_t = false)]
    pub legacy_draws: bool,

    /// Comma-separated CORS origins, `*` for any (overridden by `ALLOWED_HTTP_ORIGINS`).
    #[arg(long, default_value = "*")]
    pub allowed_origins: String,

    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Validated service configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub listen: SocketAddr,
    pub provider: Provider,
    pub model: Option<String>,
    pub api_key: String,
    pub upstream_url: Option<String>,
    pub timeout: Duration,
    pub oracle: OracleConfig,
    pub allowed_origins: Vec<String>,
    pub log_level: Level,
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn build_config(args: &Args) -> Result<Config> {
    let port = match read_env("PORT") {
        Some(raw) => raw.parse::<u16>().context("invalid PORT")?,
        None => args.port,
    };

    let api_key = args
        .api_key
        .clone()
        .or_else(|| read_env(args.provider.api_key_var()));
    let Some(api_key) = api_key else {
        bail!("{} is not configured", args.provider.api_key_var());
    };

    if args.timeout_ms == 0 {
        bail!("timeout_ms must be greater than zero");
    }

    let mut oracle = if args.legacy_draws {
        OracleConfig::legacy()
    } else {
        OracleConfig::default()
    };
    oracle.convention = match args.seed_source {
        SeedSourceArg::Dream => SeedConvention::DreamOnly,
        SeedSourceArg::DreamWithPrompt => SeedConvention::DreamWithPrompt,
    };

    let origins = read_env("ALLOWED_HTTP_ORIGINS").unwrap_or_else(|| args.allowed_origins.clone());
    let allowed_origins = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();

    let log_level = Level::from_str(&args.log_level)
        .map_err(|_| anyhow::anyhow!("invalid log_level: {}", args.log_level))?;

    Ok(Config {
        listen: SocketAddr::new(args.host, port),
        provider: args.provider,
        model: args.model.clone().or_else(|| read_env(args.provider.model_var())),
        api_key,
        upstream_url: args.upstream_url.clone(),
        timeout: Duration::from_millis(args.timeout_ms),
        oracle,
        allowed_origins,
        log_level,
    })
}
