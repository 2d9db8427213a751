use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use sweepstake_lambda::{InvokerConfig, RemoteInvoker, config};
use sweepstake_types::PayloadOptions;
use tracing_subscriber::EnvFilter;

/// Start, process or complete sweepstakes through the rewards calculator.
#[derive(Parser, Debug)]
#[command(name = "sweepstake", version, about)]
struct Args {
    /// SSO profile used for the dev environment
    #[arg(long, env = "SWEEPSTAKE_DEV_PROFILE", default_value = config::DEFAULT_DEV_PROFILE)]
    dev_profile: String,

    /// SSO profile used for the prod environment
    #[arg(long, env = "SWEEPSTAKE_PROD_PROFILE", default_value = config::DEFAULT_PROD_PROFILE)]
    prod_profile: String,

    /// Function name template; `{env}` is replaced by `dev` or `prod`
    #[arg(long, env = "SWEEPSTAKE_FUNCTION_TEMPLATE", default_value = config::DEFAULT_FUNCTION_TEMPLATE)]
    function_template: String,

    /// AWS CLI program used for the SSO session check and login
    #[arg(long, env = "SWEEPSTAKE_AWS_CLI", default_value = config::DEFAULT_AWS_CLI)]
    aws_cli: String,

    /// Region override; defaults to the profile's region
    #[arg(long, env = "SWEEPSTAKE_REGION")]
    region: Option<String>,

    /// Batch size sent with process and complete requests
    #[arg(long, env = "SWEEPSTAKE_BATCH_SIZE", value_parser = clap::value_parser!(u64).range(1..))]
    batch_size: Option<u64>,

    /// JSON object sent as `sweepstake_overrides` with start requests
    #[arg(long, env = "SWEEPSTAKE_OVERRIDES")]
    overrides: Option<String>,

    /// Log file; the terminal belongs to the UI so logs never go to stdout
    #[arg(long, env = "SWEEPSTAKE_LOG_FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn invoker_config(&self) -> Result<InvokerConfig> {
        let config = InvokerConfig {
            dev_profile: self.dev_profile.clone(),
            prod_profile: self.prod_profile.clone(),
            function_template: self.function_template.clone(),
            aws_cli: self.aws_cli.clone(),
            region: self.region.clone().filter(|region| !region.trim().is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    fn payload_options(&self) -> Result<PayloadOptions> {
        let overrides = self
            .overrides
            .as_deref()
            .map(|raw| serde_json::from_str::<Value>(raw).context("--overrides is not valid JSON"))
            .transpose()?;
        Ok(PayloadOptions {
            batch_size: self.batch_size,
            overrides,
        })
    }

    fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(default_log_path)
    }
}

fn default_log_path() -> PathBuf {
    dirs_next::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("sweepstake")
        .join("sweepstake.log")
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Route tracing output to the log file. Logging stays off when the file
/// cannot be opened.
fn init_tracing(path: &Path) {
    let Ok(file) = open_log_file(path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_path());

    let config = args.invoker_config()?;
    let payload_options = args.payload_options()?;
    tracing::info!(
        dev_profile = %config.dev_profile,
        prod_profile = %config.prod_profile,
        function_template = %config.function_template,
        "starting sweepstake"
    );

    let invoker = RemoteInvoker::from_config(config);
    sweepstake_tui::run(invoker, payload_options).await
}
