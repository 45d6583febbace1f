mod cache;
mod config;
mod error;
mod jira;

use clap::error::ErrorKind;
use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use cache::{CacheLayer, FileStorage, NoopStorage};
use config::Config;
use jira::{Credentials, FieldCodes, IssueFetcher, IssueRequest, JiraClient};

/// Exit status for any failure, after `error:<message>` is printed.
const EXIT_FAILURE: i32 = 9;

#[derive(Parser, Debug)]
#[command(name = "jira-field")]
#[command(about = "Fetch a Jira issue, or a single field of it, through an on-disk cache")]
#[command(version)]
struct Args {
  /// Credentials as <username>:<password>
  credentials: String,

  /// Jira base URL (e.g. https://jira.example.com)
  base_url: String,

  /// Issue key (e.g. PROJ-1)
  issue_key: String,

  /// Print only this field (issuetype, type, type_icon_url, sprint, assignee,
  /// reporter, an alias, or any key under `fields`)
  field: Option<String>,

  /// Cache directory (default: cache/ next to the executable)
  #[arg(long, env = "JIRA_FIELD_CACHE_DIR")]
  cache_dir: Option<PathBuf>,

  /// Neither read nor write the response cache
  #[arg(long)]
  no_cache: bool,

  /// Disable TLS certificate and hostname verification
  #[arg(long)]
  insecure: bool,

  /// Request timeout in seconds
  #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
  timeout: u64,

  /// Field alias, e.g. epic=customfield_10008 or sprint=customfield_10020 (repeatable)
  #[arg(long = "field-code", value_name = "ALIAS=CODE", value_parser = config::parse_field_code)]
  field_codes: Vec<(String, String)>,

  /// Log filter used when RUST_LOG is not set
  #[arg(long, default_value = "warn")]
  log_level: String,

  /// Append logs to this file instead of stderr
  #[arg(long)]
  log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
  if let Err(e) = color_eyre::install() {
    fail(&e.to_string());
  }

  let args = match Args::try_parse() {
    Ok(args) => args,
    Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
    Err(e) => fail(&clap_message(&e)),
  };

  let guard = match init_tracing(&args) {
    Ok(guard) => guard,
    Err(e) => fail(&e.to_string()),
  };

  let outcome = run(args).await;
  if let Err(e) = &outcome {
    error!(error = %e, "request failed");
  }

  // Flush pending log lines before the process exits
  drop(guard);

  match outcome {
    Ok(output) => {
      let mut stdout = std::io::stdout().lock();
      if stdout
        .write_all(output.as_bytes())
        .and_then(|_| stdout.flush())
        .is_err()
      {
        std::process::exit(EXIT_FAILURE);
      }
    }
    Err(e) => fail(&e.to_string()),
  }
}

async fn run(args: Args) -> Result<String> {
  let credentials = Credentials::parse(&args.credentials)?;

  let field_codes = FieldCodes::default().extend(args.field_codes);
  let request = IssueRequest::new(credentials, &args.base_url, args.issue_key, field_codes)?;

  let config = Config {
    cache_dir: args.cache_dir.unwrap_or_else(Config::default_cache_dir),
    use_cache: !args.no_cache,
    insecure: args.insecure,
    timeout: Duration::from_secs(args.timeout),
  };

  let cache = if config.use_cache {
    debug!(dir = %config.cache_dir.display(), "using response cache");
    CacheLayer::new(FileStorage::new(&config.cache_dir))
  } else {
    CacheLayer::new(NoopStorage)
  };

  let fetcher = IssueFetcher::new(request, JiraClient::new(&config)?, cache);

  match args.field.as_deref() {
    Some(field) => Ok(fetcher.fetch_issue_field(field).await?),
    None => Ok(fetcher.fetch_issue().await?.to_pretty_json()?),
  }
}

fn init_tracing(args: &Args) -> Result<WorkerGuard> {
  let filter = EnvFilter::try_from_default_env()
    .or_else(|_| EnvFilter::try_new(&args.log_level))
    .map_err(|e| eyre!("invalid log level '{}': {}", args.log_level, e))?;

  let (writer, guard) = match &args.log_file {
    Some(path) => {
      let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| eyre!("cannot open log file {}: {}", path.display(), e))?;
      tracing_appender::non_blocking(file)
    }
    // stdout carries the result, so logs go to stderr
    None => tracing_appender::non_blocking(std::io::stderr()),
  };

  tracing_subscriber::fmt()
    .with_writer(writer)
    .with_env_filter(filter)
    .with_ansi(false)
    .try_init()
    .map_err(|e| eyre!("failed to initialize logging: {}", e))?;

  Ok(guard)
}

/// clap renders multi-line errors with usage hints; keep just the message.
fn clap_message(err: &clap::Error) -> String {
  let rendered = err.to_string();
  rendered
    .lines()
    .take_while(|line| !line.starts_with("Usage:") && !line.starts_with("For more information"))
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
    .trim_start_matches("error:")
    .trim()
    .to_string()
}

fn fail(message: &str) -> ! {
  println!("error:{}", message);
  std::process::exit(EXIT_FAILURE);
}
