// Copyright 2025 Webmobix Solutions AG
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUTHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand, ValueEnum};
use sheets_actions::actions::{CreateSheetAction, UpdateSheetAction};
use sheets_actions::auth::CredentialStore;
use sheets_actions::config::ActionConfig;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_env_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply an ordered batch of cell updates to a spreadsheet
    UpdateSheet {
        /// JSON file with `spreadsheetId` and `updates`
        #[arg(long)]
        input: PathBuf,

        /// Overrides the spreadsheet ID from the input file
        #[arg(long)]
        spreadsheet_id: Option<String>,

        /// Write the JSON result here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Preview the planned writes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Custom path to read authentication tokens
        #[arg(long)]
        token_path: Option<PathBuf>,

        /// Custom path to the OAuth2 client secret
        #[arg(long)]
        client_secret: Option<PathBuf>,
    },
    /// Create a spreadsheet, optionally with named and pre-filled sheets
    CreateSheet {
        /// JSON file with `title` and optional `sheets`
        #[arg(long)]
        input: PathBuf,

        /// Write the JSON result here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Preview the spreadsheet without creating it
        #[arg(long)]
        dry_run: bool,

        /// Custom path to read authentication tokens
        #[arg(long)]
        token_path: Option<PathBuf>,

        /// Custom path to the OAuth2 client secret
        #[arg(long)]
        client_secret: Option<PathBuf>,
    },
}

#[derive(Parser)]
#[command(name = "sheets-actions")]
#[command(about = "Normalized Google Sheets actions for workflow automation")]
#[command(version)]
struct Cli {
    /// Controls verbosity of log output (overrides RUST_LOG when provided)
    #[arg(long, value_enum, default_value = "info", global = true)]
    log_level: LogLevel,
    #[command(subcommand)]
    command: Commands,
}

fn init_logging(level: &LogLevel) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level.as_env_filter()))?;

    // Results go to stdout; logs stay on stderr.
    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize default crypto provider for rustls
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::UpdateSheet {
            input,
            spreadsheet_id,
            output,
            dry_run,
            token_path,
            client_secret,
        } => {
            let config = ActionConfig::new(input, output, spreadsheet_id, dry_run);
            config.validate()?;
            log_config(&config);

            let credentials = CredentialStore::new(token_path, client_secret);
            UpdateSheetAction::new()
                .execute(&config, &credentials)
                .await?;
        }
        Commands::CreateSheet {
            input,
            output,
            dry_run,
            token_path,
            client_secret,
        } => {
            let config = ActionConfig::new(input, output, None, dry_run);
            config.validate()?;
            log_config(&config);

            let credentials = CredentialStore::new(token_path, client_secret);
            CreateSheetAction::new()
                .execute(&config, &credentials)
                .await?;
        }
    }

    Ok(())
}

fn log_config(config: &ActionConfig) {
    if config.dry_run {
        info!("🔍 Running in dry-run mode - no changes will be made");
    }

    info!("📁 Input: {:?}", config.input_path);
    if let Some(output) = &config.output_path {
        info!("📁 Output: {:?}", output);
    }
    if let Some(id) = &config.spreadsheet_id {
        info!("📊 Spreadsheet ID: {}", id);
    }
}
