#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Text Quest **
//! Play in the terminal, or serve the game over HTTP and SMS.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{LevelFilter, info, warn};
use textquest_engine::{DisabledMailer, Mailer, TEXTQUEST_VERSION};
use textquest_server::sendgrid::SendGridMailer;
use textquest_server::{App, ServerConfig, http, run_repl};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Play in this terminal.
    Cmd,
    /// Serve `/plain`, `/sms` and `/metrics`.
    Http,
}

#[derive(Debug, Parser)]
#[command(name = "textquest", version = TEXTQUEST_VERSION, about = "A tiny text adventure for terminals, HTTP and SMS")]
struct Cli {
    #[arg(long, value_enum, default_value_t = Mode::Cmd)]
    mode: Mode,
    /// Port for http mode; overrides the config file.
    #[arg(long)]
    port: Option<u16>,
    /// Log at debug level.
    #[arg(long)]
    debug: bool,
    /// TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Run without SendGrid; the stone table cannot send mail.
    #[arg(long)]
    no_email: bool,
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        for module in ["textquest", "textquest_engine", "textquest_server"] {
            builder.filter_module(module, LevelFilter::Debug);
        }
    }
    builder.init();
}

fn build_mailer(config: &ServerConfig, no_email: bool) -> Result<Arc<dyn Mailer>> {
    if no_email {
        warn!("email disabled by --no-email");
        return Ok(Arc::new(DisabledMailer));
    }
    let mailer = SendGridMailer::from_env(config.engine.mail.clone()).context("while configuring email")?;
    Ok(Arc::new(mailer))
}

fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging(cli.debug);
    if let Ok(path) = dotenv {
        info!("loaded environment from {}", path.display());
    }

    let mut config = ServerConfig::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    let mailer = build_mailer(&config, cli.no_email)?;
    let app = Arc::new(App::new(mailer, config.engine.clone()));
    info!("Text Quest {TEXTQUEST_VERSION} starting in {:?} mode", cli.mode);

    match cli.mode {
        Mode::Cmd => run_repl(&app),
        Mode::Http => {
            let runtime = tokio::runtime::Runtime::new().context("while starting the async runtime")?;
            runtime.block_on(http::serve(Arc::clone(&app), &config.listen_addr()))
        },
    }
}
