use std::path::PathBuf;
use std::time::Duration;

use clap::{CommandFactory, Parser, Subcommand};
use color_eyre::{eyre::WrapErr, Result};
use tracing_subscriber::EnvFilter;

use crate::bridge::Bridge;
use crate::decoder::LircSocket;
use crate::transport::HttpTransport;

const DEFAULT_LIRCD_SOCKET: &str = "/var/run/lirc/lircd";
const HTTP_PORT: u16 = 80;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the lircd broadcast socket.
    #[arg(value_name = "SOCKET", default_value = DEFAULT_LIRCD_SOCKET)]
    socket: PathBuf,

    /// Web service the button presses are forwarded to, port 80.
    #[arg(long, value_name = "HOST", default_value = "team-nile-test.webege.com")]
    host: String,

    /// Drop presses arriving within MS of the last forwarded one.
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,

    /// Give up on network calls that stall longer than this.
    /// Without it a hung peer blocks the loop indefinitely.
    #[arg(long, value_name = "SECS")]
    io_timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand)]
enum CliCommand {
    GenerateCompletions,
}

mod bridge;
mod command;
mod decoder;
mod request;
mod transport;

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Some(CliCommand::GenerateCompletions) = cli.command {
        clap_complete::generate(
            clap_complete::shells::Zsh,
            &mut Cli::command(),
            "irbridge",
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    let mut keys = LircSocket::connect(&cli.socket)
        .wrap_err_with(|| format!("failed to open lircd socket {}", cli.socket.display()))?;

    let transport = HttpTransport::new(
        cli.host.clone(),
        HTTP_PORT,
        cli.io_timeout_secs.map(Duration::from_secs),
    )?;
    transport.probe()?;
    tracing::info!(host = %cli.host, "connection to web service was successful");

    let mut bridge = Bridge::new(
        transport,
        cli.host,
        cli.debounce_ms.map(Duration::from_millis),
    );
    bridge.run(&mut keys).wrap_err("lost the lircd socket")
}
