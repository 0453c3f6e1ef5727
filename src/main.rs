use clap::{Parser, Subcommand, ValueEnum};
use googlepay_plugin::application::registry::{Platform, PluginRegistry};
use googlepay_plugin::domain::enums::Environment;
use googlepay_plugin::domain::ports::GooglePayPluginBox;
use googlepay_plugin::domain::request::{IsReadyToPayRequest, PaymentDataRequest, PaymentOptions};
use googlepay_plugin::domain::validation::{
    validate_is_ready_to_pay, validate_payment_data_request,
};
use googlepay_plugin::infrastructure::sandbox::{
    SandboxPaymentsClient, SandboxWallet, SheetDecision,
};
use googlepay_plugin::interfaces::json::request_reader::read_request_file;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Platform to register the plugin for. `web` always fails with "not implemented".
    #[arg(long, global = true, default_value = "android")]
    platform: Platform,

    /// Environment passed to `initialize` (TEST or PRODUCTION). Defaults to TEST.
    #[arg(long, global = true, env = "GOOGLEPAY_ENVIRONMENT", value_parser = parse_environment)]
    environment: Option<Environment>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a request file without contacting a payments client
    Validate {
        input: PathBuf,

        #[arg(long, value_enum, default_value_t = RequestKind::Payment)]
        kind: RequestKind,
    },
    /// Run a readiness probe against the sandbox payments client
    IsReadyToPay { input: PathBuf },
    /// Run a payment sheet against the sandbox payments client
    LoadPaymentData {
        input: PathBuf,

        /// What the simulated user does on the payment sheet
        #[arg(long, value_enum, default_value_t = Decision::Approve)]
        decision: Decision,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RequestKind {
    Ready,
    Payment,
}

#[derive(Clone, Copy, ValueEnum)]
enum Decision {
    Approve,
    Cancel,
    Fail,
}

impl From<Decision> for SheetDecision {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approve => SheetDecision::Approve,
            Decision::Cancel => SheetDecision::Cancel,
            Decision::Fail => SheetDecision::Fail,
        }
    }
}

fn parse_environment(value: &str) -> std::result::Result<Environment, String> {
    value
        .to_ascii_uppercase()
        .parse::<Environment>()
        .map_err(|e| e.to_string())
}

fn register(platform: Platform, sandbox: &SandboxPaymentsClient) -> GooglePayPluginBox {
    PluginRegistry::new()
        .with_native(sandbox.factory())
        .register(platform)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = PaymentOptions {
        environment: cli.environment,
    };

    match cli.command {
        Command::Validate { input, kind } => {
            match kind {
                RequestKind::Ready => {
                    let request: IsReadyToPayRequest = read_request_file(&input).into_diagnostic()?;
                    validate_is_ready_to_pay(&request).into_diagnostic()?;
                }
                RequestKind::Payment => {
                    let request: PaymentDataRequest = read_request_file(&input).into_diagnostic()?;
                    validate_payment_data_request(&request).into_diagnostic()?;
                }
            }
            println!("valid");
        }
        Command::IsReadyToPay { input } => {
            let request: IsReadyToPayRequest = read_request_file(&input).into_diagnostic()?;
            let plugin = register(cli.platform, &SandboxPaymentsClient::new());

            plugin.initialize(options).await.into_diagnostic()?;
            let response = plugin.is_ready_to_pay(request).await.into_diagnostic()?;
            print_json(&response)?;
        }
        Command::LoadPaymentData { input, decision } => {
            let request: PaymentDataRequest = read_request_file(&input).into_diagnostic()?;
            let sandbox = SandboxPaymentsClient::with_wallet(SandboxWallet {
                decision: decision.into(),
                ..Default::default()
            });
            let plugin = register(cli.platform, &sandbox);

            plugin.initialize(options).await.into_diagnostic()?;
            let data = plugin.load_payment_data(request).await.into_diagnostic()?;
            print_json(&data)?;
        }
    }

    Ok(())
}
