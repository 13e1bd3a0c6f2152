//! xpay Demo CLI
//!
//! Command-line interface for exercising the xpay gateway client.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use xpay_lib::{ClientConfig, XpayClient};

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "xpay-demo")]
#[command(about = "xpay Demo CLI - create and verify xpay gateway payments", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Gateway connection settings, also read from `XPAY_*` variables.
#[derive(Args)]
struct GatewayArgs {
    /// Merchant platform code
    #[arg(long, env = "XPAY_PLATFORM_CODE")]
    platform_code: String,

    /// Gateway base URL
    #[arg(long, env = "XPAY_GATEWAY_URL")]
    gateway_url: String,

    /// Merchant RSA private key (PEM)
    #[arg(long, env = "XPAY_PRIVATE_KEY_PATH")]
    private_key: PathBuf,

    /// Gateway RSA public key (PEM)
    #[arg(long, env = "XPAY_GATEWAY_PUBLIC_KEY_PATH")]
    gateway_public_key: PathBuf,

    /// Request timeout in seconds
    #[arg(long, env = "XPAY_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,
}

impl GatewayArgs {
    fn client(&self) -> Result<XpayClient> {
        let config = ClientConfig::new(
            &self.platform_code,
            &self.gateway_url,
            &self.private_key,
            &self.gateway_public_key,
        )
        .with_timeout(self.timeout_secs);

        XpayClient::new(config).context("Failed to create xpay client")
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a QR-code payment and display it
    QrPay {
        #[command(flatten)]
        gateway: GatewayArgs,

        /// Receiving merchant account
        #[arg(long)]
        merchant: String,

        /// Amount in minor units (cents)
        #[arg(short, long)]
        amount: i64,

        /// Merchant order number (generated when omitted)
        #[arg(long)]
        trade_no: Option<String>,

        /// Product: wechat, alipay, integration, or a raw product code
        #[arg(long, default_value = "alipay")]
        product: String,

        /// Notification callback URL
        #[arg(long, default_value = "")]
        notify_url: String,

        /// Order subject
        #[arg(long, default_value = "xpay demo order")]
        subject: String,

        /// Order description
        #[arg(long, default_value = "")]
        body: String,

        /// Currency code (gateway default when omitted)
        #[arg(long, default_value = "")]
        currency: String,

        /// Data echoed back in the notification
        #[arg(long)]
        business_params: Option<String>,

        /// Skip the terminal QR code
        #[arg(long)]
        no_qr: bool,
    },

    /// Query an order by merchant order number
    Query {
        #[command(flatten)]
        gateway: GatewayArgs,

        /// Merchant order number
        #[arg(long)]
        trade_no: String,
    },

    /// Serve gateway notifications (webhook receiver)
    Listen {
        /// Gateway RSA public key (PEM)
        #[arg(long, env = "XPAY_GATEWAY_PUBLIC_KEY_PATH")]
        gateway_public_key: PathBuf,

        /// Port to listen on
        #[arg(short, long, default_value = "8088")]
        port: u16,

        /// Notification path
        #[arg(long, default_value = "/notify")]
        path: String,
    },

    /// Verify and decode a saved notification body
    Inspect {
        /// File holding the raw notification JSON
        file: PathBuf,

        /// Gateway RSA public key (PEM)
        #[arg(long, env = "XPAY_GATEWAY_PUBLIC_KEY_PATH")]
        gateway_public_key: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over the defaults
    let default_filter = if cli.verbose {
        "xpay_demo_cli=debug,xpay_lib=debug"
    } else {
        "xpay_demo_cli=info,xpay_lib=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Dispatch commands
    match cli.command {
        Commands::QrPay {
            gateway,
            merchant,
            amount,
            trade_no,
            product,
            notify_url,
            subject,
            body,
            currency,
            business_params,
            no_qr,
        } => {
            let client = gateway.client()?;
            let request = commands::qr_pay::build_request(commands::qr_pay::QrPayArgs {
                merchant,
                amount,
                trade_no,
                product,
                notify_url,
                subject,
                body,
                currency,
                business_params,
            });
            commands::qr_pay::run(&client, &request, !no_qr, cli.verbose).await?;
        }
        Commands::Query { gateway, trade_no } => {
            let client = gateway.client()?;
            commands::query::run(&client, &trade_no, cli.verbose).await?;
        }
        Commands::Listen {
            gateway_public_key,
            port,
            path,
        } => {
            commands::listen::run(&gateway_public_key, port, &path).await?;
        }
        Commands::Inspect {
            file,
            gateway_public_key,
        } => {
            commands::inspect::run(&file, &gateway_public_key, cli.verbose)?;
        }
    }

    Ok(())
}
