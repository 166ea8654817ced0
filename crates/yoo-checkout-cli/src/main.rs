mod args;
mod config;

use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yoo_checkout::{Amount, ApiError, CapturePayment, CreateRefund, CreateWebhook, YooCheckout};

use args::{to_filter, Cli, Command};
use config::CliConfig;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let default_level = if cli.verbose || config.debug {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut checkout_config = config.checkout_config();
    checkout_config.debug |= cli.verbose;
    tracing::debug!(?config, "loaded configuration");
    if let Some(notice) = config.token_notice() {
        tracing::debug!("{notice}");
    }

    let client = match YooCheckout::new(checkout_config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", render(&e));
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli.command).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(code = %e.code, status = e.error_code, "request failed");
            eprintln!("{}", render(&e));
            ExitCode::FAILURE
        }
    }
}

/// Dispatch one command and render its result as pretty JSON.
async fn run(client: &YooCheckout, command: Command) -> Result<String, ApiError> {
    let output = match command {
        Command::Payment { id } => render(&client.get_payment(&id).await?),
        Command::Payments { filters } => {
            render(&client.get_payment_list(to_filter(filters).as_ref()).await?)
        }
        Command::Capture {
            id,
            amount,
            currency,
            idempotence_key,
        } => {
            let payload = match amount {
                Some(value) => CapturePayment::partial(Amount::new(value, currency)),
                None => CapturePayment::default(),
            };
            render(
                &client
                    .capture_payment(&id, &payload, idempotence_key.as_deref())
                    .await?,
            )
        }
        Command::Cancel {
            id,
            idempotence_key,
        } => render(
            &client
                .cancel_payment(&id, idempotence_key.as_deref())
                .await?,
        ),
        Command::CreateRefund {
            payment_id,
            amount,
            currency,
            description,
            idempotence_key,
        } => {
            let mut payload = CreateRefund::new(payment_id, Amount::new(amount, currency));
            if let Some(description) = description {
                payload = payload.with_description(description);
            }
            render(
                &client
                    .create_refund(&payload, idempotence_key.as_deref())
                    .await?,
            )
        }
        Command::Refund { id } => render(&client.get_refund(&id).await?),
        Command::Refunds { filters } => {
            render(&client.get_refund_list(to_filter(filters).as_ref()).await?)
        }
        Command::Receipt { id } => render(&client.get_receipt(&id).await?),
        Command::Receipts { filters } => {
            render(&client.get_receipt_list(to_filter(filters).as_ref()).await?)
        }
        Command::Webhooks => render(&client.get_webhook_list().await?),
        Command::CreateWebhook {
            event,
            url,
            idempotence_key,
        } => render(
            &client
                .create_webhook(&CreateWebhook::new(event, url), idempotence_key.as_deref())
                .await?,
        ),
        Command::DeleteWebhook { id } => {
            client.delete_webhook(&id).await?;
            render(&serde_json::json!({}))
        }
        Command::Shop => render(&client.get_shop().await?),
    };
    Ok(output)
}

fn render<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}
