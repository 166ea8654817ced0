//! Command definitions and filter argument parsing.

use clap::{Parser, Subcommand};
use yoo_checkout::{Filter, FilterMode, FilterValue};

/// Query the YooKassa API from the command line
#[derive(Debug, Parser)]
#[command(name = "yoo-checkout")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log request and response bodies
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a payment by id
    Payment { id: String },

    /// List payments, e.g. `status=succeeded created_at.gte=2021-01-01T00:00:00Z limit=10`
    Payments {
        #[arg(value_parser = parse_filter_arg)]
        filters: Vec<FilterArg>,
    },

    /// Capture a payment waiting for capture
    Capture {
        id: String,

        /// Partial amount, e.g. 10.00
        #[arg(long)]
        amount: Option<String>,

        #[arg(long, default_value = "RUB")]
        currency: String,

        #[arg(long)]
        idempotence_key: Option<String>,
    },

    /// Cancel a payment waiting for capture
    Cancel {
        id: String,

        #[arg(long)]
        idempotence_key: Option<String>,
    },

    /// Refund a payment
    CreateRefund {
        payment_id: String,

        /// Amount to return, e.g. 10.00
        amount: String,

        #[arg(long, default_value = "RUB")]
        currency: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        idempotence_key: Option<String>,
    },

    /// Fetch a refund by id
    Refund { id: String },

    /// List refunds
    Refunds {
        #[arg(value_parser = parse_filter_arg)]
        filters: Vec<FilterArg>,
    },

    /// Fetch a receipt by id
    Receipt { id: String },

    /// List receipts
    Receipts {
        #[arg(value_parser = parse_filter_arg)]
        filters: Vec<FilterArg>,
    },

    /// List webhooks (requires YOOKASSA_TOKEN)
    Webhooks,

    /// Subscribe a URL to an event (requires YOOKASSA_TOKEN)
    CreateWebhook {
        /// Event name, e.g. payment.succeeded
        event: String,
        url: String,

        #[arg(long)]
        idempotence_key: Option<String>,
    },

    /// Remove a webhook (requires YOOKASSA_TOKEN)
    DeleteWebhook { id: String },

    /// Show shop settings (requires YOOKASSA_TOKEN)
    Shop,
}

/// One `field=value` or `field.mode=value` filter argument.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterArg {
    pub field: String,
    pub value: FilterValue,
}

/// Parse `field=value` into an equality filter and `field.mode=value` into a comparison.
pub fn parse_filter_arg(raw: &str) -> Result<FilterArg, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }

    let (field, value) = match key.rsplit_once('.') {
        Some((field, mode)) if !field.is_empty() && !mode.is_empty() => (
            field,
            FilterValue::Compare {
                value: value.to_string(),
                mode: FilterMode::from(mode),
            },
        ),
        _ => (key, FilterValue::Eq(value.to_string())),
    };

    Ok(FilterArg {
        field: field.to_string(),
        value,
    })
}

/// Collect parsed arguments into a `Filter`, or `None` when nothing was given.
pub fn to_filter(args: Vec<FilterArg>) -> Option<Filter> {
    if args.is_empty() {
        return None;
    }
    let mut filter = Filter::new();
    for arg in args {
        filter.insert(arg.field, arg.value);
    }
    Some(filter)
}
