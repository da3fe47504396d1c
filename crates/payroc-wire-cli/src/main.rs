//! `payroc-wire` CLI: check, decode and probe Payroc API payloads from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Does a captured response satisfy the expected shape? (exit 1 if not)
//! payroc-wire check --expected expected.json --actual response.json
//!
//! # Decode into a typed model and print its canonical encoding
//! payroc-wire decode --model bank-transfer-payment-request -i request.json
//!
//! # Which discriminator does this union payload carry?
//! echo '{"type":"ach","accountNumber":"1234567890"}' | payroc-wire probe
//! echo '{"op":"remove","path":"/enabled"}' | payroc-wire probe --field op
//! ```
//!
//! Diagnostics go to stderr; set `RUST_LOG=debug` for more detail.

use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use payroc_wire::resources::bank_transfer_payments::{
    BankTransferPayment, BankTransferPaymentRequest,
};
use payroc_wire::resources::boarding::Contact;
use payroc_wire::resources::card_payments::{Payment, PaymentRequest};
use payroc_wire::resources::funding::FundingInstruction;
use payroc_wire::resources::notifications::EventSubscription;
use payroc_wire::resources::tokenization::{SecureToken, SecureTokenRequest};
use payroc_wire::union::tag_of;
use payroc_wire::{check, codec, decode_patch, encode_patch, probe_discriminator, Value};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "payroc-wire",
    version,
    about = "Check, decode and probe Payroc API JSON payloads"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that an actual payload structurally satisfies an expected one
    Check {
        /// Expected JSON file
        #[arg(long)]
        expected: String,
        /// Actual JSON file (reads from stdin if omitted)
        #[arg(long)]
        actual: Option<String>,
    },
    /// Decode JSON into a typed model and print its canonical encoding
    Decode {
        /// Model to decode into
        #[arg(short, long, value_enum)]
        model: Model,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the discriminator field and tag of a union payload
    ///
    /// Without --field, looks for type, _type and kind in that order. Unions
    /// keyed elsewhere need the field named, e.g. `--field op` for patch
    /// operations or `--field entryMethod` for card details.
    Probe {
        /// Discriminator field to read instead of the type/_type/kind probe
        #[arg(long)]
        field: Option<String>,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

/// Typed models the `decode` command understands.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Model {
    BankTransferPaymentRequest,
    BankTransferPayment,
    PaymentRequest,
    Payment,
    EventSubscription,
    Contact,
    FundingInstruction,
    SecureTokenRequest,
    SecureToken,
    Patch,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { expected, actual } => {
            let expected = parse_value(&read_input(Some(expected.as_str()))?, "expected")?;
            let actual = parse_value(&read_input(actual.as_deref())?, "actual")?;
            match check(&expected, &actual) {
                Ok(()) => println!("ok"),
                Err(mismatch) => {
                    println!("{mismatch}");
                    process::exit(1);
                }
            }
        }
        Commands::Decode {
            model,
            input,
            output,
        } => {
            let json = read_input(input.as_deref())?;
            let canonical =
                canonicalize(model, &json).with_context(|| format!("Failed to decode {model:?}"))?;
            write_output(output.as_deref(), &canonical)?;
        }
        Commands::Probe { field, input } => {
            let value = parse_value(&read_input(input.as_deref())?, "input")?;
            let found = match field.as_deref() {
                Some(field) => tag_of(&value, field).map(|tag| (field, tag)),
                None => probe_discriminator(&value),
            };
            match found {
                Some((field, tag)) => println!("{field}: {tag}"),
                None => anyhow::bail!(
                    "No discriminator found (looked for {})",
                    field.as_deref().unwrap_or("type, _type, kind")
                ),
            }
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Decode `json` as `model` and re-encode it as pretty JSON.
fn canonicalize(model: Model, json: &str) -> payroc_wire::Result<String> {
    tracing::debug!(?model, bytes = json.len(), "decoding");
    match model {
        Model::BankTransferPaymentRequest => roundtrip::<BankTransferPaymentRequest>(json),
        Model::BankTransferPayment => roundtrip::<BankTransferPayment>(json),
        Model::PaymentRequest => roundtrip::<PaymentRequest>(json),
        Model::Payment => roundtrip::<Payment>(json),
        Model::EventSubscription => roundtrip::<EventSubscription>(json),
        Model::Contact => roundtrip::<Contact>(json),
        Model::FundingInstruction => roundtrip::<FundingInstruction>(json),
        Model::SecureTokenRequest => roundtrip::<SecureTokenRequest>(json),
        Model::SecureToken => roundtrip::<SecureToken>(json),
        Model::Patch => {
            let operations = decode_patch(json)?;
            let compact = encode_patch(&operations)?;
            Value::parse(&compact)?.to_json_pretty()
        }
    }
}

fn roundtrip<M>(json: &str) -> payroc_wire::Result<String>
where
    M: serde::Serialize + serde::de::DeserializeOwned,
{
    let model: M = codec::decode(json)?;
    codec::encode_pretty(&model)
}

fn parse_value(text: &str, what: &str) -> Result<Value> {
    Value::parse(text).with_context(|| format!("Failed to parse {what} as JSON"))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
