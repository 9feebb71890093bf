use address_book::resolver::{RejectedRecord, ResolvedBatch};
use address_book::{
    classify, evaluate_deletion, fill_types, merge_candidates, resolve, resolve_all,
    FillTypesOptions,
};
use address_types::{
    AddressCategory, AddressError, AddressRecord, AddressRole, CompanyContext,
    RequestedCategory, ServerAddress, SuggestedAddress,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

mod config;

use config::CliConfig;

#[derive(Parser, Debug)]
#[command(name = "address-book", about = "Resolve, classify and merge address records")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Canonicalize one record, or a JSON array of records
    Resolve {
        #[arg(value_name = "PATH")]
        input: PathBuf,
    },
    /// Check whether an address may be deleted
    Eligibility {
        /// Address record (`null` for no address)
        #[arg(value_name = "PATH")]
        address: PathBuf,

        /// Owning company context
        #[arg(long, value_name = "PATH")]
        company: Option<PathBuf>,
    },
    /// Expand a category into its role set
    Classify { category: String },
    /// List the type options to offer when editing an address
    FillTypes {
        /// Requested category; repeat to pass a list of roles
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Address record whose role flags are already set
        #[arg(long, value_name = "PATH")]
        address: Option<PathBuf>,

        #[arg(long)]
        no_role: bool,

        #[arg(long)]
        better_roles: bool,
    },
    /// Merge extracted, suggested and directory candidates
    Merge {
        #[arg(long, value_name = "PATH")]
        server: Option<PathBuf>,

        #[arg(long, value_name = "PATH")]
        extracted: Option<PathBuf>,

        #[arg(long, value_name = "PATH")]
        suggested: Option<PathBuf>,

        /// Current search text; anything non-empty skips the merge
        #[arg(long, default_value = "")]
        search: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_path) =
        CliConfig::load(cli.config.as_deref()).context("Failed to load address-book config")?;
    init_tracing(&config.log_level());
    tracing::debug!("Loaded config from {:?}", config_path);

    match cli.command {
        Command::Resolve { input } => {
            let value: serde_json::Value = read_json(&input)?;
            if let serde_json::Value::Array(values) = value {
                let batch = resolve_batch(values);
                tracing::info!(
                    resolved = batch.addresses.len(),
                    rejected = batch.rejected.len(),
                    "Resolved address batch"
                );
                print_json(&batch)
            } else {
                let record: AddressRecord =
                    serde_json::from_value(value).context("Invalid address record")?;
                let canonical = resolve(&record)?;
                print_json(&canonical)
            }
        }
        Command::Eligibility { address, company } => {
            let record: Option<AddressRecord> = read_json(&address)?;
            let canonical = record.as_ref().map(resolve).transpose()?;
            let company: Option<CompanyContext> = company.map(|path| read_json(&path)).transpose()?;

            print_json(&evaluate_deletion(canonical.as_ref(), company.as_ref()))
        }
        Command::Classify { category } => {
            let roles = classify(&AddressCategory::from(category.as_str()));
            tracing::debug!(roles = roles.len(), "Classified category {}", category);
            print_json(&roles)
        }
        Command::FillTypes {
            categories,
            address,
            no_role,
            better_roles,
        } => {
            let record: Option<AddressRecord> =
                address.map(|path| read_json(&path)).transpose()?;
            let flags = record.as_ref().map(AddressRecord::roles);
            let requested = requested_category(&categories);

            let roles = config.roles();
            let options = FillTypesOptions {
                no_role: no_role || roles.no_role,
                better_roles: better_roles || roles.better_roles,
            };

            print_json(&fill_types(flags.as_ref(), requested.as_ref(), options))
        }
        Command::Merge {
            server,
            extracted,
            suggested,
            search,
        } => {
            let server_page: Vec<ServerAddress> = read_items_or_empty(server.as_deref())?;
            let extracted: Vec<AddressRecord> = read_items_or_empty(extracted.as_deref())?;
            let suggested: Vec<SuggestedAddress> = read_items_or_empty(suggested.as_deref())?;

            print_json(&merge_candidates(
                &search,
                &server_page,
                &extracted,
                &suggested,
            ))
        }
    }
}

fn init_tracing(default_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn requested_category(categories: &[String]) -> Option<RequestedCategory> {
    match categories {
        [] => None,
        [single] => Some(RequestedCategory::from(single.as_str())),
        many => Some(RequestedCategory::Many(
            many.iter().map(|role| AddressRole::from(role.as_str())).collect(),
        )),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read JSON file at {:?}", path))?;
    serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse JSON in {:?}", path))
}

/// Converts array elements one by one, so a corrupt entry only costs itself.
fn parse_each<T: DeserializeOwned>(
    values: Vec<serde_json::Value>,
) -> (Vec<(usize, T)>, Vec<(usize, serde_json::Error)>) {
    let mut parsed = Vec::new();
    let mut failed = Vec::new();

    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value(value) {
            Ok(item) => parsed.push((index, item)),
            Err(error) => {
                tracing::warn!(index, %error, "Skipping malformed entry");
                failed.push((index, error));
            }
        }
    }

    (parsed, failed)
}

/// Resolves a JSON array of records. Entries that fail to parse are reported
/// alongside the unresolvable ones, under their position in the input.
fn resolve_batch(values: Vec<serde_json::Value>) -> ResolvedBatch {
    let (parsed, failed) = parse_each::<AddressRecord>(values);
    let (positions, records): (Vec<usize>, Vec<AddressRecord>) = parsed.into_iter().unzip();

    let mut batch = resolve_all(&records);
    for rejected in &mut batch.rejected {
        rejected.index = positions[rejected.index];
    }
    batch
        .rejected
        .extend(failed.into_iter().map(|(index, error)| RejectedRecord {
            index,
            error: AddressError::MalformedRecord {
                reason: error.to_string(),
            },
        }));
    batch.rejected.sort_by_key(|rejected| rejected.index);

    batch
}

fn read_items_or_empty<T: DeserializeOwned>(path: Option<&Path>) -> Result<Vec<T>> {
    match path {
        Some(path) => {
            let values: Vec<serde_json::Value> = read_json(path)?;
            let (parsed, _) = parse_each(values);
            Ok(parsed.into_iter().map(|(_, item)| item).collect())
        }
        None => Ok(Vec::new()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
