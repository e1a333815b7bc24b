use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use tracing::warn;
use versioned_enum::{Catalog, LATEST, Version, VersionedEnum, config, logging};

#[derive(Parser)]
#[command(name = "versioned-enum")]
#[command(version, about = "Inspect versioned enum catalogs")]
struct Cli {
    /// Catalog file (defaults to the data directory's catalog.json)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every enum with its members' aliases
    List {
        #[arg(long, default_value_t = LATEST)]
        at: Version,
    },
    /// Print the aliases of one member
    Values {
        #[arg(value_name = "ENUM")]
        group: String,
        member: String,
        #[arg(long, default_value_t = LATEST)]
        at: Version,
    },
    /// Print the member that answers to an alias
    Find {
        #[arg(value_name = "ENUM")]
        group: String,
        alias: String,
        #[arg(long, default_value_t = LATEST)]
        at: Version,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::try_init_tracing(&config::log_path(), &config::log_filter());

    let catalog_path = cli.catalog.unwrap_or_else(config::catalog_path);
    let catalog = Catalog::load(&catalog_path)
        .with_context(|| format!("failed to load catalog from {}", catalog_path.display()))?;

    match cli.command {
        Command::List { at } => {
            for (name, group) in catalog.as_version(&at).iter() {
                println!("{}", name);
                for member in group {
                    match member.get_values() {
                        Ok(values) => println!("  {}: {}", member, join(values)),
                        Err(e) => {
                            warn!("{}", e);
                            println!("  {}: -", member);
                        }
                    }
                }
            }
        }
        Command::Values { group, member, at } => {
            let group = find_group(&catalog, &group)?.as_version(at);
            let values = group.lookup(&member)?.get_values()?;
            println!("{}", join(values));
        }
        Command::Find { group, alias, at } => {
            let group = find_group(&catalog, &group)?.as_version(at);
            println!("{}", group.get(alias.as_str())?.get_name());
        }
    }

    Ok(())
}

fn find_group<'a>(catalog: &'a Catalog, name: &str) -> anyhow::Result<&'a VersionedEnum> {
    catalog
        .get(name)
        .ok_or_else(|| anyhow!("no enum named {} in catalog", name))
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
