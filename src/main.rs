// SPDX-License-Identifier: PMPL-1.0-or-later

//! planning-i18n: inspect and query the planning console's translation tables
//!
//! Resolves keys the way the console does (fallback to the key, release-gated
//! locales), lists locales, reports translation coverage and runs
//! self-diagnostics over a store configuration.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use planning_i18n::config::StoreConfig;
use planning_i18n::diagnostics::{run_self_diagnostics, MemorySink};
use planning_i18n::i18n::{translate_role, Lang, LocaleRegistry, LocaleStatus, TranslationStore};
use planning_i18n::logging;
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "planning-i18n")]
#[command(version)]
#[command(about = "Query and audit the planning console's translation tables")]
#[command(long_about = None)]
struct Cli {
    /// Store configuration (YAML or JSON)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at debug level (overridden by PLANNING_I18N_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve translation keys against the active locale
    Get {
        /// Keys to resolve
        #[arg(value_name = "KEY", required = true)]
        keys: Vec<String>,

        /// Switch to this locale first (e.g. fr, fr-FR)
        #[arg(short, long)]
        locale: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Translate a user role identifier (supervisor, teamleader, operator)
    Role {
        #[arg(value_name = "ROLE")]
        value: String,

        /// Switch to this locale first
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// List known locales and their release status
    Locales {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show translation coverage against a reference locale
    Coverage {
        /// Reference locale (default: configured default locale)
        #[arg(short, long)]
        reference: Option<String>,

        /// List every missing key
        #[arg(short, long)]
        missing: bool,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check configuration and compiled tables
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let registry = LocaleRegistry::builtin();

    match cli.command {
        Commands::Get { keys, locale, json } => {
            let store = open_store(&config, locale.as_deref())?;
            if json {
                let texts: serde_json::Map<String, serde_json::Value> = keys
                    .iter()
                    .map(|key| (key.clone(), json!(store.get(key))))
                    .collect();
                let payload = json!({
                    "locale": store.active_locale(),
                    "texts": texts,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                for key in &keys {
                    println!("{}\t{}", key, store.get(key));
                }
            }
        }

        Commands::Role { value, locale } => {
            let store = open_store(&config, locale.as_deref())?;
            println!("{}", translate_role(&store, Some(&value)));
        }

        Commands::Locales { json } => {
            let store = open_store(&config, None)?;
            let rows: Vec<_> = Lang::all()
                .iter()
                .map(|lang| {
                    let status = match registry.status(*lang) {
                        None => "not compiled",
                        Some(_) if config.is_usable(&registry, *lang) => "enabled",
                        Some(LocaleStatus::Enabled) => "disabled by config",
                        Some(LocaleStatus::Disabled) => "not released",
                    };
                    (*lang, status)
                })
                .collect();

            if json {
                let payload: Vec<_> = rows
                    .iter()
                    .map(|(lang, status)| {
                        json!({
                            "code": lang,
                            "name": lang.english_name(),
                            "native_name": lang.native_name(),
                            "status": status,
                            "default": *lang == store.default_locale(),
                            "active": *lang == store.active_locale(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("{}", "LOCALES".bold().cyan());
                for (lang, status) in &rows {
                    let marker = if *lang == store.active_locale() { "*" } else { " " };
                    let status = if *status == "enabled" {
                        status.green()
                    } else {
                        status.yellow()
                    };
                    println!(
                        " {} {:4} {:10} {:10} {}",
                        marker,
                        lang.code(),
                        lang.english_name(),
                        lang.native_name(),
                        status
                    );
                }
            }
        }

        Commands::Coverage {
            reference,
            missing,
            json,
        } => {
            let reference = match reference {
                Some(tag) => Lang::parse_tag(&tag)?,
                None => config.default_locale,
            };
            let report = registry
                .coverage(reference)
                .with_context(|| format!("computing coverage against {}", reference))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{} (reference: {})", "COVERAGE".bold().cyan(), reference);
                for entry in &report {
                    let ratio = format!("{}/{}", entry.translated, entry.total);
                    let ratio = if entry.is_complete() {
                        ratio.green()
                    } else {
                        ratio.yellow()
                    };
                    println!(
                        "  {:4} {:>9}  {} missing",
                        entry.lang.code(),
                        ratio,
                        entry.missing.len()
                    );
                    if missing {
                        for key in &entry.missing {
                            println!("         - {}", key);
                        }
                    }
                }
            }
        }

        Commands::Check => {
            println!("planning-i18n self-diagnostics");
            println!();
            let sink = MemorySink::new();
            run_self_diagnostics(&config, &registry, &sink);
            for entry in sink.records() {
                entry.print();
            }
            if sink.has_errors() {
                return Err(anyhow!("self-diagnostics reported issues"));
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<StoreConfig> {
    let config = match path {
        Some(path) => StoreConfig::load(path)
            .with_context(|| format!("loading store configuration from {}", path.display()))?,
        None => StoreConfig::default(),
    };
    Ok(config.with_env_override()?)
}

/// Build the store and apply a locale requested on the command line. An
/// unusable locale is logged by the store and the lookup proceeds on the
/// current one, exactly as in the console.
fn open_store(config: &StoreConfig, locale: Option<&str>) -> Result<TranslationStore> {
    let store = TranslationStore::new(LocaleRegistry::builtin(), config.clone())
        .context("initialising translation store")?;
    if let Some(tag) = locale {
        store.set_active_locale_code(tag);
    }
    Ok(store)
}
