//! textconv - parse text into a builtin type and format it back.

use std::sync::Arc;

use anyhow::bail;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use textconv::config::{Config, DEFAULT_LOG_FILTER};
use textconv::types::{as_text, boxed};
use textconv::{ConverterTable, Service, TextTypeConverter, TypeConverter, TypeKey};

/// Parse each TEXT as TYPE and print the value and its text form
#[derive(Parser)]
#[command(name = "textconv")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Target type, e.g. i32, u64, f64, bool, char
    #[arg(value_name = "TYPE")]
    target: String,

    /// Values to convert
    #[arg(value_name = "TEXT", required = true)]
    texts: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let config = Config::from_env();
    info!("Negative cache capacity: {}", config.cache.negative_capacity);

    let table = Arc::new(ConverterTable::with_builtins());
    let Some(target) = table.key_by_name(&cli.target) else {
        bail!("No converter registered for type '{}'", cli.target);
    };

    let converter = TextTypeConverter::with_config(table, config.cache);
    converter.start();

    for text in cli.texts {
        let value = converter.mandatory_convert(target, Some(boxed(text.clone())))?;
        let described = format!("{:?}", value);
        let formatted = converter.mandatory_convert(TypeKey::text(), Some(value))?;
        println!(
            "{} -> {} -> {}",
            text,
            described,
            as_text(&*formatted).unwrap_or_default()
        );
    }

    info!("Cache stats: {:?}", converter.stats());
    converter.stop();

    Ok(())
}
