//! formview - Main Entry Point
//!
//! Usage: `formview <page.html> [--config <file.json>] [--no-click]`
//!
//! Loads the page, wires a reader to every form, clicks each bound trigger
//! and prints what each output container ends up holding.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use formview_reader::{Bootstrap, Config};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

struct Args {
    page: PathBuf,
    config: Option<PathBuf>,
    click: bool,
}

impl Args {
    fn parse() -> Result<Self> {
        let mut page = None;
        let mut config = None;
        let mut click = true;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().context("--config needs a file argument")?;
                    config = Some(PathBuf::from(path));
                }
                "--no-click" => click = false,
                "-h" | "--help" => {
                    println!("usage: formview <page.html> [--config <file.json>] [--no-click]");
                    std::process::exit(0);
                }
                flag if flag.starts_with('-') => bail!("unknown option {flag}"),
                _ if page.is_none() => page = Some(PathBuf::from(&arg)),
                _ => bail!("unexpected argument {arg}"),
            }
        }

        Ok(Self {
            page: page.context("missing page argument")?,
            config,
            click,
        })
    }
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the summaries
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse()?;
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let html = std::fs::read_to_string(&args.page)
        .with_context(|| format!("failed to read {}", args.page.display()))?;
    let url = format!("file://{}", args.page.display());
    let mut doc = formview_html::parse_with_url(&html, &url)?;
    tracing::info!("Loaded {} ({} forms)", url, doc.forms().len());

    let bootstrap = Bootstrap::install(&mut doc, config);
    doc.content_loaded();

    for (index, reader) in bootstrap.readers().iter().enumerate() {
        match (reader.trigger(), reader.output()) {
            (Some(trigger), Some(output)) => {
                if args.click && !doc.click(trigger) {
                    tracing::debug!("Click on form #{} was cancelled", index);
                }
                println!(
                    "form #{}: {}",
                    index,
                    formview_html::inner_html(doc.tree(), output)
                );
            }
            _ => tracing::warn!("form #{} has no trigger or output; skipped", index),
        }
    }

    Ok(())
}
