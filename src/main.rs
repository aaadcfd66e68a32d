use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shapedoc::container::ContainerApp;
use shapedoc::{IoConfig, ShapeDocument, io};

/// Inspect shapedoc containers
#[derive(Parser, Debug)]
#[command(name = "shapedoc")]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file (defaults to ~/.config/shapedoc/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the raw label tree of a container
    Dump {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Load a document and summarise its contents
    Info {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Load a document and save it again under the configured format
    Copy {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Dump { file } => dump(&file),
        Command::Info { file } => info(&file),
        Command::Copy { input, output } => {
            let config = match &args.config {
                Some(path) => IoConfig::from_json_file(path)?,
                None => IoConfig::load_or_default()?,
            };
            copy(&input, &output, &config)
        }
    }
}

fn dump(file: &Path) -> Result<()> {
    let app = ContainerApp::with_default_formats();
    let mut container = app
        .open(file)
        .map_err(|status| anyhow::anyhow!("failed to open {}: {status}", file.display()))?;
    let tree = container.dump().context("failed to read label tree")?;
    app.close(&mut container);
    print!("{tree}");
    Ok(())
}

fn info(file: &Path) -> Result<()> {
    let doc = ShapeDocument::load_from(file).with_context(|| format!("Failed to load {:?}", file))?;
    let root = doc.root_shape()?;

    println!("uuid: {}", doc.uuid()?);
    println!("root: {} bytes, annotation {}", root.shape().len(), root.annotation());
    for collection in doc.collections() {
        println!("{}: {} shapes", collection.name(), collection.shapes().len());
    }
    Ok(())
}

fn copy(input: &Path, output: &Path, config: &IoConfig) -> Result<()> {
    let doc = io::load(input).with_context(|| format!("Failed to load {:?}", input))?;
    io::save(&doc, output, config).with_context(|| format!("Failed to save {:?}", output))?;
    Ok(())
}
