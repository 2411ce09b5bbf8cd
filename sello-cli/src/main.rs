use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sello::{create_document, CreateOptions, FormFields, SystemClock};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sello",
    about = "Create PDF documents with stamped metadata and a QR payload, or inspect existing ones",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a PDF with metadata, an optional QR symbol, and a sidecar file
    Create {
        /// Output PDF path
        #[arg(short, long)]
        output: PathBuf,

        /// Document title
        #[arg(short, long, default_value = "")]
        title: String,

        /// Document author
        #[arg(short, long, default_value = "")]
        author: String,

        /// Document subject
        #[arg(short, long, default_value = "")]
        subject: String,

        /// Comma-separated keywords
        #[arg(short, long, default_value = "")]
        keywords: String,

        /// Creator (software) reported in the metadata
        #[arg(short, long, default_value = sello::metadata::DEFAULT_CREATOR)]
        creator: String,

        /// Free-text body content
        #[arg(long, default_value = "", conflicts_with = "content_file")]
        content: String,

        /// Read the body content from a file instead
        #[arg(long)]
        content_file: Option<PathBuf>,

        /// Skip the embedded metadata QR symbol
        #[arg(long)]
        no_qr: bool,
    },

    /// Show the embedded metadata of an existing PDF
    Inspect {
        /// Input PDF file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Create {
            output,
            title,
            author,
            subject,
            keywords,
            creator,
            content,
            content_file,
            no_qr,
        } => {
            let body = match content_file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read content file {}", path.display()))?,
                None => content,
            };

            let fields = FormFields {
                title,
                author,
                subject,
                keywords,
                creator,
                body,
                timestamp: None,
            };
            let options = CreateOptions { embed_qr: !no_qr };

            let artifacts = create_document(&fields, &options, &SystemClock)
                .context("failed to create PDF")?;
            let sidecar = sello::write_outputs(&artifacts, &output)
                .with_context(|| format!("failed to write {}", output.display()))?;

            println!("PDF created: {}", output.display());
            println!("Metadata sidecar: {}", sidecar.display());
        }

        Commands::Inspect { input } => {
            let bytes = std::fs::read(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let metadata = sello::read_embedded_metadata(&bytes)
                .with_context(|| format!("failed to read metadata from {}", input.display()))?;

            println!("Embedded metadata for: {}", input.display());
            println!("==========================================");
            match metadata {
                Some(entries) => {
                    for (key, value) in entries {
                        println!("{key}: {value}");
                    }
                }
                None => {
                    println!("No metadata found in the file.");
                }
            }
        }
    }

    Ok(())
}
