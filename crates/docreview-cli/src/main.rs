//! docreview - terminal client for the document review server.
//!
//! Set DOCREVIEW_API_URL (or API_URL). Previews are written to
//! DOCREVIEW_PREVIEW_DIR.

use anyhow::Context;
use clap::{Parser, Subcommand};
use docreview_api_client::ApiClient;
use docreview_cli::{init_tracing, pdf_rasterizer, preview_regions, PathPicker, TerminalUi};
use docreview_core::models::{ReviewStatus, UploadCategory};
use docreview_core::ClientConfig;
use docreview_processing::{DocxHtmlConverter, PreviewDispatcher};
use docreview_services::{ReviewDesk, UploadOutcome};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "docreview", about = "Document review client")]
struct Cli {
    /// Server base URL (overrides DOCREVIEW_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Student id attached to uploads (overrides DOCREVIEW_STUDENT_ID)
    #[arg(long, global = true)]
    student_id: Option<String>,

    /// Directory previews are written to (overrides DOCREVIEW_PREVIEW_DIR)
    #[arg(long, global = true)]
    preview_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List documents awaiting review
    List {
        /// Print the raw items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Upload a document: citizenship or w2
    Upload {
        category: UploadCategory,
        /// Path to the file to upload
        file: PathBuf,
    },
    /// Render the preview of a queued document
    Review {
        document_id: String,
    },
    /// Preview a queued document and record a decision: approve or reject
    Decide {
        document_id: String,
        status: ReviewStatus,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("Invalid DOCREVIEW_* configuration")?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url);
    }
    if let Some(student_id) = &cli.student_id {
        config.student_id = student_id.clone();
    }
    if let Some(dir) = &cli.preview_dir {
        config.preview_dir = dir.clone();
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    std::fs::create_dir_all(&config.preview_dir).with_context(|| {
        format!(
            "Failed to create preview directory {}",
            config.preview_dir.display()
        )
    })?;

    let api = Arc::new(ApiClient::from_config(&config).context("Failed to create API client")?);
    let (regions, sinks) = preview_regions(&config.preview_dir);
    let picker = match &cli.command {
        Commands::Upload { file, .. } => PathPicker::new(Some(file.clone())),
        _ => PathPicker::new(None),
    };

    let desk = ReviewDesk::new(
        &config,
        api,
        Arc::new(TerminalUi::stdout()),
        Arc::new(picker),
        regions,
        PreviewDispatcher::new(pdf_rasterizer(), Arc::new(DocxHtmlConverter)),
    );

    match cli.command {
        Commands::List { json } => {
            let items = desk.refresh().await?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&items).context("Serialize action items")?
                );
            }
        }
        Commands::Upload { category, .. } => match desk.upload(category).await? {
            UploadOutcome::Uploaded(response) => {
                if let Some(id) = response.document_id {
                    println!("Document id: {}", id);
                }
            }
            UploadOutcome::Cancelled => println!("Nothing uploaded."),
        },
        Commands::Review { document_id } => {
            desk.refresh().await?;
            let item = desk
                .queue()
                .find(&document_id)
                .with_context(|| format!("Document {} is not awaiting review", document_id))?;

            let opened = desk.open_item(&item).await;
            for sink in &sinks {
                if let (true, Some(path)) = (sink.is_visible(), sink.written()) {
                    println!("Preview: {}", path.display());
                }
            }
            opened?;
        }
        Commands::Decide {
            document_id,
            status,
        } => {
            desk.refresh().await?;
            let item = desk
                .queue()
                .find(&document_id)
                .with_context(|| format!("Document {} is not awaiting review", document_id))?;

            // A failed preview still leaves the document bound for a decision.
            if let Err(e) = desk.open_item(&item).await {
                tracing::warn!(document_id = %document_id, error = %e, "Preview failed");
            }
            desk.submit_decision(status)
                .await
                .with_context(|| format!("Failed to submit review for {}", document_id))?;
            println!("Document {} marked {}", document_id, status);
        }
    }

    Ok(())
}
