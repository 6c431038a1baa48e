// Content checker
//
// Renders every page document under <site_root>/assets/data and reports
// render diagnostics and code assets that cannot be read.
// Usage: cargo run --features cli --bin check_content [-- <site_root>]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use learning_platform::assets::AssetFetcher;
use learning_platform::components::{ComponentRegistry, Dispatcher, ModuleDocument};
use learning_platform::{ContentError, PlatformConfig, SiteRootFetcher};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Every `.json` file below `dir`.
fn collect_json_files(dir: &Path, out: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    let entries = std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_json_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            out.push(path);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "learning_platform=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = PlatformConfig::from_env().context("loading configuration")?;
    if let Some(root) = std::env::args().nth(1) {
        config.site_root = PathBuf::from(root);
    }

    let data_dir = config.site_root.join("assets").join("data");
    tracing::info!("Checking content under {}", data_dir.display());

    let mut files = Vec::new();
    collect_json_files(&data_dir, &mut files)?;
    files.sort();

    let fetcher = SiteRootFetcher::new(&config.site_root);
    let dispatcher = Dispatcher::new(Arc::new(ComponentRegistry::standard()));

    let mut pages = 0usize;
    let mut problems = 0usize;

    for file in &files {
        let text = std::fs::read_to_string(file)
            .with_context(|| format!("reading {}", file.display()))?;
        let document = match ModuleDocument::from_json(&text) {
            Ok(document) => document,
            Err(ContentError::MissingComponents) => {
                tracing::debug!("Skipping {} (not a page document)", file.display());
                continue;
            }
            Err(e) => {
                println!("{}: {}", file.display(), e);
                problems += 1;
                continue;
            }
        };

        pages += 1;
        let output = dispatcher.render_components(&document.components);

        for diagnostic in &output.diagnostics {
            println!("{}: {:?}", file.display(), diagnostic);
            problems += 1;
        }
        for asset in &output.deferred {
            if let Err(e) = fetcher.fetch_text(&asset.fetch_path).await {
                println!("{}: code asset {}: {}", file.display(), asset.source_path, e);
                problems += 1;
            }
        }
    }

    tracing::info!("Checked {} page documents, {} problems", pages, problems);
    println!("{} pages, {} problems", pages, problems);

    if problems > 0 {
        std::process::exit(1);
    }
    Ok(())
}
