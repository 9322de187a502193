//! Content check binary - loads everything the server would load and prints
//! a code snippet coverage report, without starting the server.
//!
//! Usage:
//!   cargo run --bin content-check
//!
//! Optional environment variables:
//! - CONTENT_DIR (defaults to content)
//! - REDIRECTS_FILE
//! - LANDING_PAGES_FILE
//!
//! Exits non-zero when content fails to load or an internal redirect points
//! at a page that does not exist.

use anyhow::{bail, Context, Result};
use developer_portal::config::Config;
use developer_portal::content::{ContentLoader, ContentStore, SnippetCoverage};
use developer_portal::landing::LandingPageRegistry;
use developer_portal::language::CodeLanguageRegistry;
use developer_portal::redirects::RedirectTable;
use developer_portal::router::Resolver;
use developer_portal::server;
use std::sync::Arc;
use tracing::{info, warn};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("developer_portal=info".parse()?),
        )
        .init();

    // Load environment from .env file
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let loader = ContentLoader::new(config.content_dir.clone());
    let content = Arc::new(
        ContentStore::load(&loader)
            .with_context(|| format!("Failed to load {}", config.content_dir.display()))?,
    );
    let redirects = RedirectTable::load(config.redirects_file.as_deref())?;
    let landing = LandingPageRegistry::load(config.landing_pages_file.as_deref())?;

    let coverage = SnippetCoverage::from_snapshot(&content.snapshot());
    let resolver = Resolver::new(redirects, Arc::clone(&content), landing);

    print_coverage(&coverage);

    let registry = CodeLanguageRegistry::get();
    for language in &coverage.languages {
        if !registry.is_known(&language.language) {
            warn!(
                "Language '{}' is not in the language registry; tabs will show the raw id",
                language.language
            );
        }
    }

    let broken = server::broken_redirects(&resolver);
    if !broken.is_empty() {
        for rule in &broken {
            println!("  broken redirect: {} -> {}", rule.source, rule.target);
        }
        bail!("{} redirect(s) point at missing pages", broken.len());
    }

    info!(
        "Content OK: {} documents, {} redirects, {} landing pages",
        content.len(),
        resolver.redirects().len(),
        resolver.landing().len()
    );
    Ok(())
}

fn print_coverage(coverage: &SnippetCoverage) {
    println!("\n{}", "=".repeat(60));
    println!(
        "CODE SNIPPET COVERAGE ({} documents, {} groups)",
        coverage.total_documents, coverage.total_groups
    );
    println!("{}", "=".repeat(60));

    for language in &coverage.languages {
        println!(
            "  {:<14} {:>5} groups {:>5} documents",
            language.label, language.groups, language.documents
        );
    }

    let partial: Vec<_> = coverage
        .documents
        .iter()
        .filter(|d| !d.partial_languages().is_empty())
        .collect();
    if !partial.is_empty() {
        println!("\nDocuments with partially covered languages:");
        for document in partial {
            println!("  {}: {}", document.path, document.partial_languages().join(", "));
        }
    }
    println!("{}\n", "=".repeat(60));
}
