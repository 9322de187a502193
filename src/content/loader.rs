//! Markdown content loading.
//!
//! Every `*.md` file under the content root becomes one document whose path
//! mirrors the file path (`voice/guides/numbers.md` -> `/voice/guides/numbers`).
//! Files may start with a YAML frontmatter block and may embed tabbed code
//! snippets:
//!
//! ````text
//! :::code-snippets
//! ```node Make a call
//! client.calls.create(...)
//! ```
//! ```php
//! $client->voice()->createOutboundCall(...);
//! ```
//! :::
//! ````

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::document::{Block, CodeSnippetGroup, Document, Snippet};

const GROUP_OPEN: &str = ":::code-snippets";
const GROUP_CLOSE: &str = ":::";
const FENCE: &str = "```";
/// Markers that open a plain code block outside snippet groups
const PLAIN_FENCES: &[&str] = &[FENCE, "~~~"];

#[derive(Debug, Default, Deserialize)]
struct Frontmatter {
    title: Option<String>,
    description: Option<String>,
}

/// Reads documents from a content directory.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    root: PathBuf,
}

impl ContentLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load every document under the root, sorted by path.
    ///
    /// `index.md` files are also reachable at their directory path unless a
    /// sibling file already claims it.
    pub fn load(&self) -> Result<Vec<Document>> {
        let mut files = Vec::new();
        collect_markdown_files(&self.root, &mut files)
            .with_context(|| format!("Failed to read content directory {}", self.root.display()))?;

        let mut documents: BTreeMap<String, Document> = BTreeMap::new();
        let mut aliases = Vec::new();

        for file in files {
            let path = document_path(&self.root, &file)?;
            let source = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let document = parse_document(&path, &source, &file.display().to_string())?;

            if let Some(dir) = path.strip_suffix("/index") {
                let alias = if dir.is_empty() { "/" } else { dir };
                aliases.push((alias.to_string(), path.clone()));
            }

            debug!("Loaded {} ({} snippet groups)", path, document.groups.len());
            documents.insert(path, document);
        }

        for (alias, target) in aliases {
            if documents.contains_key(&alias) {
                continue;
            }
            if let Some(document) = documents.get(&target) {
                let aliased = Document {
                    path: alias.clone(),
                    ..document.clone()
                };
                documents.insert(alias, aliased);
            }
        }

        info!(
            "Loaded {} documents from {}",
            documents.len(),
            self.root.display()
        );

        Ok(documents.into_values().collect())
    }
}

fn collect_markdown_files(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    for entry in entries {
        let is_link = std::fs::symlink_metadata(&entry)?.file_type().is_symlink();
        if is_link && entry.is_dir() {
            debug!("Skipping symlinked directory {}", entry.display());
            continue;
        }
        if entry.is_dir() {
            collect_markdown_files(&entry, files)?;
        } else if entry.extension().and_then(|e| e.to_str()) == Some("md") {
            files.push(entry);
        }
    }
    Ok(())
}

/// Map a file under `root` to its URL path.
fn document_path(root: &Path, file: &Path) -> Result<String> {
    let relative = file
        .strip_prefix(root)
        .with_context(|| format!("{} is outside the content root", file.display()))?
        .with_extension("");

    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if segments.is_empty() {
        bail!("Cannot derive a document path for {}", file.display());
    }

    Ok(format!("/{}", segments.join("/")))
}

/// Split a leading `---` YAML block from the body.
fn split_frontmatter(source: &str) -> Option<(&str, &str)> {
    let rest = source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

struct OpenFence {
    language: String,
    title: Option<String>,
    code: String,
    line: usize,
}

/// Parse one markdown source into a document.
///
/// `origin` only appears in error messages.
pub fn parse_document(path: &str, source: &str, origin: &str) -> Result<Document> {
    let (frontmatter, body) = match split_frontmatter(source) {
        Some((yaml, body)) => {
            let frontmatter: Frontmatter = if yaml.trim().is_empty() {
                Frontmatter::default()
            } else {
                serde_yaml::from_str(yaml)
                    .with_context(|| format!("{}: invalid frontmatter", origin))?
            };
            (frontmatter, body)
        }
        None => (Frontmatter::default(), source),
    };

    let mut blocks = Vec::new();
    let mut groups: Vec<CodeSnippetGroup> = Vec::new();
    let mut markdown = String::new();
    let mut group: Option<(CodeSnippetGroup, usize)> = None;
    let mut fence: Option<OpenFence> = None;
    let mut plain_fence: Option<&str> = None;

    for (index, line) in body.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();

        let Some((current, _)) = group.as_mut() else {
            match plain_fence {
                Some(marker) if trimmed.starts_with(marker) => plain_fence = None,
                Some(_) => {}
                None => {
                    plain_fence = PLAIN_FENCES
                        .iter()
                        .copied()
                        .find(|marker| trimmed.starts_with(marker));
                }
            }
            if plain_fence.is_none() && trimmed == GROUP_OPEN {
                flush_markdown(&mut markdown, &mut blocks);
                group = Some((CodeSnippetGroup::new(), line_no));
            } else {
                markdown.push_str(line);
                markdown.push('\n');
            }
            continue;
        };

        if let Some(open) = fence.as_mut() {
            if trimmed == FENCE {
                let Some(open) = fence.take() else { continue };
                let language = open.language.clone();
                if !current.insert(Snippet {
                    language: open.language,
                    title: open.title,
                    code: open.code,
                }) {
                    bail!(
                        "{}:{}: duplicate '{}' snippet in code-snippets block",
                        origin,
                        open.line,
                        language
                    );
                }
            } else {
                open.code.push_str(line);
                open.code.push('\n');
            }
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        if trimmed == GROUP_CLOSE {
            if let Some((finished, _)) = group.take() {
                blocks.push(Block::Snippets(groups.len()));
                groups.push(finished);
            }
            continue;
        }

        if let Some(info) = trimmed.strip_prefix(FENCE) {
            let mut parts = info.trim().splitn(2, char::is_whitespace);
            let language = parts.next().unwrap_or_default().trim();
            if language.is_empty() {
                bail!(
                    "{}:{}: code snippet fence is missing a language",
                    origin,
                    line_no
                );
            }
            let title = parts
                .next()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty());
            fence = Some(OpenFence {
                language: language.to_string(),
                title,
                code: String::new(),
                line: line_no,
            });
            continue;
        }

        bail!(
            "{}:{}: only fenced code blocks are allowed inside code-snippets",
            origin,
            line_no
        );
    }

    if let Some(open) = fence {
        bail!("{}:{}: unclosed code fence", origin, open.line);
    }
    if let Some((_, opened_at)) = group {
        bail!("{}:{}: unclosed code-snippets block", origin, opened_at);
    }
    flush_markdown(&mut markdown, &mut blocks);

    let title = frontmatter
        .title
        .or_else(|| first_heading(&blocks))
        .unwrap_or_else(|| fallback_title(path));

    Ok(Document {
        path: path.to_string(),
        title,
        description: frontmatter.description,
        blocks,
        groups,
    })
}

fn flush_markdown(markdown: &mut String, blocks: &mut Vec<Block>) {
    if !markdown.trim().is_empty() {
        blocks.push(Block::Markdown(std::mem::take(markdown)));
    } else {
        markdown.clear();
    }
}

fn first_heading(blocks: &[Block]) -> Option<String> {
    blocks.iter().find_map(|block| match block {
        Block::Markdown(text) => text
            .lines()
            .find_map(|line| line.strip_prefix("# "))
            .map(|heading| heading.trim().to_string()),
        Block::Snippets(_) => None,
    })
}

/// Title from the last path segment: `connect-an-inbound-call` -> `Connect an inbound call`.
fn fallback_title(path: &str) -> String {
    let slug = path.rsplit('/').find(|s| !s.is_empty()).unwrap_or("Home");
    let words = slug.replace(['-', '_'], " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
