//! Code snippet coverage computed from a content snapshot.
//!
//! Shows which languages the documentation actually has examples for, so
//! gaps are visible on the admin coverage page and in `content-check`.

use serde::Serialize;
use std::collections::BTreeMap;

use super::Snapshot;
use crate::language::CodeLanguageRegistry;

/// Snippet counts for one language across all documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageCoverage {
    pub language: String,
    pub label: String,
    /// Snippet groups offering this language
    pub groups: usize,
    /// Documents with at least one snippet in this language
    pub documents: usize,
}

/// Languages offered by one document, against its number of groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentCoverage {
    pub path: String,
    pub groups: usize,
    /// Per language, how many of the document's groups offer it
    pub languages: BTreeMap<String, usize>,
}

impl DocumentCoverage {
    /// Languages present in some but not all of the document's groups.
    pub fn partial_languages(&self) -> Vec<&str> {
        self.languages
            .iter()
            .filter(|(_, count)| **count < self.groups)
            .map(|(language, _)| language.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnippetCoverage {
    pub total_documents: usize,
    pub total_groups: usize,
    /// Sorted by registry weight, unknown languages last by id
    pub languages: Vec<LanguageCoverage>,
    /// Only documents that have snippet groups, sorted by path
    pub documents: Vec<DocumentCoverage>,
}

impl SnippetCoverage {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let registry = CodeLanguageRegistry::get();
        let mut per_language: BTreeMap<String, (usize, usize)> = BTreeMap::new();
        let mut documents = Vec::new();
        let mut total_groups = 0;

        for document in snapshot.documents() {
            if document.groups.is_empty() {
                continue;
            }
            total_groups += document.groups.len();

            let mut languages: BTreeMap<String, usize> = BTreeMap::new();
            for group in &document.groups {
                for language in group.languages() {
                    *languages.entry(language.to_string()).or_default() += 1;
                }
            }

            for (language, groups) in &languages {
                let entry = per_language.entry(language.clone()).or_default();
                entry.0 += groups;
                entry.1 += 1;
            }

            documents.push(DocumentCoverage {
                path: document.path.clone(),
                groups: document.groups.len(),
                languages,
            });
        }

        let mut languages: Vec<LanguageCoverage> = per_language
            .into_iter()
            .map(|(language, (groups, docs))| LanguageCoverage {
                label: registry.label(&language).to_string(),
                language,
                groups,
                documents: docs,
            })
            .collect();
        languages.sort_by(|a, b| {
            registry
                .weight(&a.language)
                .cmp(&registry.weight(&b.language))
                .then_with(|| a.language.cmp(&b.language))
        });
        documents.sort_by(|a, b| a.path.cmp(&b.path));

        Self {
            total_documents: snapshot.len(),
            total_groups,
            languages,
            documents,
        }
    }
}
