//! Active language negotiation for documents with tabbed code snippets.
//!
//! A request selects one page-wide language. Each snippet group then decides
//! on its own which variant to show: the active language when it has one,
//! its own default otherwise. Nothing here holds state between requests.

use thiserror::Error;

use super::registry::{CodeLanguageRegistry, DEFAULT_LANGUAGE};
use crate::content::{CodeSnippetGroup, Document};

/// A language suffix that no snippet group in the document offers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("language '{language}' is not available for {path}")]
pub struct UnsupportedLanguage {
    pub path: String,
    pub language: String,
}

/// The page-wide language chosen for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveLanguage {
    pub id: String,
    /// True when the language came from the URL rather than the default
    pub requested: bool,
}

/// State of one tab in a snippet group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub language: String,
    pub label: String,
    pub active: bool,
    pub selectable: bool,
}

/// Tab metadata for one snippet group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTabs {
    /// Language whose snippet is shown; `None` for an empty group
    pub displayed: Option<String>,
    pub tabs: Vec<Tab>,
}

/// Full language resolution for a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLanguage {
    pub active: ActiveLanguage,
    pub groups: Vec<GroupTabs>,
}

/// Picks the page-wide language, defaulting to [`DEFAULT_LANGUAGE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageResolver;

impl LanguageResolver {
    /// Pick the page-wide language.
    ///
    /// Without a suffix this is always the default, even when no group offers
    /// it. A suffix must be offered by at least one group in the document.
    pub fn resolve(
        &self,
        document: &Document,
        suffix: Option<&str>,
    ) -> Result<ActiveLanguage, UnsupportedLanguage> {
        match suffix {
            None => Ok(ActiveLanguage {
                id: DEFAULT_LANGUAGE.to_string(),
                requested: false,
            }),
            Some(language) if document.offers_language(language) => Ok(ActiveLanguage {
                id: language.to_string(),
                requested: true,
            }),
            Some(language) => Err(UnsupportedLanguage {
                path: document.path.clone(),
                language: language.to_string(),
            }),
        }
    }

    /// Resolve the page-wide language and the tab state of every group.
    pub fn resolve_document(
        &self,
        document: &Document,
        suffix: Option<&str>,
    ) -> Result<ResolvedLanguage, UnsupportedLanguage> {
        let active = self.resolve(document, suffix)?;
        let groups = document
            .groups
            .iter()
            .map(|group| group_tabs(group, &active.id))
            .collect();

        Ok(ResolvedLanguage { active, groups })
    }
}

/// Which variant a group shows for the page-wide language.
pub fn displayed_language<'a>(group: &'a CodeSnippetGroup, active: &str) -> Option<&'a str> {
    group
        .languages()
        .find(|lang| *lang == active)
        .or_else(|| group.default_language())
}

/// Tabs for a group in insertion order. Exactly one tab is active unless the
/// group is empty.
pub fn tabs(group: &CodeSnippetGroup, active: &str) -> Vec<Tab> {
    let registry = CodeLanguageRegistry::get();
    let displayed = displayed_language(group, active);

    group
        .languages()
        .map(|lang| Tab {
            language: lang.to_string(),
            label: registry.label(lang).to_string(),
            active: Some(lang) == displayed,
            selectable: true,
        })
        .collect()
}

pub fn group_tabs(group: &CodeSnippetGroup, active: &str) -> GroupTabs {
    GroupTabs {
        displayed: displayed_language(group, active).map(str::to_string),
        tabs: tabs(group, active),
    }
}
