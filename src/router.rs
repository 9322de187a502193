//! Request path resolution.
//!
//! Every path goes through the same ordered pipeline and ends in exactly one
//! outcome:
//!
//! 1. an exact redirect rule
//! 2. a document, either at the full path or at the path minus a trailing
//!    language segment (`.../connect-an-inbound-call/php`)
//! 3. a landing page from the registry (`/<slug>`)
//! 4. not found
//!
//! Resolution is pure: the same path against the same content always gives
//! the same answer.

use std::sync::Arc;
use tracing::debug;

use crate::content::{ContentStore, Document};
use crate::landing::{LandingPage, LandingPageRegistry};
use crate::language::{LanguageResolver, ResolvedLanguage};
use crate::redirects::{RedirectRule, RedirectTable};

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Redirect(RedirectRule),
    Document {
        document: Arc<Document>,
        language: ResolvedLanguage,
    },
    Landing(LandingPage),
    NotFound,
}

pub struct Resolver {
    redirects: RedirectTable,
    content: Arc<ContentStore>,
    landing: LandingPageRegistry,
    languages: LanguageResolver,
}

impl Resolver {
    pub fn new(
        redirects: RedirectTable,
        content: Arc<ContentStore>,
        landing: LandingPageRegistry,
    ) -> Self {
        Self {
            redirects,
            content,
            landing,
            languages: LanguageResolver::default(),
        }
    }

    pub fn content(&self) -> &Arc<ContentStore> {
        &self.content
    }

    pub fn landing(&self) -> &LandingPageRegistry {
        &self.landing
    }

    pub fn redirects(&self) -> &RedirectTable {
        &self.redirects
    }

    pub fn resolve(&self, path: &str) -> Resolution {
        let path = normalize(path);

        if let Some(rule) = self.redirects.find(path) {
            debug!("{} redirects to {} ({})", path, rule.target, rule.status);
            return Resolution::Redirect(rule.clone());
        }

        if let Some(resolution) = self.resolve_document(path) {
            return resolution;
        }

        if let Some(page) = landing_slug(path).and_then(|slug| self.landing.get(slug)) {
            return Resolution::Landing(page.clone());
        }

        Resolution::NotFound
    }

    fn resolve_document(&self, path: &str) -> Option<Resolution> {
        let snapshot = self.content.snapshot();

        // The full path wins over reading its last segment as a language.
        if let Some(document) = snapshot.lookup(path) {
            if let Ok(language) = self.languages.resolve_document(&document, None) {
                return Some(Resolution::Document { document, language });
            }
        }

        let (content_path, suffix) = split_language_suffix(path)?;
        let document = snapshot.lookup(content_path)?;

        match self.languages.resolve_document(&document, Some(suffix)) {
            Ok(language) => Some(Resolution::Document { document, language }),
            Err(unsupported) => {
                debug!("{}", unsupported);
                None
            }
        }
    }
}

/// Drop trailing slashes, keeping the root path `/`.
pub fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

/// `/a/b/php` -> (`/a/b`, `php`). Needs at least two segments.
pub fn split_language_suffix(path: &str) -> Option<(&str, &str)> {
    let (content_path, suffix) = path.rsplit_once('/')?;
    if content_path.is_empty() || suffix.is_empty() {
        return None;
    }
    Some((content_path, suffix))
}

/// `/hansel` -> `hansel`; anything with more than one segment is not a landing page.
fn landing_slug(path: &str) -> Option<&str> {
    let slug = path.strip_prefix('/')?;
    if slug.is_empty() || slug.contains('/') {
        return None;
    }
    Some(slug)
}
