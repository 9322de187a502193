use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::info;

/// Template data for a registry-driven landing page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LandingPage {
    pub slug: String,
    pub title: String,
    pub welcome: String,
    /// Show the developer relations openings below the welcome text
    #[serde(default)]
    pub careers: bool,
}

#[derive(Debug, Deserialize)]
struct LandingPagesFile {
    pages: Vec<LandingPage>,
}

impl LandingPage {
    pub fn new(slug: &str, title: &str, welcome: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            welcome: welcome.to_string(),
            careers: false,
        }
    }
}

/// Closed set of landing page slugs.
///
/// Any `/<slug>` in the registry renders the landing template; adding a page
/// needs a registry entry and nothing else.
#[derive(Debug, Clone, Default)]
pub struct LandingPageRegistry {
    pages: Vec<LandingPage>,
    index: HashMap<String, usize>,
}

fn slug_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid slug regex"))
}

impl LandingPageRegistry {
    pub fn new(pages: Vec<LandingPage>) -> Result<Self> {
        let mut index = HashMap::with_capacity(pages.len());
        for (position, page) in pages.iter().enumerate() {
            if !slug_pattern().is_match(&page.slug) {
                bail!("Invalid landing page slug: '{}'", page.slug);
            }
            if index.insert(page.slug.clone(), position).is_some() {
                bail!("Duplicate landing page slug: '{}'", page.slug);
            }
        }
        Ok(Self { pages, index })
    }

    pub fn default_pages() -> Vec<LandingPage> {
        vec![
            LandingPage::new(
                "hansel",
                "Hanselminutes",
                "Welcome, Hanselminutes listeners. Here is everything you need to build your connected applications.",
            ),
            LandingPage::new(
                "podcast",
                "Vonage Dev Podcast",
                "Welcome, podcast listeners. Start building with the Vonage APIs today.",
            ),
            LandingPage::new(
                "hacktoberfest",
                "Hacktoberfest",
                "Contribute to our open source SDKs and documentation this October.",
            ),
            LandingPage {
                careers: true,
                ..LandingPage::new(
                    "devrel",
                    "Developer Relations",
                    "Meet the team that builds the Vonage Developer Center.",
                )
            },
        ]
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(Self::default_pages())
    }

    /// Load from a JSON file (`{"pages": [...]}`) or fall back to the built-in list.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let pages = match file {
            Some(file) => {
                let content = std::fs::read_to_string(file).with_context(|| {
                    format!("Failed to read landing pages file {}", file.display())
                })?;
                let parsed: LandingPagesFile = serde_json::from_str(&content).with_context(|| {
                    format!("Failed to parse landing pages file {}", file.display())
                })?;
                parsed.pages
            }
            None => Self::default_pages(),
        };

        let registry = Self::new(pages)?;
        info!("Loaded {} landing pages", registry.len());
        Ok(registry)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&LandingPage> {
        self.index.get(name).map(|&position| &self.pages[position])
    }

    /// Slugs in registration order.
    pub fn list(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.slug.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_include_hansel() {
        let registry = LandingPageRegistry::with_defaults().unwrap();

        assert!(registry.contains("hansel"));
        assert!(registry
            .get("hansel")
            .unwrap()
            .welcome
            .starts_with("Welcome, Hanselminutes listeners."));
        assert!(!registry.contains("nope"));
    }

    #[test]
    fn test_list_keeps_registration_order() {
        let registry = LandingPageRegistry::new(vec![
            LandingPage::new("zeta", "Z", "z"),
            LandingPage::new("alpha", "A", "a"),
        ])
        .unwrap();

        assert_eq!(registry.list(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_invalid_slugs_rejected() {
        for slug in ["", "Upper", "with/slash", "-leading", "trailing-", "a b"] {
            let result = LandingPageRegistry::new(vec![LandingPage::new(slug, "T", "w")]);
            assert!(result.is_err(), "slug {:?} should be rejected", slug);
        }
    }

    #[test]
    fn test_duplicate_slugs_rejected() {
        let err = LandingPageRegistry::new(vec![
            LandingPage::new("hansel", "A", "a"),
            LandingPage::new("hansel", "B", "b"),
        ])
        .unwrap_err();

        assert!(err.to_string().contains("Duplicate landing page slug"));
    }

    #[test]
    fn test_load_from_file_replaces_defaults() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("landing.json");
        std::fs::write(
            &file,
            r#"{"pages": [
                {"slug": "conference", "title": "Conference", "welcome": "Hello attendees", "careers": true}
            ]}"#,
        )
        .unwrap();

        let registry = LandingPageRegistry::load(Some(&file)).unwrap();

        assert_eq!(registry.list(), vec!["conference"]);
        assert!(registry.get("conference").unwrap().careers);
        assert!(!registry.contains("hansel"));
    }

    #[test]
    fn test_careers_flag_defaults_to_false() {
        let page: LandingPage =
            serde_json::from_str(r#"{"slug": "a", "title": "A", "welcome": "w"}"#).unwrap();
        assert!(!page.careers);
    }
}
