//! Code language registry: the languages the portal knows how to label.
//!
//! Documents may carry snippets in any language; this registry only decides
//! how a language id is displayed on a tab and where it sorts in reports.
//! It is initialized once on first access and immutable thereafter.

use std::sync::OnceLock;

/// Language every request starts with when no suffix is given.
pub const DEFAULT_LANGUAGE: &str = "node";

/// Metadata for a known code language.
#[derive(Debug, Clone)]
pub struct CodeLanguage {
    /// Identifier used in URLs and snippet fences (e.g. "node", "php")
    pub id: &'static str,

    /// Tab label (e.g. "Node.js", "PHP")
    pub label: &'static str,

    /// Position in coverage reports; lower sorts first
    pub weight: u16,
}

/// Global code language registry singleton.
pub struct CodeLanguageRegistry {
    languages: Vec<CodeLanguage>,
}

static REGISTRY: OnceLock<CodeLanguageRegistry> = OnceLock::new();

impl CodeLanguageRegistry {
    /// Get the global registry instance.
    pub fn get() -> &'static CodeLanguageRegistry {
        REGISTRY.get_or_init(|| CodeLanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Look up a language by id.
    pub fn get_by_id(&self, id: &str) -> Option<&CodeLanguage> {
        self.languages.iter().find(|lang| lang.id == id)
    }

    /// All known languages in weight order.
    pub fn list(&self) -> Vec<&CodeLanguage> {
        let mut languages: Vec<_> = self.languages.iter().collect();
        languages.sort_by_key(|lang| lang.weight);
        languages
    }

    /// Tab label for a language id. Unknown ids are shown as-is.
    pub fn label<'a>(&self, id: &'a str) -> &'a str {
        match self.get_by_id(id) {
            Some(lang) => lang.label,
            None => id,
        }
    }

    /// Sort weight for a language id. Unknown ids sort last.
    pub fn weight(&self, id: &str) -> u16 {
        self.get_by_id(id).map(|lang| lang.weight).unwrap_or(u16::MAX)
    }

    pub fn is_known(&self, id: &str) -> bool {
        self.get_by_id(id).is_some()
    }
}

fn default_languages() -> Vec<CodeLanguage> {
    vec![
        CodeLanguage { id: "node", label: "Node.js", weight: 0 },
        CodeLanguage { id: "java", label: "Java", weight: 10 },
        CodeLanguage { id: "dotnet", label: ".NET", weight: 20 },
        CodeLanguage { id: "python", label: "Python", weight: 30 },
        CodeLanguage { id: "ruby", label: "Ruby", weight: 40 },
        CodeLanguage { id: "php", label: "PHP", weight: 50 },
        CodeLanguage { id: "curl", label: "cURL", weight: 60 },
        CodeLanguage { id: "go", label: "Go", weight: 70 },
        CodeLanguage { id: "kotlin", label: "Kotlin", weight: 80 },
        CodeLanguage { id: "swift", label: "Swift", weight: 90 },
        CodeLanguage { id: "objective_c", label: "Objective-C", weight: 100 },
        CodeLanguage { id: "javascript", label: "JavaScript", weight: 110 },
        CodeLanguage { id: "android", label: "Android", weight: 120 },
        CodeLanguage { id: "ios", label: "iOS", weight: 130 },
        CodeLanguage { id: "json", label: "JSON", weight: 200 },
    ]
}
