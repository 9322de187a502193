use crate::language::DEFAULT_LANGUAGE;

/// A documentation page loaded from the content directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Canonical path, always starting with `/` (e.g. `/voice/voice-api/guides/numbers`)
    pub path: String,
    pub title: String,
    pub description: Option<String>,
    pub blocks: Vec<Block>,
    pub groups: Vec<CodeSnippetGroup>,
}

/// One position in a document body.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Raw markdown, rendered as-is
    Markdown(String),
    /// Tabbed code snippets; index into `Document::groups`
    Snippets(usize),
}

/// A single language variant inside a snippet group.
#[derive(Debug, Clone, PartialEq)]
pub struct Snippet {
    pub language: String,
    pub title: Option<String>,
    pub code: String,
}

/// Language-keyed code examples shown as one tab widget.
///
/// Languages keep insertion order, which is the order tabs are rendered in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeSnippetGroup {
    snippets: Vec<Snippet>,
}

impl CodeSnippetGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variant. Returns `false` (and keeps the existing one) when the
    /// language is already present.
    pub fn insert(&mut self, snippet: Snippet) -> bool {
        if self.offers(&snippet.language) {
            return false;
        }
        self.snippets.push(snippet);
        true
    }

    pub fn offers(&self, language: &str) -> bool {
        self.snippets.iter().any(|s| s.language == language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.snippets.iter().map(|s| s.language.as_str())
    }

    pub fn snippets(&self) -> &[Snippet] {
        &self.snippets
    }

    /// The group's own default: the portal default when offered, otherwise
    /// the first language added. `None` only for an empty group.
    pub fn default_language(&self) -> Option<&str> {
        if self.offers(DEFAULT_LANGUAGE) {
            return Some(DEFAULT_LANGUAGE);
        }
        self.snippets.first().map(|s| s.language.as_str())
    }
}

impl Document {
    pub fn offers_language(&self, language: &str) -> bool {
        self.groups.iter().any(|g| g.offers(language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(language: &str) -> Snippet {
        Snippet {
            language: language.to_string(),
            title: None,
            code: format!("// {}", language),
        }
    }

    fn group(languages: &[&str]) -> CodeSnippetGroup {
        let mut group = CodeSnippetGroup::new();
        for lang in languages {
            group.insert(snippet(lang));
        }
        group
    }

    #[test]
    fn test_insert_keeps_order_and_rejects_duplicates() {
        let mut g = group(&["php", "node", "ruby"]);

        assert!(!g.insert(snippet("node")));
        assert_eq!(g.languages().collect::<Vec<_>>(), vec!["php", "node", "ruby"]);
        assert_eq!(g.snippets().len(), 3);
    }

    #[test]
    fn test_default_language_prefers_node() {
        assert_eq!(group(&["php", "node"]).default_language(), Some("node"));
    }

    #[test]
    fn test_default_language_falls_back_to_first() {
        assert_eq!(group(&["curl", "php"]).default_language(), Some("curl"));
        assert_eq!(CodeSnippetGroup::new().default_language(), None);
    }

    #[test]
    fn test_document_offers_any_group_language() {
        let doc = Document {
            path: "/voice/guide".to_string(),
            title: "Guide".to_string(),
            description: None,
            blocks: vec![Block::Snippets(0), Block::Snippets(1)],
            groups: vec![group(&["node", "php"]), group(&["curl", "node"])],
        };

        assert!(doc.offers_language("curl"));
        assert!(doc.offers_language("php"));
        assert!(!doc.offers_language("ruby"));
    }
}
