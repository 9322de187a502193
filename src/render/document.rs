use pulldown_cmark::{html, Options, Parser};

use super::{escape_html, layout};
use crate::content::{Block, CodeSnippetGroup, Document};
use crate::language::{GroupTabs, ResolvedLanguage};

/// Where the "Improve this page" link points; the document path and `.md` are appended.
const EDIT_BASE_URL: &str = "https://github.com/Nexmo/nexmo-developer/blob/main/_documentation/en";

pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Tab widget for one snippet group.
///
/// Tab links point at the document path with the language appended so the
/// choice survives a reload.
pub fn snippet_group(
    document_path: &str,
    index: usize,
    group: &CodeSnippetGroup,
    tabs: &GroupTabs,
) -> String {
    let mut out = format!(
        "<div class=\"Vlt-tabs\" data-snippet-group=\"{}\">\n<ul class=\"Vlt-tabs__header\" role=\"tablist\">\n",
        index
    );

    for tab in &tabs.tabs {
        let class = if tab.active {
            "Vlt-tabs__link Vlt-tabs__link_active"
        } else {
            "Vlt-tabs__link"
        };
        out.push_str(&format!(
            "<li class=\"{class}\" role=\"tab\" aria-selected=\"{selected}\" data-language=\"{lang}\" data-language-type=\"languages\" data-language-linkable=\"{linkable}\"><a href=\"{path}/{lang}\">{label}</a></li>\n",
            class = class,
            selected = tab.active,
            lang = escape_html(&tab.language),
            linkable = tab.selectable,
            path = escape_html(document_path),
            label = escape_html(&tab.label),
        ));
    }
    out.push_str("</ul>\n<div class=\"Vlt-tabs__content\">\n");

    for snippet in group.snippets() {
        let active = tabs.displayed.as_deref() == Some(snippet.language.as_str());
        let (class, hidden) = if active {
            ("Vlt-tabs__panel Vlt-tabs__panel_active", "")
        } else {
            ("Vlt-tabs__panel", " hidden")
        };
        out.push_str(&format!(
            "<div class=\"{}\" data-language=\"{}\"{}>\n",
            class,
            escape_html(&snippet.language),
            hidden
        ));
        if let Some(title) = &snippet.title {
            out.push_str(&format!("<h4>{}</h4>\n", escape_html(title)));
        }
        out.push_str(&format!(
            "<pre><code class=\"language-{}\">{}</code></pre>\n</div>\n",
            escape_html(&snippet.language),
            escape_html(&snippet.code)
        ));
    }
    out.push_str("</div>\n</div>\n");
    out
}

pub fn document_page(document: &Document, language: &ResolvedLanguage) -> String {
    let mut body = format!(
        "<article class=\"Adp-document\" data-path=\"{}\" data-active-language=\"{}\">\n",
        escape_html(&document.path),
        escape_html(&language.active.id)
    );

    // Content that does not start with its own heading gets the title.
    let starts_with_heading = matches!(
        document.blocks.first(),
        Some(Block::Markdown(text)) if text.trim_start().starts_with("# ")
    );
    if !starts_with_heading {
        body.push_str(&format!("<h1>{}</h1>\n", escape_html(&document.title)));
    }
    if let Some(description) = &document.description {
        body.push_str(&format!(
            "<p class=\"Adp-document__description\">{}</p>\n",
            escape_html(description)
        ));
    }

    for block in &document.blocks {
        match block {
            Block::Markdown(text) => body.push_str(&markdown_to_html(text)),
            Block::Snippets(index) => {
                if let (Some(group), Some(tabs)) =
                    (document.groups.get(*index), language.groups.get(*index))
                {
                    body.push_str(&snippet_group(&document.path, *index, group, tabs));
                }
            }
        }
    }

    body.push_str(&format!(
        "<footer class=\"Adp-document__footer\"><a href=\"{}{}.md\">Improve this page</a></footer>\n</article>\n",
        EDIT_BASE_URL,
        escape_html(&document.path)
    ));

    layout(&document.title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::parse_document;
    use crate::language::LanguageResolver;

    const SOURCE: &str = "# Connect an inbound call\n\
\n\
Answer the call.\n\
\n\
:::code-snippets\n\
```node\n\
const x = 1 < 2;\n\
```\n\
```php\n\
$x = 1;\n\
```\n\
:::\n\
\n\
:::code-snippets\n\
```node\n\
second();\n\
```\n\
```java\n\
second();\n\
```\n\
:::\n";

    fn render(suffix: Option<&str>) -> String {
        let doc = parse_document("/voice/answer", SOURCE, "answer.md").unwrap();
        let resolved = LanguageResolver::default()
            .resolve_document(&doc, suffix)
            .unwrap();
        document_page(&doc, &resolved)
    }

    const ACTIVE_NODE: &str = r#"<li class="Vlt-tabs__link Vlt-tabs__link_active" role="tab" aria-selected="true" data-language="node" data-language-type="languages" data-language-linkable="true">"#;
    const ACTIVE_PHP: &str = r#"<li class="Vlt-tabs__link Vlt-tabs__link_active" role="tab" aria-selected="true" data-language="php" data-language-type="languages" data-language-linkable="true">"#;
    const INACTIVE_NODE: &str = r#"<li class="Vlt-tabs__link" role="tab" aria-selected="false" data-language="node" data-language-type="languages" data-language-linkable="true">"#;

    #[test]
    fn test_default_language_tabs() {
        let html = render(None);

        assert_eq!(html.matches(ACTIVE_NODE).count(), 2);
        assert!(!html.contains(ACTIVE_PHP));
        assert!(html.contains("Improve this page"));
    }

    #[test]
    fn test_requested_language_tabs() {
        let html = render(Some("php"));

        assert_eq!(html.matches(ACTIVE_PHP).count(), 1);
        // The second group has no PHP and keeps node.
        assert_eq!(html.matches(ACTIVE_NODE).count(), 1);
        assert_eq!(html.matches(INACTIVE_NODE).count(), 1);
        assert!(html.contains(r#"data-active-language="php""#));
    }

    #[test]
    fn test_code_is_escaped_and_panels_hidden() {
        let html = render(None);

        assert!(html.contains("const x = 1 &lt; 2;"));
        assert!(html.contains(r#"<div class="Vlt-tabs__panel" data-language="php" hidden>"#));
        assert!(html.contains(r#"<a href="/voice/answer/php">PHP</a>"#));
    }

    #[test]
    fn test_heading_not_duplicated() {
        let html = render(None);
        assert_eq!(html.matches("<h1>").count(), 1);
    }

    #[test]
    fn test_title_added_when_content_has_no_heading() {
        let doc = parse_document("/a", "---\ntitle: Numbers\n---\nText\n", "a.md").unwrap();
        let resolved = LanguageResolver::default().resolve_document(&doc, None).unwrap();
        let html = document_page(&doc, &resolved);

        assert!(html.contains("<h1>Numbers</h1>"));
    }

    #[test]
    fn test_markdown_tables() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }
}
