use std::collections::BTreeMap;

use super::{escape_html, layout};
use crate::content::SnippetCoverage;
use crate::feedback::{Feedback, PageStats};

pub fn stats_page(stats: &BTreeMap<String, PageStats>) -> String {
    let mut body = String::from("<h1>Feedback Stats</h1>\n");

    if stats.is_empty() {
        body.push_str("<p>No feedback has been submitted yet.</p>\n");
        return layout("Feedback Stats", &body);
    }

    body.push_str(
        "<table class=\"Adp-table\">\n<thead><tr><th>Page</th><th>Helpful</th><th>Not helpful</th></tr></thead>\n<tbody>\n",
    );
    for (path, page) in stats {
        body.push_str(&format!(
            "<tr><td><a href=\"{path}\">{path}</a></td><td>{}</td><td>{}</td></tr>\n",
            page.helpful,
            page.unhelpful,
            path = escape_html(path),
        ));
    }
    body.push_str("</tbody>\n</table>\n");

    layout("Feedback Stats", &body)
}

pub fn coverage_page(coverage: &SnippetCoverage) -> String {
    let mut body = format!(
        "<h1>Code Snippet Stats</h1>\n<p>{} documents, {} snippet groups.</p>\n",
        coverage.total_documents, coverage.total_groups
    );

    body.push_str(
        "<h2>Languages</h2>\n<table class=\"Adp-table\">\n<thead><tr><th>Language</th><th>Groups</th><th>Documents</th></tr></thead>\n<tbody>\n",
    );
    for language in &coverage.languages {
        body.push_str(&format!(
            "<tr data-language=\"{}\"><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&language.language),
            escape_html(&language.label),
            language.groups,
            language.documents
        ));
    }
    body.push_str("</tbody>\n</table>\n");

    body.push_str(
        "<h2>Documents</h2>\n<table class=\"Adp-table\">\n<thead><tr><th>Page</th><th>Groups</th><th>Languages</th><th>Partial</th></tr></thead>\n<tbody>\n",
    );
    for document in &coverage.documents {
        let languages = document
            .languages
            .keys()
            .map(|l| escape_html(l))
            .collect::<Vec<_>>()
            .join(", ");
        let partial = document
            .partial_languages()
            .into_iter()
            .map(escape_html)
            .collect::<Vec<_>>()
            .join(", ");
        body.push_str(&format!(
            "<tr><td><a href=\"{path}\">{path}</a></td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            document.groups,
            languages,
            partial,
            path = escape_html(&document.path),
        ));
    }
    body.push_str("</tbody>\n</table>\n");

    layout("Code Snippet Stats", &body)
}

pub fn feedbacks_page(entries: &[Feedback]) -> String {
    let mut body = String::from("<h2>Feedbacks</h2>\n");

    if entries.is_empty() {
        body.push_str("<p>No feedback has been submitted yet.</p>\n");
        return layout("Feedbacks", &body);
    }

    body.push_str("<ul class=\"Adp-feedbacks\">\n");
    for entry in entries {
        let verdict = if entry.helpful { "helpful" } else { "not helpful" };
        body.push_str(&format!(
            "<li data-feedback-id=\"{}\"><a href=\"{path}\">{path}</a> <strong>{}</strong> <time datetime=\"{ts}\">{ts}</time>",
            entry.id,
            verdict,
            path = escape_html(&entry.path),
            ts = entry.created_at.to_rfc3339(),
        ));
        if let Some(comment) = &entry.comment {
            body.push_str(&format!("<blockquote>{}</blockquote>", escape_html(comment)));
        }
        body.push_str("</li>\n");
    }
    body.push_str("</ul>\n");

    layout("Feedbacks", &body)
}
