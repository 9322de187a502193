//! HTML rendering.
//!
//! Pages are assembled from strings; every piece of text that did not come
//! from trusted content goes through [`escape_html`] first.

mod admin;
mod careers;
mod document;

pub use admin::{coverage_page, feedbacks_page, stats_page};
pub use careers::{careers_page, team_page};
pub use document::{document_page, markdown_to_html, snippet_group};

use crate::careers::Career;
use crate::landing::LandingPage;

const SITE_NAME: &str = "Vonage Developer Center";

/// Links shown in the sub navigation on every page.
const SUBNAV: &[(&str, &str)] = &[
    ("Documentation", "/documentation"),
    ("Use Cases", "/use-cases"),
    ("SDKs & Tools", "/tools"),
    ("Community", "/community"),
];

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap page content in the site chrome. `body` must already be HTML.
pub fn layout(title: &str, body: &str) -> String {
    let subnav: String = SUBNAV
        .iter()
        .map(|(label, href)| {
            format!(
                r#"<li><a class="Adp-subnav__link" href="{}">{}</a></li>"#,
                href,
                escape_html(label)
            )
        })
        .collect();

    let page_title = if title == SITE_NAME {
        SITE_NAME.to_string()
    } else {
        format!("{} | {}", escape_html(title), SITE_NAME)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{page_title}</title>
</head>
<body>
<header class="Adp-header">
<a class="Adp-header__logo" href="/">{site}</a>
<nav id="subnav"><ul>{subnav}</ul></nav>
</header>
<main class="Adp-content">
{body}
</main>
</body>
</html>
"#,
        page_title = page_title,
        site = SITE_NAME,
        subnav = subnav,
        body = body
    )
}

/// A fixed page: `body` is trusted HTML.
pub fn static_page(title: &str, body: &str) -> String {
    layout(
        title,
        &format!("<h1>{}</h1>\n{}", escape_html(title), body),
    )
}

/// Registry-driven landing page; `careers` is only shown when the page asks for it.
pub fn landing_page(page: &LandingPage, careers: &[Career]) -> String {
    let mut body = format!(
        "<section class=\"Adp-landing\" data-landing=\"{slug}\">\n<h1>{title}</h1>\n<p class=\"Adp-landing__welcome\">{welcome}</p>\n",
        slug = escape_html(&page.slug),
        title = escape_html(&page.title),
        welcome = escape_html(&page.welcome),
    );
    if page.careers {
        body.push_str("<h2>Join the team</h2>\n");
        body.push_str(&careers::career_list(careers));
    }
    body.push_str("</section>\n");

    layout(&page.title, &body)
}

/// Error page with a message safe to show to anyone.
pub fn error_page(status: u16, message: &str) -> String {
    layout(
        message,
        &format!(
            "<section class=\"Adp-error\" data-status=\"{}\">\n<h1>{}</h1>\n<p><a href=\"/documentation\">Browse the documentation</a></p>\n</section>\n",
            status,
            escape_html(message)
        ),
    )
}
