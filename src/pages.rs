//! Fixed marketing pages served on explicit routes.
//!
//! Page bodies are trusted HTML; the title becomes the page `<h1>`.

/// A page with fixed content.
#[derive(Debug, Clone, Copy)]
pub struct StaticPage {
    /// Route the page is served on
    pub path: &'static str,

    /// Heading and `<title>` text
    pub title: &'static str,

    /// Body HTML, rendered below the heading
    pub body: &'static str,
}

/// Introduction shown above the developer relations openings on `/team`.
pub const TEAM_INTRO: &str = "<p>Our mission is to build a world-class open source documentation platform to help developers build connected products.</p>\n<p>The Developer Relations team writes the guides, code snippets and tutorials on this site, maintains the Server SDKs and meets developers at events around the world.</p>";

const HOME: StaticPage = StaticPage {
    path: "/",
    title: "Vonage Developer Center",
    body: "<p>Everything you need to build connected applications with Vonage: guides, code snippets, API references and SDKs.</p>\n<ul class=\"Adp-home__links\">\n<li><a href=\"/documentation\">Read the documentation</a></li>\n<li><a href=\"/use-cases\">Explore use cases</a></li>\n<li><a href=\"/api\">Browse the API reference</a></li>\n</ul>",
};

const DOCUMENTATION: StaticPage = StaticPage {
    path: "/documentation",
    title: "Documentation",
    body: "<p>Guides, concepts and code snippets for every Vonage API.</p>\n<ul>\n<li><a href=\"/voice/voice-api/guides/numbers\">Voice API</a></li>\n<li><a href=\"/api/sms/us-short-codes/2fa\">SMS API</a></li>\n<li><a href=\"/sdk/stitch/android/index\">Client SDK</a></li>\n</ul>",
};

const USE_CASES: StaticPage = StaticPage {
    path: "/use-cases",
    title: "Use Cases",
    body: "<p>Get started with tutorials that will walk you through building a variety of practical applications</p>",
};

const API: StaticPage = StaticPage {
    path: "/api",
    title: "API Reference",
    body: "<p>Reference documentation for every endpoint, request parameter and response field of the Vonage APIs.</p>\n<ul>\n<li><a href=\"/api/external-accounts\">External Accounts API</a></li>\n<li><a href=\"/api/sms/us-short-codes/2fa\">US Short Codes: 2FA</a></li>\n<li><a href=\"/api-errors\">API Errors</a></li>\n</ul>",
};

const TOOLS: StaticPage = StaticPage {
    path: "/tools",
    title: "SDKs & Tools",
    body: "<p>The Server SDKs allow you to quickly get up and running with the Vonage APIs in your language of choice.</p>\n<ul>\n<li>Node.js</li>\n<li>Java</li>\n<li>.NET</li>\n<li>Python</li>\n<li>Ruby</li>\n<li>PHP</li>\n</ul>\n<p>Generate test tokens with the <a href=\"/jwt\">JWT generator</a>.</p>",
};

const COMMUNITY: StaticPage = StaticPage {
    path: "/community",
    title: "Community",
    body: "<p>You can find us at these upcoming events</p>\n<p>Prefer to chat? <a href=\"/community/slack\">Join our Slack</a>.</p>",
};

const COMMUNITY_SLACK: StaticPage = StaticPage {
    path: "/community/slack",
    title: "Slack",
    body: "<p>Join the Vonage Developer Community Slack</p>\n<form class=\"Adp-slack\" method=\"post\" action=\"/community/slack\"><input type=\"email\" name=\"email\" placeholder=\"you@example.com\"></form>",
};

const LEGACY: StaticPage = StaticPage {
    path: "/legacy",
    title: "Legacy APIs",
    body: "<p>Note: This is a deprecated API, you should use the <a href=\"/api\">current APIs</a> for new applications.</p>",
};

const JWT: StaticPage = StaticPage {
    path: "/jwt",
    title: "JWT Generator",
    body: "<div id=\"jwt-generator-app\" class=\"Adp-jwt\"></div>\n<p>Paste your application id and private key to generate a JWT for testing. Keys never leave your browser.</p>",
};

const TUTORIALS: StaticPage = StaticPage {
    path: "/tutorials",
    title: "Tutorials",
    body: "<p>Step by step tutorials for building with the Vonage APIs.</p>",
};

/// Every fixed page, in navigation order.
pub const PAGES: &[StaticPage] = &[
    HOME,
    DOCUMENTATION,
    USE_CASES,
    API,
    TOOLS,
    COMMUNITY,
    COMMUNITY_SLACK,
    LEGACY,
    JWT,
    TUTORIALS,
];

/// Look up a fixed page by route.
pub fn find(path: &str) -> Option<&'static StaticPage> {
    PAGES.iter().find(|page| page.path == path)
}
