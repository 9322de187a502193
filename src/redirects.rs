use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;

/// Client SDK platforms whose legacy reference pages moved under `/sdk/stitch`.
const CLIENT_SDK_PLATFORMS: &[&str] = &["android", "ios", "javascript"];

const REDIRECT_STATUSES: &[u16] = &[301, 302, 307, 308];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RedirectRule {
    pub source: String,
    pub target: String,
    #[serde(default = "default_status")]
    pub status: u16,
}

fn default_status() -> u16 {
    301
}

#[derive(Debug, Deserialize)]
struct RedirectsFile {
    redirects: Vec<RedirectRule>,
}

impl RedirectRule {
    pub fn new(source: &str, target: &str, status: u16) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            status,
        }
    }

    pub fn is_external(&self) -> bool {
        self.target.starts_with("http://") || self.target.starts_with("https://")
    }
}

/// Exact-match redirects consulted before any content lookup.
#[derive(Debug, Clone, Default)]
pub struct RedirectTable {
    rules: HashMap<String, RedirectRule>,
}

impl RedirectTable {
    /// Build a table, validating every rule and rejecting redirect loops.
    pub fn new(rules: Vec<RedirectRule>) -> Result<Self> {
        let mut table = HashMap::with_capacity(rules.len());
        for rule in rules {
            validate_rule(&rule)?;
            let source = normalize(&rule.source).to_string();
            if table.contains_key(&source) {
                bail!("Duplicate redirect source: {}", source);
            }
            table.insert(source, rule);
        }

        let table = Self { rules: table };
        table.check_for_loops()?;
        Ok(table)
    }

    /// The built-in rules: the API store and the legacy client SDK reference pages.
    pub fn default_rules() -> Vec<RedirectRule> {
        let mut rules = vec![RedirectRule::new(
            "/store",
            "https://apimanager.uc.vonage.com/store/",
            302,
        )];
        for platform in CLIENT_SDK_PLATFORMS {
            rules.push(RedirectRule::new(
                &format!("/client-sdk/sdk-documentation/{0}/{0}", platform),
                &format!("/sdk/stitch/{}/index", platform),
                302,
            ));
        }
        rules
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(Self::default_rules())
    }

    /// Built-in rules plus the rules from a JSON file. File rules replace
    /// built-in rules with the same source.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut rules: Vec<RedirectRule> = Self::default_rules();

        if let Some(file) = file {
            let content = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read redirects file {}", file.display()))?;
            let parsed: RedirectsFile = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse redirects file {}", file.display()))?;

            let overridden: HashSet<String> = parsed
                .redirects
                .iter()
                .map(|r| normalize(&r.source).to_string())
                .collect();
            rules.retain(|r| !overridden.contains(normalize(&r.source)));
            rules.extend(parsed.redirects);
        }

        let table = Self::new(rules)?;
        info!("Loaded {} redirect rules", table.len());
        Ok(table)
    }

    /// Exact match on the request path; a trailing slash is ignored.
    pub fn find(&self, path: &str) -> Option<&RedirectRule> {
        self.rules.get(normalize(path))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules sorted by source path.
    pub fn rules(&self) -> Vec<&RedirectRule> {
        let mut rules: Vec<_> = self.rules.values().collect();
        rules.sort_by(|a, b| a.source.cmp(&b.source));
        rules
    }

    fn check_for_loops(&self) -> Result<()> {
        for start in self.rules.keys() {
            let mut seen = HashSet::new();
            let mut current = start.as_str();
            while let Some(rule) = self.rules.get(current) {
                if !seen.insert(current) {
                    bail!("Redirect loop detected starting at {}", start);
                }
                if rule.is_external() {
                    break;
                }
                current = normalize(&rule.target);
            }
        }
        Ok(())
    }
}

fn validate_rule(rule: &RedirectRule) -> Result<()> {
    if !rule.source.starts_with('/') {
        bail!("Redirect source must be an absolute path: {}", rule.source);
    }
    if !REDIRECT_STATUSES.contains(&rule.status) {
        bail!(
            "Redirect {} has non-redirect status {}",
            rule.source,
            rule.status
        );
    }
    if !rule.target.starts_with('/') && !rule.is_external() {
        bail!(
            "Redirect target must be an absolute path or http(s) URL: {}",
            rule.target
        );
    }
    Ok(())
}

fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}
