//! Code-snippet language handling.
//!
//! - `registry`: known code languages, their tab labels and the portal default
//! - `resolver`: picks the active language for a request and the tab state of
//!   every snippet group in a document

mod registry;
mod resolver;

pub use registry::{CodeLanguage, CodeLanguageRegistry, DEFAULT_LANGUAGE};
pub use resolver::{
    displayed_language, group_tabs, tabs, ActiveLanguage, GroupTabs, LanguageResolver,
    ResolvedLanguage, Tab, UnsupportedLanguage,
};
