//! Careers data from the recruiting API.
//!
//! The portal never owns this data: it is fetched per request through a
//! [`CareerListingService`], and every failure degrades to an empty listing
//! (see [`CareerListings`]).

mod filters;
mod greenhouse;
mod listings;

pub use filters::CareerFilters;
pub use greenhouse::GreenhouseClient;
pub use listings::{CareerListings, StaticCareers};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Career {
    pub title: String,
    pub location: Location,
    #[serde(default)]
    pub content: String,
    pub absolute_url: String,
    #[serde(default)]
    pub departments: Vec<Department>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Office {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
}

impl Career {
    pub fn in_department(&self, name: &str) -> bool {
        self.departments
            .iter()
            .any(|d| d.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Error)]
pub enum CareerError {
    #[error("recruiting API request failed: {0}")]
    Transport(String),

    #[error("recruiting API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse recruiting API response: {0}")]
    Decode(String),

    #[error("recruiting API did not answer within {0:?}")]
    Timeout(Duration),
}

impl CareerError {
    /// Network failures and 5xx responses are worth another attempt; 4xx are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            CareerError::Transport(_) => true,
            CareerError::Status { status, .. } => *status >= 500,
            CareerError::Decode(_) | CareerError::Timeout(_) => false,
        }
    }
}

/// Source of career and office records.
#[async_trait]
pub trait CareerListingService: Send + Sync {
    /// All open positions.
    async fn careers(&self) -> Result<Vec<Career>, CareerError>;

    async fn offices(&self) -> Result<Vec<Office>, CareerError>;

    /// Open positions in developer relations.
    async fn devrel_careers(&self) -> Result<Vec<Career>, CareerError>;
}
