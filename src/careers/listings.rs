use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::{Career, CareerError, CareerListingService, Office};

/// Time-bounded access to a [`CareerListingService`] that never fails.
///
/// Errors and timeouts are logged and turned into empty lists so that pages
/// listing careers still render.
#[derive(Clone)]
pub struct CareerListings {
    service: Arc<dyn CareerListingService>,
    timeout: Duration,
}

impl CareerListings {
    pub fn new(service: Arc<dyn CareerListingService>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    pub async fn careers(&self) -> Vec<Career> {
        self.bounded("careers", self.service.careers()).await
    }

    pub async fn offices(&self) -> Vec<Office> {
        self.bounded("offices", self.service.offices()).await
    }

    pub async fn devrel_careers(&self) -> Vec<Career> {
        self.bounded("devrel careers", self.service.devrel_careers())
            .await
    }

    /// Careers and offices fetched concurrently for the careers page.
    pub async fn careers_and_offices(&self) -> (Vec<Career>, Vec<Office>) {
        futures::join!(self.careers(), self.offices())
    }

    async fn bounded<T, F>(&self, what: &str, call: F) -> Vec<T>
    where
        F: Future<Output = Result<Vec<T>, CareerError>>,
    {
        let result = match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(CareerError::Timeout(self.timeout)),
        };

        match result {
            Ok(items) => items,
            Err(e) => {
                warn!("Rendering without {}: {}", what, e);
                Vec::new()
            }
        }
    }
}

/// Fixed in-memory listings, for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCareers {
    careers: Vec<Career>,
    offices: Vec<Office>,
    devrel_department: String,
}

impl StaticCareers {
    pub fn new(careers: Vec<Career>, offices: Vec<Office>) -> Self {
        Self {
            careers,
            offices,
            devrel_department: "Developer Relations".to_string(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

#[async_trait]
impl CareerListingService for StaticCareers {
    async fn careers(&self) -> Result<Vec<Career>, CareerError> {
        Ok(self.careers.clone())
    }

    async fn offices(&self) -> Result<Vec<Office>, CareerError> {
        Ok(self.offices.clone())
    }

    async fn devrel_careers(&self) -> Result<Vec<Career>, CareerError> {
        Ok(self
            .careers
            .iter()
            .filter(|c| c.in_department(&self.devrel_department))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::careers::{Department, Location};

    struct FailingCareers;

    #[async_trait]
    impl CareerListingService for FailingCareers {
        async fn careers(&self) -> Result<Vec<Career>, CareerError> {
            Err(CareerError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        }

        async fn offices(&self) -> Result<Vec<Office>, CareerError> {
            Err(CareerError::Transport("connection refused".to_string()))
        }

        async fn devrel_careers(&self) -> Result<Vec<Career>, CareerError> {
            Err(CareerError::Decode("bad json".to_string()))
        }
    }

    struct SlowCareers;

    #[async_trait]
    impl CareerListingService for SlowCareers {
        async fn careers(&self) -> Result<Vec<Career>, CareerError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![])
        }

        async fn offices(&self) -> Result<Vec<Office>, CareerError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![])
        }

        async fn devrel_careers(&self) -> Result<Vec<Career>, CareerError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![])
        }
    }

    fn career(title: &str, department: &str) -> Career {
        Career {
            title: title.to_string(),
            location: Location {
                name: "Remote".to_string(),
            },
            content: String::new(),
            absolute_url: "https://example.com".to_string(),
            departments: vec![Department {
                id: 1,
                name: department.to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_static_listings_pass_through() {
        let service = StaticCareers::new(
            vec![
                career("Advocate", "Developer Relations"),
                career("Seller", "Inside Sales"),
            ],
            vec![],
        );
        let listings = CareerListings::new(Arc::new(service), Duration::from_secs(1));

        assert_eq!(listings.careers().await.len(), 2);
        let devrel = listings.devrel_careers().await;
        assert_eq!(devrel.len(), 1);
        assert_eq!(devrel[0].title, "Advocate");
    }

    #[test]
    fn test_static_devrel_match_ignores_case() {
        let service = StaticCareers::new(vec![career("Advocate", "developer relations")], vec![]);

        let devrel = tokio_test::block_on(service.devrel_careers()).unwrap();
        assert_eq!(devrel.len(), 1);
        assert!(tokio_test::block_on(StaticCareers::empty().offices())
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_failures_degrade_to_empty() {
        let listings = CareerListings::new(Arc::new(FailingCareers), Duration::from_secs(1));

        let (careers, offices) = listings.careers_and_offices().await;
        assert!(careers.is_empty());
        assert!(offices.is_empty());
        assert!(listings.devrel_careers().await.is_empty());
    }

    #[tokio::test]
    async fn test_timeouts_degrade_to_empty() {
        let listings = CareerListings::new(Arc::new(SlowCareers), Duration::from_millis(100));

        let (careers, offices) = listings.careers_and_offices().await;
        assert!(careers.is_empty());
        assert!(offices.is_empty());
    }
}
