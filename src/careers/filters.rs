use std::collections::HashSet;

use super::{Career, Department, Office};

/// Options for the department and location filters on the careers page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CareerFilters {
    /// Unique by id, first-seen order
    pub departments: Vec<Department>,
    /// Unique names, alphabetical
    pub locations: Vec<String>,
}

impl CareerFilters {
    pub fn from_listings(careers: &[Career], offices: &[Office]) -> Self {
        let mut seen_departments = HashSet::new();
        let departments = careers
            .iter()
            .flat_map(|c| c.departments.iter())
            .filter(|d| seen_departments.insert(d.id))
            .cloned()
            .collect();

        let mut locations: Vec<String> = offices
            .iter()
            .map(|o| o.name.trim())
            .chain(careers.iter().map(|c| c.location.name.trim()))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        locations.sort();
        locations.dedup();

        Self {
            departments,
            locations,
        }
    }
}
