//! In-memory plant listing with environment filtering

use log::debug;

use crate::api::{Environment, Plant};

/// Key of the synthetic "no filter" environment
pub const ALL_ENVIRONMENTS: &str = "all";

/// Display label of the "no filter" environment
pub const ALL_ENVIRONMENTS_TITLE: &str = "Todos";

/// Prepend the "all" sentinel to environments as received from the server
pub fn with_all_sentinel(environments: Vec<Environment>) -> Vec<Environment> {
    let mut result = Vec::with_capacity(environments.len() + 1);
    result.push(Environment::new(ALL_ENVIRONMENTS, ALL_ENVIRONMENTS_TITLE));
    result.extend(environments);
    result
}

/// Every plant fetched so far plus the view filtered by the selected environment.
///
/// Both lists only ever grow at the end while pages arrive. Changing the
/// filter recomputes the view from the full list with a linear scan.
#[derive(Debug, Clone)]
pub struct PlantCatalog {
    plants: Vec<Plant>,
    filtered: Vec<Plant>,
    selected: String,
}

impl Default for PlantCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PlantCatalog {
    pub fn new() -> Self {
        Self {
            plants: Vec::new(),
            filtered: Vec::new(),
            selected: ALL_ENVIRONMENTS.to_string(),
        }
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn filtered(&self) -> &[Plant] {
        &self.filtered
    }

    pub fn selected_environment(&self) -> &str {
        &self.selected
    }

    pub fn is_unfiltered(&self) -> bool {
        self.selected == ALL_ENVIRONMENTS
    }

    /// Merge a received page into both lists.
    ///
    /// Page 1 replaces both wholesale, later pages are appended to both as
    /// received. The filtered view is only narrowed again by
    /// [`select_environment`](Self::select_environment).
    pub fn apply_page(&mut self, page: u32, items: Vec<Plant>) {
        if page > 1 {
            debug!(
                "Appending page {} ({} plants) under filter '{}'",
                page,
                items.len(),
                self.selected
            );
            self.filtered.extend(items.iter().cloned());
            self.plants.extend(items);
        } else {
            debug!("Replacing listing with page {} ({} plants)", page, items.len());
            self.filtered = items.clone();
            self.plants = items;
        }
    }

    /// Select an environment key and rebuild the filtered view
    pub fn select_environment(&mut self, key: &str) {
        self.selected = key.to_string();
        self.recompute();
        debug!(
            "Filter '{}' keeps {}/{} plants",
            self.selected,
            self.filtered.len(),
            self.plants.len()
        );
    }

    fn recompute(&mut self) {
        self.filtered = if self.is_unfiltered() {
            self.plants.clone()
        } else {
            self.plants
                .iter()
                .filter(|p| p.has_environment(&self.selected))
                .cloned()
                .collect()
        };
    }
}
