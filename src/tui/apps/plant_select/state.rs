use std::sync::Arc;

use crate::api::{Environment, Plant, PlantsApi};
use crate::plants::{PlantCatalog, Pagination};
use crate::tui::Resource;

/// Number of plant cards per grid row
pub const GRID_COLUMNS: usize = 2;

pub struct State {
    pub(super) api: Arc<dyn PlantsApi>,

    pub(super) environments: Resource<Vec<Environment>>,
    pub(super) catalog: PlantCatalog,
    pub(super) pagination: Pagination,

    /// Initial-loading flag: the grid is hidden while set
    pub(super) loading: bool,
    /// Failure of the initial page load
    pub(super) load_error: Option<String>,
    /// Failure of the last incremental load
    pub(super) last_error: Option<String>,

    /// Index of the highlighted plant in the filtered view
    pub(super) cursor: usize,
    /// First grid row on screen
    pub(super) scroll_row: usize,
    /// Grid rows that fit on screen, measured by the last render
    pub(super) visible_rows: usize,

    /// Page responses tagged with an older generation are discarded
    pub(super) generation: u64,
    pub(super) spinner_frame: usize,
}

impl State {
    pub fn new(api: Arc<dyn PlantsApi>) -> Self {
        Self {
            api,
            environments: Resource::Loading,
            catalog: PlantCatalog::new(),
            pagination: Pagination::new(),
            loading: true,
            load_error: None,
            last_error: None,
            cursor: 0,
            scroll_row: 0,
            visible_rows: 1,
            generation: 0,
            spinner_frame: 0,
        }
    }

    pub fn environments(&self) -> &Resource<Vec<Environment>> {
        &self.environments
    }

    pub fn catalog(&self) -> &PlantCatalog {
        &self.catalog
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.pagination.is_loading_more()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn highlighted_plant(&self) -> Option<&Plant> {
        self.catalog.filtered().get(self.cursor)
    }

    /// Display title for an environment key, falling back to the key itself
    pub fn environment_title<'a>(&'a self, key: &'a str) -> &'a str {
        self.environments
            .to_option()
            .and_then(|envs| envs.iter().find(|e| e.key == key))
            .map(|e| e.title.as_str())
            .unwrap_or(key)
    }

    /// Position of the selected filter among the loaded environments
    pub(super) fn selected_environment_index(&self) -> Option<usize> {
        let selected = self.catalog.selected_environment();
        self.environments
            .to_option()
            .and_then(|envs| envs.iter().position(|e| e.key == selected))
    }

    pub(super) fn row_count(&self) -> usize {
        self.catalog.filtered().len().div_ceil(GRID_COLUMNS)
    }

    pub(super) fn clamp_cursor(&mut self) {
        let len = self.catalog.filtered().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Keep the highlighted row inside the visible window
    pub(super) fn ensure_cursor_visible(&mut self) {
        let row = self.cursor / GRID_COLUMNS;
        let visible = self.visible_rows.max(1);

        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + visible {
            self.scroll_row = row + 1 - visible;
        }

        let max_scroll = self.row_count().saturating_sub(visible);
        self.scroll_row = self.scroll_row.min(max_scroll);
    }
}
