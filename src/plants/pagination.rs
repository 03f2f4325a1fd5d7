//! Page cursor for the infinite plant list

use log::debug;

use crate::api::constants::FIRST_PAGE;

/// Requests closer to the end than this (in rows pulled past the end) are ignored
pub const END_REACHED_MIN_DISTANCE: f32 = 1.0;

/// Tracks the 1-based page cursor and whether a "load more" fetch is in flight.
///
/// Only one incremental fetch may be outstanding at a time. There is no end
/// of data marker: every accepted request moves on to the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    loading_more: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}

impl Pagination {
    pub fn new() -> Self {
        Self {
            page: FIRST_PAGE,
            loading_more: false,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    /// Advance to the next page if the end of the list was really reached.
    ///
    /// Returns the page to fetch, or `None` when nothing should happen.
    pub fn request_more(&mut self, distance_from_end: f32) -> Option<u32> {
        if distance_from_end < END_REACHED_MIN_DISTANCE {
            return None;
        }

        if self.loading_more {
            debug!("Page {} still loading, ignoring request for more", self.page);
            return None;
        }

        self.loading_more = true;
        self.page += 1;
        Some(self.page)
    }

    /// A page arrived with `received` items
    pub fn complete(&mut self, received: usize) {
        debug!("Page {} completed with {} items", self.page, received);
        self.loading_more = false;
    }

    /// The incremental fetch failed; step back so the same page is asked again
    pub fn fail(&mut self) {
        if self.loading_more && self.page > FIRST_PAGE {
            self.page -= 1;
        }
        self.loading_more = false;
    }

    /// Back to page 1 (used when reloading from scratch)
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
