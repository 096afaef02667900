//
//  fecru-client
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for FeCru API Responses
//!
//! List endpoints across the FeCru API family return an offset-based page
//! envelope: the caller requests a window with `start` and `limit` query
//! parameters and the response says whether a further window exists.
//! [`PagedResponse`] models that envelope and exposes the two accessors a
//! pagination loop needs.
//!
//! # Pagination Strategy
//!
//! 1. Make the initial request with `start=0` and the desired `limit`
//! 2. Check [`has_next()`](PagedResponse::has_next) to see if more pages exist
//! 3. Use [`next_start()`](PagedResponse::next_start) as the `start` value
//!    for the next request
//! 4. Repeat until `has_next()` returns `false`
//!
//! # Example
//!
//! ```rust
//! use fecru_client::api::common::PagedResponse;
//! use serde::Deserialize;
//!
//! #[derive(Clone, Deserialize)]
//! struct Repository {
//!     name: String,
//! }
//!
//! let json = r#"{
//!     "values": [{"name": "repo1"}],
//!     "start": 0,
//!     "limit": 25,
//!     "size": 1,
//!     "lastPage": false
//! }"#;
//!
//! let page: PagedResponse<Repository> = serde_json::from_str(json).unwrap();
//! assert!(page.has_next());
//! assert_eq!(page.next_start(), Some(1));
//! ```

use serde::{Deserialize, Serialize};

/// One page of an offset-paginated FeCru list response.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `values` | `Vec<T>` | Items in the current page |
/// | `start` | `u32` | Offset of the first item in this page (0-indexed) |
/// | `limit` | `u32` | Maximum items per page, as requested |
/// | `size` | `u32` | Number of items in the current page |
/// | `last_page` | `bool` | Whether this is the final page |
///
/// # Notes
///
/// - All envelope fields use defaults so partial responses still decode;
///   `last_page` defaults to `true`, which terminates pagination loops
///   rather than spinning on a malformed envelope.
/// - The `size` field counts this page, not the whole result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    /// Items in the current page. May be empty.
    pub values: Vec<T>,

    /// Offset of the first item in this page (0-indexed).
    #[serde(default)]
    pub start: u32,

    /// Maximum items per page, as requested by the caller.
    #[serde(default)]
    pub limit: u32,

    /// Number of items in the current page.
    #[serde(default)]
    pub size: u32,

    /// Whether this is the final page of the result set.
    #[serde(default = "default_last_page", rename = "lastPage")]
    pub last_page: bool,
}

fn default_last_page() -> bool {
    true
}

impl<T> PagedResponse<T> {
    /// Checks if a further page of results exists.
    pub fn has_next(&self) -> bool {
        !self.last_page
    }

    /// Returns the `start` value for the next page request.
    ///
    /// `None` when this is the last page. The continuation offset is the
    /// current offset advanced by the number of items in this page.
    pub fn next_start(&self) -> Option<u32> {
        if self.last_page {
            None
        } else {
            Some(self.start + self.size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continuation_accessors() {
        let page: PagedResponse<String> = serde_json::from_str(
            r#"{"values": ["a", "b"], "start": 25, "limit": 25, "size": 2, "lastPage": false}"#,
        )
        .unwrap();
        assert!(page.has_next());
        assert_eq!(page.next_start(), Some(27));
    }

    #[test]
    fn test_last_page_has_no_continuation() {
        let page: PagedResponse<String> = serde_json::from_str(
            r#"{"values": [], "start": 50, "limit": 25, "size": 0, "lastPage": true}"#,
        )
        .unwrap();
        assert!(!page.has_next());
        assert_eq!(page.next_start(), None);
    }

    #[test]
    fn test_partial_envelope_terminates_pagination() {
        let page: PagedResponse<String> = serde_json::from_str(r#"{"values": ["a"]}"#).unwrap();
        assert!(!page.has_next());
    }
}
