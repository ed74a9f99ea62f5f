//! Single-page navigation detection: the location changes without a reload.

use url::Url;

use crate::dom::Document;

/// Tracks the last seen location and reports identity changes.
#[derive(Debug)]
pub struct NavigationDetector {
    last: String,
}

impl NavigationDetector {
    pub fn new(doc: &Document) -> Self {
        Self {
            last: doc.location().to_string(),
        }
    }

    /// Returns `true` once per location change.
    pub fn check(&mut self, doc: &Document) -> bool {
        let current = doc.location();
        if same_location(&self.last, current) {
            return false;
        }
        self.last = current.to_string();
        true
    }
}

fn same_location(a: &str, b: &str) -> bool {
    match (Url::parse(a), Url::parse(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
