//! Name components

use serde::{Deserialize, Serialize};

const TITLES: &[&str] = &["dr", "prof", "mr", "mrs", "ms"];

/// Parts of a full name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameComponents {
    pub title: String,
    pub first: String,
    pub last: String,
    pub first_initial: String,
}

impl NameComponents {
    /// Split a full name such as `"Dr. John Smith"`.
    ///
    /// A leading honorific is taken as the title. `first` is the first
    /// remaining word, `last` the final one when at least two remain.
    pub fn parse(full_name: &str) -> Self {
        let mut parts: Vec<&str> = full_name.split_whitespace().collect();

        let mut title = String::new();
        if let Some(head) = parts.first() {
            let bare = head.trim_end_matches('.').to_lowercase();
            if TITLES.contains(&bare.as_str()) {
                title = (*head).to_string();
                parts.remove(0);
            }
        }

        let first = parts.first().map(|s| s.to_string()).unwrap_or_default();
        let last = if parts.len() > 1 {
            parts.last().map(|s| s.to_string()).unwrap_or_default()
        } else {
            String::new()
        };
        let first_initial = first
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default();

        Self {
            title,
            first,
            last,
            first_initial,
        }
    }
}
