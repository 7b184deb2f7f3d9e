//! Named name formats

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::NameComponents;
use crate::domain::DomainError;

/// Supported name formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameFormat {
    /// `John Smith`
    FirstLast,
    /// `Smith, John`
    LastFirst,
    /// `J. Smith`
    FirstInitial,
    /// `Dr. Smith`
    FormalTitle,
    /// `Smith, J.`
    Academic,
}

impl NameFormat {
    pub const ALL: [NameFormat; 5] = [
        NameFormat::FirstLast,
        NameFormat::LastFirst,
        NameFormat::FirstInitial,
        NameFormat::FormalTitle,
        NameFormat::Academic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NameFormat::FirstLast => "first_last",
            NameFormat::LastFirst => "last_first",
            NameFormat::FirstInitial => "first_initial",
            NameFormat::FormalTitle => "formal_title",
            NameFormat::Academic => "academic",
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            NameFormat::FirstLast => "{first} {last}",
            NameFormat::LastFirst => "{last}, {first}",
            NameFormat::FirstInitial => "{first_initial}. {last}",
            NameFormat::FormalTitle => "{title} {last}",
            NameFormat::Academic => "{last}, {first_initial}.",
        }
    }

    /// Contexts this format suits; embedded to match free-text context
    pub fn description(&self) -> &'static str {
        match self {
            NameFormat::FirstLast => "casual introduction business card everyday conversation",
            NameFormat::LastFirst => "formal directory alphabetical listing official document",
            NameFormat::FirstInitial => "professional signature author name abbreviated format",
            NameFormat::FormalTitle => {
                "respectful address professional meeting formal communication"
            }
            NameFormat::Academic => "research paper academic citation scholarly reference",
        }
    }

    pub fn example(&self) -> &'static str {
        match self {
            NameFormat::FirstLast => "John Smith",
            NameFormat::LastFirst => "Smith, John",
            NameFormat::FirstInitial => "J. Smith",
            NameFormat::FormalTitle => "Dr. Smith",
            NameFormat::Academic => "Smith, J.",
        }
    }

    /// Render `name` through [`Self::template`], or `None` when a part the
    /// template uses is missing
    pub fn apply(&self, name: &NameComponents) -> Option<String> {
        let mut rendered = String::new();
        let mut rest = self.template();

        while let Some(open) = rest.find('{') {
            rendered.push_str(&rest[..open]);
            let close = open + rest[open..].find('}')?;

            let part = match &rest[open + 1..close] {
                "first" => &name.first,
                "last" => &name.last,
                "first_initial" => &name.first_initial,
                "title" => &name.title,
                _ => return None,
            };
            if part.is_empty() {
                return None;
            }

            rendered.push_str(part);
            rest = &rest[close + 1..];
        }

        rendered.push_str(rest);
        Some(rendered)
    }
}

impl fmt::Display for NameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NameFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();

        NameFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == wanted)
            .ok_or_else(|| {
                DomainError::invalid_input(format!(
                    "Unknown name format: {}. Valid formats: first_last, last_first, first_initial, formal_title, academic",
                    s
                ))
            })
    }
}
