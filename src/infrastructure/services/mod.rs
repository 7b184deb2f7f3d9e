//! Application services built on the similarity memo

mod name_formatter_service;
mod word_reverser_service;

pub use name_formatter_service::{FormatChoice, FormattedName, NameFormatterService, SmartFormat};
pub use word_reverser_service::WordReverserService;
