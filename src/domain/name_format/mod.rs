//! Name parsing and formatting

mod components;
mod format;

pub use components::NameComponents;
pub use format::NameFormat;
