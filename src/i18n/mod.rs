//! Interface language, text direction and translations

pub mod catalog;
pub mod locale;

pub use catalog::Catalog;
pub use locale::{resolve_direction, Direction, Language, LocaleChange, LocaleState};
