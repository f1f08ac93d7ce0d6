//! architect-docs-i18n
//!
//! Bilingual (es/en) support for the Architect documentation site: UI string
//! lookup with fallback, language-prefixed paths, version slugs and content
//! collection schemas.

pub mod check;
pub mod config;
pub mod content;
pub mod i18n;
pub mod lang;
pub mod path;
pub mod version;
pub mod workspace;

pub use i18n::{
    Translator,
    t,
    t_array,
};
pub use lang::Lang;
pub use path::PathLocalizer;
