//! Translation table and key resolution.

pub mod loader;
pub mod resolver;
pub mod tree;

pub use loader::{
    LoadError,
    load_translations,
};
pub use resolver::{
    Lookup,
    Translator,
    t,
    t_array,
};
pub use tree::{
    TranslationNode,
    TranslationTree,
    TreeError,
};
