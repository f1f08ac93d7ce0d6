//! Content collections: per-language Markdown entries with typed frontmatter.

pub mod collection;
mod frontmatter;
pub mod schema;

pub use collection::{
    ContentEntry,
    ContentError,
    ContentSet,
    load_collections,
    sort_by_order,
};
pub use schema::{
    ArchitectureEntry,
    Collection,
    CollectionKind,
    Difficulty,
    DocEntry,
    EntryData,
    PageEntry,
};
