//! Content module - post metadata, sources, front-matter and markdown

pub mod catalog;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod source;

pub use catalog::{CatalogLoad, LoadContext, LoadOutcome, PostCatalog};
pub use frontmatter::{FrontMatter, FrontMatterValue, PostHeader};
pub use loader::{PostLoader, PostPage, PostView};
pub use markdown::{CodeBlock, MarkdownRenderer};
pub use post::{default_posts, PostRecord, PostsDocument, RawPostRecord, DEFAULT_ICON};
pub use source::{ContentSource, FsSource, HttpSource};
