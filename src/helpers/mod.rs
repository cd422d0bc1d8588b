//! Helper functions shared by the listing, post view and templates

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
