//! Listing engine - filtering, pagination and the listing presenter

pub mod filter;
pub mod paginator;
mod presenter;
mod session;

pub use filter::CategoryFilter;
pub use paginator::{page_window, paginate, PageControl, PageSlice, PaginationControls};
pub use presenter::{FilterState, FilteredView, ListingEvent, ListingPresenter, RenderInstruction};
pub use session::{ListingSession, SessionInput};
