//! # Value Objects
//!
//! Immutable value types shared across layers.

mod page;
mod principal;

pub use page::{Page, PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use principal::Principal;
