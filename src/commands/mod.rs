//! CLI command implementations.

pub mod carousels;
pub mod listings;

pub use carousels::CarouselsCommand;
pub use listings::ListingsCommand;
