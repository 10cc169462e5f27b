//! Pure data structures: the backend's [`Product`] and the derived [`ProductStat`].

pub mod product;
pub mod product_stat;

pub use product::*;
pub use product_stat::*;
