pub mod catalog;
pub mod error;
pub mod types;

#[cfg(feature = "analytics")]
pub mod analytics;

#[cfg(feature = "insights")]
pub mod insights;

#[cfg(feature = "dashboard")]
pub mod dashboard;

pub use error::MenuProfitError;
pub use types::*;

/// Standard result type for all menu-profit operations
pub type MenuProfitResult<T> = Result<T, MenuProfitError>;
