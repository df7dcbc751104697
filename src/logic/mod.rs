pub mod confirmation;
pub mod dashboard;
pub mod form;
pub mod list_filter;

pub use confirmation::*;
pub use dashboard::*;
pub use form::*;
pub use list_filter::*;
