pub mod collection;
pub mod memory;
pub mod traits;

pub use collection::*;
pub use memory::*;
pub use traits::*;
