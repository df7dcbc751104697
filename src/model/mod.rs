pub mod build;
pub mod common;
pub mod filter;
pub mod image;
pub mod os;
pub mod provider;

pub use build::*;
pub use common::*;
pub use filter::*;
pub use image::*;
pub use os::*;
pub use provider::*;
