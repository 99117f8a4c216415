pub mod code;
mod notification;
mod request;
pub mod result;
mod tracker;

pub use code::*;
pub use notification::*;
pub use request::*;
pub use result::{Error, Result};
pub use tracker::*;
