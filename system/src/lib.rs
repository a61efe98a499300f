pub extern crate serde;
pub extern crate serde_json;
pub extern crate uuid;

mod execution;
mod message;
mod palette;
mod session;
mod types;

pub use execution::*;
pub use message::*;
pub use palette::*;
pub use session::*;
pub use types::*;
