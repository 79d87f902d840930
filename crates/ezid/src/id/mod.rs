mod compact;
mod ezid;
mod interface;
pub mod layout;

pub use compact::*;
pub use ezid::*;
pub use interface::*;
