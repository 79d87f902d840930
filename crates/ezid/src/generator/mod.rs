mod compact;
mod mutex;
mod snowflake;
mod status;
mod time_random;

pub use compact::*;
pub(crate) use mutex::*;
pub use snowflake::*;
pub use status::*;
pub use time_random::*;
