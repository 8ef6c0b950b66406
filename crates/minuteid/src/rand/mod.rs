mod interface;
mod os_random;
mod read;
mod thread_random;

pub use interface::*;
pub use os_random::*;
pub use read::*;
pub use thread_random::*;
