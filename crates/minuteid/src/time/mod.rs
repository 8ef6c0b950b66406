mod interface;
mod split;

pub use interface::*;
pub use split::*;
