mod counter;
#[allow(clippy::module_inception)]
mod generator;
mod interface;
mod mutex;
mod random;
mod strategy;
#[cfg(test)]
mod tests;

pub use counter::*;
pub use generator::*;
pub use interface::*;
pub use mutex::*;
pub use random::*;
pub use strategy::*;
