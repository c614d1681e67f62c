pub mod interface;
pub mod invoker;
pub mod languages;

pub use interface::*;
pub use invoker::*;
pub use languages::*;
