pub mod model_cache;
pub mod stateless_llm_factory;

pub mod stateless_llm;

#[cfg(test)]
pub mod testing;

pub use model_cache::*;
pub use stateless_llm_factory::*;
pub use stateless_llm::*;
