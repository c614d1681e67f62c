use std::sync::Arc;

use anyhow::Result;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use super::stateless_llm::StatelessLLMInterface;
use super::stateless_llm_factory::{LLMFactory, ModelParams};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ModelKey {
    api_key: String,
    model: String,
    temperature_bits: u32,
}

impl From<&ModelParams> for ModelKey {
    fn from(params: &ModelParams) -> Self {
        Self {
            api_key: params.api_key.clone(),
            model: params.model.clone(),
            temperature_bits: params.temperature.to_bits(),
        }
    }
}

/// Model clients memoized by their construction parameters.
/// Entries are never evicted.
pub struct ModelCache {
    factory: Arc<dyn LLMFactory>,
    models: DashMap<ModelKey, Arc<dyn StatelessLLMInterface>>,
}

impl ModelCache {
    pub fn new(factory: Arc<dyn LLMFactory>) -> Self {
        Self {
            factory,
            models: DashMap::new(),
        }
    }

    pub fn get_or_create(&self, params: &ModelParams) -> Result<Arc<dyn StatelessLLMInterface>> {
        match self.models.entry(ModelKey::from(params)) {
            Entry::Occupied(entry) => {
                debug!("Reusing cached model client for {}", params.model);
                Ok(entry.get().clone())
            }
            Entry::Vacant(entry) => {
                let llm = self.factory.create_llm(params)?;
                entry.insert(llm.clone());
                Ok(llm)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }
}
