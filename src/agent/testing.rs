//! Model stubs shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::stateless_llm::{ChatMessage, Role, StatelessLLMInterface};
use super::stateless_llm_factory::{LLMFactory, ModelParams};

/// Replies with `<SYS:{system}|MSG:{human}>`.
pub struct EchoLLM;

#[async_trait]
impl StatelessLLMInterface for EchoLLM {
    async fn chat_completion(&self, messages: &[ChatMessage]) -> anyhow::Result<String> {
        let pick = |role: Role| {
            messages
                .iter()
                .filter(|m| m.role == role)
                .map(|m| m.content.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        };
        Ok(format!("<SYS:{}|MSG:{}>", pick(Role::System), pick(Role::Human)))
    }
}

/// Succeeds with an empty completion.
pub struct EmptyLLM;

#[async_trait]
impl StatelessLLMInterface for EmptyLLM {
    async fn chat_completion(&self, _messages: &[ChatMessage]) -> anyhow::Result<String> {
        Ok(String::new())
    }
}

/// Always fails with the given message, counting how often it was asked.
pub struct FailingLLM {
    pub message: String,
    pub calls: AtomicUsize,
}

impl FailingLLM {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl StatelessLLMInterface for FailingLLM {
    async fn chat_completion(&self, _messages: &[ChatMessage]) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(anyhow::anyhow!(self.message.clone()))
    }
}

/// Counts every model it is asked to construct.
pub struct CountingFactory {
    build: Option<Box<dyn Fn() -> Arc<dyn StatelessLLMInterface> + Send + Sync>>,
    failure: Option<String>,
    count: AtomicUsize,
}

impl CountingFactory {
    pub fn new<F>(build: F) -> Self
    where
        F: Fn() -> Arc<dyn StatelessLLMInterface> + Send + Sync + 'static,
    {
        Self {
            build: Some(Box::new(build)),
            failure: None,
            count: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            build: None,
            failure: Some(message.to_string()),
            count: AtomicUsize::new(0),
        }
    }

    pub fn constructions(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl LLMFactory for CountingFactory {
    fn create_llm(&self, _params: &ModelParams) -> anyhow::Result<Arc<dyn StatelessLLMInterface>> {
        self.count.fetch_add(1, Ordering::SeqCst);
        match (&self.build, &self.failure) {
            (Some(build), _) => Ok(build()),
            (None, Some(message)) => Err(anyhow::anyhow!(message.clone())),
            (None, None) => Err(anyhow::anyhow!("no model configured")),
        }
    }
}
