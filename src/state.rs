use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::agent::{LLMFactory, ModelCache, StatelessLLMFactory};
use crate::config_manager::Config;
use crate::session::{ModelSettings, Session};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: Arc<DashMap<String, Session>>,
    pub model_cache: Arc<ModelCache>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let factory = StatelessLLMFactory::from_config(&config.translator_config)?;
        Ok(Self::with_factory(config, Arc::new(factory)))
    }

    pub fn with_factory(config: Config, factory: Arc<dyn LLMFactory>) -> Self {
        Self {
            config,
            sessions: Arc::new(DashMap::new()),
            model_cache: Arc::new(ModelCache::new(factory)),
        }
    }

    pub fn generate_session_uid(&self) -> String {
        Uuid::new_v4().to_string()
    }

    pub fn create_session(&self) -> String {
        let session_id = self.generate_session_uid();
        let settings = ModelSettings::from_config(&self.config.translator_config);
        self.sessions.insert(session_id.clone(), Session::new(settings));
        info!("New session: {}", session_id);
        session_id
    }

    pub fn remove_session(&self, session_id: &str) -> bool {
        let removed = self.sessions.remove(session_id).is_some();
        if removed {
            info!("Session closed: {}", session_id);
        }
        removed
    }

    /// Drop every idle session untouched for at least `ttl`, returning how many went.
    pub fn prune_idle_sessions(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired(ttl, now));
        before.saturating_sub(self.sessions.len())
    }

    /// Periodically expire idle sessions according to `system_config`.
    pub fn spawn_session_reaper(&self) -> tokio::task::JoinHandle<()> {
        let state = self.clone();
        let ttl = Duration::from_secs(self.config.system_config.session_ttl_secs);
        let sweep = Duration::from_secs(self.config.system_config.session_sweep_secs);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(sweep);
            loop {
                ticker.tick().await;
                let expired = state.prune_idle_sessions(ttl);
                if expired > 0 {
                    info!("Expired {} idle session(s)", expired);
                } else {
                    debug!("{} active session(s)", state.sessions.len());
                }
            }
        })
    }
}
