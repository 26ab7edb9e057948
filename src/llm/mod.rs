//! Provider gateway: one prompt in, generated text or a tagged error out.
//!
//! DESIGN
//! ======
//! Every vendor is described by a pair of plain functions: build the HTTP
//! request from a saved config and a prompt, and pull the text out of a
//! successful body. [`adapter`] maps a [`ProviderKind`] to its pair with one
//! exhaustive match. The gateway owns the settings store and a shared
//! [`HttpTransport`], so nothing here touches the network directly.
//!
//! Failures never escape as panics or `Err` from the transport; they are
//! folded into [`GenerationError`] values.

pub mod anthropic;
pub mod config;
pub mod gemini;
pub mod openai;
pub mod store;
pub mod transport;
pub mod types;

use std::sync::Arc;

use tracing::{info, warn};

use crate::storage::{KeyValueStore, StorageError};
use store::ProviderStore;
pub use transport::{HttpTransport, ReqwestTransport};
use types::{GenerationError, ProviderRequest};
pub use types::{Generated, GenerationResult, ProviderConfig, ProviderKind};

// =============================================================================
// ADAPTERS
// =============================================================================

type BuildFn = fn(&ProviderConfig, &str) -> Result<ProviderRequest, GenerationError>;
type ParseFn = fn(&str) -> Result<String, GenerationError>;

#[derive(Clone, Copy)]
pub struct Adapter {
    pub build: BuildFn,
    pub parse: ParseFn,
}

/// Request builder and response parser for `kind`.
#[must_use]
pub fn adapter(kind: ProviderKind) -> Adapter {
    match kind {
        ProviderKind::OpenAi | ProviderKind::Zhipu | ProviderKind::Volcengine => {
            Adapter { build: openai::build_request, parse: openai::parse_response }
        }
        ProviderKind::Anthropic => Adapter { build: anthropic::build_request, parse: anthropic::parse_response },
        ProviderKind::Gemini => Adapter { build: gemini::build_request, parse: gemini::parse_response },
    }
}

// =============================================================================
// GATEWAY
// =============================================================================

pub struct ProviderGateway<S> {
    store: ProviderStore<S>,
    transport: Arc<dyn HttpTransport>,
}

impl<S: KeyValueStore> ProviderGateway<S> {
    pub fn new(kv: S, transport: Arc<dyn HttpTransport>) -> Self {
        Self { store: ProviderStore::load(kv), transport }
    }

    /// Saved configs, in vendor order.
    pub fn list_configured(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.store.list()
    }

    /// # Errors
    ///
    /// Returns an error if the settings cannot be persisted.
    pub fn save(&mut self, config: ProviderConfig) -> Result<(), StorageError> {
        info!(provider = %config.provider, "provider config saved");
        self.store.save(config)
    }

    /// # Errors
    ///
    /// Returns an error if the settings cannot be persisted.
    pub fn remove(&mut self, provider: ProviderKind) -> Result<Option<ProviderConfig>, StorageError> {
        info!(%provider, "provider config removed");
        self.store.remove(provider)
    }

    /// # Errors
    ///
    /// Returns an error if the settings cannot be persisted.
    pub fn select(&mut self, provider: ProviderKind) -> Result<(), StorageError> {
        info!(%provider, "provider selected");
        self.store.select(provider)
    }

    #[must_use]
    pub fn selected(&self) -> Option<&ProviderConfig> {
        self.store.selected()
    }

    #[must_use]
    pub fn store(&self) -> &ProviderStore<S> {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store.into_inner()
    }

    /// Send `prompt` to the selected provider.
    ///
    /// # Errors
    ///
    /// - `NotConfigured` when no saved config is selected; no request is made.
    /// - `UpstreamError` for any non-2xx reply.
    /// - `TransportFailure` for network errors or unreadable bodies.
    pub async fn generate(&self, prompt: &str) -> GenerationResult {
        let Some(config) = self.store.selected() else {
            warn!("generation requested with no provider configured");
            return Err(GenerationError::NotConfigured);
        };

        let adapter = adapter(config.provider);
        let request = (adapter.build)(config, prompt)?;
        info!(provider = %config.provider, prompt_len = prompt.len(), "dispatching generation");

        let reply = self.transport.post_json(&request).await.inspect_err(|e| {
            warn!(provider = %config.provider, error = %e, "generation transport failed");
        })?;

        if !(200..300).contains(&reply.status) {
            warn!(provider = %config.provider, status = reply.status, "upstream rejected generation");
            return Err(GenerationError::UpstreamError {
                vendor: config.provider.vendor_label(),
                status: reply.status,
                body: reply.body,
            });
        }

        let text = (adapter.parse)(&reply.body)?;
        info!(provider = %config.provider, text_len = text.len(), "generation complete");
        Ok(Generated { text })
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
