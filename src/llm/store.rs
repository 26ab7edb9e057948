//! Saved provider configs plus the current selection.
//!
//! Loaded once from a [`KeyValueStore`]; every mutation is written straight
//! back, and only takes effect in memory once the write succeeded. At most
//! one config per [`ProviderKind`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::types::{ProviderConfig, ProviderKind};
use crate::storage::{KeyValueStore, StorageError};

pub const PROVIDERS_KEY: &str = "ai-providers";
pub const SELECTED_KEY: &str = "selected-provider";

/// Document stored under [`PROVIDERS_KEY`]. Entries stay as raw JSON until
/// validated so one unknown vendor does not discard the rest.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProvidersDoc<T> {
    #[serde(default = "Vec::new")]
    providers: Vec<T>,
    #[serde(default)]
    selected_provider: String,
}

pub struct ProviderStore<S> {
    kv: S,
    configs: BTreeMap<ProviderKind, ProviderConfig>,
    selected: Option<ProviderKind>,
}

impl<S: KeyValueStore> ProviderStore<S> {
    /// Read configs and selection out of `kv`. Malformed records are logged
    /// and ignored rather than failing startup.
    pub fn load(kv: S) -> Self {
        let mut configs = BTreeMap::new();

        if let Some(raw) = kv.get(PROVIDERS_KEY) {
            match serde_json::from_str::<ProvidersDoc<serde_json::Value>>(&raw) {
                Ok(doc) => {
                    for entry in doc.providers {
                        match serde_json::from_value::<ProviderConfig>(entry) {
                            Ok(config) => {
                                configs.insert(config.provider, config);
                            }
                            Err(e) => warn!(error = %e, "skipping unreadable provider entry"),
                        }
                    }
                }
                Err(e) => warn!(error = %e, key = PROVIDERS_KEY, "provider record malformed; starting empty"),
            }
        }

        let selected = kv.get(SELECTED_KEY).and_then(|id| match id.parse::<ProviderKind>() {
            Ok(kind) => Some(kind),
            Err(e) => {
                if !id.is_empty() {
                    warn!(error = %e, "ignoring stored provider selection");
                }
                None
            }
        });

        Self { kv, configs, selected }
    }

    /// Insert or replace the config for `config.provider`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save(&mut self, config: ProviderConfig) -> Result<(), StorageError> {
        let mut configs = self.configs.clone();
        configs.insert(config.provider, config);
        Self::write_doc(&mut self.kv, &configs, self.selected)?;
        self.configs = configs;
        Ok(())
    }

    /// Drop the config for `provider`; the selection is left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn remove(&mut self, provider: ProviderKind) -> Result<Option<ProviderConfig>, StorageError> {
        if !self.configs.contains_key(&provider) {
            return Ok(None);
        }
        let mut configs = self.configs.clone();
        let removed = configs.remove(&provider);
        Self::write_doc(&mut self.kv, &configs, self.selected)?;
        self.configs = configs;
        Ok(removed)
    }

    /// Select `provider`, configured or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn select(&mut self, provider: ProviderKind) -> Result<(), StorageError> {
        Self::write_doc(&mut self.kv, &self.configs, Some(provider))?;
        self.kv.set(SELECTED_KEY, provider.id())?;
        self.selected = Some(provider);
        Ok(())
    }

    #[must_use]
    pub fn selected_kind(&self) -> Option<ProviderKind> {
        self.selected
    }

    /// Config of the selected provider, if one is selected and saved.
    #[must_use]
    pub fn selected(&self) -> Option<&ProviderConfig> {
        self.selected.and_then(|kind| self.configs.get(&kind))
    }

    #[must_use]
    pub fn get(&self, provider: ProviderKind) -> Option<&ProviderConfig> {
        self.configs.get(&provider)
    }

    /// Saved configs in `ProviderKind` order.
    pub fn list(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.configs.values()
    }

    pub fn into_inner(self) -> S {
        self.kv
    }

    /// Write the providers record. In-memory state is only updated by the
    /// caller once this succeeds.
    fn write_doc(
        kv: &mut S,
        configs: &BTreeMap<ProviderKind, ProviderConfig>,
        selected: Option<ProviderKind>,
    ) -> Result<(), StorageError> {
        let doc = ProvidersDoc {
            providers: configs.values().collect::<Vec<_>>(),
            selected_provider: selected.map(ProviderKind::id).unwrap_or_default().to_string(),
        };
        let raw = serde_json::to_string(&doc)?;
        kv.set(PROVIDERS_KEY, &raw)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
