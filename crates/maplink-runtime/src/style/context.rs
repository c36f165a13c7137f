//! Dependency-ordered style mutations.

use super::pending::{PendingMutation, PendingMutationQueue};
use super::registry::{kind_of, EntityTable, LayerEntry, SourceEntry};
use super::StyleError;
use crate::bridge::{Bridge, BridgeError, ReturnValue};
use crate::command::Command;
use maplink_types::{LayerId, SourceId};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of [`StyleContext::add_layer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerOutcome {
    /// Sent to the peer.
    Applied,
    /// Queued until the next flush.
    Deferred,
}

/// Per-task results of a flush, in execution order.
#[derive(Debug, Default)]
pub struct FlushReport {
    pub outcomes: Vec<(LayerId, Result<ReturnValue, BridgeError>)>,
}

impl FlushReport {
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Layers sent successfully.
    #[must_use]
    pub fn applied(&self) -> Vec<&LayerId> {
        self.outcomes
            .iter()
            .filter(|(_, r)| r.is_ok())
            .map(|(id, _)| id)
            .collect()
    }

    /// Layers whose command failed, with the failure.
    #[must_use]
    pub fn failed(&self) -> Vec<(&LayerId, &BridgeError)> {
        self.outcomes
            .iter()
            .filter_map(|(id, r)| r.as_ref().err().map(|e| (id, e)))
            .collect()
    }
}

/// Owns the entity table and the pending queue of one map.
///
/// All mutation goes through `&mut self`; a session keeps the context
/// behind an async mutex.
pub struct StyleContext {
    bridge: Arc<Bridge>,
    table: EntityTable,
    pending: PendingMutationQueue,
}

impl StyleContext {
    pub fn new(bridge: Arc<Bridge>) -> Self {
        Self {
            bridge,
            table: EntityTable::new(),
            pending: PendingMutationQueue::new(),
        }
    }

    #[must_use]
    pub fn bridge(&self) -> &Arc<Bridge> {
        &self.bridge
    }

    #[must_use]
    pub fn table(&self) -> &EntityTable {
        &self.table
    }

    #[must_use]
    pub fn pending(&self) -> &PendingMutationQueue {
        &self.pending
    }

    /// Registers and adds a source.
    ///
    /// # Errors
    ///
    /// - [`StyleError::AlreadyExists`] if the id is registered
    /// - [`StyleError::Bridge`] if the peer call fails; the source stays
    ///   registered until [`remove_source`](Self::remove_source)
    pub async fn add_source(
        &mut self,
        id: SourceId,
        definition: Value,
    ) -> Result<ReturnValue, StyleError> {
        if self.table.contains_source(&id) {
            return Err(StyleError::source_exists(&id));
        }

        self.table.insert_source(SourceEntry {
            id: id.clone(),
            kind: kind_of(&definition),
        });
        debug!(source = %id, "registered source");

        let command = Command::AddSource {
            id: id.clone(),
            definition,
        };
        Ok(self.bridge.execute(&command).await?)
    }

    /// Registers and adds a layer, deferring it while its source loads.
    ///
    /// The layer is registered before anything else is checked and stays
    /// registered on every error except [`StyleError::AlreadyExists`].
    /// Roll back with [`remove_layer`](Self::remove_layer).
    ///
    /// # Errors
    ///
    /// - [`StyleError::AlreadyExists`] if the id is registered
    /// - [`StyleError::MissingParent`] if `source` is not registered
    /// - [`StyleError::Bridge`] if a peer call fails
    pub async fn add_layer(
        &mut self,
        id: LayerId,
        source: Option<SourceId>,
        definition: Value,
        before: Option<LayerId>,
    ) -> Result<LayerOutcome, StyleError> {
        if self.table.contains_layer(&id) {
            return Err(StyleError::layer_exists(&id));
        }

        self.table.insert_layer(LayerEntry {
            id: id.clone(),
            source: source.clone(),
            kind: kind_of(&definition),
        });
        debug!(layer = %id, "registered layer");

        if let Some(parent) = &source {
            if !self.table.contains_source(parent) {
                return Err(StyleError::MissingParent {
                    layer: id,
                    parent: parent.clone(),
                });
            }
        }

        let command = Command::AddLayer {
            id: id.clone(),
            source: source.clone(),
            definition,
            before,
        };

        Ok(self.apply_or_defer(&id, source, command).await?)
    }

    async fn apply_or_defer(
        &mut self,
        id: &LayerId,
        source: Option<SourceId>,
        command: Command,
    ) -> Result<LayerOutcome, BridgeError> {
        let Some(dependency) = source else {
            self.bridge.execute(&command).await?;
            return Ok(LayerOutcome::Applied);
        };

        if self.bridge.is_source_loaded(&dependency).await? {
            self.bridge.execute(&command).await?;
            Ok(LayerOutcome::Applied)
        } else {
            self.pending.push(PendingMutation {
                target: id.clone(),
                dependency,
                command,
            });
            Ok(LayerOutcome::Deferred)
        }
    }

    /// Executes every pending mutation in FIFO order and clears the queue.
    ///
    /// A failing task does not stop the flush; its error is in the report.
    pub async fn flush_pending(&mut self) -> FlushReport {
        let tasks = self.pending.take_all();
        if tasks.is_empty() {
            return FlushReport::default();
        }

        info!(count = tasks.len(), "flushing pending style mutations");
        let mut report = FlushReport::default();
        for task in tasks {
            let result = self.bridge.execute(&task.command).await;
            if let Err(e) = &result {
                warn!(layer = %task.target, error = %e, "pending mutation failed");
            }
            report.outcomes.push((task.target, result));
        }
        report
    }

    /// Deregisters and removes a layer.
    ///
    /// # Errors
    ///
    /// - [`StyleError::NotFound`] if the id is not registered
    /// - [`StyleError::Bridge`] if the peer call fails
    pub async fn remove_layer(&mut self, id: &LayerId) -> Result<ReturnValue, StyleError> {
        if self.table.remove_layer(id).is_none() {
            return Err(StyleError::layer_not_found(id));
        }
        self.pending.discard_target(id);
        debug!(layer = %id, "deregistered layer");

        Ok(self
            .bridge
            .execute(&Command::RemoveLayer { id: id.clone() })
            .await?)
    }

    /// Deregisters and removes a source.
    ///
    /// Pending layers waiting on the source are discarded and deregistered
    /// with it. Layers already on the peer stay registered.
    ///
    /// # Errors
    ///
    /// - [`StyleError::NotFound`] if the id is not registered
    /// - [`StyleError::Bridge`] if the peer call fails
    pub async fn remove_source(&mut self, id: &SourceId) -> Result<ReturnValue, StyleError> {
        if self.table.remove_source(id).is_none() {
            return Err(StyleError::source_not_found(id));
        }
        for layer in self.pending.discard_dependency(id) {
            self.table.remove_layer(&layer);
        }
        debug!(source = %id, "deregistered source");

        Ok(self
            .bridge
            .execute(&Command::RemoveSource { id: id.clone() })
            .await?)
    }

    /// Replaces the whole style.
    ///
    /// Clears the table and every pending mutation, then sends the new
    /// style. Calls already in flight are not retried.
    ///
    /// # Errors
    ///
    /// [`StyleError::Bridge`] if the peer call fails. The local state is
    /// cleared either way.
    pub async fn replace_style(&mut self, style: Value) -> Result<ReturnValue, StyleError> {
        self.reset();
        Ok(self.bridge.execute(&Command::SetStyle { style }).await?)
    }

    /// Clears the table and pending queue without contacting the peer.
    pub fn reset(&mut self) {
        let discarded = self.pending.clear();
        self.table.clear();
        info!(discarded, "style state reset");
    }
}
