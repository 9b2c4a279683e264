/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Command-based undo/redo engine.
//!
//! A `Command` pairs an apply closure with its exact inverse. The session
//! performs the mutation first and records the command afterwards, so
//! `record` never invokes `apply`. `undo` runs the inverse, `redo` re-runs
//! the forward closure; both stacks are strictly LIFO and recording a new
//! command discards everything that was undone.

use std::fmt;

use futures_util::future::BoxFuture;
use parking_lot::Mutex;

use crate::graph::StoreResult;

/// Default bound on undo depth; the oldest entry falls off when exceeded.
pub const DEFAULT_HISTORY_CAPACITY: usize = 128;

type CommandFn = Box<dyn Fn() -> BoxFuture<'static, StoreResult<()>> + Send + Sync>;

/// A reversible, already-performed mutation.
///
/// Both closures capture everything they need (store handle, captured
/// records, positions) and must be each other's exact inverse.
pub struct Command {
    name: String,
    apply_fn: CommandFn,
    revert_fn: CommandFn,
}

impl Command {
    pub fn new<A, R>(name: impl Into<String>, apply_fn: A, revert_fn: R) -> Self
    where
        A: Fn() -> BoxFuture<'static, StoreResult<()>> + Send + Sync + 'static,
        R: Fn() -> BoxFuture<'static, StoreResult<()>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            apply_fn: Box::new(apply_fn),
            revert_fn: Box::new(revert_fn),
        }
    }

    /// Human-readable label, surfaced in status messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn apply(&self) -> StoreResult<()> {
        (self.apply_fn)().await
    }

    pub async fn revert(&self) -> StoreResult<()> {
        (self.revert_fn)().await
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command").field("name", &self.name).finish()
    }
}

/// Snapshot of stack occupancy, pushed to the shell to enable or disable
/// the undo/redo controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryFlags {
    pub can_undo: bool,
    pub can_redo: bool,
}

#[derive(Default)]
struct Stacks {
    applied: Vec<Command>,
    undone: Vec<Command>,
}

/// Injectable undo/redo engine. One instance per editing session; the
/// session owns it and drops it on teardown, taking the stacks with it.
pub struct HistoryEngine {
    stacks: Mutex<Stacks>,
    /// Serializes undo/redo so two rapid invocations cannot interleave
    /// their asynchronous store operations.
    gate: tokio::sync::Mutex<()>,
    capacity: usize,
}

impl HistoryEngine {
    pub fn new(capacity: usize) -> Self {
        Self {
            stacks: Mutex::new(Stacks::default()),
            gate: tokio::sync::Mutex::new(()),
            capacity: capacity.max(1),
        }
    }

    /// Record an already-performed command. Discards the redo stack and
    /// trims the oldest entry when the depth bound is hit. Never runs the
    /// command's closures.
    pub fn record(&self, command: Command) {
        let mut stacks = self.stacks.lock();
        stacks.undone.clear();
        if stacks.applied.len() >= self.capacity {
            stacks.applied.remove(0);
        }
        log::debug!("history: record '{}'", command.name);
        stacks.applied.push(command);
    }

    /// Revert the most recent command. Returns the command's name, or
    /// `None` when there is nothing to undo (a no-op, not an error). If the
    /// revert closure fails the command stays on the undo stack.
    pub async fn undo(&self) -> StoreResult<Option<String>> {
        let _gate = self.gate.lock().await;
        let Some(command) = self.stacks.lock().applied.pop() else {
            return Ok(None);
        };
        match command.revert().await {
            Ok(()) => {
                let name = command.name.clone();
                self.stacks.lock().undone.push(command);
                Ok(Some(name))
            }
            Err(err) => {
                log::warn!("history: undo of '{}' failed: {err}", command.name);
                self.stacks.lock().applied.push(command);
                Err(err)
            }
        }
    }

    /// Re-apply the most recently undone command. Returns its name, or
    /// `None` when the redo stack is empty. On failure the command stays
    /// on the redo stack.
    pub async fn redo(&self) -> StoreResult<Option<String>> {
        let _gate = self.gate.lock().await;
        let Some(command) = self.stacks.lock().undone.pop() else {
            return Ok(None);
        };
        match command.apply().await {
            Ok(()) => {
                let name = command.name.clone();
                self.stacks.lock().applied.push(command);
                Ok(Some(name))
            }
            Err(err) => {
                log::warn!("history: redo of '{}' failed: {err}", command.name);
                self.stacks.lock().undone.push(command);
                Err(err)
            }
        }
    }

    pub fn flags(&self) -> HistoryFlags {
        let stacks = self.stacks.lock();
        HistoryFlags {
            can_undo: !stacks.applied.is_empty(),
            can_redo: !stacks.undone.is_empty(),
        }
    }

    pub fn clear(&self) {
        let mut stacks = self.stacks.lock();
        stacks.applied.clear();
        stacks.undone.clear();
    }
}

impl Default for HistoryEngine {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
