// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Session boundary - the executor contract element handles consume
//
// The session owns the transport, the wire dialect, and the mapping from raw
// remote results to new handles. Element handles are pure consumers of this
// contract: they build a Command, hand it to the session, and decode the
// returned Response. Concurrency control, connection pooling, and retry
// policy all live behind this trait.

pub mod command;

use std::sync::Weak;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::protocol::ElementHandle;

pub use command::{Command, Dialect};

/// Executor contract implemented by the owning session.
///
/// Handles hold a [`SessionRef`] to an implementation of this trait and issue
/// one command per operation. The two find hooks exist because turning raw
/// remote results into new handles (assigning ids, attaching the session
/// back-reference, recording the locator description) is entirely the
/// session's responsibility; handles only construct the child-search command.
#[async_trait]
pub trait SessionLike: Send + Sync {
    /// Executes a command and returns the remote response.
    async fn execute(&self, command: Command) -> Result<Response>;

    /// Executes an operation given its name and a prebuilt parameter map.
    async fn execute_named(
        &self,
        name: &str,
        parameters: Map<String, Value>,
    ) -> Result<Response> {
        self.execute(Command::from_parts(name, parameters)).await
    }

    /// Executes a find command and wraps the single raw result into a handle.
    async fn find_element(&self, command: Command) -> Result<ElementHandle>;

    /// Executes a find command and wraps each raw result into a handle.
    async fn find_elements(&self, command: Command) -> Result<Vec<ElementHandle>>;
}

/// Non-owning reference from a handle back to its session.
///
/// The session may be dropped or replaced independently of any handle
/// referencing it; upgrading a dead reference fails with
/// [`Error::session_gone`](crate::Error::session_gone) instead of dangling.
pub type SessionRef = Weak<dyn SessionLike>;

/// Remote response to a single command.
///
/// The payload type is operation-specific (boolean, string, mapping, or an
/// encoded image); the calling operation owns the conversion and its failure
/// mode.
#[derive(Debug, Clone)]
pub struct Response {
    pub value: Value,
}

impl Response {
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}
