// ShadowRoot protocol object
//
// Handle for the shadow tree attached to an element. Like an element handle
// it owns only an opaque id and a weak session reference; its sole capability
// is child-element search scoped to the shadow tree.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::protocol::element_handle::ElementHandle;
use crate::protocol::locator::By;
use crate::session::command::{Command, SHADOW_ROOT_KEY, names};
use crate::session::{SessionLike, SessionRef};

/// A remote shadow root, reachable through
/// [`ElementHandle::shadow_root`](crate::ElementHandle::shadow_root).
#[derive(Clone)]
pub struct ShadowRoot {
    id: String,
    session: SessionRef,
}

impl ShadowRoot {
    /// Creates a handle for the shadow root with the given opaque id.
    ///
    /// Fails with `InvalidArgument` when the id is empty; the id is the sole
    /// basis of identity and is immutable afterwards.
    pub fn new(id: impl Into<String>, session: SessionRef) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::InvalidArgument(
                "shadow root id must not be empty".to_string(),
            ));
        }
        Ok(Self { id, session })
    }

    /// The opaque id assigned by the remote session.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Extracts a shadow root reference from its wire form.
    pub fn from_wire(value: &Value, session: SessionRef) -> Option<Self> {
        let id = value.as_object()?.get(SHADOW_ROOT_KEY)?.as_str()?;
        Self::new(id, session).ok()
    }

    /// The wire form: a mapping exposing the id under the shadow root key.
    pub fn to_json(&self) -> Value {
        let mut map = Map::with_capacity(1);
        map.insert(SHADOW_ROOT_KEY.to_string(), Value::String(self.id.clone()));
        Value::Object(map)
    }

    /// Finds the first element below this shadow root matching the locator.
    pub async fn find_element(&self, locator: &By) -> Result<ElementHandle> {
        self.live_session()?
            .find_element(self.child_search(names::FIND_ELEMENT_FROM_SHADOW_ROOT, locator))
            .await
    }

    /// Finds all elements below this shadow root matching the locator.
    pub async fn find_elements(&self, locator: &By) -> Result<Vec<ElementHandle>> {
        self.live_session()?
            .find_elements(self.child_search(names::FIND_ELEMENTS_FROM_SHADOW_ROOT, locator))
            .await
    }

    fn child_search(&self, name: &'static str, locator: &By) -> Command {
        Command::new(name)
            .arg("shadowId", self.id.as_str())
            .arg("using", locator.strategy())
            .arg("value", locator.value())
    }

    fn live_session(&self) -> Result<Arc<dyn SessionLike>> {
        self.session.upgrade().ok_or_else(Error::session_gone)
    }
}

impl PartialEq for ShadowRoot {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ShadowRoot {}

impl Hash for ShadowRoot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Serialize for ShadowRoot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(SHADOW_ROOT_KEY, &self.id)?;
        map.end()
    }
}

impl fmt::Debug for ShadowRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShadowRoot").field("id", &self.id).finish()
    }
}
