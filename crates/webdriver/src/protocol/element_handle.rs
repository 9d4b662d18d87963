// ElementHandle protocol object
//
// Client-side proxy for a single element inside a remotely-rendered document.
// The handle never holds the real element: it owns the opaque id the session
// assigned at discovery time, and every operation encodes a command, forwards
// it to the owning session, and decodes the structured response.
//
// The server-side counterpart can go stale (the remote element removed from
// its document); that is not detectable locally and surfaces as a remote
// failure on the next operation, never as a local state change.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

use crate::error::{Error, Result};
use crate::protocol::file_detector::{FileDetector, UselessFileDetector, zip_file_base64};
use crate::protocol::geometry::{Dimension, Point, Rect};
use crate::protocol::locator::By;
use crate::protocol::output_type::OutputType;
use crate::protocol::shadow_root::ShadowRoot;
use crate::session::command::{Command, Dialect, names};
use crate::session::{Response, SessionLike, SessionRef};

/// ElementHandle represents a single element in a remote document.
///
/// Handles are created by the session when a find operation, script
/// evaluation, or nested result returns an element reference. Identity is the
/// opaque id alone: two handles compare equal iff their ids match, regardless
/// of how either was found or which session produced it.
///
/// # Example
///
/// ```ignore
/// use webdriver_rs::By;
///
/// let field = form.find_element(&By::name("email")).await?;
/// field.send_keys(&["user@example.com"]).await?;
/// form.submit().await?;
/// ```
#[derive(Clone)]
pub struct ElementHandle {
    id: String,
    session: SessionRef,
    found_by: Option<String>,
    file_detector: Arc<dyn FileDetector>,
}

impl ElementHandle {
    /// Creates a handle for the element with the given opaque id.
    ///
    /// Fails with `InvalidArgument` when the id is empty; the id is the sole
    /// basis of identity and is immutable afterwards.
    pub fn new(id: impl Into<String>, session: SessionRef) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::InvalidArgument(
                "element id must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id,
            session,
            found_by: None,
            file_detector: Arc::new(UselessFileDetector),
        })
    }

    /// The opaque id assigned by the remote session at discovery time.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The owning session, if it is still alive.
    pub fn session(&self) -> Option<Arc<dyn SessionLike>> {
        self.session.upgrade()
    }

    /// Re-attaches the handle to a session. Called by the session when it
    /// hands out a handle it decoded from a nested result.
    pub fn set_session(&mut self, session: SessionRef) {
        self.session = session;
    }

    /// Records how this handle was found, for diagnostics only.
    ///
    /// Set once at discovery; later calls are ignored.
    pub fn set_found_by(&mut self, context: impl fmt::Display, strategy: &str, value: &str) {
        if self.found_by.is_none() {
            self.found_by = Some(format!("{context} -> {strategy}: {value}"));
        }
    }

    /// The recorded locator description, if any.
    pub fn found_by(&self) -> Option<&str> {
        self.found_by.as_deref()
    }

    /// Replaces the file-detection policy used by the upload sub-protocol.
    pub fn set_file_detector(&mut self, detector: Arc<dyn FileDetector>) {
        self.file_detector = detector;
    }

    // =========================================================================
    // Command dispatch
    // =========================================================================

    /// Executes a command against the owning session.
    ///
    /// A dead session fails with a remote-kind error. A remote failure coming
    /// back from the session is annotated with this element's description
    /// before being re-signaled as the same kind; nothing is downgraded or
    /// retried.
    async fn execute(&self, command: Command) -> Result<Response> {
        tracing::trace!(command = command.name(), element = %self.id, "dispatching element command");
        match self.live_session()?.execute(command).await {
            Err(Error::Remote {
                message,
                element: None,
            }) => Err(Error::Remote {
                message,
                element: Some(self.to_string()),
            }),
            other => other,
        }
    }

    fn live_session(&self) -> Result<Arc<dyn SessionLike>> {
        self.session.upgrade().ok_or_else(Error::session_gone)
    }

    /// A command carrying this element's id.
    fn command(&self, name: &'static str) -> Command {
        Command::new(name).arg("id", self.id.as_str())
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Clicks the element.
    pub async fn click(&self) -> Result<()> {
        self.execute(self.command(names::CLICK_ELEMENT)).await?;
        Ok(())
    }

    /// Clears a text input or editable element.
    pub async fn clear(&self) -> Result<()> {
        self.execute(self.command(names::CLEAR_ELEMENT)).await?;
        Ok(())
    }

    /// Submits the form this element belongs to.
    ///
    /// A remote scripting failure means the element has no enclosing form and
    /// is reported as `UnsupportedOperation`; any other failure propagates
    /// unchanged.
    pub async fn submit(&self) -> Result<()> {
        match self.execute(self.command(names::SUBMIT_ELEMENT)).await {
            Err(Error::Script(_)) => Err(Error::UnsupportedOperation(
                "to submit an element, it must be nested inside a form element".to_string(),
            )),
            other => other.map(|_| ()),
        }
    }

    /// Types the given key sequence into the element.
    ///
    /// Segments of the concatenated input (split on newlines) that the
    /// handle's [`FileDetector`] resolves to local files are uploaded first,
    /// and the server-assigned remote paths are typed in their place. The
    /// substitution is all-or-nothing: unless every non-empty segment
    /// resolves, the literal text is sent unmodified.
    pub async fn send_keys<S: AsRef<str>>(&self, keys: &[S]) -> Result<()> {
        if keys.is_empty() {
            return Err(Error::InvalidArgument(
                "keys to send must not be empty".to_string(),
            ));
        }
        let text: String = keys.iter().map(AsRef::as_ref).collect();

        let segments: Vec<&str> = text.split('\n').collect();
        let resolved: Vec<Option<PathBuf>> = segments
            .iter()
            .map(|segment| {
                if segment.is_empty() {
                    None
                } else {
                    self.file_detector.local_file(segment)
                }
            })
            .collect();

        let any_file = resolved.iter().any(Option::is_some);
        let all_files = segments
            .iter()
            .zip(&resolved)
            .all(|(segment, file)| segment.is_empty() || file.is_some());

        let text = if any_file && all_files {
            let mut remote_paths = Vec::with_capacity(segments.len());
            for file in resolved {
                match file {
                    Some(path) => remote_paths.push(self.upload(&path).await?),
                    None => remote_paths.push(String::new()),
                }
            }
            remote_paths.join("\n")
        } else {
            text
        };

        self.execute(
            self.command(names::SEND_KEYS_TO_ELEMENT)
                .arg("text", text.as_str())
                .arg("value", json!([text])),
        )
        .await?;
        Ok(())
    }

    /// Transfers a local file to the remote machine, returning the remote
    /// path to type in place of the local one.
    async fn upload(&self, path: &Path) -> Result<String> {
        if !path.is_file() {
            return Err(Error::InvalidArgument(format!(
                "you may only upload files: {}",
                path.display()
            )));
        }
        let archive = zip_file_base64(path)?;
        tracing::debug!(file = %path.display(), element = %self.id, "uploading local file");

        let response = self
            .execute(Command::new(names::UPLOAD_FILE).arg("file", archive.as_str()))
            .await?;
        match response.value {
            Value::String(remote_path) => Ok(remote_path),
            other => Err(Error::conversion("upload path string", &other)),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The element's tag name.
    pub async fn tag_name(&self) -> Result<String> {
        let response = self.execute(self.command(names::GET_ELEMENT_TAG_NAME)).await?;
        required_string(response.value)
    }

    /// The element's visible text.
    pub async fn text(&self) -> Result<String> {
        let response = self.execute(self.command(names::GET_ELEMENT_TEXT)).await?;
        required_string(response.value)
    }

    /// The computed value of a CSS property.
    pub async fn css_value(&self, property_name: &str) -> Result<String> {
        let response = self
            .execute(
                self.command(names::GET_ELEMENT_VALUE_OF_CSS_PROPERTY)
                    .arg("propertyName", property_name),
            )
            .await?;
        required_string(response.value)
    }

    /// An attribute or property value, following the protocol's mixed
    /// attribute/property lookup.
    pub async fn attribute(&self, name: &str) -> Result<Option<String>> {
        let response = self
            .execute(self.command(names::GET_ELEMENT_ATTRIBUTE).arg("name", name))
            .await?;
        Ok(nullable_string(response.value))
    }

    /// The attribute value as written in the document, without property
    /// fallback.
    pub async fn dom_attribute(&self, name: &str) -> Result<Option<String>> {
        let response = self
            .execute(
                self.command(names::GET_ELEMENT_DOM_ATTRIBUTE)
                    .arg("name", name),
            )
            .await?;
        Ok(nullable_string(response.value))
    }

    /// The live DOM property value.
    pub async fn dom_property(&self, name: &str) -> Result<Option<String>> {
        let response = self
            .execute(
                self.command(names::GET_ELEMENT_DOM_PROPERTY)
                    .arg("name", name),
            )
            .await?;
        Ok(nullable_string(response.value))
    }

    /// The element's computed ARIA role.
    pub async fn aria_role(&self) -> Result<Option<String>> {
        let response = self.execute(self.command(names::GET_ELEMENT_ARIA_ROLE)).await?;
        Ok(nullable_string(response.value))
    }

    /// The element's computed accessible name.
    pub async fn accessible_name(&self) -> Result<Option<String>> {
        let response = self
            .execute(self.command(names::GET_ELEMENT_ACCESSIBLE_NAME))
            .await?;
        Ok(nullable_string(response.value))
    }

    // =========================================================================
    // State probes
    // =========================================================================

    /// Whether a checkbox, radio button, or option is currently selected.
    pub async fn is_selected(&self) -> Result<bool> {
        let response = self.execute(self.command(names::IS_ELEMENT_SELECTED)).await?;
        boolean_value(response.value)
    }

    /// Whether the element accepts interaction.
    pub async fn is_enabled(&self) -> Result<bool> {
        let response = self.execute(self.command(names::IS_ELEMENT_ENABLED)).await?;
        boolean_value(response.value)
    }

    /// Whether the element is rendered visibly.
    ///
    /// An explicit null display state decodes as `false`; this accommodation
    /// applies to this probe only, not to boolean results in general.
    pub async fn is_displayed(&self) -> Result<bool> {
        let response = self.execute(self.command(names::IS_ELEMENT_DISPLAYED)).await?;
        match response.value {
            Value::Null => Ok(false),
            other => boolean_value(other),
        }
    }

    // =========================================================================
    // Geometry & screenshots
    // =========================================================================

    /// The element's position on the page.
    pub async fn location(&self) -> Result<Point> {
        let response = self.execute(self.command(names::GET_ELEMENT_LOCATION)).await?;
        Point::from_wire(&response.value)
    }

    /// The element's rendered size.
    pub async fn size(&self) -> Result<Dimension> {
        let response = self.execute(self.command(names::GET_ELEMENT_SIZE)).await?;
        Dimension::from_wire(&response.value)
    }

    /// The element's position and size in one round trip.
    pub async fn rect(&self) -> Result<Rect> {
        let response = self.execute(self.command(names::GET_ELEMENT_RECT)).await?;
        Rect::from_wire(&response.value)
    }

    /// Captures a screenshot of the element in the representation chosen by
    /// `output`.
    ///
    /// The remote end returns either a base64-encoded image string or a raw
    /// byte sequence; each is routed to the matching [`OutputType`] entry
    /// point, and any other shape is a conversion failure naming it.
    pub async fn screenshot_as<O: OutputType>(&self, output: &O) -> Result<O::Output> {
        let response = self.execute(self.command(names::ELEMENT_SCREENSHOT)).await?;
        match response.value {
            Value::String(encoded) => output.from_base64(&encoded),
            Value::Array(items) => output.from_bytes(byte_sequence(&items)?),
            other => Err(Error::conversion(
                "base64 string or byte sequence screenshot payload",
                &other,
            )),
        }
    }

    /// The element's coordinate-resolution capability.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            element: self.clone(),
        }
    }

    // =========================================================================
    // Child search
    // =========================================================================

    /// Finds the first descendant of this element matching the locator.
    ///
    /// The handle only constructs the child-search command; executing it and
    /// wrapping the raw result into a new handle is the session's job.
    pub async fn find_element(&self, locator: &By) -> Result<ElementHandle> {
        self.live_session()?
            .find_element(self.child_search(names::FIND_CHILD_ELEMENT, locator))
            .await
    }

    /// Finds all descendants of this element matching the locator.
    pub async fn find_elements(&self, locator: &By) -> Result<Vec<ElementHandle>> {
        self.live_session()?
            .find_elements(self.child_search(names::FIND_CHILD_ELEMENTS, locator))
            .await
    }

    fn child_search(&self, name: &'static str, locator: &By) -> Command {
        Command::new(name)
            .arg("id", self.id.as_str())
            .arg("using", locator.strategy())
            .arg("value", locator.value())
    }

    /// The shadow root attached to this element.
    pub async fn shadow_root(&self) -> Result<ShadowRoot> {
        let response = self
            .execute(self.command(names::GET_ELEMENT_SHADOW_ROOT))
            .await?;
        ShadowRoot::from_wire(&response.value, self.session.clone())
            .ok_or_else(|| Error::conversion("shadow root reference", &response.value))
    }

    // =========================================================================
    // Identity & wire form
    // =========================================================================

    /// Whether `other` refers to the same remote element, after resolving
    /// `other` through any wrapper layers.
    pub fn same_element(&self, other: &dyn Unwrappable) -> bool {
        self.id == other.underlying().id
    }

    /// The wire form: a mapping exposing the id under the element keys of
    /// both dialects, for embedding inside command parameters.
    pub fn to_json(&self) -> Value {
        let mut map = Map::with_capacity(2);
        map.insert(
            Dialect::Oss.element_key().to_string(),
            Value::String(self.id.clone()),
        );
        map.insert(
            Dialect::W3c.element_key().to_string(),
            Value::String(self.id.clone()),
        );
        Value::Object(map)
    }

    /// Extracts an element reference from its wire form, under either
    /// dialect's key.
    pub fn from_wire(value: &Value, session: SessionRef) -> Option<Self> {
        let map = value.as_object()?;
        let id = map
            .get(Dialect::W3c.element_key())
            .or_else(|| map.get(Dialect::Oss.element_key()))?
            .as_str()?;
        Self::new(id, session).ok()
    }
}

/// Capability exposed by decorator handles that wrap another element.
///
/// Implementations resolve through their whole wrapper chain, so equality
/// never needs runtime type inspection: anything that can participate
/// resolves to an [`ElementHandle`], and [`ElementHandle`] is its own fixed
/// point.
pub trait Unwrappable {
    /// The innermost element handle behind any wrapper layers.
    fn underlying(&self) -> &ElementHandle;
}

impl Unwrappable for ElementHandle {
    fn underlying(&self) -> &ElementHandle {
        self
    }
}

impl PartialEq for ElementHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ElementHandle {}

impl Hash for ElementHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Serialize for ElementHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(Dialect::Oss.element_key(), &self.id)?;
        map.serialize_entry(Dialect::W3c.element_key(), &self.id)?;
        map.end()
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.found_by {
            Some(found_by) => write!(f, "[{found_by}]"),
            None => write!(f, "[element {} -> unknown locator]", self.id),
        }
    }
}

impl fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementHandle")
            .field("id", &self.id)
            .field("found_by", &self.found_by)
            .finish()
    }
}

/// Position resolution for an element, one strategy per coordinate space.
pub struct Coordinates {
    element: ElementHandle,
}

impl Coordinates {
    /// Position in physical screen coordinates.
    ///
    /// The wire protocol has no realization of this space.
    pub fn on_screen(&self) -> Result<Point> {
        Err(Error::UnsupportedOperation(
            "on-screen coordinates are not supported".to_string(),
        ))
    }

    /// Position within the viewport, scrolling the element into view first.
    pub async fn in_viewport(&self) -> Result<Point> {
        let response = self
            .element
            .execute(
                self.element
                    .command(names::GET_ELEMENT_LOCATION_ONCE_SCROLLED_INTO_VIEW),
            )
            .await?;
        Point::from_wire(&response.value)
    }

    /// Position on the page, equivalent to
    /// [`ElementHandle::location`].
    pub async fn on_page(&self) -> Result<Point> {
        self.element.location().await
    }

    /// Auxiliary locator datum: the element's own remote id.
    pub fn auxiliary(&self) -> &str {
        self.element.id()
    }
}

fn required_string(value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(Error::conversion("string", &other)),
    }
}

/// Null becomes `None`; non-string scalars are rendered in their JSON form,
/// matching the protocol's string-valuing accessors.
fn nullable_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn boolean_value(value: Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(Error::conversion("boolean", &other)),
    }
}

fn byte_sequence(items: &[Value]) -> Result<Vec<u8>> {
    items
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(|| Error::conversion("byte (0-255)", item))
        })
        .collect()
}
