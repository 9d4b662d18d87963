// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Command - wire payload for a single remote operation
//
// Every element operation is realized as a Command: an operation name plus a
// JSON parameter map carrying the element's opaque id and any
// operation-specific arguments. The session collaborator serializes the
// command for whichever transport it speaks; this module only models the
// payload.

use serde::Serialize;
use serde_json::{Map, Value};

/// Wire names for the element operations this crate issues.
pub mod names {
    pub const CLICK_ELEMENT: &str = "clickElement";
    pub const SUBMIT_ELEMENT: &str = "submitElement";
    pub const SEND_KEYS_TO_ELEMENT: &str = "sendKeysToElement";
    pub const CLEAR_ELEMENT: &str = "clearElement";
    pub const UPLOAD_FILE: &str = "uploadFile";

    pub const GET_ELEMENT_TAG_NAME: &str = "getElementTagName";
    pub const GET_ELEMENT_TEXT: &str = "getElementText";
    pub const GET_ELEMENT_ATTRIBUTE: &str = "getElementAttribute";
    pub const GET_ELEMENT_DOM_ATTRIBUTE: &str = "getElementDomAttribute";
    pub const GET_ELEMENT_DOM_PROPERTY: &str = "getElementDomProperty";
    pub const GET_ELEMENT_VALUE_OF_CSS_PROPERTY: &str = "getElementValueOfCssProperty";
    pub const GET_ELEMENT_ARIA_ROLE: &str = "getElementAriaRole";
    pub const GET_ELEMENT_ACCESSIBLE_NAME: &str = "getElementAccessibleName";

    pub const IS_ELEMENT_SELECTED: &str = "isElementSelected";
    pub const IS_ELEMENT_ENABLED: &str = "isElementEnabled";
    pub const IS_ELEMENT_DISPLAYED: &str = "isElementDisplayed";

    pub const GET_ELEMENT_LOCATION: &str = "getElementLocation";
    pub const GET_ELEMENT_SIZE: &str = "getElementSize";
    pub const GET_ELEMENT_RECT: &str = "getElementRect";
    pub const GET_ELEMENT_LOCATION_ONCE_SCROLLED_INTO_VIEW: &str =
        "getElementLocationOnceScrolledIntoView";

    pub const ELEMENT_SCREENSHOT: &str = "elementScreenshot";
    pub const GET_ELEMENT_SHADOW_ROOT: &str = "getElementShadowRoot";

    pub const FIND_CHILD_ELEMENT: &str = "findChildElement";
    pub const FIND_CHILD_ELEMENTS: &str = "findChildElements";
    pub const FIND_ELEMENT_FROM_SHADOW_ROOT: &str = "findElementFromShadowRoot";
    pub const FIND_ELEMENTS_FROM_SHADOW_ROOT: &str = "findElementsFromShadowRoot";
}

/// A structured request naming an operation and its parameters.
///
/// Commands are built with [`Command::new`] and the chainable [`Command::arg`]
/// and handed to the session for execution:
///
/// ```ignore
/// use webdriver_rs::session::command::{names, Command};
///
/// let command = Command::new(names::GET_ELEMENT_ATTRIBUTE)
///     .arg("id", "b53d1f7a")
///     .arg("name", "href");
/// session.execute(command).await?;
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Command {
    name: String,
    parameters: Map<String, Value>,
}

impl Command {
    /// Creates a command for the named operation with no parameters yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Map::new(),
        }
    }

    /// Creates a command from an operation name and a prebuilt parameter map.
    pub fn from_parts(name: impl Into<String>, parameters: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    /// Adds a parameter, returning the command for chaining.
    pub fn arg(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.to_string(), value.into());
        self
    }

    /// The operation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter map.
    pub fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }
}

/// Wire-protocol variant affecting how an element reference is encoded.
///
/// A handle serializes its id under the keys of both dialects so it can be
/// embedded in command parameters regardless of which variant the remote end
/// negotiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Legacy JSON wire protocol
    Oss,
    /// Current W3C WebDriver protocol
    W3c,
}

impl Dialect {
    /// The key under which this dialect encodes an element reference.
    pub fn element_key(self) -> &'static str {
        match self {
            Dialect::Oss => "ELEMENT",
            Dialect::W3c => "element-6066-11e4-a52e-4f735466cecf",
        }
    }
}

/// Key under which a shadow root reference is encoded.
///
/// Shadow roots exist only in the current dialect; there is no legacy key.
pub const SHADOW_ROOT_KEY: &str = "shadow-6066-11e4-a52e-4f735466cecf";
