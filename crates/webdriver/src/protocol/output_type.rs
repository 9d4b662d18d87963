// OutputType - screenshot payload conversion seam
//
// The element screenshot command returns either a base64-encoded image string
// or a raw byte sequence, depending on the remote end. An OutputType turns
// whichever shape arrived into the caller's chosen representation; the handle
// picks the entry point, the output type owns the conversion.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;

use crate::error::{Error, Result};

/// Converts a screenshot payload into a caller-chosen representation.
///
/// # Example
///
/// ```ignore
/// use webdriver_rs::{Base64Output, BytesOutput};
///
/// let png: Vec<u8> = element.screenshot_as(&BytesOutput).await?;
/// let encoded: String = element.screenshot_as(&Base64Output).await?;
/// ```
pub trait OutputType {
    type Output;

    /// Converts a base64-encoded image payload.
    fn from_base64(&self, data: &str) -> Result<Self::Output>;

    /// Converts a raw byte payload.
    fn from_bytes(&self, data: Vec<u8>) -> Result<Self::Output>;
}

/// Yields the screenshot in its base64 wire form.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Output;

impl OutputType for Base64Output {
    type Output = String;

    fn from_base64(&self, data: &str) -> Result<String> {
        Ok(data.to_string())
    }

    fn from_bytes(&self, data: Vec<u8>) -> Result<String> {
        Ok(BASE64_STANDARD.encode(data))
    }
}

/// Yields the screenshot as decoded image bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesOutput;

impl OutputType for BytesOutput {
    type Output = Vec<u8>;

    fn from_base64(&self, data: &str) -> Result<Vec<u8>> {
        BASE64_STANDARD.decode(data).map_err(|e| Error::Conversion {
            expected: "base64-encoded image data".to_string(),
            actual: e.to_string(),
        })
    }

    fn from_bytes(&self, data: Vec<u8>) -> Result<Vec<u8>> {
        Ok(data)
    }
}
