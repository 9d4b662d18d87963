// Integration tests for ElementHandle
//
// Every test drives the public element API against a scripted MockSession,
// asserting both sides of the proxy contract: which commands go out (name and
// parameters) and how replies are decoded (typed results, documented
// accommodations, error enrichment).


use std::hash::{DefaultHasher, Hash, Hasher};
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use serde_json::{Value, json};

use mock_session::MockSession;
use webdriver_rs::session::Command;
use webdriver_rs::{
    Base64Output, By, BytesOutput, Dimension, ElementHandle, Error, FileDetector,
    LocalFileDetector, Point, Unwrappable,
};

const W3C_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";
const SHADOW_KEY: &str = "shadow-6066-11e4-a52e-4f735466cecf";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("webdriver_rs=trace")
        .with_test_writer()
        .try_init();
}

fn w3c_ref(id: &str) -> Value {
    json!({W3C_KEY: id})
}

// ============================================================================
// Command dispatch
// ============================================================================

#[tokio::test]
async fn test_click_sends_the_element_id() {
    let session = MockSession::answering_null();
    session.element("e1").click().await.expect("click");

    assert_eq!(
        session.sent(),
        vec![("clickElement".to_string(), json!({"id": "e1"}))]
    );
}

#[tokio::test]
async fn test_reads_decode_operation_specific_payloads() -> anyhow::Result<()> {
    let session = MockSession::with_replies(vec![
        Ok(json!("button")),
        Ok(json!("Sign in")),
        Ok(json!("rgba(0, 0, 0, 1)")),
        Ok(json!("primary")),
        Ok(Value::Null),
    ]);
    let element = session.element("e1");

    assert_eq!(element.tag_name().await?, "button");
    assert_eq!(element.text().await?, "Sign in");
    assert_eq!(element.css_value("color").await?, "rgba(0, 0, 0, 1)");
    assert_eq!(element.attribute("class").await?, Some("primary".to_string()));
    assert_eq!(element.attribute("disabled").await?, None);

    assert_eq!(
        session.sent_names(),
        vec![
            "getElementTagName",
            "getElementText",
            "getElementValueOfCssProperty",
            "getElementAttribute",
            "getElementAttribute",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_remote_failure_is_annotated_with_element_description() {
    let session = MockSession::with_replies(vec![Err(Error::Remote {
        message: "stale element reference".to_string(),
        element: None,
    })]);
    let mut element = session.element("e1");
    element.set_found_by("session 7", "css selector", "#login");

    let err = element.click().await.unwrap_err();
    match err {
        Error::Remote { message, element } => {
            assert_eq!(message, "stale element reference");
            assert_eq!(element.as_deref(), Some("[session 7 -> css selector: #login]"));
        }
        other => panic!("expected Remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_already_annotated_failure_keeps_its_annotation() {
    let session = MockSession::with_replies(vec![Err(Error::Remote {
        message: "boom".to_string(),
        element: Some("[earlier]".to_string()),
    })]);

    let err = session.element("e1").click().await.unwrap_err();
    match err {
        Error::Remote { element, .. } => assert_eq!(element.as_deref(), Some("[earlier]")),
        other => panic!("expected Remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_operations_after_session_teardown_fail_with_remote_error() {
    let session = MockSession::answering_null();
    let element = session.element("e1");
    drop(session);

    let err = element.click().await.unwrap_err();
    assert!(matches!(err, Error::Remote { .. }));
    assert!(err.to_string().contains("torn down"));
}

// ============================================================================
// submit()
// ============================================================================

#[tokio::test]
async fn test_submit_translates_scripting_failure() {
    let session = MockSession::with_replies(vec![Err(Error::Script(
        "element has no form owner".to_string(),
    ))]);

    let err = session.element("e1").submit().await.unwrap_err();
    match err {
        Error::UnsupportedOperation(message) => assert!(message.contains("form element")),
        other => panic!("expected UnsupportedOperation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_propagates_other_failures_unchanged() {
    let session = MockSession::with_replies(vec![Err(Error::Remote {
        message: "no such element".to_string(),
        element: None,
    })]);

    let err = session.element("e1").submit().await.unwrap_err();
    assert!(matches!(err, Error::Remote { .. }));
}

// ============================================================================
// send_keys() and the upload sub-protocol
// ============================================================================

#[tokio::test]
async fn test_send_keys_empty_sequence_is_rejected_without_remote_command() {
    let session = MockSession::answering_null();
    let keys: [&str; 0] = [];

    let err = session.element("e1").send_keys(&keys).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(session.sent().is_empty());
}

#[tokio::test]
async fn test_send_keys_concatenates_segments_into_literal_text() {
    let session = MockSession::answering_null();
    session
        .element("e1")
        .send_keys(&["user", "@", "example.com"])
        .await
        .expect("send_keys");

    assert_eq!(
        session.sent(),
        vec![(
            "sendKeysToElement".to_string(),
            json!({
                "id": "e1",
                "text": "user@example.com",
                "value": ["user@example.com"],
            })
        )]
    );
}

#[tokio::test]
async fn test_send_keys_without_detector_sends_paths_as_literal_text() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(b"contents")?;
    let path = file.path().to_str().unwrap().to_string();

    // The default detector never resolves, even for paths that exist.
    let session = MockSession::answering_null();
    session.element("e1").send_keys(&[path.as_str()]).await?;

    let sent = session.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "sendKeysToElement");
    assert_eq!(sent[0].1["text"], path);
    Ok(())
}

#[tokio::test]
async fn test_send_keys_uploads_a_resolving_file_and_types_the_remote_path() -> anyhow::Result<()> {
    init_tracing();
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(b"upload me")?;
    let path = file.path().to_str().unwrap().to_string();

    let session = MockSession::with_replies(vec![
        Ok(json!("/remote/uploads/file.txt")),
        Ok(Value::Null),
    ]);
    let mut element = session.element("e1");
    element.set_file_detector(Arc::new(LocalFileDetector));
    element.send_keys(&[path.as_str()]).await?;

    let sent = session.sent();
    assert_eq!(sent.len(), 2, "exactly one upload, then the keystrokes");

    assert_eq!(sent[0].0, "uploadFile");
    let archive = BASE64_STANDARD.decode(sent[0].1["file"].as_str().unwrap())?;
    assert_eq!(&archive[..4], b"PK\x03\x04", "payload is a zip container");

    assert_eq!(sent[1].0, "sendKeysToElement");
    assert_eq!(sent[1].1["text"], "/remote/uploads/file.txt");
    Ok(())
}

#[tokio::test]
async fn test_send_keys_substitution_is_all_or_nothing() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(b"contents")?;
    let path = file.path().to_str().unwrap().to_string();

    // One segment resolves, one does not: the literal text must go out
    // unmodified, with no upload issued.
    let session = MockSession::answering_null();
    let mut element = session.element("e1");
    element.set_file_detector(Arc::new(LocalFileDetector));
    element.send_keys(&[path.as_str(), "\nnot a file"]).await?;

    let sent = session.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "sendKeysToElement");
    assert_eq!(sent[0].1["text"], format!("{path}\nnot a file"));
    Ok(())
}

#[tokio::test]
async fn test_upload_rejects_paths_that_are_not_regular_files() {
    // A detector that resolves a directory: the upload step itself must
    // reject it before anything goes over the wire.
    struct DirDetector(PathBuf);
    impl FileDetector for DirDetector {
        fn local_file(&self, _keys: &str) -> Option<PathBuf> {
            Some(self.0.clone())
        }
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let session = MockSession::answering_null();
    let mut element = session.element("e1");
    element.set_file_detector(Arc::new(DirDetector(dir.path().to_path_buf())));

    let err = element.send_keys(&["anything"]).await.unwrap_err();
    match err {
        Error::InvalidArgument(message) => assert!(message.contains("may only upload files")),
        other => panic!("expected InvalidArgument, got {other:?}"),
    }
    assert!(session.sent().is_empty());
}

// ============================================================================
// State probes
// ============================================================================

#[tokio::test]
async fn test_is_displayed_decodes_explicit_null_as_false() {
    let session = MockSession::with_replies(vec![Ok(Value::Null), Ok(json!(true))]);
    let element = session.element("e1");

    assert!(!element.is_displayed().await.expect("null decodes as false"));
    assert!(element.is_displayed().await.expect("boolean passes through"));
}

#[tokio::test]
async fn test_boolean_probes_do_not_coerce_other_shapes() {
    let session = MockSession::with_replies(vec![Ok(json!("true")), Ok(Value::Null)]);
    let element = session.element("e1");

    let err = element.is_selected().await.unwrap_err();
    match err {
        Error::Conversion { expected, actual } => {
            assert_eq!(expected, "boolean");
            assert!(actual.contains("string"));
        }
        other => panic!("expected Conversion error, got {other:?}"),
    }

    // The null accommodation is specific to is_displayed.
    assert!(session.element("e1").is_enabled().await.is_err());
}

// ============================================================================
// Geometry
// ============================================================================

#[tokio::test]
async fn test_location_and_size_decode_integer_mappings() -> anyhow::Result<()> {
    let session = MockSession::with_replies(vec![
        Ok(json!({"x": 12, "y": 34})),
        Ok(json!({"width": 120, "height": 48})),
    ]);
    let element = session.element("e1");

    assert_eq!(element.location().await?, Point { x: 12, y: 34 });
    assert_eq!(
        element.size().await?,
        Dimension {
            width: 120,
            height: 48
        }
    );
    assert_eq!(
        session.sent_names(),
        vec!["getElementLocation", "getElementSize"]
    );
    Ok(())
}

#[tokio::test]
async fn test_rect_reproduces_all_four_values_in_named_fields() {
    let session =
        MockSession::with_replies(vec![Ok(json!({"x": 1, "y": 2, "width": 30, "height": 40}))]);

    let rect = session.element("e1").rect().await.expect("rect");
    // Each value must land in the field of the same name; width and height
    // must not trade places.
    assert_eq!(rect.x, 1);
    assert_eq!(rect.y, 2);
    assert_eq!(rect.width, 30);
    assert_eq!(rect.height, 40);
}

// ============================================================================
// Screenshots
// ============================================================================

#[tokio::test]
async fn test_screenshot_routes_a_string_payload_through_base64_decoding() {
    let encoded = BASE64_STANDARD.encode(b"png bytes");
    let session = MockSession::with_replies(vec![Ok(json!(encoded))]);

    let bytes = session
        .element("e1")
        .screenshot_as(&BytesOutput)
        .await
        .expect("screenshot");
    assert_eq!(bytes, b"png bytes");
}

#[tokio::test]
async fn test_screenshot_routes_a_byte_payload_through_raw_decoding() {
    let session = MockSession::with_replies(vec![Ok(json!([137, 80, 78, 71]))]);

    let encoded = session
        .element("e1")
        .screenshot_as(&Base64Output)
        .await
        .expect("screenshot");
    assert_eq!(encoded, BASE64_STANDARD.encode([137u8, 80, 78, 71]));
}

#[tokio::test]
async fn test_screenshot_fails_on_an_unexpected_shape() {
    let session = MockSession::with_replies(vec![Ok(json!(42))]);

    let err = session
        .element("e1")
        .screenshot_as(&BytesOutput)
        .await
        .unwrap_err();
    match err {
        Error::Conversion { actual, .. } => assert!(actual.contains("number")),
        other => panic!("expected Conversion error, got {other:?}"),
    }
}

// ============================================================================
// Coordinates
// ============================================================================

#[tokio::test]
async fn test_coordinates_capability() -> anyhow::Result<()> {
    let session = MockSession::with_replies(vec![
        Ok(json!({"x": 5, "y": 6})),
        Ok(json!({"x": 7, "y": 8})),
    ]);
    let element = session.element("e1");
    let coordinates = element.coordinates();

    assert!(matches!(
        coordinates.on_screen(),
        Err(Error::UnsupportedOperation(_))
    ));
    assert_eq!(coordinates.in_viewport().await?, Point { x: 5, y: 6 });
    assert_eq!(coordinates.on_page().await?, Point { x: 7, y: 8 });
    assert_eq!(coordinates.auxiliary(), "e1");

    assert_eq!(
        session.sent_names(),
        vec![
            "getElementLocationOnceScrolledIntoView",
            "getElementLocation",
        ]
    );
    Ok(())
}

// ============================================================================
// Child search
// ============================================================================

#[tokio::test]
async fn test_find_element_builds_the_child_search_command() -> anyhow::Result<()> {
    let session = MockSession::with_replies(vec![Ok(w3c_ref("child-1"))]);

    let child = session
        .element("parent-1")
        .find_element(&By::css("tr.selected"))
        .await?;
    assert_eq!(child.id(), "child-1");

    assert_eq!(
        session.sent(),
        vec![(
            "findChildElement".to_string(),
            json!({
                "id": "parent-1",
                "using": "css selector",
                "value": "tr.selected",
            })
        )]
    );
    Ok(())
}

#[tokio::test]
async fn test_find_elements_wraps_each_result() -> anyhow::Result<()> {
    // Results may arrive under either dialect's key.
    let session = MockSession::with_replies(vec![Ok(json!([
        {W3C_KEY: "child-1"},
        {"ELEMENT": "child-2"},
    ]))]);

    let children = session
        .element("parent-1")
        .find_elements(&By::tag_name("td"))
        .await?;
    let ids: Vec<&str> = children.iter().map(ElementHandle::id).collect();
    assert_eq!(ids, vec!["child-1", "child-2"]);

    assert_eq!(session.sent_names(), vec!["findChildElements"]);
    Ok(())
}

#[tokio::test]
async fn test_shadow_root_search_is_scoped_by_shadow_id() -> anyhow::Result<()> {
    let session = MockSession::with_replies(vec![
        Ok(json!({SHADOW_KEY: "root-9"})),
        Ok(w3c_ref("inner-1")),
    ]);

    let shadow = session.element("host-1").shadow_root().await?;
    assert_eq!(shadow.id(), "root-9");

    let inner = shadow.find_element(&By::css("slot")).await?;
    assert_eq!(inner.id(), "inner-1");

    let sent = session.sent();
    assert_eq!(sent[0].0, "getElementShadowRoot");
    assert_eq!(
        sent[1],
        (
            "findElementFromShadowRoot".to_string(),
            json!({
                "shadowId": "root-9",
                "using": "css selector",
                "value": "slot",
            })
        )
    );
    Ok(())
}

// ============================================================================
// Identity & wire form
// ============================================================================

/// A decorator handle, as an external crate might layer on.
struct Highlighted {
    inner: Box<dyn Unwrappable>,
}

impl Unwrappable for Highlighted {
    fn underlying(&self) -> &ElementHandle {
        self.inner.underlying()
    }
}

#[tokio::test]
async fn test_equality_resolves_through_wrapper_layers() {
    let session = MockSession::answering_null();
    let other_session = MockSession::answering_null();

    let element = session.element("e1");
    let twin = other_session.element("e1");

    // Two decorator layers deep; equality must resolve the whole chain.
    let wrapped = Highlighted {
        inner: Box::new(Highlighted {
            inner: Box::new(twin.clone()),
        }),
    };

    // Same id: equal regardless of session or wrapping.
    assert_eq!(element, twin);
    assert!(element.same_element(&wrapped));
    assert!(element.same_element(&twin));

    // Different id: never equal.
    assert_ne!(element, session.element("e2"));
    assert!(!element.same_element(&session.element("e2")));
}

#[test]
fn test_equal_handles_hash_identically() {
    fn hash_of(element: &ElementHandle) -> u64 {
        let mut hasher = DefaultHasher::new();
        element.hash(&mut hasher);
        hasher.finish()
    }

    let session = MockSession::answering_null();
    let mut described = session.element("e1");
    described.set_found_by("session 7", "id", "login");

    assert_eq!(hash_of(&session.element("e1")), hash_of(&described));
}

#[test]
fn test_serialized_handle_embeds_in_command_parameters() {
    let session = MockSession::answering_null();
    let element = session.element("e1");

    let command = Command::new("executeScript")
        .arg("script", "arguments[0].focus()")
        .arg("args", json!([element.to_json()]));

    assert_eq!(
        command.parameters()["args"][0],
        json!({
            "ELEMENT": "e1",
            W3C_KEY: "e1",
        })
    );
}
