//! W3C WebDriver client for an Appium server.
//!
//! Speaks the JSON wire format over blocking HTTP. Replies are accepted in
//! both the W3C shape (`{"value": ...}` with an `error` field on failure)
//! and the legacy shape (`{"status": n, "sessionId": ..., "value": ...}`).

use reqwest::blocking::{Client, RequestBuilder};
use serde_json::{json, Map, Value};
use std::time::Duration;

use crate::driver::{AutomationDriver, ElementHandle};
use crate::locator::{ElementRect, Locator};
use crate::result::{ProbeError, ProbeResult};
use crate::session::Capabilities;
use crate::touch::{TouchAction, TouchStep};

/// W3C web element reference key
pub const W3C_ELEMENT_KEY: &str = "element-6066-11e4-a52f-4f8d1c5fbf4a";
const LEGACY_ELEMENT_KEY: &str = "ELEMENT";
const LEGACY_NO_SUCH_ELEMENT: i64 = 7;
const MOVE_DURATION_MS: u64 = 500;

/// Live Appium session
#[derive(Debug)]
pub struct AppiumDriver {
    base_url: String,
    session_id: String,
    client: Client,
}

impl AppiumDriver {
    /// Open a session on the server at `server_url`
    pub fn connect(
        server_url: &str,
        capabilities: &Capabilities,
        timeout: Duration,
    ) -> ProbeResult<Self> {
        let base_url = server_url.trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProbeError::session(format!("cannot build HTTP client: {e}")))?;

        tracing::info!(server = %base_url, app = %capabilities.app_package, "creating session");
        let reply = client
            .post(format!("{base_url}/session"))
            .json(&new_session_payload(capabilities))
            .send()
            .map_err(|e| ProbeError::session(format!("cannot reach {base_url}: {e}")))?;
        let status = reply.status().as_u16();
        let body = read_body(reply)?;
        let value = check_reply(status, body.clone(), None)
            .map_err(|e| ProbeError::session(format!("session refused: {e}")))?;
        let session_id = parse_session_id(&body, &value)?;
        tracing::info!(session = %session_id, "session created");

        Ok(Self {
            base_url,
            session_id,
            client,
        })
    }

    /// Server-assigned session id
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}/session/{}{path}", self.base_url, self.session_id)
    }

    fn element_url(&self, element: &ElementHandle, path: &str) -> String {
        self.url(&format!("/element/{}{path}", element.id))
    }

    fn call(&self, request: RequestBuilder, locator: Option<&Locator>) -> ProbeResult<Value> {
        let reply = request
            .send()
            .map_err(|e| ProbeError::driver(format!("request failed: {e}")))?;
        let status = reply.status().as_u16();
        check_reply(status, read_body(reply)?, locator)
    }
}

impl AutomationDriver for AppiumDriver {
    fn find_element(&self, locator: &Locator) -> ProbeResult<ElementHandle> {
        let value = self.call(
            self.client
                .post(self.url("/element"))
                .json(&locator_payload(locator)),
            Some(locator),
        )?;
        parse_element(&value)
    }

    fn find_elements(&self, locator: &Locator) -> ProbeResult<Vec<ElementHandle>> {
        let value = self.call(
            self.client
                .post(self.url("/elements"))
                .json(&locator_payload(locator)),
            None,
        )?;
        match value {
            Value::Array(items) => items.iter().map(parse_element).collect(),
            Value::Null => Ok(Vec::new()),
            other => Err(ProbeError::driver(format!(
                "expected element list, got {other}"
            ))),
        }
    }

    fn click(&self, element: &ElementHandle) -> ProbeResult<()> {
        let _ = self.call(
            self.client
                .post(self.element_url(element, "/click"))
                .json(&json!({})),
            None,
        )?;
        Ok(())
    }

    fn text(&self, element: &ElementHandle) -> ProbeResult<String> {
        let value = self.call(self.client.get(self.element_url(element, "/text")), None)?;
        match value {
            Value::String(text) => Ok(text),
            Value::Null => Ok(String::new()),
            other => Err(ProbeError::driver(format!("expected text, got {other}"))),
        }
    }

    fn attribute(&self, element: &ElementHandle, name: &str) -> ProbeResult<Option<String>> {
        let value = self.call(
            self.client
                .get(self.element_url(element, &format!("/attribute/{name}"))),
            None,
        )?;
        Ok(match value {
            Value::Null => None,
            Value::String(text) => Some(text),
            other => Some(other.to_string()),
        })
    }

    fn rect(&self, element: &ElementHandle) -> ProbeResult<ElementRect> {
        let value = self.call(self.client.get(self.element_url(element, "/rect")), None)?;
        parse_rect(&value)
    }

    fn perform(&self, action: &TouchAction) -> ProbeResult<()> {
        tracing::debug!(steps = action.steps().len(), "performing touch action");
        let _ = self.call(
            self.client
                .post(self.url("/actions"))
                .json(&actions_payload(action)),
            None,
        )?;
        Ok(())
    }

    fn quit(&self) -> ProbeResult<()> {
        let _ = self
            .call(self.client.delete(self.url("")), None)
            .map_err(|e| ProbeError::session(format!("cannot delete session: {e}")))?;
        tracing::info!(session = %self.session_id, "session deleted");
        Ok(())
    }
}

fn read_body(reply: reqwest::blocking::Response) -> ProbeResult<Value> {
    let text = reply
        .text()
        .map_err(|e| ProbeError::driver(format!("cannot read reply: {e}")))?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

/// `POST /session` body: W3C `alwaysMatch` plus legacy `desiredCapabilities`
#[must_use]
pub fn new_session_payload(capabilities: &Capabilities) -> Value {
    let mut always_match = Map::new();
    let mut desired = Map::new();
    for (name, value) in capabilities.entries() {
        let w3c_name = if name == "platformName" {
            name.to_string()
        } else {
            format!("appium:{name}")
        };
        let _ = always_match.insert(w3c_name, Value::from(value));
        let _ = desired.insert(name.to_string(), Value::from(value));
    }
    json!({
        "capabilities": { "alwaysMatch": always_match, "firstMatch": [{}] },
        "desiredCapabilities": desired,
    })
}

/// `POST /element(s)` body
#[must_use]
pub fn locator_payload(locator: &Locator) -> Value {
    json!({ "using": locator.strategy(), "value": locator.value() })
}

/// `POST /actions` body for a touch pointer.
///
/// `MoveBy` becomes a `pointerMove` relative to the current pointer position.
#[must_use]
pub fn actions_payload(action: &TouchAction) -> Value {
    let steps: Vec<Value> = action
        .steps()
        .iter()
        .flat_map(|step| match *step {
            TouchStep::Press { x, y } => vec![
                json!({"type": "pointerMove", "duration": 0, "origin": "viewport", "x": x, "y": y}),
                json!({"type": "pointerDown", "button": 0}),
            ],
            TouchStep::MoveBy { dx, dy } => vec![json!({
                "type": "pointerMove",
                "duration": MOVE_DURATION_MS,
                "origin": "pointer",
                "x": dx,
                "y": dy,
            })],
            TouchStep::Release => vec![json!({"type": "pointerUp", "button": 0})],
        })
        .collect();
    json!({
        "actions": [{
            "type": "pointer",
            "id": "finger1",
            "parameters": { "pointerType": "touch" },
            "actions": steps,
        }]
    })
}

/// Unwrap a reply's `value`, turning error replies into [`ProbeError`].
///
/// A "no such element" failure becomes `ElementLookup` when `locator` is given.
pub fn check_reply(status: u16, body: Value, locator: Option<&Locator>) -> ProbeResult<Value> {
    let legacy_status = body.get("status").and_then(Value::as_i64).unwrap_or(0);
    let value = match body {
        Value::Object(mut map) => map.remove("value").unwrap_or(Value::Null),
        other => other,
    };

    let w3c_error = value
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string);
    if (200..300).contains(&status) && w3c_error.is_none() && legacy_status == 0 {
        return Ok(value);
    }

    let message = value
        .get("message")
        .and_then(Value::as_str)
        .map_or_else(|| value.to_string(), str::to_string);
    let no_such_element = w3c_error.as_deref() == Some("no such element")
        || legacy_status == LEGACY_NO_SUCH_ELEMENT;

    match locator {
        Some(locator) if no_such_element => Err(ProbeError::ElementLookup {
            locator: locator.clone(),
            message,
        }),
        _ => {
            let kind = w3c_error.unwrap_or_else(|| format!("HTTP {status}"));
            Err(ProbeError::driver(format!("{kind}: {message}")))
        }
    }
}

/// Session id from a new-session reply, W3C or legacy
pub fn parse_session_id(body: &Value, value: &Value) -> ProbeResult<String> {
    value
        .get("sessionId")
        .or_else(|| body.get("sessionId"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ProbeError::session("reply carries no session id"))
}

/// Element reference from a find reply
pub fn parse_element(value: &Value) -> ProbeResult<ElementHandle> {
    value
        .get(W3C_ELEMENT_KEY)
        .or_else(|| value.get(LEGACY_ELEMENT_KEY))
        .and_then(Value::as_str)
        .map(ElementHandle::new)
        .ok_or_else(|| ProbeError::driver(format!("not an element reference: {value}")))
}

/// Rectangle from a `/rect` reply; fractional pixels are rounded
pub fn parse_rect(value: &Value) -> ProbeResult<ElementRect> {
    let field = |name: &str| -> ProbeResult<i32> {
        value
            .get(name)
            .and_then(Value::as_f64)
            .map(|v| v.round() as i32)
            .ok_or_else(|| ProbeError::driver(format!("rect reply lacks {name}: {value}")))
    };
    Ok(ElementRect::new(
        field("x")?,
        field("y")?,
        field("width")?,
        field("height")?,
    ))
}
