//! Capture event vocabulary and the host event table.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Abstract event tags understood by the capture script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptureKind {
    /// A tool finished executing
    PostTool,
    /// The user submitted a prompt
    UserPrompt,
    /// A host session started
    SessionStart,
}

impl fmt::Display for CaptureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl CaptureKind {
    /// Tag passed to the capture script as its event argument.
    pub fn tag(&self) -> &'static str {
        match self {
            CaptureKind::PostTool => "post-tool",
            CaptureKind::UserPrompt => "user-prompt",
            CaptureKind::SessionStart => "session-start",
        }
    }

    /// Map a host-native event name. Anything not in [`HOST_EVENTS`] is `None`.
    pub fn from_host_event(name: &str) -> Option<Self> {
        match name {
            "tool.execute.after" => Some(CaptureKind::PostTool),
            "session.start" => Some(CaptureKind::SessionStart),
            "user.prompt.submitted" => Some(CaptureKind::UserPrompt),
            _ => None,
        }
    }
}

/// Host event names subscribed at registration.
pub const HOST_EVENTS: &[&str] = &[
    "tool.execute.after",
    "session.start",
    "user.prompt.submitted",
];

/// A routed event with its opaque payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureEvent {
    pub kind: CaptureKind,
    pub payload: Option<Value>,
}

impl CaptureEvent {
    pub fn new(kind: CaptureKind, payload: Option<Value>) -> Self {
        Self { kind, payload }
    }

    /// JSON written to the script's stdin. An absent or null payload becomes `{}`.
    pub fn serialized_payload(&self) -> serde_json::Result<String> {
        match &self.payload {
            None | Some(Value::Null) => Ok("{}".to_string()),
            Some(payload) => serde_json::to_string(payload),
        }
    }
}
