//! Core data types for the gateway kernel contract.
//!
//! These types are shared by every [`Gate`](super::gate::Gate) and
//! [`Next`](super::gate::Next) implementation and carry no runtime
//! dependencies beyond `serde` and `std`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─────────────────────────────────────────────────────────────────────────────
// HTTP primitives
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP method, covering the standard verbs used in REST and proxy scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// Case-insensitive parse from a string slice.
    pub fn from_str_ci(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "PATCH" => Some(HttpMethod::Patch),
            "DELETE" => Some(HttpMethod::Delete),
            "HEAD" => Some(HttpMethod::Head),
            "OPTIONS" => Some(HttpMethod::Options),
            _ => None,
        }
    }

    /// Return the standard uppercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request / Response
// ─────────────────────────────────────────────────────────────────────────────

/// An inbound request flowing through the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayRequest {
    /// Unique identifier for correlating this request across logs.
    pub id: String,
    /// Request path, e.g. `/order/create`.
    pub path: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// HTTP headers (header names are lowercased).
    pub headers: HashMap<String, String>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl GatewayRequest {
    /// Construct a minimal request with the given id, path, and method.
    pub fn new(id: impl Into<String>, path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            method,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Builder helper: attach a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into().to_lowercase(), value.into());
        self
    }

    /// Builder helper: set the body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }
}

/// A response produced by a gate's denial handler or by the next stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// HTTP status code (100–599).
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl GatewayResponse {
    /// Construct a response with an empty body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Builder helper: attach a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into().to_lowercase(), value.into());
        self
    }

    /// Builder helper: set the body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request descriptor
// ─────────────────────────────────────────────────────────────────────────────

/// Structured view of the caller-declared request attributes.
///
/// Produced once per request by the descriptor extraction step before any
/// gate runs, and read-only afterwards.  Every field is optional because the
/// caller may omit any of them; each gate decides what a missing field means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDescriptor {
    /// Target service module.
    pub module: Option<String>,
    /// Target method within the module.
    pub method: Option<String>,
    /// Downstream protocol (`http`, `dubbo`, …).
    pub rpc_type: Option<String>,
    /// Caller signature. Not verified by the freshness gate.
    pub sign: Option<String>,
    /// Caller-declared send time, `yyyy-MM-dd HH:mm:ss` local time.
    pub timestamp: Option<String>,
    /// Caller application key.
    pub app_key: Option<String>,
    /// Declared request path.
    pub path: Option<String>,
}

impl RequestDescriptor {
    /// Builder helper: set the caller timestamp.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Builder helper: set the caller application key.
    pub fn with_app_key(mut self, app_key: impl Into<String>) -> Self {
        self.app_key = Some(app_key.into());
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request context
// ─────────────────────────────────────────────────────────────────────────────

/// Per-request context handed to every gate.
///
/// The descriptor is a typed field rather than a keyed attribute so a gate can
/// never look it up under the wrong name.  `None` means the extraction step
/// did not run or produced nothing; gates that need it must deny.
#[derive(Debug, Clone)]
pub struct GatewayContext {
    /// The inbound request.
    pub request: GatewayRequest,
    /// Structured caller attributes, if extracted.
    pub descriptor: Option<RequestDescriptor>,
}

impl GatewayContext {
    /// Create a context with no descriptor attached.
    pub fn new(request: GatewayRequest) -> Self {
        Self {
            request,
            descriptor: None,
        }
    }

    /// Builder helper: attach the request descriptor.
    pub fn with_descriptor(mut self, descriptor: RequestDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    /// The caller timestamp, if a descriptor is attached and carries one.
    pub fn timestamp(&self) -> Option<&str> {
        self.descriptor.as_ref()?.timestamp.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_case_insensitive() {
        let req = GatewayRequest::new("r1", "/order", HttpMethod::Get)
            .with_header("TimeStamp", "2024-01-01 00:00:00");
        assert_eq!(req.header("timestamp"), Some("2024-01-01 00:00:00"));
        assert_eq!(req.header("TIMESTAMP"), Some("2024-01-01 00:00:00"));
        assert_eq!(req.header("sign"), None);
    }

    #[test]
    fn context_timestamp_requires_descriptor() {
        let req = GatewayRequest::new("r1", "/order", HttpMethod::Post);
        let ctx = GatewayContext::new(req.clone());
        assert_eq!(ctx.timestamp(), None);

        let ctx = GatewayContext::new(req.clone()).with_descriptor(RequestDescriptor::default());
        assert_eq!(ctx.timestamp(), None);

        let ctx = GatewayContext::new(req)
            .with_descriptor(RequestDescriptor::default().with_timestamp("2024-01-01 00:00:00"));
        assert_eq!(ctx.timestamp(), Some("2024-01-01 00:00:00"));
    }

    #[test]
    fn method_parse_round_trips_known_verbs() {
        assert_eq!(HttpMethod::from_str_ci("post"), Some(HttpMethod::Post));
        assert_eq!(HttpMethod::from_str_ci("TRACE"), None);
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn descriptor_deserializes_camel_case() {
        let d: RequestDescriptor = serde_json::from_str(
            r#"{"appKey":"k1","rpcType":"http","timestamp":"2024-01-01 00:00:00"}"#,
        )
        .unwrap();
        assert_eq!(d.app_key.as_deref(), Some("k1"));
        assert_eq!(d.rpc_type.as_deref(), Some("http"));
        assert_eq!(d.sign, None);
    }
}
