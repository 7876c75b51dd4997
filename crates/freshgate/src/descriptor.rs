//! Request descriptor extraction.
//!
//! Callers declare the request attributes in plain headers (`timestamp`,
//! `appKey`, `sign`, …).  This runs once per request before the gate chain and
//! attaches the result to the context; gates only ever read it.

use freshgate_kernel::gateway::{GatewayRequest, RequestDescriptor};

pub const MODULE_HEADER: &str = "module";
pub const METHOD_HEADER: &str = "method";
pub const RPC_TYPE_HEADER: &str = "rpctype";
pub const SIGN_HEADER: &str = "sign";
pub const TIMESTAMP_HEADER: &str = "timestamp";
pub const APP_KEY_HEADER: &str = "appkey";
pub const PATH_HEADER: &str = "path";

/// Build a descriptor from the request headers.
///
/// Returns `None` when the caller sent none of the descriptor headers.  Header
/// values are kept verbatim, blank ones included.
pub fn from_headers(request: &GatewayRequest) -> Option<RequestDescriptor> {
    let get = |name: &str| request.header(name).map(str::to_string);

    let descriptor = RequestDescriptor {
        module: get(MODULE_HEADER),
        method: get(METHOD_HEADER),
        rpc_type: get(RPC_TYPE_HEADER),
        sign: get(SIGN_HEADER),
        timestamp: get(TIMESTAMP_HEADER),
        app_key: get(APP_KEY_HEADER),
        path: get(PATH_HEADER),
    };

    (descriptor != RequestDescriptor::default()).then_some(descriptor)
}
