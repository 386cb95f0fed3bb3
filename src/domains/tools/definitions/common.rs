//! Helpers shared by every TomTom tool: argument parsing and the result
//! envelopes returned to clients.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, JsonObject},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::domains::tomtom::TomTomResult;
use crate::domains::tomtom::map::StaticMapImage;
use crate::domains::tools::ToolError;

/// Deserialize routed tool arguments; failures become `invalid_params`.
pub fn parse_args<P: DeserializeOwned>(args: JsonObject) -> Result<P, McpError> {
    serde_json::from_value(Value::Object(args))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Upstream JSON passed through as pretty-printed text.
pub fn json_result(body: &Value) -> CallToolResult {
    let text = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
    CallToolResult::success(vec![Content::text(text)])
}

/// `{"error": "<message>"}` with the error flag set.
pub fn error_result(err: &ToolError) -> CallToolResult {
    let envelope = json!({ "error": err.to_string() });
    CallToolResult::error(vec![Content::text(envelope.to_string())])
}

/// Image content block for a rendered static map.
pub fn image_result(image: StaticMapImage) -> CallToolResult {
    CallToolResult::success(vec![Content::image(image.base64, image.content_type)])
}

/// Wrap a service outcome in the matching envelope, logging either way.
pub fn tool_result(tool: &str, outcome: TomTomResult<Value>) -> CallToolResult {
    match outcome {
        Ok(body) => {
            info!("{} completed", tool);
            json_result(&body)
        }
        Err(err) => failure(tool, err.into()),
    }
}

/// Error envelope for a failed call.
pub fn failure(tool: &str, err: ToolError) -> CallToolResult {
    warn!("{} failed: {}", tool, err);
    error_result(&err)
}

/// Deserialize HTTP tool arguments.
#[cfg(feature = "http")]
pub fn parse_http_args<P: DeserializeOwned>(arguments: Value) -> Result<P, String> {
    serde_json::from_value(arguments)
        .map_err(|e| ToolError::invalid_arguments(e.to_string()).to_string())
}

/// JSON form of a tool result for the HTTP transport.
#[cfg(feature = "http")]
pub fn http_response(result: CallToolResult) -> Value {
    json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    })
}
