//! MCP stdio server
//!
//! Reads JSON-RPC requests line by line, dispatches to handlers, writes one
//! response line per request. Requests are handled one at a time.

use anyhow::Context;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use knowair_core::WeatherService;

use super::tools;
use super::types::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND,
    PARSE_ERROR, ToolCallParams,
};

const SERVER_NAME: &str = "knowair-weather";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Run the MCP server on the process's stdin/stdout until stdin closes.
pub async fn serve_stdio(service: WeatherService) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(&service, stdin, stdout).await
}

pub async fn serve<R, W>(service: &WeatherService, input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    tracing::info!(name = SERVER_NAME, version = SERVER_VERSION, "MCP server listening on stdio");

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("Failed to read from stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        if let Some(response) = handle_line(service, &line).await {
            write_response(&mut output, &response).await?;
        }
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}

/// Handle one raw line. `None` means nothing should be written back.
pub async fn handle_line(service: &WeatherService, line: &str) -> Option<JsonRpcResponse> {
    let value: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "unparseable request");
            return Some(JsonRpcResponse::error(Value::Null, PARSE_ERROR, e.to_string()));
        }
    };

    // Valid JSON that isn't a request object still gets its id back when it has one.
    let request: JsonRpcRequest = match JsonRpcRequest::deserialize(&value) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "invalid request");
            let id = value.get("id").cloned().unwrap_or(Value::Null);
            return Some(JsonRpcResponse::error(id, INVALID_REQUEST, e.to_string()));
        }
    };

    // Notifications don't get responses
    let Some(id) = request.id.clone() else {
        tracing::debug!(method = %request.method, "notification");
        return None;
    };
    if request.method.starts_with("notifications/") {
        return None;
    }

    Some(handle_request(service, id, &request).await)
}

async fn handle_request(
    service: &WeatherService,
    id: Value,
    req: &JsonRpcRequest,
) -> JsonRpcResponse {
    tracing::debug!(method = %req.method, "request");
    match req.method.as_str() {
        "initialize" => handle_initialize(id, &req.params),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => JsonRpcResponse::success(
            id,
            json!({ "tools": tools::list_tools(&service.config().limits) }),
        ),
        "tools/call" => handle_tools_call(service, id, &req.params).await,
        _ => JsonRpcResponse::error(
            id,
            METHOD_NOT_FOUND,
            format!("Unknown method: {}", req.method),
        ),
    }
}

fn handle_initialize(id: Value, params: &Value) -> JsonRpcResponse {
    let protocol_version = params
        .get("protocolVersion")
        .and_then(Value::as_str)
        .unwrap_or(PROTOCOL_VERSION);

    JsonRpcResponse::success(
        id,
        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION
            }
        }),
    )
}

async fn handle_tools_call(service: &WeatherService, id: Value, params: &Value) -> JsonRpcResponse {
    let call_params: ToolCallParams = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string()),
    };

    let result = tools::call_tool(service, &call_params.name, &call_params.arguments).await;
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
    }
}

async fn write_response<W>(output: &mut W, response: &JsonRpcResponse) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut bytes = serde_json::to_vec(response).context("Failed to encode MCP response")?;
    bytes.push(b'\n');
    output
        .write_all(&bytes)
        .await
        .context("Failed to write MCP response")?;
    output.flush().await.context("Failed to flush stdout")?;
    Ok(())
}
