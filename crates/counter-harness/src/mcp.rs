//! MCP (Model Context Protocol) server for the counter harness.
//!
//! Exposes a [`CounterSystem`] as a JSON-RPC 2.0 server, one request per
//! line. Every handler returns `Result<JsonValue, Fault>`; the fault decides
//! the JSON-RPC error code.

use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};
use thiserror::Error;

use sim_core::{Observable, RegisterPort};

use crate::{CounterSystem, HarnessConfig, HarnessError};

/// Why a request could not be served.
#[derive(Debug, Error)]
enum Fault {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid JSON-RPC version")]
    Version,
    #[error("Unknown method: {0}")]
    UnknownMethod(String),
    #[error("Missing or invalid '{0}'")]
    Param(&'static str),
    #[error("Unknown query path: {0}")]
    UnknownPath(String),
    #[error(transparent)]
    Harness(#[from] HarnessError),
}

impl Fault {
    const fn code(&self) -> i32 {
        match self {
            Fault::Parse(_) => -32700,
            Fault::Version => -32600,
            Fault::UnknownMethod(_) => -32601,
            Fault::Param(_) => -32602,
            Fault::UnknownPath(_) | Fault::Harness(_) => -32000,
        }
    }
}

#[derive(Deserialize)]
struct Request {
    jsonrpc: String,
    method: String,
    #[serde(default)]
    params: JsonValue,
    #[serde(default)]
    id: JsonValue,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Outcome {
    Result(JsonValue),
    Error { code: i32, message: String },
}

/// One response line.
#[derive(Serialize)]
struct Reply {
    jsonrpc: &'static str,
    #[serde(flatten)]
    outcome: Outcome,
    id: JsonValue,
}

impl Reply {
    fn new(id: JsonValue, result: Result<JsonValue, Fault>) -> Self {
        let outcome = match result {
            Ok(value) => Outcome::Result(value),
            Err(fault) => Outcome::Error {
                code: fault.code(),
                message: fault.to_string(),
            },
        };
        Self {
            jsonrpc: "2.0",
            outcome,
            id,
        }
    }
}

/// MCP server wrapping a headless counter system.
pub struct McpServer {
    system: CounterSystem,
}

impl McpServer {
    pub fn new(config: HarnessConfig) -> Result<Self, HarnessError> {
        Ok(Self {
            system: CounterSystem::new(config)?,
        })
    }

    #[must_use]
    pub fn system(&self) -> &CounterSystem {
        &self.system
    }

    /// Serve requests from `input` until EOF, one response line per request.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let reply = self.serve(line);
            serde_json::to_writer(&mut output, &reply)?;
            output.write_all(b"\n")?;
            output.flush()?;
        }
        Ok(())
    }

    fn serve(&mut self, line: &str) -> Reply {
        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => return Reply::new(JsonValue::Null, Err(Fault::Parse(e.to_string()))),
        };
        let result = if request.jsonrpc == "2.0" {
            self.dispatch(&request.method, &request.params)
        } else {
            Err(Fault::Version)
        };
        Reply::new(request.id, result)
    }

    fn dispatch(&mut self, method: &str, params: &JsonValue) -> Result<JsonValue, Fault> {
        let sys = &mut self.system;
        match method {
            "reset" => {
                sys.reset();
                Ok(json!({"status": "ok"}))
            }
            "write_reg" => {
                let address = byte_param(params, "address", 0x0F)?;
                let data = byte_param(params, "data", 0xFF)?;
                sys.write_reg(address, data)?;
                Ok(json!({"address": address, "data": data, "cycle": sys.elapsed().get()}))
            }
            "read_reg" => {
                let address = byte_param(params, "address", 0x0F)?;
                let data = sys.read_reg(address)?;
                Ok(json!({"address": address, "data": data, "cycle": sys.elapsed().get()}))
            }
            "set_inputs" => {
                let value = byte_param(params, "value", 0xFF)?;
                sys.set_inputs(value);
                Ok(json!({"inputs": value}))
            }
            "step_ticks" => {
                let count = match params.get("count") {
                    None => 1,
                    Some(count) => count.as_u64().ok_or(Fault::Param("count"))?,
                };
                sys.clock_cycles(count);
                Ok(json!({
                    "cycle": sys.elapsed().get(),
                    "value": sys.counter().value(),
                    "display": sys.display(),
                }))
            }
            "query" => {
                let path = params
                    .get("path")
                    .and_then(JsonValue::as_str)
                    .ok_or(Fault::Param("path"))?;
                let value = sys
                    .query(path)
                    .ok_or_else(|| Fault::UnknownPath(path.to_string()))?;
                Ok(json!({"path": path, "text": value.to_string(), "value": value}))
            }
            "query_paths" => Ok(json!(sys.query_paths())),
            _ => Err(Fault::UnknownMethod(method.to_string())),
        }
    }
}

fn byte_param(params: &JsonValue, key: &'static str, max: u8) -> Result<u8, Fault> {
    params
        .get(key)
        .and_then(JsonValue::as_u64)
        .filter(|&v| v <= u64::from(max))
        .map(|v| v as u8)
        .ok_or(Fault::Param(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> McpServer {
        McpServer::new(HarnessConfig::default()).expect("default config")
    }

    fn code(result: &Result<JsonValue, Fault>) -> Option<i32> {
        result.as_ref().err().map(Fault::code)
    }

    fn field(result: &Result<JsonValue, Fault>, key: &str) -> Option<u64> {
        result.as_ref().ok()?.get(key)?.as_u64()
    }

    #[test]
    fn unknown_method_returns_error() {
        let mut server = server();
        assert_eq!(code(&server.dispatch("nonexistent", &JsonValue::Null)), Some(-32601));
    }

    #[test]
    fn write_then_read_value() {
        let mut server = server();
        for _ in 0..2 {
            assert!(server.dispatch("write_reg", &json!({"address": 1, "data": 0})).is_ok());
        }
        let result = server.dispatch("read_reg", &json!({"address": 2}));
        assert_eq!(field(&result, "data"), Some(2));
    }

    #[test]
    fn wide_address_is_invalid_params() {
        let mut server = server();
        let result = server.dispatch("write_reg", &json!({"address": 16, "data": 0}));
        assert_eq!(code(&result), Some(-32602));
    }

    #[test]
    fn inputs_and_ticks_count_edges() {
        let mut server = server();
        server
            .dispatch("write_reg", &json!({"address": 3, "data": 1}))
            .expect("write CFG");
        server
            .dispatch("set_inputs", &json!({"value": 1}))
            .expect("set inputs");
        let result = server.dispatch("step_ticks", &json!({"count": 3}));
        assert_eq!(field(&result, "value"), Some(1));
    }

    #[test]
    fn step_ticks_defaults_to_one_tick() {
        let mut server = server();
        let start = server.system().elapsed().get();
        let result = server.dispatch("step_ticks", &json!({}));
        assert_eq!(field(&result, "cycle"), Some(start + 1));
    }

    #[test]
    fn step_ticks_rejects_bad_count() {
        let mut server = server();
        let start = server.system().elapsed();
        for count in [json!(-5), json!("10"), json!(1.5), JsonValue::Null] {
            let result = server.dispatch("step_ticks", &json!({ "count": count }));
            assert_eq!(code(&result), Some(-32602), "count {count}");
        }
        assert_eq!(server.system().elapsed(), start);
    }

    #[test]
    fn query_serializes_observable_value() {
        let mut server = server();
        let result = server.dispatch("query", &json!({"path": "counter.edge_mode"}));
        assert_eq!(
            result
                .as_ref()
                .ok()
                .and_then(|r| r.get("value"))
                .and_then(JsonValue::as_str),
            Some("NONE")
        );
        let result = server.dispatch("query", &json!({"path": "nope"}));
        assert_eq!(code(&result), Some(-32000));
    }

    #[test]
    fn run_answers_each_line() {
        let mut server = server();
        let input = concat!(
            "{\"jsonrpc\":\"2.0\",\"method\":\"reset\",\"id\":1}\n",
            "\n",
            "not json\n",
            "{\"jsonrpc\":\"1.0\",\"method\":\"reset\",\"id\":2}\n",
        );
        let mut output = Vec::new();
        server.run(input.as_bytes(), &mut output).expect("in-memory io");
        let lines: Vec<JsonValue> = String::from_utf8(output)
            .expect("utf8")
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["result"]["status"], "ok");
        assert!(lines[0].get("error").is_none());
        assert_eq!(lines[1]["error"]["code"], -32700);
        assert_eq!(lines[2]["error"]["code"], -32600);
        assert_eq!(lines[2]["id"], 2);
    }
}
