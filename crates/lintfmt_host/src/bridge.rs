//! Synchronous Node subprocess bridge to the real tools.
//!
//! ESLint and Prettier are Node packages, so each capability call spawns a
//! short-lived `node -e` process running a fixed bridge script. The request
//! (module id, text, options) is written as JSON to the child's stdin and
//! the reply is read as JSON from its stdout. A non-zero exit propagates the
//! tool's own error text; nothing is cached between calls.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde_json::{Value, json};
use tracing::debug;

use crate::{FixReport, FormatterHost, LinterHost, ToolError, ToolKind};

/// What the bridge script passes to Node's `require`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleSpec {
    /// A resolved filesystem path to an installation.
    Path(PathBuf),
    /// A bare package name, left to Node's own resolution.
    Package(&'static str),
}

impl ModuleSpec {
    /// The identifier handed to `require`.
    pub fn require_id(&self) -> String {
        match self {
            ModuleSpec::Path(path) => path.to_string_lossy().into_owned(),
            ModuleSpec::Package(name) => (*name).to_string(),
        }
    }
}

const ESLINT_EXECUTE_SCRIPT: &str = r#"
const fs = require('fs');
const req = JSON.parse(fs.readFileSync(0, 'utf8'));
const eslint = require(req.module);
const engine = new eslint.CLIEngine(req.options);
const report = engine.executeOnText(req.text, req.filePath);
const [result] = report.results || [];
const output = result && typeof result.output === 'string' ? result.output : req.text;
process.stdout.write(JSON.stringify({ output, errorCount: report.errorCount || 0 }));
"#;

const ESLINT_CONFIG_SCRIPT: &str = r#"
const fs = require('fs');
const req = JSON.parse(fs.readFileSync(0, 'utf8'));
const eslint = require(req.module);
const engine = new eslint.CLIEngine({ useEslintrc: true });
const config = engine.getConfigForFile(req.filePath);
process.stdout.write(JSON.stringify({ config }));
"#;

const PRETTIER_FORMAT_SCRIPT: &str = r#"
const fs = require('fs');
const req = JSON.parse(fs.readFileSync(0, 'utf8'));
const prettier = require(req.module);
const output = prettier.format(req.text, req.options);
process.stdout.write(JSON.stringify({ output }));
"#;

const PRETTIER_RESOLVE_SCRIPT: &str = r#"
const fs = require('fs');
const req = JSON.parse(fs.readFileSync(0, 'utf8'));
const prettier = require(req.module);
const config = prettier.resolveConfig && prettier.resolveConfig.sync
  ? prettier.resolveConfig.sync(req.filePath)
  : null;
process.stdout.write(JSON.stringify({ config }));
"#;

/// Runs one bridge script to completion and decodes its reply.
fn run_bridge(tool: ToolKind, script: &str, request: &Value) -> Result<Value, ToolError> {
    debug!("spawning {} bridge", tool);

    let mut child = Command::new("node")
        .arg("-e")
        .arg(script)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ToolError::spawn(tool, e))?;

    let payload =
        serde_json::to_vec(request).map_err(|e| ToolError::protocol(tool, e.to_string()))?;
    if let Some(stdin) = child.stdin.as_mut() {
        stdin
            .write_all(&payload)
            .map_err(|e| ToolError::spawn(tool, e))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| ToolError::spawn(tool, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ToolError::execution(extract_tool_error(&stderr, tool)));
    }

    serde_json::from_slice(&output.stdout).map_err(|e| ToolError::protocol(tool, e.to_string()))
}

/// Pulls the tool's own error message out of Node's stderr dump.
///
/// An uncaught throw prints the failing line, then `Error: <message>`, then
/// a stack trace; only the message line is worth propagating.
fn extract_tool_error(stderr: &str, tool: ToolKind) -> String {
    for line in stderr.lines() {
        let trimmed = line.trim();
        if let Some(idx) = trimmed.find("Error:") {
            return trimmed[idx + "Error:".len()..].trim().to_string();
        }
    }
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        format!("{} exited unsuccessfully with no diagnostic output", tool)
    } else {
        trimmed.to_string()
    }
}

/// Drives an ESLint installation through the bridge.
pub struct NodeLinter {
    module: ModuleSpec,
}

impl NodeLinter {
    /// Creates a host for the given installation.
    pub fn new(module: ModuleSpec) -> Self {
        Self { module }
    }
}

impl LinterHost for NodeLinter {
    fn execute_with_fix(
        &self,
        text: &str,
        options: &Value,
        file_path: Option<&Path>,
    ) -> Result<FixReport, ToolError> {
        let request = json!({
            "module": self.module.require_id(),
            "text": text,
            "options": options,
            "filePath": file_path.map(|p| p.to_string_lossy().into_owned()),
        });
        let reply = run_bridge(ToolKind::Eslint, ESLINT_EXECUTE_SCRIPT, &request)?;
        serde_json::from_value(reply).map_err(|e| ToolError::protocol(ToolKind::Eslint, e.to_string()))
    }

    fn config_for_file(&self, file_path: Option<&Path>) -> Result<Value, ToolError> {
        let request = json!({
            "module": self.module.require_id(),
            "filePath": file_path.map(|p| p.to_string_lossy().into_owned()),
        });
        let mut reply = run_bridge(ToolKind::Eslint, ESLINT_CONFIG_SCRIPT, &request)?;
        reply
            .get_mut("config")
            .map(Value::take)
            .ok_or_else(|| ToolError::protocol(ToolKind::Eslint, "reply carried no config"))
    }
}

/// Drives a Prettier installation through the bridge.
pub struct NodeFormatter {
    module: ModuleSpec,
}

impl NodeFormatter {
    /// Creates a host for the given installation.
    pub fn new(module: ModuleSpec) -> Self {
        Self { module }
    }
}

impl FormatterHost for NodeFormatter {
    fn format(&self, text: &str, options: &Value) -> Result<String, ToolError> {
        let request = json!({
            "module": self.module.require_id(),
            "text": text,
            "options": options,
        });
        let reply = run_bridge(ToolKind::Prettier, PRETTIER_FORMAT_SCRIPT, &request)?;
        match reply.get("output").and_then(Value::as_str) {
            Some(output) => Ok(output.to_string()),
            None => Err(ToolError::protocol(
                ToolKind::Prettier,
                "reply carried no output",
            )),
        }
    }

    fn resolve_config(&self, file_path: &Path) -> Result<Option<Value>, ToolError> {
        let request = json!({
            "module": self.module.require_id(),
            "filePath": file_path.to_string_lossy(),
        });
        let mut reply = run_bridge(ToolKind::Prettier, PRETTIER_RESOLVE_SCRIPT, &request)?;
        match reply.get_mut("config").map(Value::take) {
            None | Some(Value::Null) => Ok(None),
            Some(config) => Ok(Some(config)),
        }
    }
}
