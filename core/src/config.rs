//! Debugger configuration
//!
//! A small section struct intended to be embedded in the host's TOML
//! config (or filled from its CLI flags, e.g. `-d <port>`).

use serde::{Deserialize, Serialize};

fn default_breakpoint_name() -> String {
    "breakpoint".to_string()
}

fn default_prompt() -> String {
    "\n> ".to_string()
}

/// Debug bridge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugConfig {
    /// TCP port for the debugger connection (default: 0 = disabled)
    #[serde(default)]
    pub port: u16,
    /// Name of the global callable registered in the script environment
    /// (default: "breakpoint")
    #[serde(default = "default_breakpoint_name")]
    pub breakpoint_name: String,
    /// Prompt sent to the client at the start of each REPL turn
    /// (default: "\n> "; engine integrations typically use "\nlua> " etc.)
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            port: 0,
            breakpoint_name: default_breakpoint_name(),
            prompt: default_prompt(),
        }
    }
}
