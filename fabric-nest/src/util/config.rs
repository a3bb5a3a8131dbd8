use serde::{Deserialize, Serialize};

/// Configuration shared by all heuristic invocations.
/// Passed explicitly into every run, the engine keeps no global state.
#[derive(Clone, Debug, Copy, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Run independent heuristics on separate threads (results keep their requested order)
    #[serde(default)]
    pub parallel: bool,
    /// Number of integer grid steps per fabric unit handed to the rectangle packing delegate
    #[serde(default = "default_delegate_resolution")]
    pub delegate_resolution: f64,
}

fn default_delegate_resolution() -> f64 {
    100.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            delegate_resolution: default_delegate_resolution(),
        }
    }
}
