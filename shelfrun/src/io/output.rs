use crate::config::RunConfig;
use crate::summary::SummaryRow;
use fabric_nest::io::ext_repr::{ExtInput, ExtPackingResult};
use serde::{Deserialize, Serialize};

/// Everything a single invocation of the runner produced, written to `<stem>_summary.json`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RunOutput {
    pub input: ExtInput,
    pub config: RunConfig,
    pub summary: Vec<SummaryRow>,
    pub results: Vec<ExtPackingResult>,
    pub run_time_ms: u64,
}
