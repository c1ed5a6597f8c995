use serde::{Deserialize, Serialize};

use crate::validator::ValidatorRecord;

/// The subset of `SuiSystemStateSummary` this tool reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemState {
    pub epoch: Option<String>,
    pub protocol_version: Option<String>,
    pub reference_gas_price: Option<String>,
    pub total_stake: Option<String>,
    #[serde(default)]
    pub active_validators: Vec<ValidatorRecord>,
}
