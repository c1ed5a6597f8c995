use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An active validator as reported by `suix_getLatestSuiSystemState`.
///
/// Numeric fields are kept as the decimal strings the node sends so that a
/// record can be printed back without any normalization. Only
/// `next_epoch_gas_price`, `next_epoch_stake` and `voting_power` are ever
/// parsed, and that happens in the gas aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatorRecord {
    pub sui_address: String,
    pub protocol_pubkey_bytes: String,
    pub network_pubkey_bytes: String,
    pub worker_pubkey_bytes: String,
    pub proof_of_possession_bytes: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub project_url: String,
    pub net_address: String,
    pub p2p_address: String,
    pub primary_address: String,
    pub worker_address: String,
    pub next_epoch_protocol_pubkey_bytes: Option<String>,
    pub next_epoch_proof_of_possession: Option<String>,
    pub next_epoch_network_pubkey_bytes: Option<String>,
    pub next_epoch_worker_pubkey_bytes: Option<String>,
    pub next_epoch_net_address: Option<String>,
    pub next_epoch_p2p_address: Option<String>,
    pub next_epoch_primary_address: Option<String>,
    pub next_epoch_worker_address: Option<String>,
    pub voting_power: String,
    pub operation_cap_id: String,
    pub gas_price: String,
    pub commission_rate: String,
    pub next_epoch_stake: String,
    pub next_epoch_gas_price: String,
    pub next_epoch_commission_rate: String,
    pub staking_pool_id: String,
    pub staking_pool_activation_epoch: String,
    pub staking_pool_deactivation_epoch: Option<String>,
    pub staking_pool_sui_balance: String,
    pub rewards_pool: String,
    pub pool_token_balance: String,
    pub pending_stake: String,
    pub pending_total_sui_withdraw: String,
    pub pending_pool_token_withdraw: String,
    pub exchange_rates_id: String,
    pub exchange_rates_size: String,
    /// Fields this tool does not know about, kept so listings stay lossless.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn validator_json() -> Value {
        json!({
            "suiAddress": "0x4fffd0005522be4bc029724c7f0f6ed7093a6bf3a09b90e62f61dc15181e1a3e",
            "name": "Mysten-1",
            "votingPower": "188",
            "gasPrice": "1000",
            "nextEpochStake": "181817386540521431",
            "nextEpochGasPrice": "00750",
            "nextEpochNetAddress": null,
            "stakingPoolDeactivationEpoch": null,
            "nextEpochP2pAddress": "/dns/mysten-1.example/udp/8084",
            "someFutureField": { "nested": [1, 2, 3] }
        })
    }

    #[test]
    fn consumed_numbers_round_trip_verbatim() {
        let record: ValidatorRecord = serde_json::from_value(validator_json()).unwrap();
        assert_eq!(record.next_epoch_gas_price, "00750");
        assert_eq!(record.next_epoch_stake, "181817386540521431");
        assert_eq!(record.voting_power, "188");

        let encoded = serde_json::to_value(&record).unwrap();
        assert_eq!(encoded["nextEpochGasPrice"], "00750");
        assert_eq!(encoded["nextEpochStake"], "181817386540521431");
        assert_eq!(encoded["votingPower"], "188");
    }

    #[test]
    fn optional_fields_distinguish_present_from_null() {
        let record: ValidatorRecord = serde_json::from_value(validator_json()).unwrap();
        assert_eq!(record.next_epoch_net_address, None);
        assert_eq!(record.staking_pool_deactivation_epoch, None);
        assert_eq!(record.next_epoch_worker_address, None);
        assert_eq!(
            record.next_epoch_p2p_address.as_deref(),
            Some("/dns/mysten-1.example/udp/8084")
        );

        let encoded = serde_json::to_value(&record).unwrap();
        assert!(encoded["nextEpochNetAddress"].is_null());
    }

    #[test]
    fn unknown_fields_are_kept() {
        let record: ValidatorRecord = serde_json::from_value(validator_json()).unwrap();
        assert_eq!(record.other["someFutureField"], json!({ "nested": [1, 2, 3] }));

        let encoded = serde_json::to_value(&record).unwrap();
        assert_eq!(encoded["someFutureField"], json!({ "nested": [1, 2, 3] }));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let record: ValidatorRecord = serde_json::from_value(json!({ "name": "bare" })).unwrap();
        assert_eq!(record.name, "bare");
        assert_eq!(record.next_epoch_gas_price, "");
        assert!(record.other.is_empty());
    }
}
