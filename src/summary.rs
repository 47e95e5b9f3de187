//! Header figures. These never fail: a broken figure shows as `0`.

use crate::error::RequestResult;
use crate::gateway::ExplorerApi;
use crate::types::NetworkSummary;

fn or_zero(what: &str, r: RequestResult<String>) -> String {
    r.unwrap_or_else(|e| {
        log::warn!("{what} unavailable, showing 0: {e}");
        "0".to_string()
    })
}

pub async fn fetch_summary(api: &dyn ExplorerApi) -> NetworkSummary {
    let (archived, contracts, coins) = futures::join!(
        api.get_archived_storage(),
        api.get_total_amount_of_contracts(),
        api.get_total_amount_of_coins(),
    );
    NetworkSummary {
        archived_storage: or_zero("archived storage", archived),
        total_contracts: or_zero("total contracts", contracts),
        total_coins: or_zero("total coins", coins),
    }
}
