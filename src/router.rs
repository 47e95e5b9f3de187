//! Page routes for the explorer.
//!
//! Routes mirror the explorer's page paths and can be given on the command
//! line to open a page directly:
//!
//! - `storx://blocks/<height>` - block detail
//! - `storx://transactions/<id>` - transaction detail
//! - `storx://storageContractDetails?contractHash=<h>&fileUrl=<f>` - contract detail
//! - `storx://wallet-details/<address>` - wallet detail
//! - `storx://stored-files`, `storx://wallets`, `storx://` (explorer)
//!
//! The scheme is optional (`/blocks/42` and `#/blocks/42` work too) and
//! case-insensitive. Detail routes keep a missing or malformed parameter as
//! `None`; the page then renders its not-found state.

/// Extract path after storx:// scheme (case-insensitive, handles slash variants)
#[inline]
fn after_scheme(raw: &str) -> Option<&str> {
    let s = raw.trim();
    let rest = if let Some(pos) = s.find("://") {
        if !s[..pos].eq_ignore_ascii_case("storx") {
            return None;
        }
        &s[pos + 3..]
    } else if s.get(..6).is_some_and(|p| p.eq_ignore_ascii_case("storx:")) {
        &s[6..]
    } else {
        return None;
    };
    Some(rest.trim_start_matches('/'))
}

/// Split `path?query#frag` into path and query.
fn split_query(s: &str) -> (&str, &str) {
    let s = s.split('#').next().unwrap_or("");
    match s.split_once('?') {
        Some((path, query)) => (path, query),
        None => (s, ""),
    }
}

/// First value of `name` in a `k=v&k=v` query, percent-decoded.
fn query_param(query: &str, name: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == name)
        .and_then(|(_, v)| {
            let v = v.replace('+', " ");
            urlencoding::decode(&v).ok().map(|c| c.into_owned())
        })
        .filter(|v| !v.is_empty())
}

fn decode_segment(seg: Option<&str>) -> Option<String> {
    seg.and_then(|s| urlencoding::decode(s).ok())
        .map(|c| c.into_owned())
        .filter(|s| !s.is_empty())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// Block strip + recent transactions
    Explorer,
    StoredFiles,
    Wallets,
    Block { height: Option<u64> },
    Transaction { id: Option<String> },
    ContractDetails {
        contract_hash: Option<String>,
        file_url: Option<String>,
    },
    WalletDetails { address: Option<String> },
}

impl Route {
    /// Top-level pages are reachable from the tab bar; the rest are detail pages.
    pub fn is_top_level(&self) -> bool {
        matches!(self, Route::Explorer | Route::StoredFiles | Route::Wallets)
    }

    /// Inverse of [`parse`], used for the header breadcrumb.
    pub fn to_path(&self) -> String {
        let enc = |s: &Option<String>| {
            s.as_deref()
                .map(|v| urlencoding::encode(v).into_owned())
                .unwrap_or_default()
        };
        match self {
            Route::Explorer => "/".to_string(),
            Route::StoredFiles => "/stored-files".to_string(),
            Route::Wallets => "/wallets".to_string(),
            Route::Block { height } => format!(
                "/blocks/{}",
                height.map(|h| h.to_string()).unwrap_or_default()
            ),
            Route::Transaction { id } => format!("/transactions/{}", enc(id)),
            Route::ContractDetails {
                contract_hash,
                file_url,
            } => format!(
                "/storageContractDetails?contractHash={}&fileUrl={}",
                enc(contract_hash),
                enc(file_url)
            ),
            Route::WalletDetails { address } => format!("/wallet-details/{}", enc(address)),
        }
    }
}

/// Parse a route. Returns `None` for other schemes and unknown pages.
pub fn parse(raw: &str) -> Option<Route> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(Route::Explorer);
    }

    let rest = if s.contains("://") || s.to_ascii_lowercase().starts_with("storx:") {
        after_scheme(s)?
    } else if let Some(r) = s.strip_prefix("#/") {
        r
    } else {
        s.trim_start_matches('/')
    };

    let (path, query) = split_query(rest);
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let page = segments.next().unwrap_or("");

    match page {
        "" | "home" | "explorer" | "blocks" if segments.clone().next().is_none() => {
            Some(Route::Explorer)
        }
        "blocks" | "block" => {
            let height = segments.next().and_then(|h| h.parse::<u64>().ok());
            Some(Route::Block { height })
        }
        "transactions" | "tx" => Some(Route::Transaction {
            id: decode_segment(segments.next()),
        }),
        "stored-files" | "files" => Some(Route::StoredFiles),
        "wallets" => Some(Route::Wallets),
        "wallet-details" | "wallet" => Some(Route::WalletDetails {
            address: decode_segment(segments.next()),
        }),
        "storageContractDetails" | "contract" => Some(Route::ContractDetails {
            contract_hash: query_param(query, "contractHash"),
            file_url: query_param(query, "fileUrl"),
        }),
        _ => None,
    }
}
