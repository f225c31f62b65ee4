use log::Level;
use serde_json::{json, Value};
use crate::models::errors::{ErrorKind, SourceError, WalletError};
use crate::models::snapshot::{serialize_flags_as_strings, Snapshot};

/// Emits one dashboard event as a single JSON line.
pub fn log_event(level: Level, event: &str, detail: Value) {
    log::log!(level, "{}", json!({
        "event": event,
        "detail": detail
    }));
}

pub fn log_info(event: &str, message: &str) {
    log_event(Level::Info, event, json!(message));
}

pub fn log_source_error(event: &str, error: &SourceError) {
    log_event(Level::Error, event, error_detail(&error.to_string(), Some(error.kind())));
}

pub fn log_wallet_error(event: &str, error: &WalletError) {
    log_event(Level::Error, event, error_detail(&error.to_string(), error.kind()));
}

fn error_detail(message: &str, kind: Option<ErrorKind>) -> Value {
    json!({
        "error": message,
        "kind": kind
    })
}

/// Warns about a snapshot that had to fall back on one or more reads.
pub fn log_degraded(snapshot: &Snapshot) {
    log_event(Level::Warn, "SnapshotDegraded", degraded_detail(snapshot));
}

fn degraded_detail(snapshot: &Snapshot) -> Value {
    let fallbacks = serialize_flags_as_strings(&snapshot.degraded, serde_json::value::Serializer)
        .unwrap_or(Value::Null);

    json!({
        "account": format!("{:#x}", snapshot.account()),
        "fallbacks": fallbacks,
        "price": snapshot.price.to_string(),
        "gasStandard": snapshot.gas.standard
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use rust_decimal::Decimal;
    use crate::models::gas::GasTiers;
    use crate::models::snapshot::SnapshotFlags;
    use crate::models::wallet::AccountBalance;
    use crate::utilities::wallet::parse_account;

    #[test]
    fn test_error_detail_carries_kind() {
        let malformed = SourceError::malformed("coingecko", "missing eur");
        let detail = error_detail(&malformed.to_string(), Some(malformed.kind()));
        assert_eq!(detail["kind"], "MalformedResponse");
        assert_eq!(detail["error"], "Malformed response from coingecko: missing eur");

        let rpc = SourceError::Rpc { method: "eth_gasPrice".to_string(), code: -32000, message: "busy".to_string() };
        assert_eq!(error_detail(&rpc.to_string(), Some(rpc.kind()))["kind"], "TransportUnavailable");

        let rejected = WalletError::UserRejected;
        assert_eq!(error_detail(&rejected.to_string(), rejected.kind())["kind"], "UserRejected");
        assert!(error_detail("bad", WalletError::InvalidAddress("0x1".to_string()).kind())["kind"].is_null());
    }

    #[test]
    fn test_degraded_detail_lists_fallbacks() {
        let snapshot = Snapshot {
            balance: AccountBalance::zero(parse_account("0x0E47675D5157aa13FF662E364091B2c5656a6322").unwrap()),
            price: Decimal::from(2500),
            total_value: Decimal::ZERO,
            gas: GasTiers::default(),
            refreshed_at: Local::now(),
            degraded: SnapshotFlags::BALANCE_FALLBACK | SnapshotFlags::PRICE_FALLBACK,
        };

        let detail = degraded_detail(&snapshot);
        assert_eq!(detail["account"], "0x0e47675d5157aa13ff662e364091b2c5656a6322");
        assert_eq!(detail["fallbacks"], json!(["BALANCE_FALLBACK", "PRICE_FALLBACK"]));
        assert_eq!(detail["price"], "2500");
        assert_eq!(detail["gasStandard"], 30);
    }
}
