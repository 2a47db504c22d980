//! Validation of raw CoinGecko payloads into typed records
//!
//! Every accessor reports failures by JSON path (`$.coins[1].item.data.price`)
//! so a broken upstream field can be located from the log line alone.

use crate::{
    constants::TRENDING_LIMIT,
    error::ValidationError,
    types::{CoinSnapshot, GlobalStats, StablecoinSnapshot, TrendingItem},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

const ROOT: &str = "$";

fn key_path(parent: &str, key: &str) -> String {
    format!("{}.{}", parent, key)
}

fn index_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ValidationError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(ValidationError::missing(path)),
        _ => Err(ValidationError::mistyped(path, "an object")),
    }
}

fn as_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, ValidationError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Null => Err(ValidationError::missing(path)),
        _ => Err(ValidationError::mistyped(path, "an array")),
    }
}

/// Looks up a field that must be present and non-null
fn required<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<(&'a Value, String), ValidationError> {
    let path = key_path(parent, key);
    match obj.get(key) {
        None | Some(Value::Null) => Err(ValidationError::missing(path)),
        Some(value) => Ok((value, path)),
    }
}

/// Looks up a field that may be absent or null
fn optional<'a>(obj: &'a Map<String, Value>, key: &str, parent: &str) -> Option<(&'a Value, String)> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => Some((value, key_path(parent, key))),
    }
}

fn string_field(obj: &Map<String, Value>, key: &str, parent: &str) -> Result<String, ValidationError> {
    let (value, path) = required(obj, key, parent)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ValidationError::mistyped(path, "a string"))
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Reads a decimal from a JSON number or a numeric string
fn decimal_value(value: &Value, path: &str) -> Result<Decimal, ValidationError> {
    let parsed = match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        Value::Null => return Err(ValidationError::missing(path)),
        _ => None,
    };
    parsed.ok_or_else(|| ValidationError::mistyped(path, "a decimal number"))
}

fn decimal_field(obj: &Map<String, Value>, key: &str, parent: &str) -> Result<Decimal, ValidationError> {
    let (value, path) = required(obj, key, parent)?;
    decimal_value(value, &path)
}

fn u64_value(value: &Value, path: &str) -> Result<u64, ValidationError> {
    value
        .as_u64()
        .ok_or_else(|| ValidationError::mistyped(path, "a non-negative integer"))
}

/// Normalizes a `/search/trending` payload
///
/// Only the first [`TRENDING_LIMIT`] entries are read; later entries are not
/// inspected, so a malformed fifth coin never hides the first three.
pub fn trending(payload: &Value) -> Result<Vec<TrendingItem>, ValidationError> {
    let root = as_object(payload, ROOT)?;
    let (coins, coins_path) = required(root, "coins", ROOT)?;
    let coins = as_array(coins, &coins_path)?;

    coins
        .iter()
        .take(TRENDING_LIMIT)
        .enumerate()
        .map(|(i, entry)| trending_item(entry, &index_path(&coins_path, i)))
        .collect()
}

fn trending_item(entry: &Value, path: &str) -> Result<TrendingItem, ValidationError> {
    let entry = as_object(entry, path)?;
    let (item, item_path) = required(entry, "item", path)?;
    let item = as_object(item, &item_path)?;

    let (data, data_path) = required(item, "data", &item_path)?;
    let data = as_object(data, &data_path)?;

    let (change, change_path) = required(data, "price_change_percentage_24h", &data_path)?;
    let change = as_object(change, &change_path)?;

    Ok(TrendingItem {
        coin_id: string_field(item, "id", &item_path)?,
        name: string_field(item, "name", &item_path)?,
        image_url: string_field(item, "small", &item_path)?,
        price_usd: decimal_field(data, "price", &data_path)?,
        price_change_pct_24h_usd: decimal_field(change, "usd", &change_path)?,
    })
}

/// Normalizes a `/coins/markets` payload, keeping listing order
pub fn markets(payload: &Value) -> Result<Vec<CoinSnapshot>, ValidationError> {
    let coins = as_array(payload, ROOT)?;
    coins
        .iter()
        .enumerate()
        .map(|(i, coin)| coin_snapshot(coin, &index_path(ROOT, i)))
        .collect()
}

fn coin_snapshot(coin: &Value, path: &str) -> Result<CoinSnapshot, ValidationError> {
    let coin = as_object(coin, path)?;

    let current_price_usd = decimal_field(coin, "current_price", path)?;
    if current_price_usd.is_sign_negative() && !current_price_usd.is_zero() {
        return Err(ValidationError::out_of_range(
            key_path(path, "current_price"),
            "price cannot be negative",
        ));
    }

    let market_cap_rank = match optional(coin, "market_cap_rank", path) {
        None => None,
        Some((value, rank_path)) => {
            let rank = u64_value(value, &rank_path)?;
            if rank == 0 {
                return Err(ValidationError::out_of_range(rank_path, "rank starts at 1"));
            }
            let rank = u32::try_from(rank)
                .map_err(|_| ValidationError::out_of_range(rank_path, "rank too large"))?;
            Some(rank)
        }
    };

    Ok(CoinSnapshot {
        id: string_field(coin, "id", path)?,
        name: string_field(coin, "name", path)?,
        symbol: string_field(coin, "symbol", path)?,
        image_url: string_field(coin, "image", path)?,
        current_price_usd,
        price_change_pct_24h: decimal_field(coin, "price_change_percentage_24h", path)?,
        market_cap_usd: decimal_field(coin, "market_cap", path)?,
        market_cap_change_pct_24h: decimal_field(coin, "market_cap_change_percentage_24h", path)?,
        market_cap_rank,
    })
}

/// Restricts a normalized listing to the tracked stablecoins, keeping order
pub fn stablecoins(snapshots: &[CoinSnapshot]) -> Vec<StablecoinSnapshot> {
    snapshots
        .iter()
        .filter_map(StablecoinSnapshot::from_snapshot)
        .collect()
}

/// Normalizes a `/global` payload
pub fn global_stats(payload: &Value) -> Result<GlobalStats, ValidationError> {
    let root = as_object(payload, ROOT)?;
    let (data, data_path) = required(root, "data", ROOT)?;
    let data = as_object(data, &data_path)?;

    let (caps, caps_path) = required(data, "total_market_cap", &data_path)?;
    let caps = as_object(caps, &caps_path)?;

    let (count, count_path) = required(data, "active_cryptocurrencies", &data_path)?;
    let active_cryptocurrencies = u64_value(count, &count_path)?;

    // Informational only; a bad timestamp must not take the widgets down
    let updated_at = optional(data, "updated_at", &data_path).and_then(|(value, path)| {
        timestamp_value(value, &path)
            .map_err(|e| tracing::debug!(error = %e, "Ignoring malformed updated_at"))
            .ok()
    });

    Ok(GlobalStats {
        total_market_cap_usd: decimal_field(caps, "usd", &caps_path)?,
        market_cap_change_pct_24h: decimal_field(
            data,
            "market_cap_change_percentage_24h_usd",
            &data_path,
        )?,
        active_cryptocurrencies,
        updated_at,
    })
}

fn timestamp_value(value: &Value, path: &str) -> Result<DateTime<Utc>, ValidationError> {
    let secs = value
        .as_i64()
        .ok_or_else(|| ValidationError::mistyped(path, "a unix timestamp"))?;
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| ValidationError::out_of_range(path, "timestamp out of range"))
}
