//! Normalization of raw provider records into [`Listing`] values.
//!
//! The two API generations nest their fields differently, and individual
//! records can be missing any field at any depth. All untyped JSON handling
//! is confined to this module: one malformed record must never abort a run,
//! so every extraction bottoms out in an empty-string default.

use crate::ebay::models::Listing;
use serde_json::Value;

/// Walks a path of object keys and array indices, returning `None` as soon
/// as any step is absent. A step that parses as a number indexes into an
/// array ("0"), otherwise it is an object key.
pub fn pluck<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for step in path {
        current = match current {
            Value::Object(map) => map.get(*step)?,
            Value::Array(items) => items.get(step.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Extracts a string at `path`, stringifying numbers, defaulting to "".
pub fn text(value: &Value, path: &[&str]) -> String {
    match pluck(value, path) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn scalar(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Formats a display price from optional value and currency fields.
///
/// Both present: "<value> <currency>". Value only: the bare value. Neither
/// (including an empty-string value): "".
pub fn format_price(value: Option<&Value>, currency: Option<&Value>) -> String {
    let value = scalar(value);
    let currency = currency.and_then(Value::as_str).filter(|c| !c.is_empty());

    match (value, currency) {
        (Some(v), Some(c)) => format!("{} {}", v, c),
        (Some(v), None) => v,
        (None, _) => String::new(),
    }
}

/// Normalizes one Browse API `itemSummaries` record.
pub fn from_item_summary(raw: &Value) -> Listing {
    Listing {
        title: text(raw, &["title"]),
        href: text(raw, &["itemWebUrl"]),
        img: text(raw, &["image", "imageUrl"]),
        price: format_price(pluck(raw, &["price", "value"]), pluck(raw, &["price", "currency"])),
    }
}

/// Normalizes one Finding API `item` record (fields arrive as one-element
/// arrays). Image preference: large, then super-size, then gallery.
pub fn from_finding_item(raw: &Value) -> Listing {
    let img = [
        &["pictureURLLarge", "0"][..],
        &["pictureURLSuperSize", "0"],
        &["galleryURL", "0"],
    ]
    .iter()
    .map(|path| text(raw, path))
    .find(|url| !url.is_empty())
    .unwrap_or_default();

    Listing {
        title: text(raw, &["title", "0"]),
        href: text(raw, &["viewItemURL", "0"]),
        img,
        price: format_price(
            pluck(raw, &["sellingStatus", "0", "currentPrice", "0", "__value__"]),
            pluck(raw, &["sellingStatus", "0", "currentPrice", "0", "@currencyId"]),
        ),
    }
}
