//! Items parser: splits `name:value` and `name=value` tokens into headers
//! and data fields.

use std::collections::BTreeMap;

/// Headers every request starts with. User headers override these by key.
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[
    ("Accept", "*/*"),
    ("Connection", "close"),
    ("Content-type", "application/json"),
];

/// Headers and data fields parsed from the command-line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestItems {
    pub headers: BTreeMap<String, String>,
    pub data: BTreeMap<String, String>,
}

impl RequestItems {
    /// Overlay `headers` onto a fresh copy of `DEFAULT_HEADERS`.
    pub fn new(headers: BTreeMap<String, String>, data: BTreeMap<String, String>) -> Self {
        let mut merged = default_headers();
        merged.extend(headers);
        Self {
            headers: merged,
            data,
        }
    }
}

impl Default for RequestItems {
    fn default() -> Self {
        Self::new(BTreeMap::new(), BTreeMap::new())
    }
}

pub fn default_headers() -> BTreeMap<String, String> {
    DEFAULT_HEADERS
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// Classify each item as a header or a data field.
///
/// A token is a header when it splits on its first `:` into two non-empty
/// halves, otherwise a data field when it splits likewise on `=`. Anything
/// else is dropped. Header detection runs first, so `a:b=c` is the header
/// `a` with value `b=c`.
pub fn parse_items<I, S>(items: Option<I>) -> RequestItems
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut headers = BTreeMap::new();
    let mut data = BTreeMap::new();

    for item in items.into_iter().flatten() {
        let item = item.as_ref();
        if let Some((name, value)) = split_pair(item, ':') {
            headers.insert(name.to_string(), value.to_string());
        } else if let Some((name, value)) = split_pair(item, '=') {
            data.insert(name.to_string(), value.to_string());
        } else {
            log::debug!("ignoring item {item:?}: not a header or data field");
        }
    }

    RequestItems::new(headers, data)
}

fn split_pair(item: &str, separator: char) -> Option<(&str, &str)> {
    item.split_once(separator)
        .filter(|(name, value)| !name.is_empty() && !value.is_empty())
}
