//! In-process ordering of JSON values, matching PostgreSQL's `jsonb` order:
//! null < string < number < boolean < array < object. A missing field sorts
//! below everything, so ascending puts it first and descending puts it last.

use std::cmp::Ordering;

use serde_json::Value;

use crate::document::{Document, value_at};
use crate::store::{SortDirection, SortKey};

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::String(_) => 1,
        Value::Number(_) => 2,
        Value::Bool(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

pub(crate) fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y.iter())
            .map(|(l, r)| compare_values(l, r))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn compare_key(a: &Document, b: &Document, key: &SortKey) -> Ordering {
    match (value_at(a, &key.path), value_at(b, &key.path), key.direction) {
        (None, None, _) => Ordering::Equal,
        (None, Some(_), SortDirection::Ascending) => Ordering::Less,
        (Some(_), None, SortDirection::Ascending) => Ordering::Greater,
        (None, Some(_), SortDirection::Descending) => Ordering::Greater,
        (Some(_), None, SortDirection::Descending) => Ordering::Less,
        (Some(x), Some(y), SortDirection::Ascending) => compare_values(x, y),
        (Some(x), Some(y), SortDirection::Descending) => compare_values(y, x),
    }
}

/// Stable sort by `keys`; ties keep their current relative order.
pub(crate) fn sort_documents<T>(items: &mut [T], keys: &[SortKey], doc: impl Fn(&T) -> &Document) {
    if keys.is_empty() {
        return;
    }
    items.sort_by(|a, b| {
        keys.iter()
            .map(|key| compare_key(doc(a), doc(b), key))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}
