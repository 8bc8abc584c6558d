//! Sort-key codec
//!
//! A table's active sort travels inside [`TableQuery`](super::TableQuery) as
//! a single string: a comma-separated list of `key` or `key desc` tokens.
//! The format allows multi-key sort even though the table controller only
//! ever constructs a single key.

use serde::{Deserialize, Serialize};

/// One sort key with its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortValue {
    /// Property name the rows are ordered by.
    pub key: String,
    pub ascending: bool,
}

impl SortValue {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ascending: true,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ascending: false,
        }
    }
}

/// Encode an ordered list of sort keys into the wire string.
///
/// Ascending keys encode as the bare key, descending keys as `key desc`.
/// An empty list encodes as the empty string.
pub fn encode_sort_values(values: &[SortValue]) -> String {
    values
        .iter()
        .map(|v| {
            if v.ascending {
                v.key.clone()
            } else {
                format!("{} desc", v.key)
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Decode a sort string back into an ordered list of sort keys.
///
/// Empty input yields an empty list. A token's direction defaults to
/// ascending; only the exact word `desc` after the key flips it, any other
/// direction word is still ascending. Tokens with an empty key are dropped
/// silently.
pub fn decode_sort_values(sort: &str) -> Vec<SortValue> {
    if sort.is_empty() {
        return Vec::new();
    }

    sort.split(',')
        .filter_map(|token| {
            let mut parts = token.splitn(2, ' ');
            let key = parts.next().unwrap_or("");
            if key.is_empty() {
                return None;
            }
            Some(SortValue {
                key: key.to_string(),
                ascending: parts.next() != Some("desc"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_joins_keys_with_direction() {
        let values = [SortValue::asc("name"), SortValue::desc("age")];
        assert_eq!(encode_sort_values(&values), "name,age desc");
    }

    #[test]
    fn encode_empty_is_empty_string() {
        assert_eq!(encode_sort_values(&[]), "");
    }

    #[test]
    fn decode_defaults_to_ascending() {
        assert_eq!(decode_sort_values("name"), vec![SortValue::asc("name")]);
    }

    #[test]
    fn decode_desc() {
        assert_eq!(
            decode_sort_values("name desc"),
            vec![SortValue::desc("name")]
        );
    }

    #[test]
    fn decode_empty_is_empty_list() {
        assert_eq!(decode_sort_values(""), Vec::new());
    }

    #[test]
    fn decode_unknown_direction_word_is_ascending() {
        assert_eq!(
            decode_sort_values("name descending"),
            vec![SortValue::asc("name")]
        );
        assert_eq!(decode_sort_values("name up"), vec![SortValue::asc("name")]);
    }

    #[test]
    fn decode_drops_empty_tokens() {
        assert_eq!(
            decode_sort_values("name,,age desc"),
            vec![SortValue::asc("name"), SortValue::desc("age")]
        );
        assert_eq!(decode_sort_values(","), Vec::new());
    }

    #[test]
    fn round_trip() {
        let values = vec![
            SortValue::asc("name"),
            SortValue::desc("age"),
            SortValue::asc("city"),
        ];
        assert_eq!(decode_sort_values(&encode_sort_values(&values)), values);
    }
}
