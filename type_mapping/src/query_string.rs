//! Query string parsing
//!
//! Turns a raw `application/x-www-form-urlencoded` query string into a
//! sparse [`ParamMap`]. Every leaf arrives as text; bracket syntax builds
//! lists (`labels[]=a`, `labels[0]=a`) and nested maps (`price[min]=3`).
//! Repeating a plain key collects its values into a list.

use crate::types::{ParamMap, ParamValue};

/// Parse a raw query string (without the leading `?`)
pub fn parse_query_string(raw: &str) -> ParamMap {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    let mut params = ParamMap::new();

    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        if key.is_empty() {
            continue;
        }
        let (base, path) = split_key(&key);
        if base.is_empty() {
            continue;
        }
        insert_path(&mut params, base, &path, ParamValue::Text(value.into_owned()));
    }

    params
}

/// Split `a[b][c]` into `("a", ["b", "c"])`. Malformed brackets keep the raw key.
fn split_key(key: &str) -> (&str, Vec<&str>) {
    let Some(open) = key.find('[') else {
        return (key, Vec::new());
    };

    let base = &key[..open];
    let mut segments = Vec::new();
    let mut rest = &key[open..];

    while let Some(stripped) = rest.strip_prefix('[') {
        match stripped.find(']') {
            Some(close) => {
                segments.push(&stripped[..close]);
                rest = &stripped[close + 1..];
            }
            None => return (key, Vec::new()),
        }
    }

    if !rest.is_empty() {
        return (key, Vec::new());
    }

    (base, segments)
}

fn is_list_segment(segment: &str) -> bool {
    segment.is_empty() || segment.chars().all(|c| c.is_ascii_digit())
}

fn insert_path(map: &mut ParamMap, key: &str, path: &[&str], value: ParamValue) {
    match path.split_first() {
        None => append(map, key, value),
        Some((segment, rest)) if is_list_segment(segment) && rest.is_empty() => {
            match map.get_mut(key) {
                Some(ParamValue::List(items)) => items.push(value),
                Some(existing) => {
                    let previous = std::mem::replace(existing, ParamValue::Null);
                    *existing = ParamValue::List(vec![previous, value]);
                }
                None => {
                    map.insert(key, ParamValue::List(vec![value]));
                }
            }
        }
        Some((segment, rest)) => {
            if !matches!(map.get(key), Some(ParamValue::Map(_))) {
                map.insert(key, ParamValue::Map(ParamMap::new()));
            }
            if let Some(ParamValue::Map(nested)) = map.get_mut(key) {
                insert_path(nested, segment, rest, value);
            }
        }
    }
}

fn append(map: &mut ParamMap, key: &str, value: ParamValue) {
    match map.get_mut(key) {
        Some(ParamValue::List(items)) => items.push(value),
        Some(existing) => {
            let previous = std::mem::replace(existing, ParamValue::Null);
            *existing = ParamValue::List(vec![previous, value]);
        }
        None => {
            map.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_string() {
        assert!(parse_query_string("").is_empty());
        assert!(parse_query_string("?").is_empty());
    }

    #[test]
    fn test_plain_pairs_are_text() {
        let params = parse_query_string("txt=red+car&pageIdx=2&sortBy=price");
        assert_eq!(params.text("txt"), Some("red car"));
        assert_eq!(params.text("pageIdx"), Some("2"));
        assert_eq!(params.text("sortBy"), Some("price"));
    }

    #[test]
    fn test_percent_decoding() {
        let params = parse_query_string("txt=%D7%A9%D7%9C%D7%95%D7%9D&labels%5B%5D=Box%20game");
        assert_eq!(params.text("txt"), Some("שלום"));
        assert_eq!(params.list_of_text("labels"), vec!["Box game".to_string()]);
    }

    #[test]
    fn test_bracket_and_repeated_lists() {
        let params = parse_query_string("labels[]=Doll&labels[]=Art");
        assert_eq!(params.get("labels"), Some(&ParamValue::from(vec!["Doll", "Art"])));

        let params = parse_query_string("labels[0]=Doll&labels[1]=Art");
        assert_eq!(params.get("labels"), Some(&ParamValue::from(vec!["Doll", "Art"])));

        let params = parse_query_string("labels=Doll&labels=Art");
        assert_eq!(params.get("labels"), Some(&ParamValue::from(vec!["Doll", "Art"])));
    }

    #[test]
    fn test_nested_maps() {
        let params = parse_query_string("price[min]=3&price[max]=9");
        let price = params.get("price").and_then(ParamValue::as_map).unwrap();
        assert_eq!(price.text("min"), Some("3"));
        assert_eq!(price.text("max"), Some("9"));
    }

    #[test]
    fn test_malformed_brackets_keep_raw_key() {
        let params = parse_query_string("labels[=x&a]b=y");
        assert_eq!(params.text("labels["), Some("x"));
        assert_eq!(params.text("a]b"), Some("y"));
    }

    #[test]
    fn test_keys_without_values() {
        let params = parse_query_string("txt&pageIdx=");
        assert_eq!(params.text("txt"), Some(""));
        assert_eq!(params.text("pageIdx"), Some(""));
    }
}
