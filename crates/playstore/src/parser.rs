//! Extraction of app records from Play Store pages.
//!
//! Google Play has no public JSON API; the web pages embed their data in
//! `AF_initDataCallback({key: 'ds:N', data: [...]})` script blocks. The
//! parser slices the balanced `data:` array out of the matching block and
//! navigates it by index path.

use regex::Regex;
use serde_json::Value;

use crate::error::PlaystoreError;
use crate::models::{RawPlaystoreApp, RawPrice};

const SEARCH_DATASET: &str = "ds:4";
const DETAIL_DATASET: &str = "ds:5";

// Index paths into a search/cluster result item. Dataset layout as shipped
// by the current Play web UI; detail paths below differ because the app
// page uses a wider record.
const ITEM_TITLE: &[usize] = &[2];
const ITEM_APP_ID: &[usize] = &[12, 0];
const ITEM_URL: &[usize] = &[9, 4, 2];
const ITEM_ICON: &[usize] = &[1, 1, 0, 3, 2];
const ITEM_DEVELOPER: &[usize] = &[4, 0, 0, 0];
const ITEM_SCORE: &[usize] = &[6, 0, 2, 1, 1];
const ITEM_SCORE_TEXT: &[usize] = &[6, 0, 2, 1, 0];
const ITEM_PRICE_MICROS: &[usize] = &[7, 0, 3, 2, 1, 0, 1];
const ITEM_PRICE_TEXT: &[usize] = &[7, 0, 3, 2, 1, 0, 2];
const ITEM_CURRENCY: &[usize] = &[7, 0, 3, 2, 1, 0, 3];
const ITEM_SUMMARY: &[usize] = &[4, 1, 1, 1, 1];

const SEARCH_ITEMS: &[usize] = &[0, 1, 0, 0, 0];

const DETAIL_TITLE: &[usize] = &[1, 2, 0, 0];
const DETAIL_DEVELOPER: &[usize] = &[1, 2, 68, 0];
const DETAIL_ICON: &[usize] = &[1, 2, 95, 0, 3, 2];
const DETAIL_SCORE: &[usize] = &[1, 2, 51, 0, 1];
const DETAIL_RATINGS: &[usize] = &[1, 2, 51, 2, 1];
const DETAIL_PRICE_MICROS: &[usize] = &[1, 2, 57, 0, 0, 0, 0, 1, 0, 0];
const DETAIL_PRICE_TEXT: &[usize] = &[1, 2, 57, 0, 0, 0, 0, 1, 0, 2];
const DETAIL_CURRENCY: &[usize] = &[1, 2, 57, 0, 0, 0, 0, 1, 0, 1];
const DETAIL_DESCRIPTION: &[usize] = &[1, 2, 72, 0, 1];
const DETAIL_GENRE: &[usize] = &[1, 2, 79, 0, 0, 0];
const DETAIL_SCREENSHOTS: &[usize] = &[1, 2, 78, 0];
const DETAIL_SCREENSHOT_URL: &[usize] = &[3, 2];
const DETAIL_VERSION: &[usize] = &[1, 2, 140, 0, 0, 0];
const DETAIL_RELEASED: &[usize] = &[1, 2, 10, 0];
const DETAIL_UPDATED: &[usize] = &[1, 2, 145, 0, 0];

/// Slice the `data:` payload of the `AF_initDataCallback` block with the
/// given dataset key out of a page.
pub(crate) fn extract_dataset(html: &str, key: &str) -> Option<Value> {
    let marker = Regex::new(r"AF_initDataCallback\s*\(\s*\{key:\s*'([^']+)'").ok()?;
    for caps in marker.captures_iter(html) {
        if &caps[1] != key {
            continue;
        }
        let block_start = caps.get(0)?.end();
        let rest = &html[block_start..];
        let data_pos = rest.find("data:")?;
        let payload = balanced_array(&rest[data_pos + 5..])?;
        return serde_json::from_str(payload).ok();
    }
    None
}

/// Return the first balanced `[...]` array in the input, honoring string
/// literals and escapes.
fn balanced_array(s: &str) -> Option<&str> {
    let start = s.find('[')?;
    let bytes = s.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

fn at<'a>(value: &'a Value, path: &[usize]) -> Option<&'a Value> {
    let mut current = value;
    for &index in path {
        current = current.get(index)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

fn str_at(value: &Value, path: &[usize]) -> Option<String> {
    at(value, path)?.as_str().map(str::to_string)
}

fn f64_at(value: &Value, path: &[usize]) -> Option<f64> {
    at(value, path)?.as_f64()
}

fn u64_at(value: &Value, path: &[usize]) -> Option<u64> {
    at(value, path)?.as_u64()
}

/// Price value for an item: prefer the pre-formatted display string, fall
/// back to the micros amount. A missing block means the app is free.
fn price_at(value: &Value, text_path: &[usize], micros_path: &[usize]) -> Option<RawPrice> {
    if let Some(text) = str_at(value, text_path) {
        if !text.is_empty() {
            return Some(RawPrice::Text(text));
        }
    }
    f64_at(value, micros_path).map(|micros| RawPrice::Number(micros / 1_000_000.0))
}

fn parse_search_item(item: &Value) -> Option<RawPlaystoreApp> {
    let app_id = str_at(item, ITEM_APP_ID)?;
    let price = price_at(item, ITEM_PRICE_TEXT, ITEM_PRICE_MICROS);
    let free = match &price {
        None => Some(true),
        Some(RawPrice::Number(n)) => Some(*n == 0.0),
        Some(RawPrice::Text(_)) => None,
    };
    Some(RawPlaystoreApp {
        app_id,
        title: str_at(item, ITEM_TITLE),
        developer: str_at(item, ITEM_DEVELOPER),
        icon: str_at(item, ITEM_ICON),
        score: f64_at(item, ITEM_SCORE),
        score_text: str_at(item, ITEM_SCORE_TEXT),
        price,
        currency: str_at(item, ITEM_CURRENCY),
        free,
        url: str_at(item, ITEM_URL)
            .map(|path| format!("https://play.google.com{}", path)),
        summary: str_at(item, ITEM_SUMMARY),
        ..Default::default()
    })
}

/// Parse the result items out of a search or cluster page.
pub(crate) fn parse_result_page(html: &str) -> crate::Result<Vec<RawPlaystoreApp>> {
    let data = extract_dataset(html, SEARCH_DATASET)
        .ok_or_else(|| PlaystoreError::Parse(format!("dataset {} not found", SEARCH_DATASET)))?;
    let items = at(&data, SEARCH_ITEMS)
        .and_then(Value::as_array)
        .ok_or_else(|| PlaystoreError::Parse("result item list not found".into()))?;
    Ok(items.iter().filter_map(parse_search_item).collect())
}

/// Parse the full record out of an app detail page.
pub(crate) fn parse_detail_page(html: &str, app_id: &str) -> crate::Result<RawPlaystoreApp> {
    let data = extract_dataset(html, DETAIL_DATASET)
        .ok_or_else(|| PlaystoreError::Parse(format!("dataset {} not found", DETAIL_DATASET)))?;

    let title = str_at(&data, DETAIL_TITLE);
    if title.is_none() {
        return Err(PlaystoreError::NotFound(app_id.to_string()));
    }

    let screenshots = at(&data, DETAIL_SCREENSHOTS)
        .and_then(Value::as_array)
        .map(|shots| {
            shots
                .iter()
                .filter_map(|shot| str_at(shot, DETAIL_SCREENSHOT_URL))
                .collect()
        });
    let price = price_at(&data, DETAIL_PRICE_TEXT, DETAIL_PRICE_MICROS);
    let free = match &price {
        None => Some(true),
        Some(RawPrice::Number(n)) => Some(*n == 0.0),
        Some(RawPrice::Text(_)) => None,
    };

    Ok(RawPlaystoreApp {
        app_id: app_id.to_string(),
        title,
        developer: str_at(&data, DETAIL_DEVELOPER),
        icon: str_at(&data, DETAIL_ICON),
        score: f64_at(&data, DETAIL_SCORE),
        ratings: u64_at(&data, DETAIL_RATINGS),
        price,
        currency: str_at(&data, DETAIL_CURRENCY),
        free,
        description: str_at(&data, DETAIL_DESCRIPTION),
        genre: str_at(&data, DETAIL_GENRE),
        screenshots,
        version: str_at(&data, DETAIL_VERSION),
        released: str_at(&data, DETAIL_RELEASED),
        updated: str_at(&data, DETAIL_UPDATED),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_dataset(key: &str, data: &str) -> String {
        format!(
            "<html><script>AF_initDataCallback({{key: '{}', hash: '7', data: {}, \
             sideChannel: {{}}}});</script></html>",
            key, data
        )
    }

    #[test]
    fn extracts_keyed_dataset() {
        let html = format!(
            "{}{}",
            page_with_dataset("ds:3", r#"["other"]"#),
            page_with_dataset("ds:4", r#"[1, ["nested [text]"], 2]"#)
        );
        let data = extract_dataset(&html, "ds:4").unwrap();
        assert_eq!(data[0], 1);
        assert_eq!(data[1][0], "nested [text]");
    }

    #[test]
    fn missing_dataset_is_none() {
        let html = page_with_dataset("ds:3", "[]");
        assert!(extract_dataset(&html, "ds:4").is_none());
    }

    #[test]
    fn balanced_array_honors_strings() {
        let sliced = balanced_array(r#" [ "a ] b", [1, 2] ] trailing"#).unwrap();
        let value: Value = serde_json::from_str(sliced).unwrap();
        assert_eq!(value[0], "a ] b");
        assert_eq!(value[1][1], 2);
    }

    #[test]
    fn parses_search_item_fields() {
        // Minimal item shaped to the search index paths above.
        let mut item = Value::Array(vec![Value::Null; 13]);
        item[2] = "KakaoTalk".into();
        item[12] = serde_json::json!(["com.kakao.talk"]);
        item[4] = serde_json::json!([[["Kakao Corp."]], ["", ["", "", "", "", "Messenger"]]]);
        item[6] = serde_json::json!([["", "", ["", ["4.3", 4.3]]]]);
        item[9] = serde_json::json!(["", "", "", "", ["", "", "/store/apps/details?id=com.kakao.talk"]]);
        let app = parse_search_item(&item).unwrap();
        assert_eq!(app.app_id, "com.kakao.talk");
        assert_eq!(app.title.as_deref(), Some("KakaoTalk"));
        assert_eq!(app.developer.as_deref(), Some("Kakao Corp."));
        assert_eq!(app.score, Some(4.3));
        assert_eq!(app.free, Some(true));
        assert_eq!(
            app.url.as_deref(),
            Some("https://play.google.com/store/apps/details?id=com.kakao.talk")
        );
    }

    #[test]
    fn item_without_app_id_is_skipped() {
        let item = serde_json::json!([null, null, "Title only"]);
        assert!(parse_search_item(&item).is_none());
    }
}
