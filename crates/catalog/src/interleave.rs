//! Cross-store interleaving of ranked result lists.

use crate::{App, Store};

/// Alternate App Store and Play Store entries while preserving each
/// store's own order (which upstream already ranked by relevance). Once
/// the shorter side runs out, the remainder of the longer side follows
/// unchanged. A fairness policy, not a re-ranking.
pub fn interleave(apps: Vec<App>) -> Vec<App> {
    let (app_store, play_store): (Vec<App>, Vec<App>) = apps
        .into_iter()
        .partition(|app| app.store == Store::Appstore);

    let mut merged = Vec::with_capacity(app_store.len() + play_store.len());
    let mut left = app_store.into_iter();
    let mut right = play_store.into_iter();
    loop {
        match (left.next(), right.next()) {
            (Some(a), Some(b)) => {
                merged.push(a);
                merged.push(b);
            }
            (Some(a), None) => {
                merged.push(a);
                merged.extend(left);
                break;
            }
            (None, Some(b)) => {
                merged.push(b);
                merged.extend(right);
                break;
            }
            (None, None) => break,
        }
    }
    merged
}
