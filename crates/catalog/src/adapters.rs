//! Per-store provider adapters.

mod appstore_adapter;
mod playstore_adapter;

pub use appstore_adapter::AppstoreProvider;
pub use playstore_adapter::PlaystoreProvider;

/// Drop empty-string candidates so `or`-chains pick the first field an
/// upstream actually populated.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Ratings arrive outside [0, 5] from some upstream glitches; pin them.
fn clamp_rating(rating: f64) -> f64 {
    rating.clamp(0.0, 5.0)
}
