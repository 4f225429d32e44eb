//! Country and language tables shared by the provider adapters.

/// Countries tried in order when a detail lookup misses the requested
/// storefront. Requested country goes first; duplicates are skipped.
/// The us/kr order is a deliberate product choice, not a ranking.
pub const DETAIL_FALLBACK_COUNTRIES: &[&str] = &["us", "kr"];

const DEFAULT_LANGUAGE: &str = "en";

/// Play Store UI language for a storefront country.
pub fn language_for_country(country: &str) -> &'static str {
    match country.to_ascii_lowercase().as_str() {
        // Asia Pacific
        "kr" => "ko",
        "jp" => "ja",
        "cn" | "tw" | "hk" => "zh",
        "th" => "th",
        "vn" => "vi",
        "id" => "id",
        "in" | "sg" | "ph" | "my" | "au" | "nz" => "en",
        // Americas
        "us" | "ca" => "en",
        "br" => "pt",
        "mx" | "ar" | "cl" | "co" => "es",
        // Europe
        "gb" => "en",
        "fr" => "fr",
        "de" | "at" | "ch" => "de",
        "es" => "es",
        "it" => "it",
        "ru" => "ru",
        "nl" | "be" => "nl",
        "se" => "sv",
        "no" => "no",
        "dk" => "da",
        "fi" => "fi",
        "pl" => "pl",
        "tr" => "tr",
        // Middle East & Africa
        "sa" | "ae" | "eg" => "ar",
        "za" => "en",
        _ => DEFAULT_LANGUAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_countries() {
        assert_eq!(language_for_country("kr"), "ko");
        assert_eq!(language_for_country("jp"), "ja");
        assert_eq!(language_for_country("br"), "pt");
        assert_eq!(language_for_country("tw"), "zh");
    }

    #[test]
    fn is_case_insensitive() {
        assert_eq!(language_for_country("KR"), "ko");
    }

    #[test]
    fn unknown_country_falls_back_to_english() {
        assert_eq!(language_for_country("zz"), "en");
        assert_eq!(language_for_country(""), "en");
    }
}
