// file: src/extractor/patterns.rs
// description: compiled regex patterns for SDN feature extraction
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

/// Closing marker that bounds a single feature record.
pub const FEATURE_END: &str = "</Feature>";

lazy_static! {
    // Inner value of a feature record; non-greedy so the first VersionDetail
    // in the segment wins, matching within a single line only.
    pub static ref VERSION_DETAIL: Regex = Regex::new(
        r"<VersionDetail[^>]*>(.*?)</VersionDetail>"
    ).expect("VERSION_DETAIL regex is valid");
}

/// Builds the declaration pattern for a feature type with the given
/// human-readable label. The numeric ID is the single capture group.
pub fn feature_type_declaration(label: &str) -> Regex {
    let pattern = format!(
        r#"<FeatureType ID="(\d+)"[^>]*>{}</FeatureType>"#,
        regex::escape(label)
    );
    Regex::new(&pattern).expect("feature type declaration regex is valid")
}

/// Marker that tags a feature record with a feature type ID. The closing
/// quote is part of the needle so ID 7 never matches ID 77.
pub fn feature_type_reference(id: &str) -> String {
    format!(r#"FeatureTypeID="{}""#, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_captures_id() {
        let re = feature_type_declaration("Digital Currency Address - XBT");
        let caps = re
            .captures(r#"<FeatureType ID="344" SomeAttr="x">Digital Currency Address - XBT</FeatureType>"#)
            .unwrap();
        assert_eq!(&caps[1], "344");
    }

    #[test]
    fn test_declaration_escapes_label() {
        let re = feature_type_declaration("Digital Currency Address - XBT");
        assert!(!re.is_match(r#"<FeatureType ID="344">Digital Currency Address + XBT</FeatureType>"#));
    }

    #[test]
    fn test_reference_includes_closing_quote() {
        assert_eq!(feature_type_reference("7"), r#"FeatureTypeID="7""#);
    }

    #[test]
    fn test_version_detail_pattern() {
        let caps = VERSION_DETAIL
            .captures(r#"<VersionDetail DetailTypeID="1432">1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa</VersionDetail>"#)
            .unwrap();
        assert_eq!(&caps[1], "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
    }
}
