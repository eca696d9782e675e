// file: src/extractor/sdn.rs
// description: feature-type discovery and address extraction from the SDN export
// reference: OFAC SDN advanced XML schema

use crate::error::{Result, SdnError};
use crate::extractor::patterns::{FEATURE_END, VERSION_DETAIL, feature_type_declaration, feature_type_reference};
use crate::models::AddressSet;
use tracing::debug;

/// Feature type label OFAC assigns to Bitcoin addresses.
pub const XBT_FEATURE_LABEL: &str = "Digital Currency Address - XBT";

/// Extracts addresses tagged with a single feature type from the raw SDN
/// advanced XML export.
///
/// The numeric feature type ID is not stable across publications, so it is
/// resolved from the human-readable label on every call.
pub struct FeatureExtractor {
    label: String,
}

impl FeatureExtractor {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }

    /// Extractor for the Bitcoin (XBT) feature type.
    pub fn bitcoin() -> Self {
        Self::new(XBT_FEATURE_LABEL)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Resolves the numeric feature type ID declared for this label.
    pub fn feature_type_id<'a>(&self, document: &'a str) -> Result<&'a str> {
        let declaration = feature_type_declaration(&self.label);
        let caps = declaration
            .captures(document)
            .ok_or_else(|| SdnError::CategoryNotFound(self.label.clone()))?;
        Ok(caps.get(1).map_or("", |m| m.as_str()))
    }

    /// Returns the distinct addresses tagged with this feature type, in
    /// first-seen order.
    ///
    /// Records lacking a closing `</Feature>` marker or an embedded
    /// `VersionDetail` value contribute nothing; the export is known to carry
    /// irregular entries and those are skipped rather than failing the scan.
    pub fn extract(&self, document: &str) -> Result<AddressSet> {
        let id = self.feature_type_id(document)?;
        debug!("resolved feature type ID {} for label {:?}", id, self.label);

        let reference = feature_type_reference(id);
        let mut addresses = AddressSet::new();

        // Everything before the first reference is preamble; each later
        // fragment starts one candidate record.
        for segment in document.split(reference.as_str()).skip(1) {
            let Some(end) = segment.find(FEATURE_END) else {
                continue;
            };
            if let Some(caps) = VERSION_DETAIL.captures(&segment[..end]) {
                addresses.insert(caps[1].trim());
            }
        }

        debug!("extracted {} distinct addresses", addresses.len());
        Ok(addresses)
    }
}

/// Extracts the distinct sanctioned Bitcoin addresses from a raw SDN export.
pub fn extract_bitcoin_addresses(document: &str) -> Result<Vec<String>> {
    FeatureExtractor::bitcoin()
        .extract(document)
        .map(AddressSet::into_vec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ADDR_A: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
    const ADDR_B: &str = "12QtD5BFwRsdNsAZY76UVE1xyCGNTojH9h";

    fn declaration(id: u32) -> String {
        format!(
            r#"<FeatureType ID="{id}" FeatureTypeGroupID="1">Digital Currency Address - XBT</FeatureType>"#
        )
    }

    fn record(id: u32, value: &str) -> String {
        format!(
            r#"<Feature ID="99" FeatureTypeID="{id}">
  <FeatureVersion ReliabilityID="1" ID="5000">
    <VersionDetail DetailTypeID="1432">{value}</VersionDetail>
  </FeatureVersion>
</Feature>"#
        )
    }

    #[test]
    fn test_two_records_decoy_category_excluded() {
        let xml = format!(
            "<Sanctions>{}{}{}{}</Sanctions>",
            declaration(7),
            record(7, ADDR_A),
            record(7, ADDR_B),
            record(9, "unrelated-passport-number"),
        );

        let addresses = extract_bitcoin_addresses(&xml).unwrap();
        assert_eq!(addresses, vec![ADDR_A.to_string(), ADDR_B.to_string()]);
    }

    #[test]
    fn test_duplicate_addresses_collapse() {
        let xml = format!(
            "{}{}{}",
            declaration(7),
            record(7, ADDR_B),
            record(7, ADDR_B),
        );

        let addresses = extract_bitcoin_addresses(&xml).unwrap();
        assert_eq!(addresses, vec![ADDR_B.to_string()]);
    }

    #[test]
    fn test_missing_label_fails() {
        let xml = format!(
            r#"<FeatureType ID="7">Digital Currency Address - ETH</FeatureType>{}"#,
            record(7, ADDR_A),
        );

        let err = extract_bitcoin_addresses(&xml).unwrap_err();
        assert!(matches!(err, SdnError::CategoryNotFound(_)));
    }

    #[test]
    fn test_empty_document_fails() {
        let err = extract_bitcoin_addresses("").unwrap_err();
        assert!(matches!(err, SdnError::CategoryNotFound(_)));
    }

    #[test]
    fn test_declared_category_with_no_records() {
        let xml = format!("{}{}", declaration(7), record(9, ADDR_A));
        let addresses = extract_bitcoin_addresses(&xml).unwrap();
        assert!(addresses.is_empty());
    }

    #[test]
    fn test_unterminated_segment_skipped() {
        let xml = format!(
            r#"{}{}<Feature ID="4" FeatureTypeID="7"><VersionDetail>{}</VersionDetail>"#,
            declaration(7),
            record(7, ADDR_A),
            ADDR_B,
        );

        let addresses = extract_bitcoin_addresses(&xml).unwrap();
        assert_eq!(addresses, vec![ADDR_A.to_string()]);
    }

    #[test]
    fn test_segment_without_value_field_skipped() {
        let xml = format!(
            r#"{}<Feature FeatureTypeID="7"><Comment>no value</Comment></Feature>{}"#,
            declaration(7),
            record(7, ADDR_B),
        );

        let addresses = extract_bitcoin_addresses(&xml).unwrap();
        assert_eq!(addresses, vec![ADDR_B.to_string()]);
    }

    #[test]
    fn test_similar_id_does_not_match() {
        // ID 7 must not pick up records tagged 77.
        let xml = format!(
            "{}{}{}",
            declaration(7),
            record(77, ADDR_A),
            record(7, ADDR_B),
        );

        let addresses = extract_bitcoin_addresses(&xml).unwrap();
        assert_eq!(addresses, vec![ADDR_B.to_string()]);
    }

    #[test]
    fn test_surrounding_whitespace_stripped() {
        let xml = format!(
            "{}{}",
            declaration(7),
            record(7, &format!("  {ADDR_A}  ")),
        );

        let addresses = extract_bitcoin_addresses(&xml).unwrap();
        assert_eq!(addresses, vec![ADDR_A.to_string()]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let xml = format!(
            "{}{}{}",
            declaration(344),
            record(344, ADDR_B),
            record(344, ADDR_A),
        );

        let first = extract_bitcoin_addresses(&xml).unwrap();
        let second = extract_bitcoin_addresses(&xml).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vec![ADDR_B.to_string(), ADDR_A.to_string()]);
    }

    #[test]
    fn test_feature_type_id_resolution() {
        let xml = format!("{}{}", declaration(344), record(344, ADDR_A));
        let extractor = FeatureExtractor::bitcoin();
        assert_eq!(extractor.feature_type_id(&xml).unwrap(), "344");
    }
}
