//! Content types and generic target references.
//!
//! A review points at its target through a type-erased pair: the content type
//! of the target entity (`app_label.model`) plus the target's identifier. The
//! pair is resolved to a concrete table through the reviewable registry in
//! `reviews-db`.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Identifier of an entity type, written `app_label.model` (e.g. `shop.product`).
///
/// Both parts are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentType {
    app_label: String,
    model: String,
}

impl ContentType {
    /// Build a content type from its two parts.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidContentType` if either part is empty or
    /// contains characters other than ASCII alphanumerics and `_`.
    pub fn new(app_label: &str, model: &str) -> Result<Self, CoreError> {
        let valid = |part: &str| {
            !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        };
        if !valid(app_label) || !valid(model) {
            return Err(CoreError::InvalidContentType(format!("{app_label}.{model}")));
        }
        Ok(Self {
            app_label: app_label.to_ascii_lowercase(),
            model: model.to_ascii_lowercase(),
        })
    }

    #[must_use]
    pub fn app_label(&self) -> &str {
        &self.app_label
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Human-readable model name, e.g. `gift_card` becomes `gift card`.
    #[must_use]
    pub fn verbose_name(&self) -> String {
        self.model.replace('_', " ")
    }

    /// Title-cased verbose name, e.g. `Gift Card`.
    #[must_use]
    pub fn title(&self) -> String {
        self.verbose_name()
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.app_label, self.model)
    }
}

impl FromStr for ContentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (app_label, model) = s
            .split_once('.')
            .ok_or_else(|| CoreError::InvalidContentType(s.to_string()))?;
        Self::new(app_label, model).map_err(|_| CoreError::InvalidContentType(s.to_string()))
    }
}

impl TryFrom<String> for ContentType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ContentType> for String {
    fn from(value: ContentType) -> Self {
        value.to_string()
    }
}

/// Non-owning reference from a review to the entity it reviews.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct TargetRef {
    #[schemars(with = "String")]
    pub content_type: ContentType,
    pub object_id: String,
}

impl TargetRef {
    pub fn new(content_type: ContentType, object_id: impl Into<String>) -> Self {
        Self {
            content_type,
            object_id: object_id.into(),
        }
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.content_type, self.object_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn parses_app_label_and_model() {
        let ct: ContentType = "shop.product".parse().unwrap();
        assert_eq!(ct.app_label(), "shop");
        assert_eq!(ct.model(), "product");
        assert_eq!(ct.to_string(), "shop.product");
    }

    #[test]
    fn parse_lowercases() {
        let ct: ContentType = "Shop.Product".parse().unwrap();
        assert_eq!(ct.to_string(), "shop.product");
    }

    #[rstest]
    #[case("product")]
    #[case(".product")]
    #[case("shop.")]
    #[case("shop.gift card")]
    #[case("shop.product.extra")]
    fn rejects_malformed(#[case] input: &str) {
        let result = input.parse::<ContentType>();
        assert!(
            matches!(result, Err(CoreError::InvalidContentType(_))),
            "'{input}' should be rejected"
        );
    }

    #[test]
    fn title_capitalizes_words() {
        let ct = ContentType::new("shop", "gift_card").unwrap();
        assert_eq!(ct.verbose_name(), "gift card");
        assert_eq!(ct.title(), "Gift Card");
    }

    #[test]
    fn serializes_as_string() {
        let target = TargetRef::new("shop.seller".parse().unwrap(), "42");
        let json = serde_json::to_value(&target).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "content_type": "shop.seller", "object_id": "42" })
        );
        let back: TargetRef = serde_json::from_value(json).unwrap();
        assert_eq!(back, target);
        assert_eq!(back.to_string(), "shop.seller:42");
    }
}
