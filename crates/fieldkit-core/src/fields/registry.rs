//! Lookup of field handlers by type tag.

use std::sync::Arc;

use lazy_static::lazy_static;
use tracing::info;

use crate::error::Result;
use crate::models::config::FieldkitConfig;
use crate::models::value::FieldKind;

use super::handlers::{DateHandler, HumanNameHandler, ProperNounHandler};
use super::similarity::{PartialRatio, Similarity};
use super::FieldHandler;

lazy_static! {
    static ref DEFAULT_REGISTRY: HandlerRegistry = HandlerRegistry::new(&FieldkitConfig::default());
}

/// One handler per field kind, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct HandlerRegistry {
    human_name: FieldHandler,
    date: FieldHandler,
    proper_noun: FieldHandler,
}

impl HandlerRegistry {
    /// Build handlers from configuration with the default similarity.
    pub fn new(config: &FieldkitConfig) -> Self {
        Self::with_similarity(config, Arc::new(PartialRatio))
    }

    /// Build handlers from configuration, scoring with `similarity`.
    pub fn with_similarity(config: &FieldkitConfig, similarity: Arc<dyn Similarity>) -> Self {
        info!("Building field handler registry");

        Self {
            human_name: HumanNameHandler::with_config(&config.name)
                .with_similarity(Arc::clone(&similarity))
                .into(),
            date: DateHandler::with_config(config.date.clone())
                .with_similarity(similarity)
                .into(),
            proper_noun: ProperNounHandler::new().into(),
        }
    }

    /// Handler for a type tag such as `"date"`.
    pub fn get(&self, tag: &str) -> Result<&FieldHandler> {
        let kind: FieldKind = tag.parse()?;
        Ok(self.handler(kind))
    }

    /// Handler for a known field kind.
    pub fn handler(&self, kind: FieldKind) -> &FieldHandler {
        match kind {
            FieldKind::HumanName => &self.human_name,
            FieldKind::Date => &self.date,
            FieldKind::ProperNoun => &self.proper_noun,
        }
    }

    /// All handlers, in [`FieldKind::ALL`] order.
    pub fn handlers(&self) -> impl Iterator<Item = &FieldHandler> {
        FieldKind::ALL.into_iter().map(move |kind| self.handler(kind))
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new(&FieldkitConfig::default())
    }
}

/// Handler for a type tag from the process-wide default registry.
pub fn get_handler(tag: &str) -> Result<&'static FieldHandler> {
    DEFAULT_REGISTRY.get(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;
    use crate::models::value::StorageType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_known_tags() {
        assert_eq!(get_handler("human_name").unwrap().kind(), FieldKind::HumanName);
        assert_eq!(get_handler("date").unwrap().kind(), FieldKind::Date);
        assert_eq!(get_handler("proper_noun").unwrap().kind(), FieldKind::ProperNoun);
    }

    #[test]
    fn test_storage_types() {
        assert_eq!(
            get_handler("human_name").unwrap().storage_type(),
            StorageType::String { max_len: 255 }
        );
        assert_eq!(get_handler("date").unwrap().storage_type(), StorageType::Date);
        assert_eq!(
            get_handler("proper_noun").unwrap().storage_type(),
            StorageType::String { max_len: 1023 }
        );
    }

    #[test]
    fn test_unknown_tag() {
        let err = get_handler("unknown_tag").unwrap_err();
        assert!(matches!(err, FieldError::UnknownType(ref tag) if tag == "unknown_tag"));

        assert!(get_handler("Date").is_err());
        assert!(get_handler("").is_err());
    }

    #[test]
    fn test_default_registry_is_shared() {
        let a = get_handler("date").unwrap();
        let b = get_handler("date").unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_registry_applies_config() {
        let mut config = FieldkitConfig::default();
        config.date.reference_year = Some(2024);
        config.date.allow_future_years = true;
        let registry = HandlerRegistry::new(&config);

        let value = registry.get("date").unwrap().format("12/25/2099").unwrap();
        assert_eq!(value.to_string(), "2099-12-25");
    }

    #[test]
    fn test_registry_uses_injected_similarity() {
        #[derive(Debug)]
        struct Always(u8);

        impl Similarity for Always {
            fn ratio(&self, _a: &str, _b: &str) -> u8 {
                self.0
            }
        }

        let registry = HandlerRegistry::with_similarity(&FieldkitConfig::default(), Arc::new(Always(50)));
        let handler = registry.handler(FieldKind::HumanName);
        let query = handler.format("John Smith").unwrap();
        assert!((handler.match_score(&query, "anything") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_handlers_iterates_all_kinds() {
        let registry = HandlerRegistry::default();
        let kinds: Vec<FieldKind> = registry.handlers().map(|h| h.kind()).collect();
        assert_eq!(kinds, FieldKind::ALL.to_vec());
    }

    #[test]
    fn test_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    let handler = get_handler("human_name").unwrap();
                    handler.format("SMITH, JOHN")
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(
                handle.join().unwrap(),
                Some(crate::models::value::FieldValue::Text("John Smith".to_string()))
            );
        }
    }
}
