//! Links between catalog items, e.g. a coupled model and its components.

use serde::Serialize;
use serde_json::Value;

use crate::declaration::{RecordDecl, RELATED_CATALOG_ITEM};
use crate::reader::FieldReader;
use crate::record::{impl_validating_deserialize, SubRecord};
use crate::violation::ValidationErrorSet;

/// Other catalog items this one is coupled with or derived from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RelatedCatalogItem {
    /// Names of the related items, e.g. `["COAWST", "WRF"]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_catalog_items: Option<Vec<String>>,
    /// Kind of relation, or the item type of the related items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_catalog_item_types: Option<String>,
}

impl SubRecord for RelatedCatalogItem {
    const DECL: &'static RecordDecl = &RELATED_CATALOG_ITEM;

    fn validate(raw: &Value) -> Result<Self, ValidationErrorSet> {
        let mut reader = FieldReader::new(raw)?;
        let related = RelatedCatalogItem {
            related_catalog_items: reader.text_list("related_catalog_items"),
            related_catalog_item_types: reader.text("related_catalog_item_types"),
        };
        reader.finish(related)
    }
}

impl_validating_deserialize!(
    RelatedCatalogItem,
    <RelatedCatalogItem as SubRecord>::validate
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coupled_model_relation() {
        let raw = json!({
            "related_catalog_items": ["COAWST", "WRF"],
            "related_catalog_item_types": "model"
        });
        let related = RelatedCatalogItem::validate(&raw).unwrap();
        assert_eq!(
            related.related_catalog_items,
            Some(vec!["COAWST".to_string(), "WRF".to_string()])
        );
        assert_eq!(serde_json::to_value(&related).unwrap(), raw);
    }

    #[test]
    fn non_text_item_is_reported_with_index() {
        let errors =
            RelatedCatalogItem::validate(&json!({"related_catalog_items": ["COAWST", {"name": "WRF"}]}))
                .unwrap_err();
        assert_eq!(errors.violations()[0].path.to_string(), "related_catalog_items[1]");
    }

    #[test]
    fn array_instead_of_object_is_rejected_at_root() {
        let errors = RelatedCatalogItem::validate(&json!(["COAWST"])).unwrap_err();
        assert!(errors.violations()[0].path.is_root());
    }
}
