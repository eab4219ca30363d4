use serde::{Deserialize, Serialize};

/// A schema migration suggestion. Opaque text produced by the backend.
pub type SchemaSuggestion = String;

/// Envelope returned by `GET /api/schema-suggestions/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSuggestionList {
    pub suggestions: Vec<SchemaSuggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_is_required() {
        assert!(serde_json::from_str::<SchemaSuggestionList>(r#"["add index"]"#).is_err());
        assert!(serde_json::from_str::<SchemaSuggestionList>(r#"{}"#).is_err());
    }

    #[test]
    fn keeps_server_order() {
        let list: SchemaSuggestionList =
            serde_json::from_str(r#"{"suggestions": ["b", "a", "c"]}"#).unwrap();
        assert_eq!(list.suggestions, vec!["b", "a", "c"]);
    }
}
