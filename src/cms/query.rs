//! Directus query parameters

/// Field selection and result size for an items request.
///
/// Field paths use Directus dot syntax and may reach through junction
/// collections, e.g. `fields.field_id.validation_rules.validation_rule_id.*`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub fields: Vec<String>,
    /// `Some(-1)` requests every item
    pub limit: Option<i64>,
}

impl Query {
    /// Query selecting the given field paths
    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            limit: None,
        }
    }

    /// Remove the server-side page size limit
    pub fn unlimited(mut self) -> Self {
        self.limit = Some(-1);
        self
    }

    /// Render as query-string pairs understood by the Directus REST API
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if !self.fields.is_empty() {
            params.push(("fields".to_string(), self.fields.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_has_no_params() {
        assert!(Query::default().to_params().is_empty());
    }

    #[test]
    fn test_fields_are_comma_joined() {
        let query = Query::fields(["*", "fields.field_id.*"]);
        assert_eq!(
            query.to_params(),
            vec![("fields".to_string(), "*,fields.field_id.*".to_string())]
        );
    }

    #[test]
    fn test_unlimited_sets_minus_one() {
        let query = Query::fields(["name", "id"]).unlimited();
        assert_eq!(query.limit, Some(-1));
        assert_eq!(
            query.to_params(),
            vec![
                ("fields".to_string(), "name,id".to_string()),
                ("limit".to_string(), "-1".to_string()),
            ]
        );
    }
}
