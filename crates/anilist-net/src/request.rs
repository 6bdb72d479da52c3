//! GraphQL request types.

use anilist_core::{Operation, OperationType};
use serde::Serialize;
use serde_json::Value;

/// A GraphQL request body.
///
/// Serializes to `{"query": ..., "variables": ..., "operationName": ...}`;
/// absent members are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQLRequest {
    /// The GraphQL document.
    pub query: String,

    /// Optional variables for the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,

    /// Optional operation name.
    #[serde(skip_serializing_if = "Option::is_none", rename = "operationName")]
    pub operation_name: Option<String>,

    /// The operation type (not serialized, used for logging).
    #[serde(skip)]
    pub(crate) operation_type: OperationType,
}

impl GraphQLRequest {
    /// Create a query request.
    pub fn query(query: impl Into<String>) -> Self {
        Self::with_type(query.into(), OperationType::Query)
    }

    /// Create a mutation request.
    pub fn mutation(query: impl Into<String>) -> Self {
        Self::with_type(query.into(), OperationType::Mutation)
    }

    /// Create a request from a raw document, inferring the operation type
    /// from its leading keyword.
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let operation_type = infer_operation_type(&query);
        Self::with_type(query, operation_type)
    }

    fn with_type(query: String, operation_type: OperationType) -> Self {
        Self {
            query,
            variables: None,
            operation_name: None,
            operation_type,
        }
    }

    /// Set a variable value.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let request = GraphQLRequest::query("query ($id: Int) { Media(id: $id) { id } }")
    ///     .variable("id", 1);
    /// ```
    pub fn variable(mut self, name: impl Into<String>, value: impl Serialize) -> Self {
        let variables = self
            .variables
            .get_or_insert_with(|| Value::Object(Default::default()));
        if let Value::Object(map) = variables
            && let Ok(value) = serde_json::to_value(value)
        {
            map.insert(name.into(), value);
        }
        self
    }

    /// Replace all variables with a serializable value.
    pub fn variables(mut self, variables: impl Serialize) -> Self {
        self.variables = serde_json::to_value(variables).ok();
        self
    }

    /// Set the operation name.
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Get the operation type.
    pub fn operation_type(&self) -> OperationType {
        self.operation_type
    }

    /// The operation name, or the first root field for anonymous documents.
    pub(crate) fn label(&self) -> &str {
        if let Some(name) = self.operation_name.as_deref() {
            return name;
        }
        self.query
            .split('{')
            .nth(1)
            .and_then(|rest| {
                rest.split(|c: char| c.is_whitespace() || c == '(' || c == '{' || c == '}')
                    .find(|token| !token.is_empty())
            })
            .unwrap_or("anonymous")
    }
}

impl From<&Operation> for GraphQLRequest {
    fn from(operation: &Operation) -> Self {
        let mut request = Self::with_type(operation.render(), operation.kind());
        request.operation_name = operation.name().map(str::to_owned);
        request
    }
}

impl From<Operation> for GraphQLRequest {
    fn from(operation: Operation) -> Self {
        Self::from(&operation)
    }
}

fn infer_operation_type(query: &str) -> OperationType {
    if query.trim_start().starts_with("mutation") {
        OperationType::Mutation
    } else {
        OperationType::Query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anilist_core::Selection;
    use serde_json::json;

    #[test]
    fn test_serialization_omits_absent_members() {
        let request = GraphQLRequest::query("query { Viewer { id } }");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "query": "query { Viewer { id } }" })
        );
    }

    #[test]
    fn test_variables_and_name() {
        let request = GraphQLRequest::query("query MediaById($id: Int) { Media(id: $id) { id } }")
            .variable("id", 1)
            .operation_name("MediaById");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "query": "query MediaById($id: Int) { Media(id: $id) { id } }",
                "variables": { "id": 1 },
                "operationName": "MediaById"
            })
        );
    }

    #[test]
    fn test_infer_operation_type() {
        assert_eq!(
            GraphQLRequest::new("  mutation { ToggleFavourite(animeId: 1) { anime { pageInfo { total } } } }")
                .operation_type(),
            OperationType::Mutation
        );
        assert_eq!(
            GraphQLRequest::new("{ Viewer { id } }").operation_type(),
            OperationType::Query
        );
    }

    #[test]
    fn test_from_operation() {
        let operation = Operation::mutation(
            Selection::new("DeleteMediaListEntry")
                .argument("id", 42)
                .child(Selection::new("deleted")),
        );
        let request = GraphQLRequest::from(&operation);
        assert_eq!(request.operation_type(), OperationType::Mutation);
        assert_eq!(request.query, operation.render());
        assert_eq!(request.label(), "DeleteMediaListEntry");
    }
}
