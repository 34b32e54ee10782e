use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Target database and collection, supplied with every request
#[derive(Debug, Clone, PartialEq, Deserialize, utoipa::ToSchema)]
pub struct ConnectionSpec {
    #[serde(deserialize_with = "non_empty")]
    pub database: String,
    #[serde(deserialize_with = "non_empty")]
    pub collection: String,
}

/// Request body for POST /create
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateRequest {
    #[serde(flatten)]
    pub connection: ConnectionSpec,
    #[serde(rename = "Document")]
    #[schema(value_type = Object)]
    pub document: Map<String, JsonValue>,
}

/// Request body for GET /read
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ReadRequest {
    #[serde(flatten)]
    pub connection: ConnectionSpec,
}

/// Request body for PUT /update
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateRequest {
    #[serde(flatten)]
    pub connection: ConnectionSpec,
    #[serde(rename = "Filter")]
    #[schema(value_type = Object)]
    pub filter: Map<String, JsonValue>,
    #[serde(rename = "DataToBeUpdated")]
    #[schema(value_type = Object)]
    pub data_to_be_updated: Map<String, JsonValue>,
}

/// Request body for DELETE /delete
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct DeleteRequest {
    #[serde(flatten)]
    pub connection: ConnectionSpec,
    #[serde(rename = "Filter")]
    #[schema(value_type = Object)]
    pub filter: Map<String, JsonValue>,
}

/// Status envelope returned by the write endpoints
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatusResponse {
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Document_ID", skip_serializing_if = "Option::is_none", default)]
    pub document_id: Option<String>,
}

impl StatusResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            document_id: None,
        }
    }

    /// Outcome of an update that modified a document or none
    pub fn updated(modified: bool) -> Self {
        Self::new(if modified {
            "Successfully Updated"
        } else {
            "Nothing was updated."
        })
    }

    /// Outcome of a delete that removed a document or found none
    pub fn deleted(deleted: bool) -> Self {
        Self::new(if deleted {
            "Successfully Deleted"
        } else {
            "Document not found."
        })
    }

    pub fn inserted(document_id: String) -> Self {
        Self {
            status: "Successfully Inserted".to_string(),
            document_id: Some(document_id),
        }
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.trim().is_empty() {
        return Err(serde::de::Error::custom("must not be empty"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_request_field_names() {
        let request: UpdateRequest = serde_json::from_value(json!({
            "database": "shop",
            "collection": "orders",
            "Filter": {"name": "a"},
            "DataToBeUpdated": {"x": 1}
        }))
        .unwrap();

        assert_eq!(request.connection.database, "shop");
        assert_eq!(request.connection.collection, "orders");
        assert_eq!(request.filter.get("name"), Some(&json!("a")));
        assert_eq!(request.data_to_be_updated.get("x"), Some(&json!(1)));
    }

    #[test]
    fn test_empty_collection_name_rejected() {
        let result = serde_json::from_value::<ReadRequest>(json!({
            "database": "shop",
            "collection": "  "
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_document_must_be_object() {
        let result = serde_json::from_value::<CreateRequest>(json!({
            "database": "shop",
            "collection": "orders",
            "Document": [1, 2, 3]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_status_response_wire_format() {
        let plain = serde_json::to_value(StatusResponse::new("Document not found.")).unwrap();
        assert_eq!(plain, json!({"Status": "Document not found."}));

        let inserted = serde_json::to_value(StatusResponse::inserted("abc".to_string())).unwrap();
        assert_eq!(
            inserted,
            json!({"Status": "Successfully Inserted", "Document_ID": "abc"})
        );
    }

    #[test]
    fn test_update_status_strings() {
        assert_eq!(StatusResponse::updated(true).status, "Successfully Updated");
        assert_eq!(StatusResponse::updated(false).status, "Nothing was updated.");
        assert!(StatusResponse::updated(true).document_id.is_none());
    }

    #[test]
    fn test_delete_status_strings() {
        assert_eq!(
            serde_json::to_value(StatusResponse::deleted(true)).unwrap(),
            json!({"Status": "Successfully Deleted"})
        );
        assert_eq!(
            serde_json::to_value(StatusResponse::deleted(false)).unwrap(),
            json!({"Status": "Document not found."})
        );
    }
}
