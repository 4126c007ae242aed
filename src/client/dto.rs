use serde::Deserialize;
use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct CountedBody<T> {
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default = "Vec::new", alias = "items", alias = "results")]
    pub data: Vec<T>,
}

/// Normalized collection: records in server order plus the server's count.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    pub records: Vec<T>,
    pub count: usize,
}

impl<T: DeserializeOwned> Collection<T> {
    /// Decodes a bare array or a `{ count, data }` envelope.
    pub fn from_body(body: Value) -> Result<Self, serde_json::Error> {
        match body {
            Value::Array(_) => {
                let records: Vec<T> = serde_json::from_value(body)?;
                Ok(Self {
                    count: records.len(),
                    records,
                })
            }
            Value::Object(_) => {
                let counted: CountedBody<T> = serde_json::from_value(body)?;
                Ok(Self {
                    count: counted.count.unwrap_or(counted.data.len()),
                    records: counted.data,
                })
            }
            other => Err(serde_json::Error::custom(format!(
                "expected a list of records, got {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.is_empty())
            .or(self.error.filter(|e| !e.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        name: String,
    }

    fn parse(value: Value) -> Collection<Row> {
        Collection::from_body(value).unwrap()
    }

    #[test]
    fn test_bare_array() {
        let collection = parse(json!([{ "name": "a" }, { "name": "b" }]));
        assert_eq!(collection.count, 2);
        assert_eq!(collection.records[1].name, "b");
    }

    #[test]
    fn test_counted_envelope() {
        let collection = parse(json!({ "count": 12, "data": [{ "name": "a" }] }));
        assert_eq!(collection.count, 12);
        assert_eq!(collection.records.len(), 1);

        let collection = parse(json!({ "count": 3 }));
        assert_eq!(collection.count, 3);
        assert!(collection.records.is_empty());

        let collection = parse(json!({ "results": [{ "name": "x" }] }));
        assert_eq!(collection.count, 1);
    }

    #[test]
    fn test_record_decode_error_is_reported() {
        let err = Collection::<Row>::from_body(json!([{ "name": "a" }, { "name": 7 }])).unwrap_err();
        assert!(err.to_string().contains("invalid type"), "{}", err);

        assert!(Collection::<Row>::from_body(json!("oops")).is_err());
    }

    #[test]
    fn test_error_body_message() {
        let body: ErrorBody = serde_json::from_value(json!({ "message": "Duplicate code" })).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Duplicate code"));

        let body: ErrorBody = serde_json::from_value(json!({ "error": "Bad Request" })).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Bad Request"));

        let body: ErrorBody = serde_json::from_value(json!({})).unwrap();
        assert_eq!(body.into_message(), None);
    }
}
