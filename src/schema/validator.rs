use std::fmt;
use std::io::Read;

use jsonschema::JSONSchema;
use serde_json::Value;

/// Errors raised when a document could not be evaluated against a schema.
///
/// A document that parses but does not conform is *not* an error; that case
/// is reported as `Ok(false)` by [`validate_against_schema`].
#[derive(Debug)]
pub enum ValidationError {
    /// The schema stream could not be read.
    SchemaRead(std::io::Error),

    /// The schema stream is not valid JSON.
    SchemaParse(serde_json::Error),

    /// The schema parsed but is not a usable JSON-Schema document.
    SchemaCompile(String),

    /// The candidate document is not valid JSON.
    DocumentParse(serde_json::Error),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::SchemaRead(e) => write!(f, "failed to read schema: {}", e),
            ValidationError::SchemaParse(e) => write!(f, "schema is not valid JSON: {}", e),
            ValidationError::SchemaCompile(msg) => write!(f, "schema did not compile: {}", msg),
            ValidationError::DocumentParse(e) => write!(f, "document is not valid JSON: {}", e),
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ValidationError::SchemaRead(e) => Some(e),
            ValidationError::SchemaParse(e) => Some(e),
            ValidationError::SchemaCompile(_) => None,
            ValidationError::DocumentParse(e) => Some(e),
        }
    }
}

/// Check a JSON document against a JSON-Schema supplied as a byte stream.
///
/// Returns `Ok(true)` when the document conforms, `Ok(false)` when it is
/// well-formed JSON that does not conform, and `Err` when either side could
/// not be parsed or the schema could not be evaluated.
pub fn validate_against_schema<R: Read>(
    json: &str,
    mut schema: R,
) -> Result<bool, ValidationError> {
    let mut raw = String::new();
    schema
        .read_to_string(&mut raw)
        .map_err(ValidationError::SchemaRead)?;

    let schema_doc: Value = serde_json::from_str(&raw).map_err(ValidationError::SchemaParse)?;
    let compiled = JSONSchema::compile(&schema_doc)
        .map_err(|e| ValidationError::SchemaCompile(e.to_string()))?;

    let document: Value = serde_json::from_str(json).map_err(ValidationError::DocumentParse)?;

    Ok(compiled.is_valid(&document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SCHEMA: &str = r#"{
        "type": "object",
        "properties": {
            "centerInchargeId": {"type": "string", "minLength": 1},
            "ratingFormIds": {"type": "array", "items": {"type": "string"}, "minItems": 1}
        },
        "required": ["centerInchargeId", "ratingFormIds"]
    }"#;

    fn schema_stream() -> Cursor<&'static [u8]> {
        Cursor::new(SCHEMA.as_bytes())
    }

    #[test]
    fn conforming_document_is_valid() {
        let doc = r#"{"centerInchargeId":"abc","ratingFormIds":["f1","f2"]}"#;
        assert!(validate_against_schema(doc, schema_stream()).unwrap());
    }

    #[test]
    fn document_missing_required_fields_is_not_valid() {
        assert!(!validate_against_schema("{}", schema_stream()).unwrap());
    }

    #[test]
    fn document_with_wrong_types_is_not_valid() {
        let doc = r#"{"centerInchargeId":1,"ratingFormIds":"f1"}"#;
        assert!(!validate_against_schema(doc, schema_stream()).unwrap());
    }

    #[test]
    fn unparsable_document_is_an_error() {
        let err = validate_against_schema("not-json", schema_stream()).unwrap_err();
        assert!(matches!(err, ValidationError::DocumentParse(_)));
    }

    #[test]
    fn unparsable_schema_is_an_error() {
        let schema = Cursor::new(&b"{ this is not json"[..]);
        let err = validate_against_schema("{}", schema).unwrap_err();
        assert!(matches!(err, ValidationError::SchemaParse(_)));
    }

    #[test]
    fn schema_that_does_not_compile_is_an_error() {
        let schema = Cursor::new(&br#"{"type": "no-such-type"}"#[..]);
        let err = validate_against_schema("{}", schema).unwrap_err();
        assert!(matches!(err, ValidationError::SchemaCompile(_)));
    }
}
