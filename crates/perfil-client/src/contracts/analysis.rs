//! Result shapes produced by the external receipt-analysis pipeline.
//!
//! Field names and optionality mirror the pipeline's JSON output exactly;
//! nothing here checks value ranges.

use serde::{Deserialize, Serialize};

use crate::{ClientError, ClientResult};

/// Raw fields pulled off a receipt before any risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub amount: f64,
    pub receipt_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,
    pub extraction_method: String,
    pub confidence: f64,
}

/// Final validity and fraud-risk assessment of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_amount: f64,
    pub currency: String,
    pub date: String,
    pub issuer: String,
    pub receiver: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    pub is_valid: bool,
    pub risk_level: f64,
    pub confidence: f64,
    pub fraud_reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractKind {
    Extraction,
    Analysis,
}

impl ContractKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Extraction => "extraction",
            Self::Analysis => "analysis",
        }
    }

    pub fn parse(value: &str) -> ClientResult<Self> {
        match value {
            "extraction" => Ok(Self::Extraction),
            "analysis" => Ok(Self::Analysis),
            _ => Err(ClientError::invalid_argument_with_recovery(
                &format!("Unknown contract kind `{value}`."),
                vec!["Use `extraction` or `analysis`.".to_string()],
            )
            .with_contracts_help()),
        }
    }

    pub const fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Extraction => EXTRACTION_FIELDS,
            Self::Analysis => ANALYSIS_FIELDS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonType {
    Number,
    String,
    Boolean,
}

impl JsonType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
        }
    }

    pub fn matches(self, value: &serde_json::Value) -> bool {
        match self {
            Self::Number => value.is_number(),
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub json_type: JsonType,
    pub required: bool,
}

const fn required(name: &'static str, json_type: JsonType) -> FieldSpec {
    FieldSpec {
        name,
        json_type,
        required: true,
    }
}

const fn optional(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        json_type: JsonType::String,
        required: false,
    }
}

const EXTRACTION_FIELDS: &[FieldSpec] = &[
    required("amount", JsonType::Number),
    required("receipt_date", JsonType::String),
    optional("receipt_type"),
    optional("receipt_number"),
    optional("payment_method"),
    optional("patient_id"),
    optional("issuer_name"),
    optional("receiver_name"),
    required("extraction_method", JsonType::String),
    required("confidence", JsonType::Number),
];

const ANALYSIS_FIELDS: &[FieldSpec] = &[
    required("total_amount", JsonType::Number),
    required("currency", JsonType::String),
    required("date", JsonType::String),
    required("issuer", JsonType::String),
    required("receiver", JsonType::String),
    optional("document_type"),
    optional("payment_method"),
    optional("patient_id"),
    optional("document_number"),
    required("is_valid", JsonType::Boolean),
    required("risk_level", JsonType::Number),
    required("confidence", JsonType::Number),
    required("fraud_reason", JsonType::String),
];

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{AnalysisResult, ContractKind, ExtractionResult, JsonType};

    #[test]
    fn extraction_accepts_missing_and_null_optionals() {
        let value = json!({
            "amount": 120.5,
            "receipt_date": "2025-01-15",
            "receipt_type": null,
            "issuer_name": "Clínica San José",
            "extraction_method": "ocr",
            "confidence": 0.91
        });
        let parsed = serde_json::from_value::<ExtractionResult>(value);
        assert!(parsed.is_ok());
        if let Ok(result) = parsed {
            assert!(result.receipt_type.is_none());
            assert!(result.receipt_number.is_none());
            assert_eq!(result.issuer_name.as_deref(), Some("Clínica San José"));
        }
    }

    #[test]
    fn extraction_serialization_omits_absent_optionals() {
        let result = ExtractionResult {
            amount: 10.0,
            receipt_date: "2025-01-15".to_string(),
            receipt_type: None,
            receipt_number: Some("B-0042".to_string()),
            payment_method: None,
            patient_id: None,
            issuer_name: None,
            receiver_name: None,
            extraction_method: "llm".to_string(),
            confidence: 0.5,
        };
        let value = serde_json::to_value(&result);
        assert!(value.is_ok());
        if let Ok(object) = value {
            assert_eq!(object["receipt_number"], "B-0042");
            assert!(object.get("receipt_type").is_none());
            assert!(object.get("patient_id").is_none());
        }
    }

    #[test]
    fn analysis_accepts_fractional_risk_level() {
        let value = json!({
            "total_amount": 80.0,
            "currency": "EUR",
            "date": "2025-02-01",
            "issuer": "Farmacia Sol",
            "receiver": "Ana Ruiz",
            "is_valid": true,
            "risk_level": 0.75,
            "confidence": 0.8,
            "fraud_reason": ""
        });
        let parsed = serde_json::from_value::<AnalysisResult>(value);
        assert!(parsed.is_ok());
        if let Ok(result) = parsed {
            assert_eq!(result.risk_level, 0.75);
        }
    }

    #[test]
    fn field_tables_match_struct_keys() {
        let names = ContractKind::Analysis
            .fields()
            .iter()
            .map(|field| field.name)
            .collect::<Vec<&str>>();
        assert_eq!(names.len(), 13);
        assert!(names.contains(&"fraud_reason"));

        let required = ContractKind::Extraction
            .fields()
            .iter()
            .filter(|field| field.required)
            .map(|field| field.name)
            .collect::<Vec<&str>>();
        assert_eq!(
            required,
            vec!["amount", "receipt_date", "extraction_method", "confidence"]
        );
    }

    #[test]
    fn number_type_accepts_integers_and_floats() {
        assert!(JsonType::Number.matches(&json!(3)));
        assert!(JsonType::Number.matches(&json!(3.2)));
        assert!(!JsonType::Number.matches(&json!("3")));
    }

    #[test]
    fn kind_parse_rejects_unknown_names() {
        assert!(ContractKind::parse("extraction").is_ok());
        let parsed = ContractKind::parse("fraud");
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "invalid_argument");
            let help = error.data.as_ref().and_then(|data| data.get("help_command"));
            assert!(help.is_some());
        }
    }
}
