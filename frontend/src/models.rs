use serde::{Deserialize, Serialize};

/// Analysis attached to a document by the document API.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub risk_score: i64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub hidden_charges: String,
    #[serde(default)]
    pub risks: String,
    #[serde(default)]
    pub warnings: String,
    #[serde(default)]
    pub recommendations: String,
}

/// Row of `GET /documents`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub id: String,
    pub file_name: String,
    pub created_at: String,
    #[serde(default)]
    pub analysis: Option<Analysis>,
}

/// Body of `GET /documents/:id`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDetails {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub file_name: String,
    #[serde(default)]
    pub file_type: String,
    pub created_at: String,
    #[serde(default)]
    pub analysis: Option<Analysis>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UploadedDocument {
    pub id: String,
}

/// Body of a successful `POST /documents/upload`.
#[derive(Clone, Debug, Deserialize)]
pub struct UploadResponse {
    pub document: UploadedDocument,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SignupResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Request body for `POST /api/chat`.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Request body for `POST /api/meme`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionRequest {
    pub summary: String,
    pub risks: String,
    pub hidden_charges: String,
    pub risk_score: i64,
}

/// Response of both completion endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Error body shared by the completion endpoints and the document API.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Bot,
}

/// One entry of the chat widget's local transcript.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Bot, content: content.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_summary_parses_camel_case_with_missing_analysis() {
        let doc: DocumentSummary = serde_json::from_str(
            r#"{"id":"d1","fileName":"loan.pdf","createdAt":"2026-01-02T10:00:00Z","analysis":null}"#,
        )
        .unwrap();
        assert_eq!(doc.file_name, "loan.pdf");
        assert!(doc.analysis.is_none());
    }

    #[test]
    fn document_details_parses_analysis() {
        let doc: DocumentDetails = serde_json::from_str(
            r#"{"id":"d1","userId":"u1","fileName":"policy.docx","fileType":"docx",
                "createdAt":"2026-01-02T10:00:00Z",
                "analysis":{"id":"a1","riskScore":72,"summary":"s","explanation":"e",
                            "hiddenCharges":"h","risks":"r","warnings":"w","recommendations":"rec"}}"#,
        )
        .unwrap();
        let analysis = doc.analysis.unwrap();
        assert_eq!(analysis.risk_score, 72);
        assert_eq!(analysis.hidden_charges, "h");
    }

    #[test]
    fn reaction_request_serializes_camel_case() {
        let body = serde_json::to_value(ReactionRequest {
            summary: String::new(),
            risks: String::new(),
            hidden_charges: "fee".into(),
            risk_score: 0,
        })
        .unwrap();
        assert_eq!(body["hiddenCharges"], "fee");
        assert_eq!(body["riskScore"], 0);
    }
}
