use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::report::{Comment, Report, ReportStatus};
use crate::User;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the endpoint requires a bearer token.
    const AUTHENTICATED: bool;

    /// The concrete path for this request instance.
    ///
    /// Endpoints addressing a single resource override this to append the id.
    fn path(&self) -> String {
        Self::PATH.to_string()
    }
}

// =========================================================
// Responses
// =========================================================

/// `POST /login` success payload
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub data: User,
}

/// Generic `{message}` payload, also used for non-2xx error bodies
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

// =========================================================
// Request Definitions
// =========================================================

/// Authenticate with email and password
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "/login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
}

/// Register a new account (field names follow the backend's user table)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegisterRequest {
    pub user_name: String,
    pub user_birthday: String,
    pub user_email: String,
    pub user_password: String,
}

impl ApiRequest for RegisterRequest {
    type Response = MessageResponse;
    const PATH: &'static str = "/user/new";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
}

/// Best-effort server-side session teardown; the response body is ignored.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    type Response = MessageResponse;
    const PATH: &'static str = "/logout";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = true;
}

/// List all reports
#[derive(Debug, Serialize, Deserialize)]
pub struct ListReportsRequest;

impl ApiRequest for ListReportsRequest {
    type Response = Vec<Report>;
    const PATH: &'static str = "/report";
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = true;
}

/// Move a report through its lifecycle (`PUT /report/{id}`)
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateReportStatusRequest {
    #[serde(skip)]
    pub id: u64,
    pub status: ReportStatus,
}

impl ApiRequest for UpdateReportStatusRequest {
    type Response = MessageResponse;
    const PATH: &'static str = "/report";
    const METHOD: HttpMethod = HttpMethod::Put;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

/// Remove a report (`DELETE /report/{id}`)
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteReportRequest {
    #[serde(skip)]
    pub id: u64,
}

impl ApiRequest for DeleteReportRequest {
    type Response = MessageResponse;
    const PATH: &'static str = "/report";
    const METHOD: HttpMethod = HttpMethod::Delete;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

/// Attach a comment to a report
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(rename = "reportId")]
    pub report_id: u64,
    pub text: String,
}

impl ApiRequest for CreateCommentRequest {
    type Response = Comment;
    const PATH: &'static str = "/comment";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_requests_append_the_id() {
        let req = UpdateReportStatusRequest {
            id: 42,
            status: ReportStatus::Fixed,
        };
        assert_eq!(req.path(), "/report/42");
        assert_eq!(DeleteReportRequest { id: 9 }.path(), "/report/9");
        // Collection endpoints keep the bare path
        assert_eq!(ListReportsRequest.path(), "/report");
    }

    #[test]
    fn status_update_body_carries_only_the_status() {
        let req = UpdateReportStatusRequest {
            id: 42,
            status: ReportStatus::InProgress,
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"status":"DIPROSES"}"#
        );
    }

    #[test]
    fn login_response_unwraps_token_and_user() {
        let json = r#"{"token":"abc","data":{"id_user":1,"user_name":"Ann","user_email":"a@b.c"}}"#;
        let res: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.token, "abc");
        assert_eq!(res.data.user_name, "Ann");
    }

    #[test]
    fn message_response_tolerates_empty_bodies() {
        let res: MessageResponse = serde_json::from_str("{}").unwrap();
        assert!(res.message.is_empty());
    }
}
