//! Wire types exchanged with the notes server.

use serde::{Deserialize, Serialize};

use crate::session::Role;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Stream {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Semester {
    pub id: i64,
    pub number: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub file_url: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub role: Role,
    /// Token lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Me {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct NamePayload<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SemesterPayload {
    pub number: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_uses_camel_case_file_url() {
        let note: Note =
            serde_json::from_str(r#"{"id":"9f1c","title":"Week 1","fileUrl":"/files/9f1c.pdf"}"#)
                .unwrap();
        assert_eq!(note.file_url, "/files/9f1c.pdf");
    }

    #[test]
    fn test_login_response_without_role_is_user() {
        let resp: LoginResponse = serde_json::from_str(r#"{"accessToken":"t"}"#).unwrap();
        assert_eq!(resp.role, Role::User);
        assert_eq!(resp.expires_in, None);
    }
}
