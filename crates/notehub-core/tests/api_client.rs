use notehub_core::api::auth::Registration;
use notehub_core::api::models::{Note, Stream};
use notehub_core::api::nodes::{Listing, NewNode};
use notehub_core::api::{ApiClient, ApiError};
use notehub_core::hierarchy::{Cursor, Level, NodeId};
use notehub_core::session::Role;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), None).unwrap()
}

fn authed(server: &MockServer) -> ApiClient {
    client(server).with_token("tok-123")
}

#[tokio::test]
async fn test_login_returns_session_with_role() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "admin@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "tok-123",
            "role": "ADMIN",
            "expiresIn": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = client(&server)
        .login("admin@example.com", "secret")
        .await
        .unwrap();

    assert_eq!(session.token, "tok-123");
    assert_eq!(session.role, Role::Admin);
    assert_eq!(session.email.as_deref(), Some("admin@example.com"));
    assert!(session.expires_at.is_some());
    assert!(!session.is_expired());
}

#[tokio::test]
async fn test_login_with_unrepresentable_lifetime_never_expires() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "t",
            "role": "USER",
            "expiresIn": 9_000_000_000_000_000_i64
        })))
        .mount(&server)
        .await;

    let session = client(&server).login("a@b.c", "pw").await.unwrap();

    assert_eq!(session.token, "t");
    assert_eq!(session.expires_at, None);
    assert!(!session.is_expired());
}

#[tokio::test]
async fn test_login_failure_is_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server).login("a@b.c", "nope").await.unwrap_err();
    assert_eq!(err, ApiError::InvalidCredentials);
}

#[tokio::test]
async fn test_register_sends_user_role() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "abcd",
            "role": "USER"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let registration = Registration {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        password: "abcd".to_string(),
        confirm_password: "abcd".to_string(),
    };
    client(&server).register(&registration).await.unwrap();
}

#[tokio::test]
async fn test_register_surfaces_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Email already in use"})),
        )
        .mount(&server)
        .await;

    let registration = Registration {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        password: "abcd".to_string(),
        confirm_password: "abcd".to_string(),
    };
    let err = client(&server).register(&registration).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Registration {
            message: "Email already in use".to_string()
        }
    );
}

#[tokio::test]
async fn test_register_validation_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let registration = Registration {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        password: "abc".to_string(),
        confirm_password: "abc".to_string(),
    };
    let err = client(&server).register(&registration).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn test_list_streams_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/streams"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2, "name": "Science"},
            {"id": 1, "name": "Arts"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let listing = authed(&server).list(Cursor::AtStreams).await.unwrap();
    assert_eq!(
        listing,
        Listing::Streams(vec![
            Stream {
                id: 2,
                name: "Science".to_string()
            },
            Stream {
                id: 1,
                name: "Arts".to_string()
            },
        ])
    );
}

#[tokio::test]
async fn test_list_subjects_uses_semester_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/semesters/9/subjects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let listing = authed(&server)
        .list(Cursor::AtSubjects {
            stream_id: 1,
            semester_id: 9,
        })
        .await
        .unwrap();
    assert!(listing.is_empty());
    assert_eq!(listing.level(), Level::Subjects);
}

#[tokio::test]
async fn test_unauthorized_maps_to_session_expired_on_every_endpoint() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let api = authed(&server);
    assert_eq!(
        api.list(Cursor::AtStreams).await.unwrap_err(),
        ApiError::SessionExpired
    );
    assert_eq!(
        api.delete(Level::Semesters, &NodeId::Numeric(4))
            .await
            .unwrap_err(),
        ApiError::SessionExpired
    );
    assert_eq!(
        api.create(
            Cursor::AtStreams,
            NewNode::Stream {
                name: "Law".to_string()
            }
        )
        .await
        .unwrap_err(),
        ApiError::SessionExpired
    );
    assert_eq!(api.whoami().await.unwrap_err(), ApiError::SessionExpired);
}

#[tokio::test]
async fn test_other_failures_are_status_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/streams"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = authed(&server).list(Cursor::AtStreams).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 503,
            body: "maintenance".to_string()
        }
    );
}

#[tokio::test]
async fn test_malformed_list_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/streams"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = authed(&server).list(Cursor::AtStreams).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_create_semester_posts_number() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/streams/3/semesters"))
        .and(body_json(json!({"number": 2})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    authed(&server)
        .create(
            Cursor::AtSemesters { stream_id: 3 },
            NewNode::Semester { number: 2 },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_upload_note_is_multipart() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let file = dir.path().join("week1.pdf");
    std::fs::write(&file, b"%PDF-1.4 fake").unwrap();

    Mock::given(method("POST"))
        .and(path("/subjects/7/notes"))
        .and(body_string_contains("name=\"title\""))
        .and(body_string_contains("Week 1"))
        .and(body_string_contains("filename=\"week1.pdf\""))
        .and(body_string_contains("%PDF-1.4 fake"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    authed(&server)
        .create(
            Cursor::AtNotes {
                stream_id: 1,
                semester_id: 2,
                subject_id: 7,
            },
            NewNode::Note {
                title: "Week 1".to_string(),
                file,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_note_uses_string_id() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/notes/5d1e-aa"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    authed(&server)
        .delete(Level::Notes, &NodeId::Text("5d1e-aa".to_string()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_download_note_writes_file() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/files/week1.pdf"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"note body".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let note = Note {
        id: "n1".to_string(),
        title: "Week 1".to_string(),
        file_url: "/files/week1.pdf".to_string(),
    };
    let written = authed(&server)
        .download_note(&note, dir.path())
        .await
        .unwrap();

    assert_eq!(written, dir.path().join("week1.pdf"));
    assert_eq!(std::fs::read(&written).unwrap(), b"note body");
}

#[tokio::test]
async fn test_whoami() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"email": "a@b.c"})))
        .mount(&server)
        .await;

    let me = authed(&server).whoami().await.unwrap();
    assert_eq!(me.email, "a@b.c");
}

#[tokio::test]
async fn test_missing_token_is_session_expired_without_request() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).list(Cursor::AtStreams).await.unwrap_err();
    assert_eq!(err, ApiError::SessionExpired);
}
