//! Listing, creating and deleting nodes, plus note downloads.

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::pin::pin;

use futures_util::{Stream as FuturesStream, StreamExt};
use percent_encoding::percent_decode_str;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tokio::io::AsyncWriteExt;

use super::models::{NamePayload, Note, Semester, SemesterPayload, Stream, Subject};
use super::{ApiClient, ApiError, ApiResult, ensure_success};
use crate::hierarchy::{Cursor, Level, NodeId};

/// Contents of one list, in server order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Streams(Vec<Stream>),
    Semesters(Vec<Semester>),
    Subjects(Vec<Subject>),
    Notes(Vec<Note>),
}

impl Listing {
    pub fn level(&self) -> Level {
        match self {
            Listing::Streams(_) => Level::Streams,
            Listing::Semesters(_) => Level::Semesters,
            Listing::Subjects(_) => Level::Subjects,
            Listing::Notes(_) => Level::Notes,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Listing::Streams(items) => items.len(),
            Listing::Semesters(items) => items.len(),
            Listing::Subjects(items) => items.len(),
            Listing::Notes(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(id, label)` pairs for display, in server order.
    pub fn entries(&self) -> Vec<(NodeId, String)> {
        match self {
            Listing::Streams(items) => items
                .iter()
                .map(|s| (NodeId::Numeric(s.id), s.name.clone()))
                .collect(),
            Listing::Semesters(items) => items
                .iter()
                .map(|s| (NodeId::Numeric(s.id), semester_label(s.number)))
                .collect(),
            Listing::Subjects(items) => items
                .iter()
                .map(|s| (NodeId::Numeric(s.id), s.name.clone()))
                .collect(),
            Listing::Notes(items) => items
                .iter()
                .map(|n| (NodeId::Text(n.id.clone()), n.title.clone()))
                .collect(),
        }
    }
}

pub fn semester_label(number: i32) -> String {
    format!("Semester {number}")
}

/// A node to be created under the current cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewNode {
    Stream { name: String },
    Semester { number: i32 },
    Subject { name: String },
    Note { title: String, file: PathBuf },
}

impl NewNode {
    pub fn level(&self) -> Level {
        match self {
            NewNode::Stream { .. } => Level::Streams,
            NewNode::Semester { .. } => Level::Semesters,
            NewNode::Subject { .. } => Level::Subjects,
            NewNode::Note { .. } => Level::Notes,
        }
    }

    /// Parses the semester number typed into a form.
    pub fn parse_semester_number(input: &str) -> ApiResult<i32> {
        input.trim().parse::<i32>().map_err(|_| {
            ApiError::Validation("Semester number must be a whole number".to_string())
        })
    }

    /// Local checks run before any request is sent.
    pub fn validate(&self) -> ApiResult<()> {
        match self {
            NewNode::Stream { name } | NewNode::Subject { name } if name.trim().is_empty() => Err(
                ApiError::Validation(format!("Please enter a {} name", self.level().noun())),
            ),
            NewNode::Note { title, .. } if title.trim().is_empty() => {
                Err(ApiError::Validation("Please enter a title".to_string()))
            }
            NewNode::Note { file, .. } if file.as_os_str().is_empty() || !file.is_file() => {
                Err(ApiError::Validation("Please select a file".to_string()))
            }
            _ => Ok(()),
        }
    }
}

impl ApiClient {
    /// Fetches the list the cursor points at.
    pub async fn list(&self, cursor: Cursor) -> ApiResult<Listing> {
        let path = cursor.list_path();
        tracing::debug!(%path, "fetching list");
        let response = self.authorized_request(Method::GET, &path, |b| b).await?;

        let listing = match cursor.level() {
            Level::Streams => Listing::Streams(response.json().await?),
            Level::Semesters => Listing::Semesters(response.json().await?),
            Level::Subjects => Listing::Subjects(response.json().await?),
            Level::Notes => Listing::Notes(response.json().await?),
        };
        Ok(listing)
    }

    /// Creates `node` in the list the cursor points at.
    pub async fn create(&self, cursor: Cursor, node: NewNode) -> ApiResult<()> {
        if node.level() != cursor.level() {
            return Err(ApiError::Validation(format!(
                "Cannot add a {} while viewing {}",
                node.level().noun(),
                cursor.level()
            )));
        }
        node.validate()?;

        let path = cursor.list_path();
        match node {
            NewNode::Stream { name } | NewNode::Subject { name } => {
                self.authorized_request(Method::POST, &path, |b| {
                    b.json(&NamePayload { name: name.trim() })
                })
                .await?;
            }
            NewNode::Semester { number } => {
                self.authorized_request(Method::POST, &path, |b| {
                    b.json(&SemesterPayload { number })
                })
                .await?;
            }
            NewNode::Note { title, file } => {
                let form = note_form(title.trim(), &file).await?;
                self.authorized_request(Method::POST, &path, |b| b.multipart(form))
                    .await?;
            }
        }

        tracing::info!(level = %cursor.level(), "node created");
        Ok(())
    }

    pub async fn delete(&self, level: Level, id: &NodeId) -> ApiResult<()> {
        let path = level.delete_path(id);
        self.authorized_request(Method::DELETE, &path, |b| b).await?;
        tracing::info!(%level, %id, "node deleted");
        Ok(())
    }

    /// Downloads a note's file into `dest_dir` and returns the written path.
    ///
    /// The bearer token is only sent when the file lives on the same origin
    /// as the server.
    pub async fn download_note(&self, note: &Note, dest_dir: &Path) -> ApiResult<PathBuf> {
        let url = self.resolve_file_url(&note.file_url)?;

        let response = if self.is_same_origin(&url) {
            self.send_authorized(Method::GET, url.as_str(), |b| b).await?
        } else {
            let response = self.http.get(url.clone()).send().await?;
            ensure_success(response).await?
        };

        tokio::fs::create_dir_all(dest_dir)
            .await
            .map_err(|e| io_error("create", dest_dir, &e))?;
        let dest = unique_path(dest_dir, &download_file_name(&url, note));

        save_stream(response.bytes_stream(), &dest).await?;

        tracing::info!(path = %dest.display(), "note downloaded");
        Ok(dest)
    }
}

async fn note_form(title: &str, file: &Path) -> ApiResult<Form> {
    let bytes = tokio::fs::read(file)
        .await
        .map_err(|e| io_error("read", file, &e))?;
    let file_name = file
        .file_name()
        .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());

    Ok(Form::new()
        .text("title", title.to_string())
        .part("file", Part::bytes(bytes).file_name(file_name)))
}

/// Writes `body` to `dest` through a sibling `.part` file.
///
/// On any failure the partial file is removed and `dest` is never created.
async fn save_stream<S, B, E>(body: S, dest: &Path) -> ApiResult<()>
where
    S: FuturesStream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    ApiError: From<E>,
{
    let partial = partial_path(dest);
    let saved = async {
        write_chunks(body, &partial).await?;
        tokio::fs::rename(&partial, dest)
            .await
            .map_err(|e| io_error("rename", &partial, &e))
    }
    .await;

    if saved.is_err()
        && let Err(e) = tokio::fs::remove_file(&partial).await
        && e.kind() != ErrorKind::NotFound
    {
        tracing::warn!(path = %partial.display(), error = %e, "Failed to remove partial download");
    }
    saved
}

async fn write_chunks<S, B, E>(body: S, path: &Path) -> ApiResult<()>
where
    S: FuturesStream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    ApiError: From<E>,
{
    let mut body = pin!(body);
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| io_error("create", path, &e))?;
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        file.write_all(chunk.as_ref())
            .await
            .map_err(|e| io_error("write", path, &e))?;
    }
    file.flush()
        .await
        .map_err(|e| io_error("write", path, &e))
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}

fn io_error(action: &str, path: &Path, e: &std::io::Error) -> ApiError {
    ApiError::Io(format!("Failed to {action} {}: {e}", path.display()))
}

/// Picks a file name: last URL segment (percent-decoded), else the note title.
fn download_file_name(url: &url::Url, note: &Note) -> String {
    let from_url = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned());

    let raw = from_url.unwrap_or_else(|| note.title.clone());
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let cleaned = cleaned.trim().trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        format!("note-{}", note.id)
    } else {
        cleaned
    }
}

/// Appends ` (n)` before the extension until the path is free.
fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }
    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    };
    (1..)
        .map(|n| match ext {
            Some(ext) => dir.join(format!("{stem} ({n}).{ext}")),
            None => dir.join(format!("{stem} ({n})")),
        })
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn note(title: &str, file_url: &str) -> Note {
        Note {
            id: "n-1".to_string(),
            title: title.to_string(),
            file_url: file_url.to_string(),
        }
    }

    #[test]
    fn test_entries_keep_server_order_and_labels() {
        let listing = Listing::Semesters(vec![
            Semester { id: 5, number: 2 },
            Semester { id: 3, number: 1 },
        ]);
        assert_eq!(
            listing.entries(),
            vec![
                (NodeId::Numeric(5), "Semester 2".to_string()),
                (NodeId::Numeric(3), "Semester 1".to_string()),
            ]
        );
    }

    #[test]
    fn test_note_without_file_is_rejected() {
        let node = NewNode::Note {
            title: "Week 1".to_string(),
            file: PathBuf::new(),
        };
        assert_eq!(
            node.validate(),
            Err(ApiError::Validation("Please select a file".to_string()))
        );

        let node = NewNode::Note {
            title: "Week 1".to_string(),
            file: PathBuf::from("/definitely/not/here.pdf"),
        };
        assert!(node.validate().is_err());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let node = NewNode::Subject {
            name: "  ".to_string(),
        };
        assert_eq!(
            node.validate(),
            Err(ApiError::Validation("Please enter a subject name".to_string()))
        );
    }

    #[test]
    fn test_parse_semester_number() {
        assert_eq!(NewNode::parse_semester_number(" 3 "), Ok(3));
        assert!(NewNode::parse_semester_number("three").is_err());
        assert!(NewNode::parse_semester_number("").is_err());
    }

    #[test]
    fn test_download_file_name() {
        let url = url::Url::parse("http://host/files/abc.pdf").unwrap();
        assert_eq!(download_file_name(&url, &note("Week 1", "")), "abc.pdf");

        let url = url::Url::parse("http://host/files/my%20notes.pdf").unwrap();
        assert_eq!(download_file_name(&url, &note("", "")), "my notes.pdf");

        let url = url::Url::parse("http://host/files/a%2Fb.pdf").unwrap();
        assert_eq!(download_file_name(&url, &note("", "")), "a_b.pdf");

        let url = url::Url::parse("http://host/").unwrap();
        assert_eq!(download_file_name(&url, &note("a/b", "")), "a_b");
        assert_eq!(download_file_name(&url, &note("..", "")), "note-n-1");
    }

    #[test]
    fn test_unique_path_appends_counter() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.pdf"), b"x").unwrap();
        std::fs::write(dir.path().join("a (1).pdf"), b"x").unwrap();

        assert_eq!(unique_path(dir.path(), "a.pdf"), dir.path().join("a (2).pdf"));
        assert_eq!(unique_path(dir.path(), "b"), dir.path().join("b"));
    }

    #[tokio::test]
    async fn test_create_rejects_level_mismatch() {
        let api = ApiClient::new("http://127.0.0.1:9", None)
            .unwrap()
            .with_token("t");
        let err = api
            .create(
                Cursor::AtStreams,
                NewNode::Subject {
                    name: "Algebra".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_interrupted_download_leaves_no_file() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("w1.pdf");
        let body = futures_util::stream::iter(vec![
            Ok(b"first half".to_vec()),
            Err(ApiError::Transport("connection reset".to_string())),
        ]);

        let err = save_stream(body, &dest).await.unwrap_err();

        assert_eq!(err, ApiError::Transport("connection reset".to_string()));
        assert!(!dest.exists());
        assert!(!partial_path(&dest).exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_completed_download_is_moved_into_place() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("w1.pdf");
        let body = futures_util::stream::iter(vec![
            Ok::<_, ApiError>(b"hello ".to_vec()),
            Ok(b"notes".to_vec()),
        ]);

        save_stream(body, &dest).await.unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"hello notes");
        assert!(!partial_path(&dest).exists());
    }
}
