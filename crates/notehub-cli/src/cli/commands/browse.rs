//! Browse command handlers.

use anyhow::{Context, Result, bail};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use notehub_core::api::ApiClient;
use notehub_core::api::nodes::{Listing, semester_label};
use notehub_core::config::Config;
use notehub_core::hierarchy::Cursor;
use notehub_core::session::SessionStore;

#[cfg(feature = "tui")]
pub async fn interactive(config: &Config, api: ApiClient, store: SessionStore) -> Result<()> {
    notehub_tui::run_interactive(config, api, store).await
}

#[cfg(not(feature = "tui"))]
pub async fn interactive(_config: &Config, _api: ApiClient, _store: SessionStore) -> Result<()> {
    bail!("This build has no interactive mode. Use `notehub ls` instead.")
}

pub async fn ls(
    api: &ApiClient,
    store: &SessionStore,
    stream: Option<i64>,
    semester: Option<i64>,
    subject: Option<i64>,
) -> Result<()> {
    let Some(cursor) = Cursor::from_ids(stream, semester, subject) else {
        bail!("Ids must be given top-down: --stream, then --semester, then --subject");
    };
    let Some(session) = store.load().context("load session")? else {
        bail!("Not logged in. Run `notehub login` first.");
    };

    let listing = match api.with_session(&session).list(cursor).await {
        Ok(listing) => listing,
        Err(e) if e.is_session_expired() => {
            store.clear().context("remove session")?;
            return Err(e.into());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("list {}", cursor.level().plural()));
        }
    };

    if listing.is_empty() {
        println!("No {} yet", listing.level().plural());
    } else {
        println!("{}", listing_table(&listing));
    }
    Ok(())
}

/// Renders a listing as a table, one row per entity in server order.
fn listing_table(listing: &Listing) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    match listing {
        Listing::Streams(items) => {
            table.set_header(["ID", "Name"]);
            for stream in items {
                table.add_row([stream.id.to_string(), stream.name.clone()]);
            }
        }
        Listing::Semesters(items) => {
            table.set_header(["ID", "Semester"]);
            for semester in items {
                table.add_row([semester.id.to_string(), semester_label(semester.number)]);
            }
        }
        Listing::Subjects(items) => {
            table.set_header(["ID", "Name"]);
            for subject in items {
                table.add_row([subject.id.to_string(), subject.name.clone()]);
            }
        }
        Listing::Notes(items) => {
            table.set_header(["ID", "Title", "File"]);
            for note in items {
                table.add_row([note.id.clone(), note.title.clone(), note.file_url.clone()]);
            }
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use notehub_core::api::models::{Note, Semester};

    use super::*;

    #[test]
    fn test_semester_rows_use_labels() {
        let listing = Listing::Semesters(vec![
            Semester { id: 7, number: 2 },
            Semester { id: 3, number: 1 },
        ]);
        let rendered = listing_table(&listing).to_string();

        assert!(rendered.contains("Semester 2"));
        // server order is kept
        let second = rendered.find("Semester 2").unwrap();
        let first = rendered.find("Semester 1").unwrap();
        assert!(second < first);
    }

    #[test]
    fn test_note_rows_include_file_column() {
        let listing = Listing::Notes(vec![Note {
            id: "n-1".to_string(),
            title: "Week 1".to_string(),
            file_url: "/uploads/week1.pdf".to_string(),
        }]);
        let rendered = listing_table(&listing).to_string();

        assert!(rendered.contains("File"));
        assert!(rendered.contains("n-1"));
        assert!(rendered.contains("/uploads/week1.pdf"));
    }
}
