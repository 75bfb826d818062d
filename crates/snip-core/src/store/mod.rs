//! Remote note store client, speaking Supabase's PostgREST row API.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::config::SupabaseConfig;
use crate::models::{Note, NoteId};
use crate::util::compact_text;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not signed in")]
    NotSignedIn,
    #[error("Note not found: {0}")]
    NotFound(NoteId),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Note store API error: {0}")]
    Api(String),
    #[error("Local storage error: {0}")]
    Storage(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Remote CRUD collaborator contract for note rows.
#[allow(async_fn_in_trait)]
pub trait RemoteNoteStore {
    /// All notes owned by `user_id`, in stable id order.
    async fn select(&self, user_id: &str) -> StoreResult<Vec<Note>>;

    /// Insert a new note; the store assigns the id.
    async fn insert(&self, user_id: &str, content: &str) -> StoreResult<Note>;

    /// Replace the content of the note matched by `id`.
    ///
    /// Succeeds without echoing the note body back.
    async fn update(&self, id: NoteId, content: &str) -> StoreResult<()>;

    /// Delete the note matched by `id`.
    async fn delete(&self, id: NoteId) -> StoreResult<()>;
}

/// PostgREST client for the `notes` table, authenticated as one user.
///
/// Built per session; the bearer token is the session's access token, which
/// is also what scopes row visibility under row-level security.
#[derive(Clone)]
pub struct SupabaseNoteStore {
    rest_url: String,
    anon_key: String,
    access_token: String,
    client: Client,
}

impl SupabaseNoteStore {
    pub fn new(config: &SupabaseConfig, access_token: impl Into<String>) -> StoreResult<Self> {
        Ok(Self {
            rest_url: config.rest_endpoint(),
            anon_key: config.anon_key().to_string(),
            access_token: access_token.into(),
            client: Client::builder().build()?,
        })
    }

    fn notes_request(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.access_token)
    }

    fn notes_url(&self) -> String {
        format!("{}/notes", self.rest_url)
    }

    async fn expect_rows(&self, response: Response) -> StoreResult<Vec<Note>> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(parse_api_error(status, &body)));
        }
        Ok(response.json::<Vec<Note>>().await?)
    }
}

impl RemoteNoteStore for SupabaseNoteStore {
    async fn select(&self, user_id: &str) -> StoreResult<Vec<Note>> {
        let response = self
            .notes_request(self.client.get(self.notes_url()).query(&[
                ("user_id", format!("eq.{user_id}").as_str()),
                ("select", "*"),
                ("order", "id.asc"),
            ]))
            .send()
            .await?;

        self.expect_rows(response).await
    }

    async fn insert(&self, user_id: &str, content: &str) -> StoreResult<Note> {
        let payload = serde_json::json!({ "user_id": user_id, "content": content });
        let response = self
            .notes_request(
                self.client
                    .post(self.notes_url())
                    .header("Prefer", "return=representation")
                    .json(&payload),
            )
            .send()
            .await?;

        let rows = self.expect_rows(response).await?;
        rows.into_iter().next().ok_or_else(|| {
            StoreError::Api("Insert response did not include the created note".to_string())
        })
    }

    async fn update(&self, id: NoteId, content: &str) -> StoreResult<()> {
        let payload = serde_json::json!({ "content": content });
        let response = self
            .notes_request(
                self.client
                    .patch(self.notes_url())
                    .query(&[("id", format!("eq.{id}"))])
                    .header("Prefer", "return=representation")
                    .json(&payload),
            )
            .send()
            .await?;

        let rows = self.expect_rows(response).await?;
        confirm_matched_row(&rows, id)
    }

    async fn delete(&self, id: NoteId) -> StoreResult<()> {
        let response = self
            .notes_request(
                self.client
                    .delete(self.notes_url())
                    .query(&[("id", format!("eq.{id}"))])
                    .header("Prefer", "return=representation"),
            )
            .send()
            .await?;

        let rows = self.expect_rows(response).await?;
        confirm_matched_row(&rows, id)
    }
}

/// PostgREST answers a filter that matched nothing with a success status and
/// an empty result set; fold that into a not-found error.
fn confirm_matched_row(rows: &[Note], id: NoteId) -> StoreResult<()> {
    if rows.is_empty() {
        Err(StoreError::NotFound(id))
    } else {
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<StoreErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.details).or(payload.hint) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", compact_text(trimmed), status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_result_set_maps_to_not_found() {
        let id = NoteId::from_raw(9);
        assert!(matches!(
            confirm_matched_row(&[], id),
            Err(StoreError::NotFound(missing)) if missing == id
        ));
    }

    #[test]
    fn matched_rows_confirm_the_mutation() {
        let note = Note {
            id: NoteId::from_raw(9),
            user_id: "u1".to_string(),
            content: "water the plants".to_string(),
        };
        assert!(confirm_matched_row(&[note], NoteId::from_raw(9)).is_ok());
    }

    #[test]
    fn api_error_prefers_postgrest_message() {
        let folded = parse_api_error(
            StatusCode::CONFLICT,
            r#"{"message": "duplicate key value", "code": "23505"}"#,
        );
        assert_eq!(folded, "duplicate key value (409)");
    }

    #[test]
    fn api_error_falls_back_to_raw_body() {
        assert_eq!(
            parse_api_error(StatusCode::INTERNAL_SERVER_ERROR, "nope"),
            "nope (500)"
        );
        assert_eq!(
            parse_api_error(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "HTTP 500"
        );
    }
}
