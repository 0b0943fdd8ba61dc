//! HTTP note service client.
//!
//! The UI is single-threaded and blocking, so each call runs on a private
//! current-thread tokio runtime and blocks until the response is in.
//!
//! | operation           | request                         |
//! |---------------------|---------------------------------|
//! | list_notes          | `GET /notes`                    |
//! | get_note            | `GET /notes/{id}`               |
//! | get_note_content    | `GET /notes/{id}/content`       |
//! | create_note         | `POST /notes` `{"title"}`       |
//! | update_note         | `POST /notes/{id}` `{"title"}`  |
//! | update_note_content | `POST /notes/{id}/content` raw  |
//! | delete_note         | `DELETE /notes/{id}`            |

use log::{debug, info, warn};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;

use super::{NoteStore, StoreError};
use crate::core::notes::{Note, NoteId};

// ============================================================================
// Wire Types
// ============================================================================

/// A note as the service returns it. Extra fields are ignored.
#[derive(Deserialize, Debug)]
struct NoteResponse {
    id: NoteId,
    title: String,
}

impl From<NoteResponse> for Note {
    fn from(r: NoteResponse) -> Self {
        Note::new(r.id, r.title)
    }
}

#[derive(Serialize, Debug)]
struct TitleRequest<'a> {
    title: &'a str,
}

// ============================================================================
// Store Implementation
// ============================================================================

pub struct RemoteNoteStore {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
    runtime: Runtime,
}

impl RemoteNoteStore {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
            runtime,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send `request`, mapping transport failures and non-success statuses.
    fn send(&self, request: RequestBuilder, id: Option<NoteId>) -> Result<Response, StoreError> {
        let request = self.authorized(request);
        self.runtime.block_on(async {
            let response = request
                .send()
                .await
                .map_err(|e| StoreError::Network(e.to_string()))?;

            let status = response.status();
            debug!("{} {}", status, response.url());
            if status.is_success() {
                return Ok(response);
            }
            if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
                return Err(StoreError::NotFound(id));
            }
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Note service error: {} - {}", status, message);
            Err(StoreError::Api {
                status: status.as_u16(),
                message,
            })
        })
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        id: Option<NoteId>,
    ) -> Result<T, StoreError> {
        let response = self.send(request, id)?;
        self.runtime.block_on(async {
            response
                .json::<T>()
                .await
                .map_err(|e| StoreError::Parse(e.to_string()))
        })
    }
}

impl NoteStore for RemoteNoteStore {
    fn name(&self) -> &str {
        "remote"
    }

    fn list_notes(&mut self) -> Result<Vec<Note>, StoreError> {
        let notes: Vec<NoteResponse> = self.send_json(self.client.get(self.url("/notes")), None)?;
        info!("Listed {} notes from {}", notes.len(), self.base_url);
        Ok(notes.into_iter().map(Note::from).collect())
    }

    fn get_note(&mut self, id: NoteId) -> Result<Note, StoreError> {
        let url = self.url(&format!("/notes/{id}"));
        let note: NoteResponse = self.send_json(self.client.get(url), Some(id))?;
        Ok(note.into())
    }

    fn get_note_content(&mut self, id: NoteId) -> Result<Vec<u8>, StoreError> {
        let url = self.url(&format!("/notes/{id}/content"));
        let response = self.send(self.client.get(url), Some(id))?;
        let bytes = self
            .runtime
            .block_on(response.bytes())
            .map_err(|e| StoreError::Network(e.to_string()))?;
        debug!("Fetched content for note {} ({} bytes)", id, bytes.len());
        Ok(bytes.to_vec())
    }

    fn create_note(&mut self, title: &str) -> Result<Note, StoreError> {
        let request = self
            .client
            .post(self.url("/notes"))
            .json(&TitleRequest { title });
        let note: NoteResponse = self.send_json(request, None)?;
        info!("Created note {}", note.id);
        Ok(note.into())
    }

    fn update_note(&mut self, id: NoteId, title: &str) -> Result<(), StoreError> {
        let request = self
            .client
            .post(self.url(&format!("/notes/{id}")))
            .json(&TitleRequest { title });
        self.send(request, Some(id))?;
        info!("Renamed note {}", id);
        Ok(())
    }

    fn update_note_content(&mut self, id: NoteId, content: &[u8]) -> Result<(), StoreError> {
        let request = self
            .client
            .post(self.url(&format!("/notes/{id}/content")))
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(content.to_vec());
        self.send(request, Some(id))?;
        info!("Uploaded content for note {} ({} bytes)", id, content.len());
        Ok(())
    }

    fn delete_note(&mut self, id: NoteId) -> Result<(), StoreError> {
        let request = self.client.delete(self.url(&format!("/notes/{id}")));
        self.send(request, Some(id))?;
        info!("Deleted note {}", id);
        Ok(())
    }
}
