//! Remote note service adapter.
//!
//! Translates the four note operations into GraphQL calls against the managed
//! data API and normalizes the responses into [`Note`] values. Each operation
//! is a single request/response exchange: no retries, no timeouts, no
//! batching. Responses are decoded into explicit record types and validated
//! field-by-field before they become visible to the rest of the system.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{Note, NoteId, NoteInput};
use crate::util::{compact_text, is_http_url, normalize_text_option};

const LIST_NOTES_QUERY: &str =
    "query ListNotes { listNotes { items { id header content tags } } }";
const CREATE_NOTE_MUTATION: &str = "mutation CreateNote($input: CreateNoteInput!) \
     { createNote(input: $input) { id header content tags } }";
const UPDATE_NOTE_MUTATION: &str = "mutation UpdateNote($input: UpdateNoteInput!) \
     { updateNote(input: $input) { id header content tags } }";
const DELETE_NOTE_MUTATION: &str =
    "mutation DeleteNote($input: DeleteNoteInput!) { deleteNote(input: $input) { id } }";

/// Boundary between the collection controller and the remote data service.
///
/// Implemented by [`NotesApiClient`] in production and by in-memory fakes in
/// tests. Every method is a single attempt; failures propagate unchanged.
pub trait NoteService {
    /// Fetch the full note set for the authenticated user in one round trip.
    fn list_notes(&self) -> impl std::future::Future<Output = ServiceResult<Vec<Note>>>;

    /// Create a note from already-normalized input; returns the record with
    /// its server-assigned id.
    fn create_note(
        &self,
        input: &NoteInput,
    ) -> impl std::future::Future<Output = ServiceResult<Note>>;

    /// Update an existing note; returns the record as stored.
    fn update_note(
        &self,
        id: &NoteId,
        input: &NoteInput,
    ) -> impl std::future::Future<Output = ServiceResult<Note>>;

    /// Delete a note by id.
    fn delete_note(&self, id: &NoteId) -> impl std::future::Future<Output = ServiceResult<()>>;
}

/// GraphQL client for the managed note data API.
///
/// Constructed explicitly after sign-in with the session access token and
/// passed by value to whoever needs it; there is no process-wide instance.
#[derive(Debug, Clone)]
pub struct NotesApiClient {
    endpoint: String,
    access_token: String,
    client: Client,
}

impl NotesApiClient {
    /// Build a client for the given GraphQL endpoint and session token.
    pub fn new(
        endpoint: impl Into<String>,
        access_token: impl Into<String>,
    ) -> ServiceResult<Self> {
        let endpoint = normalize_text_option(Some(endpoint.into())).ok_or(
            ServiceError::InvalidConfiguration("data API endpoint must not be empty"),
        )?;
        if !is_http_url(&endpoint) {
            return Err(ServiceError::InvalidConfiguration(
                "data API endpoint must include http:// or https://",
            ));
        }
        let access_token = access_token.into().trim().to_string();
        if access_token.is_empty() {
            return Err(ServiceError::InvalidConfiguration(
                "access token must not be empty",
            ));
        }

        Ok(Self {
            endpoint,
            access_token,
            client: Client::builder().build()?,
        })
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &'static str,
        variables: serde_json::Value,
    ) -> ServiceResult<T> {
        tracing::debug!("Dispatching GraphQL request to {}", self.endpoint);
        let payload = serde_json::json!({
            "query": query,
            "variables": variables,
        });
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Api(format!(
                "{} (HTTP {})",
                compact_text(&body),
                status.as_u16()
            )));
        }

        let envelope = response.json::<GraphQlEnvelope<T>>().await?;
        envelope.into_data()
    }
}

impl NoteService for NotesApiClient {
    async fn list_notes(&self) -> ServiceResult<Vec<Note>> {
        let data: ListNotesData = self
            .execute(LIST_NOTES_QUERY, serde_json::json!({}))
            .await?;
        data.list_notes
            .items
            .into_iter()
            .map(Note::try_from)
            .collect()
    }

    async fn create_note(&self, input: &NoteInput) -> ServiceResult<Note> {
        let variables = serde_json::json!({ "input": input });
        let data: CreateNoteData = self.execute(CREATE_NOTE_MUTATION, variables).await?;
        data.create_note.try_into()
    }

    async fn update_note(&self, id: &NoteId, input: &NoteInput) -> ServiceResult<Note> {
        let variables = serde_json::json!({
            "input": {
                "id": id,
                "header": input.header,
                "content": input.content,
                "tags": input.tags,
            }
        });
        let data: UpdateNoteData = self.execute(UPDATE_NOTE_MUTATION, variables).await?;
        data.update_note.try_into()
    }

    async fn delete_note(&self, id: &NoteId) -> ServiceResult<()> {
        let variables = serde_json::json!({ "input": { "id": id } });
        let _data: DeleteNoteData = self.execute(DELETE_NOTE_MUTATION, variables).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlEnvelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

impl<T> GraphQlEnvelope<T> {
    fn into_data(self) -> ServiceResult<T> {
        if let Some(error) = self.errors.first() {
            if error
                .error_type
                .as_deref()
                .is_some_and(|kind| kind.contains("NotFound"))
            {
                return Err(ServiceError::NotFound(error.message.clone()));
            }
            let joined = self
                .errors
                .iter()
                .map(|error| error.message.trim())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ServiceError::Api(joined));
        }
        self.data.ok_or_else(|| {
            ServiceError::InvalidPayload("response contained neither data nor errors".to_string())
        })
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(rename = "errorType", default)]
    error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListNotesData {
    #[serde(rename = "listNotes")]
    list_notes: NoteConnection,
}

#[derive(Debug, Deserialize)]
struct NoteConnection {
    items: Vec<NoteRecord>,
}

#[derive(Debug, Deserialize)]
struct CreateNoteData {
    #[serde(rename = "createNote")]
    create_note: NoteRecord,
}

#[derive(Debug, Deserialize)]
struct UpdateNoteData {
    #[serde(rename = "updateNote")]
    update_note: NoteRecord,
}

#[derive(Debug, Deserialize)]
struct DeleteNoteData {
    #[serde(rename = "deleteNote")]
    #[allow(dead_code)]
    delete_note: DeletedRecord,
}

#[derive(Debug, Deserialize)]
struct DeletedRecord {
    #[allow(dead_code)]
    id: String,
}

/// Wire shape of a note as returned by the data API, before validation.
#[derive(Debug, Deserialize)]
struct NoteRecord {
    id: String,
    #[serde(default)]
    header: Option<String>,
    content: String,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

impl TryFrom<NoteRecord> for Note {
    type Error = ServiceError;

    fn try_from(record: NoteRecord) -> ServiceResult<Self> {
        let id = record.id.trim();
        if id.is_empty() {
            return Err(ServiceError::InvalidPayload(
                "note record is missing an id".to_string(),
            ));
        }
        if record.content.trim().is_empty() {
            return Err(ServiceError::InvalidPayload(format!(
                "note {id} has empty content"
            )));
        }
        Ok(Self {
            id: NoteId::new(id),
            header: normalize_text_option(record.header),
            content: record.content,
            tags: record.tags.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn decode_list(payload: &str) -> ServiceResult<Vec<Note>> {
        let envelope: GraphQlEnvelope<ListNotesData> = serde_json::from_str(payload)?;
        envelope
            .into_data()?
            .list_notes
            .items
            .into_iter()
            .map(Note::try_from)
            .collect()
    }

    #[test]
    fn valid_record_normalizes_blank_header_and_missing_tags() {
        let payload = r#"{
            "data": { "listNotes": { "items": [
                { "id": "n1", "header": "  ", "content": "hello" }
            ] } }
        }"#;
        let notes = decode_list(payload).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, NoteId::new("n1"));
        assert_eq!(notes[0].header, None);
        assert_eq!(notes[0].tags, Vec::<String>::new());
    }

    #[test]
    fn record_with_empty_id_is_rejected() {
        let payload = r#"{
            "data": { "listNotes": { "items": [
                { "id": "  ", "content": "hello", "tags": [] }
            ] } }
        }"#;
        assert!(matches!(
            decode_list(payload),
            Err(ServiceError::InvalidPayload(_))
        ));
    }

    #[test]
    fn record_with_blank_content_is_rejected() {
        let payload = r#"{
            "data": { "listNotes": { "items": [
                { "id": "n1", "content": "   ", "tags": [] }
            ] } }
        }"#;
        assert!(matches!(
            decode_list(payload),
            Err(ServiceError::InvalidPayload(_))
        ));
    }

    #[test]
    fn graphql_errors_become_api_errors() {
        let payload = r#"{
            "data": null,
            "errors": [
                { "message": "Unauthorized" },
                { "message": "Request rejected" }
            ]
        }"#;
        let error = decode_list(payload).unwrap_err();
        match error {
            ServiceError::Api(message) => {
                assert_eq!(message, "Unauthorized; Request rejected");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn not_found_error_type_maps_to_not_found() {
        let payload = r#"{
            "data": null,
            "errors": [
                { "message": "no such note", "errorType": "NotFoundError" }
            ]
        }"#;
        assert!(matches!(
            decode_list(payload),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn empty_envelope_is_invalid_payload() {
        assert!(matches!(
            decode_list("{}"),
            Err(ServiceError::InvalidPayload(_))
        ));
    }

    #[test]
    fn client_rejects_blank_endpoint_and_token() {
        assert!(matches!(
            NotesApiClient::new("  ", "token"),
            Err(ServiceError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            NotesApiClient::new("https://api.example.com/graphql", " "),
            Err(ServiceError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            NotesApiClient::new("api.example.com/graphql", "token"),
            Err(ServiceError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn note_input_serializes_with_null_header() {
        let input = NoteInput {
            header: None,
            content: "hello".to_string(),
            tags: vec!["a".to_string()],
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "header": null, "content": "hello", "tags": ["a"] })
        );
    }
}
