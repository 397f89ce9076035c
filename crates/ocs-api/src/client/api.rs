//! Endpoint methods and the `ChatApi` implementation for `OcsClient`.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use crate::types::{
    ChatCompletion, ChatMessage, Experiment, ExperimentSession, NewMessageResponse, Paginated,
};
use crate::{ApiError, ChatApi};

use super::client::OcsClient;

impl OcsClient {
    /// Open a new session, optionally seeded with prior messages.
    pub async fn create_experiment_session(
        &self,
        experiment_id: &str,
        participant_id: &str,
        messages: Option<&[ChatMessage]>,
    ) -> Result<ExperimentSession, ApiError> {
        let mut payload = json!({
            "experiment": experiment_id,
            "participant": participant_id,
        });
        if let Some(messages) = messages.filter(|m| !m.is_empty()) {
            payload["messages"] = json!(messages);
        }

        self.execute_json(
            "creating experiment session",
            Method::POST,
            "/api/sessions/",
            &[],
            Some(&payload),
        )
        .await
    }

    pub async fn retrieve_experiment_session(
        &self,
        session_id: &str,
    ) -> Result<ExperimentSession, ApiError> {
        self.execute_json(
            "retrieving experiment session",
            Method::GET,
            &format!("/api/sessions/{session_id}/"),
            &[],
            None,
        )
        .await
    }

    /// One page of sessions. `ordering` names the sort field, e.g. `-created_at`.
    pub async fn list_experiment_sessions(
        &self,
        cursor: Option<&str>,
        ordering: Option<&str>,
    ) -> Result<Paginated<ExperimentSession>, ApiError> {
        let mut query = Vec::new();
        if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
            query.push(("cursor", cursor));
        }
        if let Some(ordering) = ordering.filter(|o| !o.is_empty()) {
            query.push(("ordering", ordering));
        }

        self.execute_json(
            "listing experiment sessions",
            Method::GET,
            "/api/sessions/",
            &query,
            None,
        )
        .await
    }

    /// Post a message to the experiment's API channel. Without a session id
    /// the service starts a new session.
    pub async fn send_new_api_message(
        &self,
        experiment_id: &str,
        message: &str,
        session_id: Option<&str>,
    ) -> Result<NewMessageResponse, ApiError> {
        let mut payload = json!({ "message": message });
        if let Some(session_id) = session_id.filter(|s| !s.is_empty()) {
            payload["session"] = json!(session_id);
        }

        self.execute_json(
            "sending new message via API",
            Method::POST,
            &format!("/channels/api/{experiment_id}/incoming_message"),
            &[],
            Some(&payload),
        )
        .await
    }

    pub async fn list_experiments(
        &self,
        cursor: Option<&str>,
    ) -> Result<Paginated<Experiment>, ApiError> {
        let mut query = Vec::new();
        if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
            query.push(("cursor", cursor));
        }

        self.execute_json(
            "listing experiments",
            Method::GET,
            "/api/experiments/",
            &query,
            None,
        )
        .await
    }

    pub async fn retrieve_experiment(&self, experiment_id: &str) -> Result<Experiment, ApiError> {
        self.execute_json(
            "retrieving experiment",
            Method::GET,
            &format!("/api/experiments/{experiment_id}/"),
            &[],
            None,
        )
        .await
    }

    /// Raw file content.
    pub async fn download_file_content(&self, file_id: i64) -> Result<Vec<u8>, ApiError> {
        self.execute_bytes(
            "downloading file content",
            Method::GET,
            &format!("/api/files/{file_id}/content"),
            &[],
            None,
        )
        .await
    }

    /// OpenAI-compatible completion against an experiment.
    pub async fn chat_completions(
        &self,
        experiment_id: &str,
        messages: &[ChatMessage],
    ) -> Result<ChatCompletion, ApiError> {
        let payload = json!({ "messages": messages });

        self.execute_json(
            "sending messages for chat completions",
            Method::POST,
            &format!("/api/openai/{experiment_id}/chat/completions"),
            &[],
            Some(&payload),
        )
        .await
    }

    /// Upsert participant data for every experiment named in the payload.
    /// The response body is ignored.
    pub async fn update_participant_data(
        &self,
        participant_data: &serde_json::Value,
    ) -> Result<(), ApiError> {
        self.execute_bytes(
            "upserting participant data",
            Method::POST,
            "/api/participants/",
            &[],
            Some(participant_data),
        )
        .await
        .map(|_| ())
    }
}

#[async_trait]
impl ChatApi for OcsClient {
    async fn create_experiment_session(
        &self,
        experiment_id: &str,
        participant_id: &str,
        messages: Option<&[ChatMessage]>,
    ) -> Result<ExperimentSession, ApiError> {
        OcsClient::create_experiment_session(self, experiment_id, participant_id, messages).await
    }

    async fn send_new_api_message(
        &self,
        experiment_id: &str,
        message: &str,
        session_id: Option<&str>,
    ) -> Result<NewMessageResponse, ApiError> {
        OcsClient::send_new_api_message(self, experiment_id, message, session_id).await
    }
}
