use std::path::Path;

use ocs_api::{ChatMessage, OcsClient};
use ocs_common::OcsError;
use tracing::info;

use super::print_json;

pub async fn chat(
    client: &OcsClient,
    experiment: &str,
    message: &str,
    session: Option<&str>,
) -> Result<(), OcsError> {
    let reply = client.send_new_api_message(experiment, message, session).await?;
    print_json(&reply)
}

pub async fn complete(client: &OcsClient, experiment: &str, message: &str) -> Result<(), OcsError> {
    let completion = client
        .chat_completions(experiment, &[ChatMessage::user(message)])
        .await?;
    match completion.content() {
        Some(content) => println!("{content}"),
        None => print_json(&completion)?,
    }
    Ok(())
}

pub async fn download(client: &OcsClient, file_id: i64, output: &Path) -> Result<(), OcsError> {
    let bytes = client.download_file_content(file_id).await?;
    std::fs::write(output, &bytes)?;
    info!(file_id, bytes = bytes.len(), "saved to {}", output.display());
    Ok(())
}

pub async fn participant_data(client: &OcsClient, file: &Path) -> Result<(), OcsError> {
    let content = std::fs::read_to_string(file)?;
    let payload: serde_json::Value = serde_json::from_str(&content)?;
    client.update_participant_data(&payload).await?;
    info!("participant data updated from {}", file.display());
    Ok(())
}
