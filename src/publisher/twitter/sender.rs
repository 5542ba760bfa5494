// publisher/twitter/sender.rs

use crate::model::PublishError;
use crate::publisher::twitter::oauth::authorization_header;
use crate::publisher::twitter::TwitterPublisher;

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

const MEDIA_UPLOAD_URL: &str = "https://upload.twitter.com/1.1/media/upload.json";
const CREATE_TWEET_URL: &str = "https://api.twitter.com/2/tweets";

#[derive(Debug, Deserialize)]
struct MediaUploadResponse {
    media_id_string: String,
}

#[derive(Debug, Deserialize)]
struct CreateTweetResponse {
    data: TweetData,
}

#[derive(Debug, Deserialize)]
struct TweetData {
    id: String,
}

/// Uploads a PNG and returns its media id.
pub async fn upload_media(publisher: &TwitterPublisher, png: &[u8]) -> Result<String, PublishError> {
    let auth = authorization_header(&publisher.credentials, "POST", MEDIA_UPLOAD_URL, &[])?;
    let part = Part::bytes(png.to_vec())
        .file_name("update.png")
        .mime_str("image/png")
        .map_err(|e| PublishError::Transport(e.to_string()))?;

    info!("📤 Uploading media ({} bytes)", png.len());
    let response = publisher
        .client
        .post(MEDIA_UPLOAD_URL)
        .header(AUTHORIZATION, auth)
        .multipart(Form::new().part("media", part))
        .send()
        .await
        .map_err(|e| PublishError::Transport(format!("media upload: {}", e)))?;

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_else(|_| "unknown".into());
    let body = classify(status, body)?;

    let parsed: MediaUploadResponse = serde_json::from_str(&body)
        .map_err(|e| PublishError::InvalidResponse(format!("media upload: {}", e)))?;
    Ok(parsed.media_id_string)
}

/// Posts `text` with the uploaded media attached and returns the post id.
pub async fn create_tweet(
    publisher: &TwitterPublisher,
    text: &str,
    media_id: &str,
) -> Result<String, PublishError> {
    let auth = authorization_header(&publisher.credentials, "POST", CREATE_TWEET_URL, &[])?;
    let payload = json!({
        "text": text,
        "media": { "media_ids": [media_id] }
    });

    info!("📤 Posting update with media {}", media_id);
    let response = publisher
        .client
        .post(CREATE_TWEET_URL)
        .header(AUTHORIZATION, auth)
        .json(&payload)
        .send()
        .await
        .map_err(|e| PublishError::Transport(format!("create post: {}", e)))?;

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_else(|_| "unknown".into());
    let body = classify(status, body)?;

    let parsed: CreateTweetResponse = serde_json::from_str(&body)
        .map_err(|e| PublishError::InvalidResponse(format!("create post: {}", e)))?;
    Ok(parsed.data.id)
}

/// Maps a posting-API status code to success (the body) or a typed failure.
fn classify(status: u16, body: String) -> Result<String, PublishError> {
    match status {
        200..=299 => Ok(body),
        401 | 403 => {
            warn!("❌ Posting API rejected credentials [{}]: {}", status, body);
            Err(PublishError::Auth { status, body })
        }
        429 => {
            warn!("⏳ Posting API rate limit hit");
            Err(PublishError::RateLimited)
        }
        _ => {
            warn!("❌ Posting API responded [{}]: {}", status, body);
            Err(PublishError::Api { status, body })
        }
    }
}
