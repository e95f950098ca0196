use chrono::{DateTime, Utc};
use ledger::BalanceView;
use serde::{Deserialize, Serialize};
use types::catalog::{StyleCollection, StyleTemplate};

/// Profile fields echoed back to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreditsResponse {
    pub credits: u32,
    pub profile: ProfileView,
}

impl From<BalanceView> for CreditsResponse {
    fn from(view: BalanceView) -> Self {
        Self {
            credits: view.credits,
            profile: ProfileView {
                email: view.email,
                display_name: view.display_name,
                created_at: view.created_at,
                last_used_at: view.last_used_at,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopUpRequest {
    /// Credits to add. Zero or negative amounts never reach the ledger:
    /// zero is rejected by validation, negatives fail deserialization.
    pub amount: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUpResponse {
    pub new_total: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleView {
    pub key: String,
    pub name: String,
    pub collection: StyleCollection,
    pub prompt: String,
    pub image_url: String,
}

impl StyleView {
    pub fn from_template(template: &StyleTemplate, image_url: String) -> Self {
        Self {
            key: template.key.to_string(),
            name: template.display_name.clone(),
            collection: template.collection,
            prompt: template.prompt.clone(),
            image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StylesResponse {
    pub styles: Vec<StyleView>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    /// Subject photo as base64, with or without a `data:` URL prefix.
    pub photo: String,
    pub style_key: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
    pub image_url: String,
    pub credits_left: u32,
}
