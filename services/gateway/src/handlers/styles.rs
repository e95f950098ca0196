use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{RenderRequest, RenderResponse, StyleView, StylesResponse};
use crate::state::AppState;
use axum::{extract::State, Json};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use types::catalog::StyleTemplate;
use types::ids::StyleKey;
use uuid::Uuid;

/// Smallest decoded payload accepted as a subject photo.
const MIN_SUBJECT_BYTES: usize = 1_000;
/// Largest decoded payload accepted as a subject photo.
const MAX_SUBJECT_BYTES: usize = 10 * 1024 * 1024;

const TRANSFORMATION_PROMPT: &str = "You are an expert hairstylist AI. Change the hairstyle of \
the person in the first image to match the hairstyle shown in the second image.\n\
Instructions:\n\
1. Keep the person's face, facial features, and identity exactly the same\n\
2. Only change the hairstyle to match the reference style in the second image\n\
3. Maintain natural hair color and texture that suits the person\n\
4. Make the result look realistic and professional\n\
5. Ensure the lighting and background remain consistent with the original image\n\
6. Pay attention to hair length, volume, and styling details from the reference\n\
7. Generate a new image with the hairstyle transformation applied";

/// GET /v1/styles
pub async fn list_styles(State(state): State<AppState>) -> Json<StylesResponse> {
    let styles = state
        .catalog
        .all()
        .iter()
        .map(|template| {
            StyleView::from_template(template, state.media.public_url(&template.image_path))
        })
        .collect();

    Json(StylesResponse { styles })
}

/// POST /v1/styles/render
pub async fn render_style(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<RenderRequest>,
) -> Result<Json<RenderResponse>, AppError> {
    state
        .rate_limiter
        .check_rate_limit(&format!("{}:render", user.user_id), 10, 0.1)?;

    run_render(&state, &user, payload).await.map(Json)
}

/// The render flow, in charge order: validate everything that can be
/// validated cheaply, then debit, then call the collaborators. Once the
/// debit commits, a downstream failure does not mint the credit back.
pub(crate) async fn run_render(
    state: &AppState,
    user: &AuthenticatedUser,
    payload: RenderRequest,
) -> Result<RenderResponse, AppError> {
    let style_key = StyleKey::new(payload.style_key.as_str());
    let template = state
        .catalog
        .get(&style_key)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown style key: {}", payload.style_key)))?
        .clone();

    let subject = decode_subject_photo(&payload.photo)?;

    let cost = state.credit_service.config().deduction_per_render;
    let credits_left = state.credit_service.debit(&user.user_id, cost).await?;

    let style_reference = state
        .media
        .load(&template.image_path)
        .await?
        .ok_or_else(|| {
            tracing::warn!(
                "style {} has no reference image at {}",
                template.key,
                template.image_path
            );
            AppError::NotFound(format!(
                "Style reference image not found: {}",
                template.image_path
            ))
        })?;

    let prompt = build_prompt(&template);
    let output = state
        .generation
        .generate(&subject, &style_reference, &prompt)
        .await?;

    let output_path = format!(
        "generated/{}/{}-{}.png",
        user.user_id,
        template.key,
        Uuid::now_v7()
    );
    state.media.store(&output_path, &output).await?;
    let image_url = state.media.public_url(&output_path);

    tracing::info!(
        "rendered style {} for {}, {} credits left",
        template.key,
        user.user_id,
        credits_left
    );

    Ok(RenderResponse {
        image_url,
        credits_left,
    })
}

/// Accepts bare base64 or a `data:` URL; bounds the decoded size to what
/// a real photo upload looks like.
fn decode_subject_photo(raw: &str) -> Result<Vec<u8>, AppError> {
    let encoded = match raw.split_once(',') {
        Some((_, data)) => data,
        None => raw,
    };

    let bytes = BASE64
        .decode(encoded.trim().as_bytes())
        .map_err(|_| AppError::BadRequest("Photo must be valid base64 image data".into()))?;

    if bytes.len() < MIN_SUBJECT_BYTES {
        return Err(AppError::BadRequest(
            "Photo is too small to be a real image".into(),
        ));
    }
    if bytes.len() > MAX_SUBJECT_BYTES {
        return Err(AppError::BadRequest("Photo exceeds the 10 MiB limit".into()));
    }
    Ok(bytes)
}

fn build_prompt(template: &StyleTemplate) -> String {
    format!(
        "{}\n\nTarget hairstyle: {}\n\nReturn the transformed image, keeping the person's \
identity unchanged.",
        TRANSFORMATION_PROMPT, template.prompt
    )
}
