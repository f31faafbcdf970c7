//! Budget drafting routes.

use axum::{
    Json, Router,
    extract::{
        Multipart, State,
        multipart::{Field, MultipartError, MultipartRejection},
    },
    http::StatusCode,
    routing::post,
};
use bytes::{Bytes, BytesMut};
use sentinel_core::document::SourceDocument;
use sentinel_core::draft::{BudgetDraft, DraftError};
use sentinel_shared::AppError;
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Multipart field carrying the project name.
pub const PROJECT_NAME_FIELD: &str = "project_name";

/// Multipart field carrying the document.
pub const FILE_FIELD: &str = "file";

/// Filename used when the client sends none.
const DEFAULT_FILENAME: &str = "upload";

/// Creates the drafting routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/ai/draft-budget", post(draft_budget))
}

/// Parsed multipart upload.
#[derive(Debug, Default)]
struct DraftUpload {
    project_name: Option<String>,
    document: Option<SourceDocument>,
}

/// Extracts a WBS budget draft from an uploaded document.
///
/// Expects `multipart/form-data` with a `project_name` text field and a
/// `file` field.
async fn draft_budget(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<BudgetDraft>, ApiError> {
    let mut multipart =
        multipart.map_err(|e| AppError::Validation(format!("Invalid multipart request: {e}")))?;
    let max_file_size = state.drafts.max_file_size();

    let upload = read_upload(&mut multipart, max_file_size).await?;
    let project_name = upload
        .project_name
        .ok_or_else(|| AppError::Validation(format!("{PROJECT_NAME_FIELD} is required")))?;
    let document = upload
        .document
        .ok_or_else(|| AppError::Validation(format!("{FILE_FIELD} is required")))?;

    info!(
        user_id = ?user.as_ref().map(AuthUser::user_id),
        project = %project_name.trim(),
        filename = %document.filename,
        size = document.size(),
        "Drafting budget from document"
    );

    let draft = state.drafts.draft_budget(&project_name, &document).await?;
    Ok(Json(draft))
}

async fn read_upload(multipart: &mut Multipart, max_file_size: u64) -> Result<DraftUpload, ApiError> {
    let mut upload = DraftUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e, max_file_size))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(PROJECT_NAME_FIELD) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(&e, max_file_size))?;
                upload.project_name = Some(text);
            }
            Some(FILE_FIELD) => {
                let filename = field
                    .file_name()
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or(DEFAULT_FILENAME)
                    .to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = read_file(field, max_file_size).await?;
                upload.document = Some(SourceDocument::new(filename, content_type, bytes));
            }
            _ => {}
        }
    }

    Ok(upload)
}

/// Buffers a file field, stopping as soon as it exceeds the limit.
async fn read_file(mut field: Field<'_>, max_file_size: u64) -> Result<Bytes, ApiError> {
    let mut buffer = BytesMut::new();

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error(&e, max_file_size))?
    {
        buffer.extend_from_slice(&chunk);
        let size = buffer.len() as u64;
        if size > max_file_size {
            return Err(DraftError::FileTooLarge {
                size,
                max: max_file_size,
            }
            .into());
        }
    }

    Ok(buffer.freeze())
}

fn multipart_error(err: &MultipartError, max_file_size: u64) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return DraftError::FileTooLarge {
            size: max_file_size.saturating_add(1),
            max: max_file_size,
        }
        .into();
    }
    AppError::Validation(format!("Invalid multipart request: {}", err.body_text())).into()
}
