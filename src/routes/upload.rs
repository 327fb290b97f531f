use std::path::PathBuf;

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    services::upload::{UploadNamespace, UploadService},
    AppState,
};

pub async fn upload(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let namespace: UploadNamespace = namespace.parse()?;
    let file_url = UploadService::store(
        &state.config.media_dir,
        &state.config.app_base_url,
        namespace,
        multipart,
    )
    .await?;
    Ok(Json(json!({
        "file_url": file_url,
        "message": "File uploaded successfully",
    })))
}

pub async fn serve(
    State(state): State<AppState>,
    Path((namespace, filename)): Path<(String, String)>,
) -> Result<Response, StatusCode> {
    let namespace: UploadNamespace = namespace.parse().map_err(|_| StatusCode::NOT_FOUND)?;

    // Reject anything that could escape the media directory.
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(StatusCode::BAD_REQUEST);
    }

    let path = PathBuf::from(&state.config.media_dir)
        .join(namespace.as_dir())
        .join(&filename);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;

    let content_type = match path.extension().and_then(|e| e.to_str()) {
        Some("pdf") => mime::APPLICATION_PDF.as_ref(),
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG.as_ref(),
        Some("png") => mime::IMAGE_PNG.as_ref(),
        _ => mime::APPLICATION_OCTET_STREAM.as_ref(),
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(bytes))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
