use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use uuid::Uuid;

use crate::error::AppError;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const ALLOWED_TYPES: [&str; 3] = ["application/pdf", "image/jpeg", "image/png"];

/// Upload namespace: teacher assignment files and student submission files
/// live in separate directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadNamespace {
    Teacher,
    Student,
}

impl UploadNamespace {
    pub fn as_dir(&self) -> &'static str {
        match self {
            UploadNamespace::Teacher => "teachers",
            UploadNamespace::Student => "students",
        }
    }
}

impl std::str::FromStr for UploadNamespace {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" | "teachers" => Ok(UploadNamespace::Teacher),
            "student" | "students" => Ok(UploadNamespace::Student),
            _ => Err(AppError::Validation(format!("Unknown upload namespace: {s}"))),
        }
    }
}

pub struct UploadService;

impl UploadService {
    /// Store the first file field of the multipart body and return its
    /// public URL. PDFs, JPEGs and PNGs only, capped at 10 MB.
    pub async fn store(
        media_dir: &str,
        app_base_url: &str,
        namespace: UploadNamespace,
        mut multipart: Multipart,
    ) -> Result<String, AppError> {
        let mut file: Option<(Vec<u8>, String, String)> = None;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?
        {
            if field.file_name().is_none() {
                continue;
            }
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(e.to_string()))?
                .to_vec();
            file = Some((bytes, filename, content_type));
            break;
        }

        let (bytes, original_filename, content_type) =
            file.ok_or_else(|| AppError::Validation("No file uploaded".into()))?;
        validate(&content_type, bytes.len())?;

        let dir = PathBuf::from(media_dir).join(namespace.as_dir());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

        let ext = Path::new(&original_filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin");
        let storage_filename = format!("{}.{}", Uuid::new_v4(), ext);
        tokio::fs::write(dir.join(&storage_filename), &bytes)
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

        Ok(format!(
            "{}/uploads/{}/{}",
            app_base_url.trim_end_matches('/'),
            namespace.as_dir(),
            storage_filename
        ))
    }
}

pub fn validate(content_type: &str, size: usize) -> Result<(), AppError> {
    if !ALLOWED_TYPES.contains(&content_type) {
        return Err(AppError::Validation(
            "Only PDFs, JPEGs, and PNGs are allowed".into(),
        ));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation("File exceeds the 10MB limit".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn accepts_allowed_types_under_limit() {
        for ct in ["application/pdf", "image/jpeg", "image/png"] {
            assert!(validate(ct, 1024).is_ok());
        }
    }

    #[test]
    fn rejects_other_types() {
        assert!(validate("image/gif", 1024).is_err());
        assert!(validate("application/octet-stream", 1024).is_err());
    }

    #[test]
    fn rejects_oversized_files() {
        assert!(validate("application/pdf", MAX_UPLOAD_BYTES).is_ok());
        assert!(validate("application/pdf", MAX_UPLOAD_BYTES + 1).is_err());
    }

    #[test]
    fn namespace_parses_both_spellings() {
        assert_eq!(
            UploadNamespace::from_str("teacher").unwrap(),
            UploadNamespace::Teacher
        );
        assert_eq!(
            UploadNamespace::from_str("students").unwrap(),
            UploadNamespace::Student
        );
        assert!(UploadNamespace::from_str("admin").is_err());
    }
}
