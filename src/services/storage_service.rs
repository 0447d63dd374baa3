use bytes::Bytes;
use std::path::Path;
use tokio::fs;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Stored CV file: filesystem path plus the URL it is served under.
#[derive(Debug, Clone)]
pub struct StoredCv {
    pub path: String,
    pub public_url: String,
}

/// Local-disk object store for CVs, served back through the `/uploads`
/// static route.
#[derive(Clone)]
pub struct StorageService {
    uploads_dir: String,
    public_base_url: String,
}

impl StorageService {
    pub fn new(uploads_dir: String, public_base_url: String) -> Self {
        Self {
            uploads_dir,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Write a CV under `{uploads}/{job_code}/{uuid}.{ext}`. The random
    /// filename is the collision guard; there is no retry on a clash.
    pub async fn store_cv(&self, job_code: &str, filename: &str, data: &Bytes) -> Result<StoredCv> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_else(|| "bin".to_string());

        let allowed_exts = ["pdf", "doc", "docx", "txt", "rtf"];
        if !allowed_exts.contains(&ext.as_str()) {
            return Err(Error::BadRequest(format!(
                "File type .{} is not allowed",
                ext
            )));
        }
        if ext == "pdf" && !data.starts_with(b"%PDF") {
            return Err(Error::BadRequest("Invalid PDF file content".into()));
        }

        // job_code lands in a filesystem path; refuse anything that could
        // escape the uploads root.
        if !job_code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::BadRequest("Invalid job code".into()));
        }

        let dir = format!("{}/{}", self.uploads_dir, job_code);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| Error::Internal(format!("Failed to create upload dir: {}", e)))?;

        let safe_filename = format!("{}.{}", Uuid::new_v4(), ext);
        let path = format!("{}/{}", dir, safe_filename);
        fs::write(&path, data).await.map_err(|e| {
            tracing::error!("Failed to write CV file: {}", e);
            Error::Internal(format!("Failed to save file: {}", e))
        })?;

        let public_url = format!(
            "{}/uploads/{}/{}",
            self.public_base_url, job_code, safe_filename
        );
        Ok(StoredCv { path, public_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> StorageService {
        let dir = std::env::temp_dir()
            .join(format!("cv-store-{}", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned();
        StorageService::new(dir, "http://localhost:3000/".to_string())
    }

    #[tokio::test]
    async fn stored_pdf_gets_a_public_uploads_url() {
        let svc = service();
        let data = Bytes::from_static(b"%PDF-1.7 test");
        let stored = svc.store_cv("JOB-1", "resume.pdf", &data).await.unwrap();
        assert!(stored.public_url.starts_with("http://localhost:3000/uploads/JOB-1/"));
        assert!(stored.public_url.ends_with(".pdf"));
        assert_eq!(fs::read(&stored.path).await.unwrap(), data.to_vec());
    }

    #[tokio::test]
    async fn disallowed_extensions_and_fake_pdfs_are_refused() {
        let svc = service();
        let data = Bytes::from_static(b"hello");
        assert!(svc.store_cv("JOB-1", "resume.exe", &data).await.is_err());
        assert!(svc.store_cv("JOB-1", "resume.pdf", &data).await.is_err());
    }

    #[tokio::test]
    async fn job_codes_with_path_characters_are_refused() {
        let svc = service();
        let data = Bytes::from_static(b"plain text");
        assert!(svc.store_cv("../escape", "resume.txt", &data).await.is_err());
    }
}
