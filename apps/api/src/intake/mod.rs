//! CV file intake — validation and text extraction.
//!
//! Validation runs before any pipeline call: an unsupported or oversized
//! file is rejected without a single model request.

use crate::errors::AppError;

pub mod handlers;

/// Maximum accepted upload size.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Extensions accepted for CV uploads, lowercase, without the dot.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt"];

/// Validates a CV upload by extension and size.
pub fn validate_upload(file_name: &str, size: usize) -> Result<(), AppError> {
    let extension = file_extension(file_name);

    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => {}
        _ => {
            return Err(AppError::Validation(format!(
                "File type not supported. Please upload {}",
                ALLOWED_EXTENSIONS
                    .iter()
                    .map(|e| format!(".{e}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
    }

    if size > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "File is too large. Maximum size is {}MB",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }

    Ok(())
}

/// Extracts plain text from a validated upload.
///
/// PDFs go through a real text extractor; the remaining formats are read as
/// lossy UTF-8, which recovers the text runs well enough for prompting.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String, AppError> {
    let text = match file_extension(file_name).as_deref() {
        Some("pdf") => pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            tracing::warn!("PDF text extraction failed for {file_name}: {e}");
            AppError::UnprocessableEntity(
                "Could not extract text from this PDF. Try exporting it again or uploading a text file.".to_string(),
            )
        })?,
        _ => String::from_utf8_lossy(bytes).into_owned(),
    };

    Ok(text.trim().to_string())
}

fn file_extension(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_upload_is_accepted() {
        assert!(validate_upload("resume.pdf", 1024).is_ok());
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(validate_upload("Resume.PDF", 1024).is_ok());
        assert!(validate_upload("cv.DocX", 1024).is_ok());
    }

    #[test]
    fn test_exe_upload_is_rejected() {
        let err = validate_upload("virus.exe", 1024).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("File type not supported"));
    }

    #[test]
    fn test_file_without_extension_is_rejected() {
        assert!(validate_upload("resume", 1024).is_err());
        assert!(validate_upload("resume.", 1024).is_err());
    }

    #[test]
    fn test_oversized_upload_is_rejected() {
        let err = validate_upload("resume.pdf", MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_size_at_limit_is_accepted() {
        assert!(validate_upload("resume.pdf", MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn test_txt_extraction_is_lossy_utf8() {
        let bytes = b"5 years React developer\xff experience";
        let text = extract_text("cv.txt", bytes).unwrap();
        assert!(text.contains("5 years React developer"));
    }

    #[test]
    fn test_extraction_trims_whitespace() {
        let text = extract_text("cv.txt", b"  hello  \n").unwrap();
        assert_eq!(text, "hello");
    }
}
