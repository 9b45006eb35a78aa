//! Upload validation against the intake allow-list.
//!
//! Two-layer check, applied before any byte is written to disk:
//! 1. Byte-size ceiling (per form category)
//! 2. Magic-byte type detection against the allow-list {pdf, jpeg, png}
//!
//! Magic bytes are authoritative: a file claiming `image/png` whose content
//! is not a PNG is rejected, as is a disallowed format renamed to `.pdf`.

use crate::error::{Error, Result};

/// The allowed upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Pdf,
    Jpeg,
    Png,
}

impl UploadKind {
    /// Canonical MIME type.
    pub fn mime_type(&self) -> &'static str {
        match self {
            UploadKind::Pdf => "application/pdf",
            UploadKind::Jpeg => "image/jpeg",
            UploadKind::Png => "image/png",
        }
    }

    /// Canonical file extension (no leading dot).
    pub fn extension(&self) -> &'static str {
        match self {
            UploadKind::Pdf => "pdf",
            UploadKind::Jpeg => "jpg",
            UploadKind::Png => "png",
        }
    }

    fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(UploadKind::Pdf),
            "image/jpeg" => Some(UploadKind::Jpeg),
            "image/png" => Some(UploadKind::Png),
            _ => None,
        }
    }
}

/// Detect the upload kind from file content.
///
/// Returns `None` when the magic bytes match no allowed format, including
/// when they match a recognizable but disallowed format (zip, gif, ...).
pub fn detect_upload_kind(data: &[u8]) -> Option<UploadKind> {
    infer::get(data).and_then(|kind| UploadKind::from_mime(kind.mime_type()))
}

/// Validate an upload before any write occurs.
///
/// `claimed_mime` is the Content-Type the client sent for the part; it is
/// cross-checked for logging value but the detected type decides.
///
/// # Errors
///
/// `Error::InvalidFile` when the content is empty, exceeds `max_bytes`, or
/// is not one of {pdf, jpeg, png} by magic bytes.
pub fn validate_upload(
    field_name: &str,
    claimed_mime: &str,
    data: &[u8],
    max_bytes: u64,
) -> Result<UploadKind> {
    if data.is_empty() {
        return Err(Error::InvalidFile(format!("{}: file is empty", field_name)));
    }

    if data.len() as u64 > max_bytes {
        return Err(Error::InvalidFile(format!(
            "{}: file exceeds maximum size of {} bytes",
            field_name, max_bytes
        )));
    }

    match detect_upload_kind(data) {
        Some(kind) => {
            if kind.mime_type() != claimed_mime {
                tracing::debug!(
                    subsystem = "core",
                    component = "upload_safety",
                    field = field_name,
                    claimed = claimed_mime,
                    detected = kind.mime_type(),
                    "Claimed content type differs from detected type"
                );
            }
            Ok(kind)
        }
        None => Err(Error::InvalidFile(format!(
            "{}: file type not allowed (expected pdf, jpeg, or png)",
            field_name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG_HEADER: &[u8] = &[
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00,
    ];
    const PDF_HEADER: &[u8] = b"%PDF-1.4 fake content";

    #[test]
    fn test_accepts_png() {
        let kind = validate_upload("photo", "image/png", PNG_HEADER, 1024).unwrap();
        assert_eq!(kind, UploadKind::Png);
        assert_eq!(kind.extension(), "png");
    }

    #[test]
    fn test_accepts_jpeg() {
        let kind = validate_upload("photo", "image/jpeg", JPEG_HEADER, 1024).unwrap();
        assert_eq!(kind, UploadKind::Jpeg);
        assert_eq!(kind.extension(), "jpg");
    }

    #[test]
    fn test_accepts_pdf() {
        let kind = validate_upload("taxDocument", "application/pdf", PDF_HEADER, 1024).unwrap();
        assert_eq!(kind, UploadKind::Pdf);
    }

    #[test]
    fn test_rejects_empty() {
        let err = validate_upload("photo", "image/png", &[], 1024).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_rejects_disallowed_format() {
        // GIF has recognizable magic bytes but is not on the allow-list
        let gif = b"GIF89a\x01\x00\x01\x00";
        let err = validate_upload("photo", "image/gif", gif, 1024).unwrap_err();
        assert!(matches!(err, Error::InvalidFile(_)));
        assert!(err.to_string().contains("not allowed"));
    }

    #[test]
    fn test_rejects_garbage_claiming_png() {
        // Claimed type does not rescue content that matches no allowed format
        let garbage = b"definitely not an image";
        let err = validate_upload("photo", "image/png", garbage, 1024).unwrap_err();
        assert!(matches!(err, Error::InvalidFile(_)));
    }

    #[test]
    fn test_detected_type_wins_over_claim() {
        // PNG bytes claiming to be a PDF are accepted as PNG
        let kind = validate_upload("photo", "application/pdf", PNG_HEADER, 1024).unwrap();
        assert_eq!(kind, UploadKind::Png);
    }

    #[test]
    fn test_size_boundary_at_limit() {
        let mut data = PNG_HEADER.to_vec();
        data.resize(1024, 0);
        assert!(validate_upload("photo", "image/png", &data, 1024).is_ok());
    }

    #[test]
    fn test_size_boundary_one_over() {
        let mut data = PNG_HEADER.to_vec();
        data.resize(1025, 0);
        let err = validate_upload("photo", "image/png", &data, 1024).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum size"));
    }

    #[test]
    fn test_document_ceiling_rejects_oversize() {
        use crate::defaults::MAX_DOCUMENT_FILE_BYTES;
        let mut data = PDF_HEADER.to_vec();
        data.resize(MAX_DOCUMENT_FILE_BYTES as usize + 1, 0);
        let err = validate_upload(
            "identityDocument",
            "application/pdf",
            &data,
            MAX_DOCUMENT_FILE_BYTES,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidFile(_)));
    }
}
