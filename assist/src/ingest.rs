//! File intake for context documents: type and size validation plus text
//! extraction. PDF and Word files get placeholder text.

use std::path::Path;

use crate::error::Error;
use crate::error::Result;
use crate::types::DocumentKind;
use crate::types::UploadedDocument;

const PDF_MAGIC: &[u8] = b"%PDF-";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const UTF8_BOM: &str = "\u{feff}";

/// Resolve the document kind from the declared mime type, falling back to
/// the file extension when the mime is missing or unrecognized.
pub fn detect_kind(name: &str, mime: &str) -> Option<DocumentKind> {
    DocumentKind::from_mime(mime).or_else(|| {
        Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(DocumentKind::from_extension)
    })
}

pub fn ingest(name: &str, mime: &str, bytes: &[u8], max_bytes: u64) -> Result<UploadedDocument> {
    let Some(kind) = detect_kind(name, mime) else {
        return Err(Error::UnsupportedFileType {
            name: name.to_string(),
            mime: if mime.is_empty() {
                "unknown".to_string()
            } else {
                mime.to_string()
            },
        });
    };
    let size = bytes.len() as u64;
    if size > max_bytes {
        return Err(Error::FileTooLarge {
            name: name.to_string(),
            size,
            limit: max_bytes,
        });
    }
    let extracted_text = extract_text(name, kind, bytes)?;
    tracing::info!("ingest: {name} ({}, {size} bytes)", kind.description());
    Ok(UploadedDocument {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        byte_size: size,
        kind,
        mime_type: kind.mime().to_string(),
        extracted_text,
        uploaded_at: chrono::Utc::now(),
    })
}

/// Read a file from disk, guessing its mime type from the path.
pub fn ingest_path(path: &Path, max_bytes: u64) -> Result<UploadedDocument> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or_default()
        .to_string();
    if detect_kind(&name, &mime).is_none() {
        return Err(Error::UnsupportedFileType { name, mime });
    }
    let size = std::fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(Error::FileTooLarge {
            name,
            size,
            limit: max_bytes,
        });
    }
    let bytes = std::fs::read(path)?;
    ingest(&name, &mime, &bytes, max_bytes)
}

fn extract_text(name: &str, kind: DocumentKind, bytes: &[u8]) -> Result<String> {
    let failure = |reason: &str| Error::ExtractionFailure {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    match kind {
        DocumentKind::PlainText | DocumentKind::Markdown => {
            let text = std::str::from_utf8(bytes).map_err(|e| failure(&e.to_string()))?;
            Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string())
        }
        DocumentKind::Pdf => {
            if !bytes.starts_with(PDF_MAGIC) {
                return Err(failure("missing PDF header"));
            }
            Ok(format!(
                "PDF content extracted from {name}.\n\
                 This would contain the actual PDF text content including:\n\
                 - Assignment guidelines and rubric details\n\
                 - Research methodology requirements\n\
                 - Citation format specifications\n\
                 - Key concepts and terminology to address\n\
                 - Example papers and reference materials"
            ))
        }
        DocumentKind::Word => {
            if !bytes.starts_with(ZIP_MAGIC) {
                return Err(failure("not a DOCX archive"));
            }
            Ok(format!(
                "DOCX content extracted from {name}.\n\
                 This would include:\n\
                 - Teacher's detailed notes and comments\n\
                 - Assignment instructions and expectations\n\
                 - Grading criteria and assessment rubric\n\
                 - Required sources and citation guidelines\n\
                 - Specific topics to cover or avoid"
            ))
        }
    }
}
