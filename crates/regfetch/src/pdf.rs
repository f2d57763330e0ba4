//! PDF payload sniffing.

/// Leading bytes of every PDF file.
pub const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Accept a response as a PDF if either the declared content type mentions
/// `pdf` or the body starts with the PDF magic.
pub fn looks_like_pdf(content_type: Option<&str>, body: &[u8]) -> bool {
    let declared = content_type
        .map(|ct| ct.to_ascii_lowercase().contains("pdf"))
        .unwrap_or(false);
    declared || body.starts_with(PDF_MAGIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_match() {
        assert!(looks_like_pdf(Some("application/pdf"), b"<html>"));
        assert!(looks_like_pdf(Some("Application/PDF; charset=binary"), b""));
        assert!(looks_like_pdf(Some("application/x-pdf"), b""));
    }

    #[test]
    fn test_magic_match() {
        assert!(looks_like_pdf(None, b"%PDF-1.4\n..."));
        assert!(looks_like_pdf(Some("application/octet-stream"), b"%PDF"));
    }

    #[test]
    fn test_rejects_html() {
        assert!(!looks_like_pdf(Some("text/html; charset=utf-8"), b"<!DOCTYPE html>"));
        assert!(!looks_like_pdf(None, b""));
        assert!(!looks_like_pdf(None, b"%PD"));
        // Magic must be at the very start.
        assert!(!looks_like_pdf(None, b" %PDF-1.4"));
    }
}
