//! Text Extractor — PDF bytes to plain text.
//!
//! Extraction never fails the caller: parse errors and parser panics are logged
//! and mapped to the empty string, which downstream code treats as "no content".

use async_trait::async_trait;
use bytes::Bytes;
use tracing::warn;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Returns the document text, or an empty string when nothing could be extracted.
    async fn extract(&self, bytes: Bytes) -> String;
}

/// `pdf-extract` backed extractor. Parsing runs on the blocking pool.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, bytes: Bytes) -> String {
        if bytes.is_empty() {
            return String::new();
        }

        let result = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| e.to_string())
        })
        .await;

        match result {
            Ok(Ok(pages)) => join_pages(&pages),
            Ok(Err(e)) => {
                warn!("Error extracting content from PDF: {e}");
                String::new()
            }
            // pdf-extract panics on some malformed inputs
            Err(e) => {
                warn!("PDF parser aborted: {e}");
                String::new()
            }
        }
    }
}

/// Joins page texts in page order with a newline boundary, then trims.
/// Pages without text contribute an empty segment.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let joined = pages
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n");
    joined.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds an uncompressed PDF with one Helvetica text line per page.
    fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
        let font_id = 3 + 2 * pages.len();
        let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", 3 + 2 * i)).collect();

        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                pages.len()
            ),
        ];
        for (i, text) in pages.iter().enumerate() {
            let content_id = 4 + 2 * i;
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 {font_id} 0 R >> >> /Contents {content_id} 0 R >>"
            ));
            let stream = format!("BT /F1 24 Tf 72 700 Td ({text}) Tj ET");
            objects.push(format!(
                "<< /Length {} >>\nstream\n{stream}\nendstream",
                stream.len()
            ));
        }
        objects.push(
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        );

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }

        let xref_at = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        ));
        pdf.extend_from_slice(xref.as_bytes());
        pdf
    }

    #[tokio::test]
    async fn test_extracts_pages_in_order_with_boundary() {
        let bytes = Bytes::from(pdf_with_pages(&["Senior", "Engineer"]));
        let text = PdfTextExtractor.extract(bytes).await;

        let senior = text.find("Senior").expect("first page text");
        let engineer = text.find("Engineer").expect("second page text");
        assert!(senior < engineer, "pages out of order: {text:?}");
        assert!(
            text[senior + "Senior".len()..engineer].contains('\n'),
            "page texts fused: {text:?}"
        );
        assert_eq!(text, text.trim());
    }

    #[test]
    fn test_join_pages_inserts_boundary() {
        // Words on either side of a page break must not fuse.
        let text = join_pages(&["Senior Rust", "Engineer"]);
        assert_eq!(text, "Senior Rust\nEngineer");
    }

    #[test]
    fn test_join_pages_tolerates_empty_pages() {
        let text = join_pages(&["  Alice Example", "", "Skills: Rust  "]);
        assert_eq!(text, "Alice Example\n\nSkills: Rust");
    }

    #[test]
    fn test_join_pages_all_blank_is_empty() {
        assert_eq!(join_pages(&["", "  ", "\n"]), "");
        assert_eq!(join_pages::<&str>(&[]), "");
    }

    #[tokio::test]
    async fn test_empty_bytes_yield_empty_text() {
        let text = PdfTextExtractor.extract(Bytes::new()).await;
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_garbage_bytes_yield_empty_text() {
        let text = PdfTextExtractor
            .extract(Bytes::from_static(b"this is definitely not a pdf"))
            .await;
        assert!(text.is_empty());
    }
}
