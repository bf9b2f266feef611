// Remote resume retrieval and PDF text extraction.
// Shared by the shortlist pipeline and the mock-question generator.

pub mod extractor;
pub mod fetcher;

pub use extractor::{PdfTextExtractor, TextExtractor};
pub use fetcher::{DocumentFetcher, HttpFetcher};
