pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use shotdoc::{BuildRequest, BuildResult, PipelineError, build_document};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub result: BuildResult,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Load the bytes of a finished build
    pub fn from_result(result: BuildResult) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&result.buffer)?;
        Ok(Self { result, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text shown on a 1-based page, one entry per text operation
    pub fn page_text(&self, page_num: u32) -> Vec<String> {
        pdf_assertions::shown_text(&self.doc, page_num)
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.result.buffer)
    }
}

/// Build a request with the default layout and load the output
pub fn generate(request: &BuildRequest) -> Result<GeneratedPdf, PipelineError> {
    let result = build_document(request)?;
    Ok(GeneratedPdf::from_result(result).expect("build produced an unreadable PDF"))
}
