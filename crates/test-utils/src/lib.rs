use askdocs::errors::CompletionError;
use askdocs::providers::ai::AiProvider;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// --- Mock AI Provider ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<String>>>,
    failing: Arc<Mutex<bool>>,
    delay: Option<Duration>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(Mutex::new(false)),
            delay: None,
        }
    }

    /// Makes every call sleep before answering, so a turn stays in flight.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Pre-programs a response.
    /// The key should be a unique substring of the prompt, e.g. the question.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// Switches simulated service failure on or off.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// Retrieves the recorded prompts for assertion.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, CompletionError> {
        self.calls.lock().unwrap().push(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if *self.failing.lock().unwrap() {
            return Err(CompletionError::Api {
                status: 503,
                body: "MockAiProvider: simulated service failure".to_string(),
            });
        }

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        Err(CompletionError::Malformed(
            "MockAiProvider: No response programmed for prompt.".to_string(),
        ))
    }
}

// --- Test-Specific Helpers ---
pub mod helpers {
    use anyhow::Result;
    use std::path::{Path, PathBuf};

    /// Escapes a string for use inside a PDF literal string `( ... )`.
    fn escape_pdf_literal(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '(' | ')' | '\\' => {
                    out.push('\\');
                    out.push(c);
                }
                _ => out.push(c),
            }
        }
        out
    }

    /// Content stream drawing each line of `text` with `Tj`, one line below the other.
    fn page_content(text: &str) -> String {
        let mut ops = String::from("BT\n/F1 12 Tf\n72 720 Td\n");
        for line in text.lines() {
            ops.push_str(&format!("({}) Tj\n0 -14 Td\n", escape_pdf_literal(line)));
        }
        ops.push_str("ET");
        ops
    }

    /// Generates a minimal PDF with one page per entry of `pages`, in order.
    ///
    /// Text is drawn in the standard Helvetica font, so only ASCII content
    /// round-trips through extraction. An empty entry produces a page with no text.
    pub fn generate_test_pdf(pages: &[&str]) -> Vec<u8> {
        let page_count = pages.len();
        let kids = (0..page_count)
            .map(|i| format!("{} 0 R", 4 + 2 * i))
            .collect::<Vec<_>>()
            .join(" ");

        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!("<< /Type /Pages /Kids [{kids}] /Count {page_count} >>"),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];
        for (i, text) in pages.iter().enumerate() {
            let content = page_content(text);
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                5 + 2 * i
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ));
        }

        let mut out = String::from("%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.push_str(&format!("{} 0 obj\n{body}\nendobj\n", i + 1));
        }

        let xref_offset = out.len();
        out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
        out.push_str("0000000000 65535 f \n");
        for offset in offsets {
            out.push_str(&format!("{offset:010} 00000 n \n"));
        }
        out.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        ));

        out.into_bytes()
    }

    /// Writes a generated PDF named `file_name` into `dir`.
    pub fn write_test_pdf(dir: &Path, file_name: &str, pages: &[&str]) -> Result<PathBuf> {
        let path = dir.join(file_name);
        std::fs::write(&path, generate_test_pdf(pages))?;
        Ok(path)
    }
}
