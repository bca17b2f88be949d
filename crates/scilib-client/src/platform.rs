//! Capabilities supplied by the host platform.

/// Opens a PDF for the user (system browser, viewer, in-app sheet, ...).
pub trait PdfOpener: Send + Sync {
    fn open_pdf(&self, url: &str);
}

impl<F> PdfOpener for F
where
    F: Fn(&str) + Send + Sync,
{
    fn open_pdf(&self, url: &str) {
        self(url);
    }
}
