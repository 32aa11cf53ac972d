//! HTML document that boots the client.
//!
//! In history mode every client route must be served the same page; the
//! client router takes over once it loads.

use std::path::Path;

const DEFAULT_INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Documents Index</title>
  </head>
  <body>
    <div id="app"></div>
    <script type="module" src="/assets/index.js"></script>
  </body>
</html>
"#;

/// The page served for client routes.
#[derive(Debug, Clone)]
pub struct ShellPage {
    html: String,
}

impl ShellPage {
    /// Load a built `index.html` from disk.
    ///
    /// # Errors
    /// Returns the I/O error if the file cannot be read.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let html = std::fs::read_to_string(path)?;
        Ok(Self { html })
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }
}

impl Default for ShellPage {
    fn default() -> Self {
        Self {
            html: DEFAULT_INDEX_HTML.to_string(),
        }
    }
}
