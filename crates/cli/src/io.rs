//! Font file and terminal I/O for the CLI.

use std::{
    fs::{metadata, read},
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use fontdrop_core::{ByteSource, Clipboard, ClipboardError, UploadedFile};

/// A font file on disk, uploaded lazily.
#[derive(Debug, Clone)]
pub struct FontFile {
    path: PathBuf,
}

impl FontFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Describe the file as an upload. The declared size comes from the file
    /// metadata; the contents are read only if the upload is accepted.
    pub fn upload(&self, mime: Option<&str>) -> Result<UploadedFile> {
        let size = metadata(&self.path)
            .with_context(|| format!("Failed to stat font: {}", self.path.display()))?
            .len();
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("Not a file path: {}", self.path.display()))?;
        let mime = mime.map_or_else(|| guess_mime(&self.path).to_string(), str::to_string);
        Ok(UploadedFile::new(name, mime, size, self.clone()))
    }
}

impl ByteSource for FontFile {
    fn read_bytes(&mut self) -> io::Result<Vec<u8>> {
        read(&self.path)
    }
}

impl AsRef<Path> for FontFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// MIME type for a font path, judged by its extension.
pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path.extension().map(|e| e.to_string_lossy().to_lowercase());
    match ext.as_deref() {
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}

/// Writes copied text to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut out = io::stdout().lock();
        writeln!(out, "{text}")
            .and_then(|()| out.flush())
            .map_err(|e| ClipboardError(e.to_string()))
    }
}
