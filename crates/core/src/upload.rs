//! Uploaded font files and the pre-parse validator.

use std::{fmt, io};

use crate::{
    config::{ACCEPTED_EXTENSIONS, ACCEPTED_MIME_TYPES, MAX_UPLOAD_BYTES},
    error::ValidationError,
};

/// Where an upload's bytes come from. Read at most once per upload.
pub trait ByteSource {
    fn read_bytes(&mut self) -> io::Result<Vec<u8>>;
}

impl ByteSource for Vec<u8> {
    fn read_bytes(&mut self) -> io::Result<Vec<u8>> {
        Ok(std::mem::take(self))
    }
}

/// A candidate font file as supplied by the user.
///
/// `size` is the declared size and is what the validator checks; the bytes
/// are only materialized once the file has been approved.
pub struct UploadedFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
    source: Box<dyn ByteSource>,
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl UploadedFile {
    pub fn new(
        name: impl Into<String>,
        mime: impl Into<String>,
        size: u64,
        source: impl ByteSource + 'static,
    ) -> Self {
        Self { name: name.into(), mime: mime.into(), size, source: Box::new(source) }
    }

    /// An in-memory upload whose declared size is the data length.
    pub fn from_bytes(name: impl Into<String>, mime: impl Into<String>, data: Vec<u8>) -> Self {
        let size = data.len() as u64;
        Self::new(name, mime, size, data)
    }

    /// Override the declared size.
    pub fn with_declared_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub(crate) fn read_bytes(&mut self) -> io::Result<Vec<u8>> {
        self.source.read_bytes()
    }
}

/// Check an upload's declared size and type. Size is checked first.
pub fn validate(file: &UploadedFile) -> Result<(), ValidationError> {
    if file.size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge { size: file.size, limit: MAX_UPLOAD_BYTES });
    }
    if !is_font_type(&file.name, &file.mime) {
        return Err(ValidationError::UnsupportedType {
            name: file.name.clone(),
            mime: file.mime.clone(),
        });
    }
    Ok(())
}

/// Whether a MIME type or filename identifies an accepted font format.
pub fn is_font_type(name: &str, mime: &str) -> bool {
    let name = name.to_lowercase();
    ACCEPTED_MIME_TYPES.contains(&mime) || ACCEPTED_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}
