use base64::Engine as _;
use image::ImageFormat;
use std::path::Path;
use std::sync::Arc;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Where an upload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadSource {
    /// Platform file dialog, which does its own type filtering
    Picker,
    /// Drag and drop, which is checked for an image MIME type
    Drop,
}

/// An uploaded image held in its encoded form.
///
/// The bytes are shared and never mutated; replacing the upload means
/// building a new value.
#[derive(Clone)]
pub struct UploadedImage {
    name: String,
    mime: String,
    bytes: Arc<[u8]>,
}

impl std::fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedImage")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl PartialEq for UploadedImage {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.mime == other.mime && self.bytes == other.bytes
    }
}

impl UploadedImage {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    /// Encode as a `data:` URI, the reference stored alongside results
    pub fn data_uri(&self) -> String {
        let payload = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime, payload)
    }
}

/// Guess the MIME type of an image from its content, falling back to the extension
pub fn sniff_mime(path: &Path, bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(path))
        .ok()
        .map(|format| format.to_mime_type())
}

/// Build an upload from bytes already read, applying the acceptance rules of `source`
pub fn accept_upload(path: &Path, bytes: Vec<u8>, source: UploadSource) -> Option<UploadedImage> {
    let mime = sniff_mime(path, &bytes);

    let mime = match (source, mime) {
        (_, Some(mime)) => mime,
        (UploadSource::Picker, None) => FALLBACK_MIME,
        (UploadSource::Drop, None) => {
            tracing::debug!("Ignoring dropped file {:?}: not an image", path);
            return None;
        }
    };

    if source == UploadSource::Drop && !mime.starts_with("image/") {
        tracing::debug!("Ignoring dropped file {:?}: type {}", path, mime);
        return None;
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    tracing::debug!("Accepted {} ({}, {} bytes)", name, mime, bytes.len());
    Some(UploadedImage::new(name, mime, bytes))
}

/// Read a user-selected file.
///
/// Every failure (no file chosen, unreadable file, non-image drop) yields
/// `None`; nothing is surfaced to the caller.
pub fn read_upload(path: Option<&Path>, source: UploadSource) -> Option<UploadedImage> {
    let path = path?;
    match std::fs::read(path) {
        Ok(bytes) => accept_upload(path, bytes, source),
        Err(e) => {
            tracing::warn!("Failed to read upload {:?}: {}", path, e);
            None
        }
    }
}

/// Async variant of [`read_upload`] for use inside the event loop
pub async fn read_upload_async(
    path: Option<std::path::PathBuf>,
    source: UploadSource,
) -> Option<UploadedImage> {
    let path = path?;
    match tokio::fs::read(&path).await {
        Ok(bytes) => accept_upload(&path, bytes, source),
        Err(e) => {
            tracing::warn!("Failed to read upload {:?}: {}", path, e);
            None
        }
    }
}
