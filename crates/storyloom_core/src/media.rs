//! Image payloads passed between the generator and the uploader.

/// Raw bytes of one generated image.
///
/// # Examples
///
/// ```
/// use storyloom_core::GeneratedImage;
///
/// let image = GeneratedImage::new(Some("image/png".into()), vec![0x89, 0x50, 0x4E, 0x47]);
/// assert_eq!(image.len(), 4);
/// assert!(!image.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneratedImage {
    /// MIME type reported by the generator, if any
    pub mime: Option<String>,
    /// Encoded image bytes
    pub data: Vec<u8>,
}

impl GeneratedImage {
    /// Wrap encoded image bytes.
    pub fn new(mime: Option<String>, data: Vec<u8>) -> Self {
        Self { mime, data }
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the generator produced zero bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
