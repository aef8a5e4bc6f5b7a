//! Image generation and hosting clients.

mod dto;
mod generation;
mod imgbb;

pub use dto::{ImageGenerationRequest, ImageGenerationResponse};
pub use generation::OpenAIImageClient;
pub use imgbb::{DEFAULT_IMGBB_UPLOAD_URL, ImgBbUploader};
