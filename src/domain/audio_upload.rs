//! src/domain/audio_upload.rs

use mime::Mime;

/// Hard cap on the attached recording. The mail provider rejects larger
/// attachments, so anything above this is refused before we build the
/// message.
pub const MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

const ACCEPTED_AUDIO_TYPES: [&str; 5] = [
    "audio/mpeg",
    "audio/mp3",
    "audio/wav",
    "audio/x-wav",
    "audio/wave",
];

/// A validated call recording: MP3 or WAV, non-empty, at most
/// [`MAX_AUDIO_BYTES`].
#[derive(Debug)]
pub struct AudioUpload {
    filename: String,
    content_type: Mime,
    bytes: Vec<u8>,
}

impl AudioUpload {
    pub fn new(
        filename: String,
        declared_type: Option<Mime>,
        bytes: Vec<u8>,
    ) -> Result<Self, String> {
        if filename.trim().is_empty() {
            return Err("uploaded file has no filename".to_string());
        }

        if bytes.is_empty() {
            return Err(format!("{} is empty", filename));
        }

        if bytes.len() > MAX_AUDIO_BYTES {
            return Err(format!(
                "{} exceeds the {}MB attachment limit",
                filename,
                MAX_AUDIO_BYTES / (1024 * 1024),
            ));
        }

        let content_type = resolve_audio_type(&filename, declared_type)
            .ok_or_else(|| format!("{} is not an MP3 or WAV recording", filename))?;

        Ok(Self {
            filename,
            content_type,
            bytes,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content_type(&self) -> &Mime {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Browsers send `application/octet-stream` for file inputs they cannot
/// classify; in that case the filename extension decides.
fn resolve_audio_type(filename: &str, declared: Option<Mime>) -> Option<Mime> {
    let declared = declared.filter(|m| m.essence_str() != mime::APPLICATION_OCTET_STREAM.as_ref());
    let candidate = declared.or_else(|| mime_guess::from_path(filename).first())?;

    if ACCEPTED_AUDIO_TYPES
        .iter()
        .any(|accepted| candidate.essence_str() == *accepted)
    {
        Some(candidate)
    } else {
        None
    }
}
