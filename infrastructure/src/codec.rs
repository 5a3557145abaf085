//! Base64 image transport shared by the HTTP adapters.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use realism_domain::ImageData;

/// `data:<mime>;base64,<payload>` URL for an image.
pub fn to_data_url(image: &ImageData) -> String {
    format!(
        "data:{};base64,{}",
        image.mime_type(),
        BASE64.encode(image.bytes())
    )
}

pub fn to_base64(image: &ImageData) -> String {
    BASE64.encode(image.bytes())
}

/// Decode a bare base64 payload or a data URL.
///
/// The MIME type comes from the data URL header, or is sniffed from the
/// magic bytes, defaulting to JPEG.
pub fn from_base64(encoded: &str) -> Result<ImageData, base64::DecodeError> {
    let (declared, payload) = match encoded.split_once("base64,") {
        Some((header, payload)) => {
            let mime = header
                .strip_prefix("data:")
                .map(|h| h.trim_end_matches(';'))
                .filter(|m| !m.is_empty())
                .map(str::to_string);
            (mime, payload)
        }
        None => (None, encoded),
    };
    let bytes = BASE64.decode(payload.trim())?;
    let mime = declared.unwrap_or_else(|| sniff_mime(&bytes).to_string());
    Ok(ImageData::new(bytes, mime))
}

/// MIME type from magic bytes.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(b"RIFF") && bytes.get(8..12) == Some(b"WEBP") {
        "image/webp"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else {
        "image/jpeg"
    }
}
