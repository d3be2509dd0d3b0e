use chardetng::EncodingDetector;
use encoding_rs::{Encoding, WINDOWS_1251};

/// How far into the document the `<meta>` charset prescan looks.
const META_PRESCAN_LIMIT: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedBody {
    pub bytes: Vec<u8>,
    /// Canonical name of the detected charset, e.g. `windows-1251`.
    pub charset: String,
    pub transcoded: bool,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode bytes with {encoding}: {message}")]
    DecodeFailure { encoding: String, message: String },
}

/// Detect the charset of raw bytes using: BOM -> Content-Type charset -> meta charset -> chardetng fallback.
pub fn detect_charset(bytes: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    if let Some(enc) = content_type
        .and_then(extract_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return enc;
    }

    if let Some(enc) =
        prescan_meta_charset(bytes).and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return enc;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Transcode windows-1251 pages to UTF-8; every other charset passes through untouched.
pub fn normalize_encoding(
    bytes: Vec<u8>,
    content_type: Option<&str>,
) -> Result<NormalizedBody, DecodeError> {
    let encoding = detect_charset(&bytes, content_type);
    let charset = encoding.name().to_string();

    if encoding != WINDOWS_1251 {
        return Ok(NormalizedBody {
            bytes,
            charset,
            transcoded: false,
        });
    }

    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: charset,
            message: "malformed byte sequence".into(),
        });
    }
    Ok(NormalizedBody {
        bytes: text.into_owned().into_bytes(),
        charset,
        transcoded: true,
    })
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim_matches([' ', '"', '\''].as_ref()))
        })
        .next()
        .map(|s| s.to_string())
}

/// Looks for `charset=` inside the leading `<meta>` tags.
fn prescan_meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(META_PRESCAN_LIMIT)];
    let lower = String::from_utf8_lossy(head).to_ascii_lowercase();

    let mut rest = lower.as_str();
    while let Some(start) = rest.find("<meta") {
        let tag = &rest[start..];
        let tag = &tag[..tag.find('>').unwrap_or(tag.len())];
        if let Some(pos) = tag.find("charset=") {
            let label: String = tag[pos + "charset=".len()..]
                .trim_start_matches(['"', '\''])
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
                .collect();
            if !label.is_empty() {
                return Some(label);
            }
        }
        rest = &rest[start + "<meta".len()..];
    }
    None
}
