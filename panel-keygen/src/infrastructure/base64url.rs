use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::Engine;

/// Standard alphabet, canonical padding, but tolerant of non-zero trailing
/// bits the way browser `atob` is.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

#[derive(Debug, thiserror::Error)]
#[error("invalid base64url input: {0}")]
pub struct DecodeError(#[from] base64::DecodeError);

/// Encodes as base64url (URL_SAFE_NO_PAD).
pub fn encode_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes base64url text.
///
/// `-`/`_` are mapped back to `+`/`/` and missing `=` padding is restored
/// before decoding, so standard base64 and padded input are accepted too.
pub fn decode_base64url(value: &str) -> Result<Vec<u8>, DecodeError> {
    let mut standard: String = value
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    while standard.len() % 4 != 0 {
        standard.push('=');
    }
    Ok(STANDARD_LENIENT.decode(standard)?)
}
