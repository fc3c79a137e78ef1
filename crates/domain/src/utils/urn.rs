//! Model derivative URN encoding

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

/// Encode an object id as a model derivative URN
///
/// URL-safe base64 without `=` padding, e.g. `"Hello World"` becomes
/// `"SGVsbG8gV29ybGQ"`.
#[must_use]
pub fn urnify(text: &str) -> String {
    URL_SAFE_NO_PAD.encode(text.as_bytes())
}
