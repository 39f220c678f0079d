//! Share-link fragment codec.
//!
//! The editor mirrors unsaved code into the URL fragment with lz-string's
//! "encoded URI component" transform so a link can carry a whole document
//! without a server round trip. This module speaks the same format so the
//! server can render such links.

/// Document shown when a fragment is missing or cannot be decoded.
pub const DEFAULT_DOCUMENT: &str = r#"<div class="min-h-screen bg-gray-100 flex items-center justify-center">
  <div class="p-8 bg-white shadow-lg rounded-2xl max-w-sm">
    <div class="flex items-center space-x-4">
      <div class="shrink-0">
        <img class="h-12 w-12" src="https://cdn.tailwindcss.com/img/logo.svg" alt="ChitChat Logo">
      </div>
      <div>
        <div class="text-xl font-medium text-black">ChitChat</div>
        <p class="text-slate-500">You have a new message!</p>
      </div>
    </div>
  </div>
</div>"#;

/// Compress code into a URI-safe fragment.
pub fn encode_fragment(code: &str) -> String {
    lz_str::compress_to_encoded_uri_component(code)
}

/// Decompress a fragment. Returns `None` for input that is not a valid
/// encoding or does not decode to UTF-16 text.
pub fn decode_fragment(fragment: &str) -> Option<String> {
    // Query-string decoding turns '+' into ' '.
    let fragment = fragment.replace(' ', "+");
    let fragment = fragment.trim().trim_start_matches('#');
    if fragment.is_empty() {
        return None;
    }
    let wide = lz_str::decompress_from_encoded_uri_component(fragment)?;
    String::from_utf16(&wide).ok()
}

/// Code carried by a fragment, or [`DEFAULT_DOCUMENT`] when there is none.
pub fn code_from_fragment(fragment: Option<&str>) -> String {
    fragment
        .and_then(decode_fragment)
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| DEFAULT_DOCUMENT.to_string())
}
