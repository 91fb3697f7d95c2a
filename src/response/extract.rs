const JSON_FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Strip the Markdown code fence a generator tends to wrap JSON in.
///
/// Only an opening fence labeled `json` is recognized. The result is not
/// checked for being well-formed JSON.
pub fn extract_json_candidate(raw: &str) -> &str {
    let mut candidate = raw.trim();

    if let Some(rest) = candidate.strip_prefix(JSON_FENCE_OPEN) {
        candidate = rest.trim();
    }
    if let Some(rest) = candidate.strip_suffix(FENCE_CLOSE) {
        candidate = rest.trim();
    }

    candidate
}
