//! Stripping of markdown fences from generated text

use tracing::warn;

/// Drop a leading fence line (```` ```javascript ````, ```` ```js ```` or
/// a bare ```` ``` ````) and a trailing fence line, then trim.
pub fn clean_javascript_response(content: &str) -> String {
    let cleaned = strip_fences(content);
    if !looks_like_javascript(&cleaned) {
        warn!("Generated configuration may not be valid JavaScript");
    }
    cleaned
}

/// Same fence stripping for the JSON content payload
pub fn clean_json_response(content: &str) -> String {
    strip_fences(content)
}

/// Starts with a comment or an `export` statement
pub fn looks_like_javascript(content: &str) -> bool {
    content.starts_with("//") || content.starts_with("/*") || content.starts_with("export")
}

fn strip_fences(content: &str) -> String {
    let mut text = content.trim();

    if text.starts_with("```") {
        text = text.split_once('\n').map_or("", |(_, rest)| rest);
    }

    let trimmed_end = text.trim_end();
    if trimmed_end.ends_with("```") {
        text = trimmed_end
            .rsplit_once('\n')
            .map_or("", |(body, _)| body);
    }

    text.trim().to_string()
}
