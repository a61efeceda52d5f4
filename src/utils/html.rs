// src/utils/html.rs

/// Escape text for use inside HTML element content or a quoted attribute.
///
/// Names and question texts come from the participant and the backend, so
/// every one of them goes through here before it reaches a page.
pub fn escape(input: &str) -> String {
    ammonia::clean_text(input)
}
