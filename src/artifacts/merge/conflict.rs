use bytes::Bytes;

pub const CURRENT_MARKER: &str = "<<<<<<< HEAD\n";
pub const SEPARATOR_MARKER: &str = "=======\n";
pub const CLOSING_MARKER: &str = ">>>>>>>\n";

/// Content written to a conflicted file
///
/// Both sides are copied verbatim (an absent side is empty); no newline is added
/// after a side that does not end with one.
pub fn render_conflict(current: Option<&[u8]>, given: Option<&[u8]>) -> Bytes {
    let current = current.unwrap_or_default();
    let given = given.unwrap_or_default();

    let mut content = Vec::with_capacity(
        CURRENT_MARKER.len()
            + current.len()
            + SEPARATOR_MARKER.len()
            + given.len()
            + CLOSING_MARKER.len(),
    );
    content.extend_from_slice(CURRENT_MARKER.as_bytes());
    content.extend_from_slice(current);
    content.extend_from_slice(SEPARATOR_MARKER.as_bytes());
    content.extend_from_slice(given);
    content.extend_from_slice(CLOSING_MARKER.as_bytes());

    Bytes::from(content)
}
