// @module: Line-boundary-aware text chunking

/// Split text into chunks of at most `max_chars` characters each
///
/// Walks the text in `max_chars`-character windows and cuts at the last
/// newline inside the window so chunks end on line boundaries; when the
/// window holds no usable newline (a single line longer than the budget)
/// the cut falls exactly on the window edge. The cut point strictly
/// advances and concatenating the chunks reproduces the input exactly —
/// the newline at a cut stays at the head of the following chunk.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    assert!(max_chars > 0, "chunk budget must be positive");

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let window_end = advance_chars(text, start, max_chars);
        if window_end == text.len() {
            chunks.push(text[start..].to_string());
            break;
        }

        let cut = match text[start..window_end].rfind('\n') {
            // a newline at the window start is the one carried over from
            // the previous cut; cutting there would make no progress
            Some(rel) if rel > 0 => start + rel,
            _ => window_end,
        };

        chunks.push(text[start..cut].to_string());
        start = cut;
    }

    chunks
}

/// Byte index after advancing `count` characters from `start`
fn advance_chars(text: &str, start: usize, count: usize) -> usize {
    text[start..]
        .char_indices()
        .nth(count)
        .map(|(i, _)| start + i)
        .unwrap_or(text.len())
}
