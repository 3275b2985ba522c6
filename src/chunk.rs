/// Default upper bound on characters per chunk
pub const DEFAULT_MAX_CHARS: usize = 4000;

/// Split a formatted transcript into line-aligned chunks of at most
/// `max_chars` characters. A single line longer than `max_chars` gets a
/// chunk of its own and is never cut.
pub fn chunk_transcript(text: &str, max_chars: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;

    for line in text.split('\n') {
        // +1 for the newline
        let line_len = line.chars().count() + 1;

        if !current.is_empty() && current_len + line_len > max_chars {
            chunks.push(current.join("\n"));
            current.clear();
            current_len = 0;
        }

        current.push(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        chunks.push(current.join("\n"));
    }

    chunks
}
