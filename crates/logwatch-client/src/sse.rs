//! Incremental decoder for `text/event-stream` bodies

/// Turns arbitrary body chunks into complete event `data` payloads
///
/// Lines may be split across chunks, including in the middle of a UTF-8
/// sequence. Only the `data` field is kept; `event`, `id`, `retry` and
/// comment lines are skipped.
#[derive(Debug, Default)]
pub struct SseDecoder {
    /// Bytes after the last complete line
    pending: Vec<u8>,
    /// `data` lines of the event being assembled
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk, returning the payloads of every event it completes
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            let line = String::from_utf8_lossy(&line);
            if let Some(payload) = self.process_line(&line) {
                events.push(payload);
            }
        }
        events
    }

    /// Flush a final event the server did not terminate with a blank line
    pub fn finish(&mut self) -> Option<String> {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            let line = String::from_utf8_lossy(&rest).into_owned();
            self.process_line(&line);
        }
        self.dispatch()
    }

    fn process_line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        if field == "data" {
            self.data.push(value.to_string());
        }
        None
    }

    fn dispatch(&mut self) -> Option<String> {
        if self.data.is_empty() {
            return None;
        }
        let payload = self.data.join("\n");
        self.data.clear();
        Some(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_event() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"data: {\"type\":\"connected\"}\n\n");
        assert_eq!(events, vec![r#"{"type":"connected"}"#]);
    }

    #[test]
    fn test_event_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: {\"type\":\"lo").is_empty());
        assert!(decoder.feed(b"g\",\"content\":\"x\"}\r\n").is_empty());
        let events = decoder.feed(b"\r\ndata: second\n\n");
        assert_eq!(events, vec![r#"{"type":"log","content":"x"}"#, "second"]);
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        let frame = "data: 問卷\n\n".as_bytes();
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(&frame[..8]).is_empty());
        assert_eq!(decoder.feed(&frame[8..]), vec!["問卷"]);
    }

    #[test]
    fn test_comments_and_other_fields_are_skipped() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b": keep-alive\nevent: log\nid: 7\nretry: 100\ndata: a\ndata: b\n\n\n");
        assert_eq!(events, vec!["a\nb"]);
    }

    #[test]
    fn test_finish_flushes_unterminated_event() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: tail").is_empty());
        assert_eq!(decoder.finish().as_deref(), Some("tail"));
        assert_eq!(decoder.finish(), None);
    }
}
