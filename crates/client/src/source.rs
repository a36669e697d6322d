//! Where server events come from.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Lines};
use std::path::Path;

use thiserror::Error;

use crate::ServerEvent;

/// Errors raised while pulling events from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Reading the underlying stream failed.
    #[error("failed to read event stream: {0}")]
    Io(#[from] io::Error),
    /// A record could not be decoded.
    #[error("failed to parse event on line {line}: {source}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
}

/// Supplier of already-deserialized server events, in arrival order.
pub trait EventSource {
    /// Next event, or `None` once the stream is exhausted.
    fn next_event(&mut self) -> Result<Option<ServerEvent>, SourceError>;
}

impl EventSource for VecDeque<ServerEvent> {
    fn next_event(&mut self) -> Result<Option<ServerEvent>, SourceError> {
        Ok(self.pop_front())
    }
}

/// Newline-delimited JSON event log.
///
/// Blank lines and lines starting with `#` are skipped. Records are decoded
/// lazily, so events before a malformed line are still delivered.
pub struct ReplaySource {
    lines: Lines<Box<dyn BufRead>>,
    line: usize,
    events_read: usize,
}

impl ReplaySource {
    /// Read events from any buffered reader.
    pub fn from_reader(reader: impl BufRead + 'static) -> Self {
        let reader: Box<dyn BufRead> = Box::new(reader);
        Self {
            lines: reader.lines(),
            line: 0,
            events_read: 0,
        }
    }

    /// Read events from an in-memory log.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_reader(Cursor::new(text.into()))
    }

    /// Open a log file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::from_reader(BufReader::new(file)))
    }

    /// Number of events returned so far.
    pub fn events_read(&self) -> usize {
        self.events_read
    }
}

impl EventSource for ReplaySource {
    fn next_event(&mut self) -> Result<Option<ServerEvent>, SourceError> {
        for line in self.lines.by_ref() {
            let line = line?;
            self.line += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let event = serde_json::from_str(trimmed).map_err(|source| SourceError::Parse {
                line: self.line,
                source,
            })?;
            self.events_read += 1;
            return Ok(Some(event));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntityPosition;

    const LOG: &str = r#"
# recorded session
{"type":"PlayerPositionUpdated","x":0.5,"y":70.0,"z":0.5}

{"type":"ChunkUpdated","origin":{"x":0,"y":0,"z":0},"size":{"x":1,"y":1,"z":1},"blocks":[{"block_type":1}]}
"#;

    #[test]
    fn skips_comments_and_blank_lines() {
        let mut source = ReplaySource::from_text(LOG);
        let first = source.next_event().unwrap().unwrap();
        assert_eq!(
            first,
            ServerEvent::PlayerPositionUpdated(EntityPosition::new(0.5, 70.0, 0.5))
        );
        let second = source.next_event().unwrap().unwrap();
        assert_eq!(second.kind(), "chunk_updated");
        assert!(source.next_event().unwrap().is_none());
        assert_eq!(source.events_read(), 2);
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let text = "# header\n{\"type\":\"PlayerPositionUpdated\",\"x\":0,\"y\":0,\"z\":0}\n{not json\n";
        let mut source = ReplaySource::from_text(text);
        assert!(source.next_event().unwrap().is_some());
        let err = source.next_event().unwrap_err();
        assert!(matches!(err, SourceError::Parse { line: 3, .. }), "{err}");
    }

    #[test]
    fn unknown_event_type_is_a_parse_error() {
        let mut source = ReplaySource::from_text(r#"{"type":"Teleported"}"#);
        assert!(matches!(
            source.next_event(),
            Err(SourceError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("mineflayer-no-such-replay.jsonl");
        assert!(matches!(ReplaySource::open(path), Err(SourceError::Io(_))));
    }

    #[test]
    fn queue_source_drains_in_order() {
        let mut queue: VecDeque<ServerEvent> = vec![
            ServerEvent::PlayerPositionUpdated(EntityPosition::new(1.0, 2.0, 3.0)),
            ServerEvent::PlayerPositionUpdated(EntityPosition::new(4.0, 5.0, 6.0)),
        ]
        .into();
        let first = queue.next_event().unwrap().unwrap();
        assert_eq!(
            first,
            ServerEvent::PlayerPositionUpdated(EntityPosition::new(1.0, 2.0, 3.0))
        );
        assert!(queue.next_event().unwrap().is_some());
        assert!(queue.next_event().unwrap().is_none());
    }
}
