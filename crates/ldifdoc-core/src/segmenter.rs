//! Segmenter — splits a line-oriented export stream into raw record blocks.
//!
//! A line starting with `#` closes the current record and opens the next.
//! Blank lines are dropped; every other line is appended to the current
//! block with its line break intact. The segmenter reads one line at a time
//! and never holds more than the block it is building.

use std::io::BufRead;

use crate::error::SegmentError;

/// First byte of a record boundary line.
pub const BOUNDARY_MARKER: u8 = b'#';

/// One item produced by the [`Segmenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// The raw text of one record, line breaks preserved. The trailing block
    /// emitted at end of input may be empty.
    Block(String),
    /// A non-empty block discarded by skip mode. Its content is not kept.
    Skipped,
}

impl Segment {
    pub fn as_block(&self) -> Option<&str> {
        match self {
            Segment::Block(raw) => Some(raw),
            Segment::Skipped => None,
        }
    }
}

/// Lazy, single-pass iterator of [`Segment`]s over a [`BufRead`] source.
pub struct Segmenter<R> {
    reader: R,
    skip: u64,
    current: String,
    line: Vec<u8>,
    finished: bool,
}

impl<R: BufRead> Segmenter<R> {
    pub fn new(reader: R) -> Self {
        Self::with_skip(reader, 0)
    }

    /// Replace the first `skip` non-empty blocks with [`Segment::Skipped`].
    pub fn with_skip(reader: R, skip: u64) -> Self {
        Self {
            reader,
            skip,
            current: String::new(),
            line: Vec::new(),
            finished: false,
        }
    }

    /// How many blocks are still to be skipped.
    pub fn remaining_skip(&self) -> u64 {
        self.skip
    }

    fn take_block(&mut self) -> Segment {
        let block = std::mem::take(&mut self.current);
        if self.skip > 0 {
            self.skip -= 1;
            Segment::Skipped
        } else {
            Segment::Block(block)
        }
    }
}

impl<R: BufRead> Iterator for Segmenter<R> {
    type Item = Result<Segment, SegmentError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            self.line.clear();
            let read = match self.reader.read_until(b'\n', &mut self.line) {
                Ok(n) => n,
                Err(source) => {
                    self.finished = true;
                    return Some(Err(SegmentError::Read { source }));
                }
            };

            // The final block is emitted as-is, whatever the skip counter says.
            if read == 0 {
                self.finished = true;
                return Some(Ok(Segment::Block(std::mem::take(&mut self.current))));
            }

            if self.line.first() == Some(&BOUNDARY_MARKER) {
                if self.current.is_empty() {
                    continue;
                }
                return Some(Ok(self.take_block()));
            }

            let text = String::from_utf8_lossy(&self.line);
            if text.trim().is_empty() {
                continue;
            }
            if matches!(text, std::borrow::Cow::Owned(_)) {
                tracing::debug!(line = %text.trim_end(), "replaced invalid UTF-8 in input line");
            }
            self.current.push_str(&text);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn segments(input: &str, skip: u64) -> Vec<Segment> {
        Segmenter::with_skip(input.as_bytes(), skip)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn boundaries_split_records() {
        let input = "# entry 1\ndn: a\ncn: A\n\n# entry 2\ndn: b\n";
        assert_eq!(
            segments(input, 0),
            vec![
                Segment::Block("dn: a\ncn: A\n".to_string()),
                Segment::Block("dn: b\n".to_string()),
            ]
        );
    }

    #[test]
    fn trailing_empty_block_always_emitted() {
        let input = "dn: a\n# search result\n# numEntries: 1\n";
        assert_eq!(
            segments(input, 0),
            vec![
                Segment::Block("dn: a\n".to_string()),
                Segment::Block(String::new()),
            ]
        );
    }

    #[test]
    fn empty_input_yields_one_empty_block() {
        assert_eq!(segments("", 0), vec![Segment::Block(String::new())]);
    }

    #[test]
    fn blank_and_whitespace_lines_dropped() {
        let input = "dn: a\n   \n\t\n\ncn: A";
        assert_eq!(
            segments(input, 0),
            vec![Segment::Block("dn: a\ncn: A".to_string())]
        );
    }

    #[test]
    fn consecutive_boundaries_do_not_emit_empty_blocks() {
        let input = "#\n#\n# \ndn: a\n#\n#\n";
        assert_eq!(
            segments(input, 0),
            vec![
                Segment::Block("dn: a\n".to_string()),
                Segment::Block(String::new()),
            ]
        );
    }

    #[test]
    fn indented_hash_is_not_a_boundary() {
        let input = "dn: a\n #not a boundary\n";
        assert_eq!(
            segments(input, 0),
            vec![Segment::Block("dn: a\n #not a boundary\n".to_string())]
        );
    }

    #[test]
    fn skip_replaces_leading_blocks() {
        let input = "dn: a\n#\ndn: b\n#\ndn: c\n#\n";
        assert_eq!(
            segments(input, 2),
            vec![
                Segment::Skipped,
                Segment::Skipped,
                Segment::Block("dn: c\n".to_string()),
                Segment::Block(String::new()),
            ]
        );
    }

    #[test]
    fn skip_larger_than_stream_still_emits_final_block() {
        let input = "dn: a\n#\ndn: b\n";
        let mut segmenter = Segmenter::with_skip(input.as_bytes(), 5);
        let all: Vec<_> = segmenter.by_ref().map(|s| s.unwrap()).collect();
        assert_eq!(
            all,
            vec![Segment::Skipped, Segment::Block("dn: b\n".to_string())]
        );
        assert_eq!(segmenter.remaining_skip(), 4);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let input: &[u8] = b"dn: caf\xe9\n";
        let all: Vec<_> = Segmenter::new(input).map(|s| s.unwrap()).collect();
        assert_eq!(all, vec![Segment::Block("dn: caf\u{fffd}\n".to_string())]);
    }

    #[test]
    fn exhausted_iterator_stays_exhausted() {
        let mut segmenter = Segmenter::new("dn: a\n".as_bytes());
        assert!(segmenter.next().is_some());
        assert!(segmenter.next().is_none());
        assert!(segmenter.next().is_none());
    }
}
