//! Stanza parsing: blank-line separated blocks of `<tag>:<value>` lines.
//!
//! ```text
//! C:Q1oHg4kAnVFve7dHe30IKgyaCykSg=
//! P:postfix-openrc
//! V:3.6.4-r0
//! S:2518
//! ```
//!
//! Trailing whitespace (including `\r`) is trimmed from every line before it
//! is interpreted. Lines that are not `<tag>:<value>` and unknown tags are
//! ignored.

use std::io::BufRead;

use apkdiff_types::{FieldTag, PackageRecord};

use crate::error::{IndexError, IndexResult};

/// Parse the whole index text into records, in input order.
pub fn parse(text: &[u8]) -> IndexResult<Vec<PackageRecord>> {
    StanzaReader::new(text).collect()
}

/// Lazily yields one [`PackageRecord`] per stanza.
///
/// The iterator is single pass. After the first error it yields nothing more.
pub struct StanzaReader<R> {
    reader: R,
    line: Vec<u8>,
    line_no: usize,
    current: PackageRecord,
    in_stanza: bool,
    done: bool,
}

impl<R: BufRead> StanzaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            line_no: 0,
            current: PackageRecord::default(),
            in_stanza: false,
            done: false,
        }
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }

    fn take_record(&mut self) -> PackageRecord {
        self.in_stanza = false;
        std::mem::take(&mut self.current)
    }

    fn apply_line(&mut self) -> IndexResult<()> {
        let line = self.line.trim_ascii_end();
        let [tag, b':', value @ ..] = line else {
            return Ok(());
        };
        let Some(tag) = FieldTag::from_byte(*tag) else {
            return Ok(());
        };
        let value = String::from_utf8_lossy(value);
        self.current
            .set_field(tag, &value)
            .map_err(|_| IndexError::FieldFormat {
                line: self.line_no,
                value: value.into_owned(),
            })
    }
}

impl<R: BufRead> Iterator for StanzaReader<R> {
    type Item = IndexResult<PackageRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.line.clear();
            let n = match self.reader.read_until(b'\n', &mut self.line) {
                Ok(n) => n,
                Err(e) => {
                    self.done = true;
                    return Some(Err(IndexError::Stream(e)));
                }
            };

            if n == 0 {
                self.done = true;
                return self.in_stanza.then(|| Ok(self.take_record()));
            }
            self.line_no += 1;

            if self.line.trim_ascii_end().is_empty() {
                if self.in_stanza {
                    return Some(Ok(self.take_record()));
                }
                continue;
            }

            self.in_stanza = true;
            if let Err(e) = self.apply_line() {
                self.done = true;
                return Some(Err(e));
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for StanzaReader<R> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_stanza() {
        let records = parse(b"C:abc\nP:pkgA\nV:1.0-r0\nS:42\n\n").unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.hash, "abc");
        assert_eq!(r.name, "pkgA");
        assert_eq!(r.version, "1.0-r0");
        assert_eq!(r.size, 42);
    }

    #[test]
    fn parses_multiple_stanzas_in_order() {
        let text = b"C:h1\nP:a\nV:1\nS:1\n\nC:h2\nP:b\nV:2\nS:2\n\nC:h3\nP:c\nV:3\nS:3\n";
        let names: Vec<String> = parse(text).unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn last_stanza_without_blank_line_is_emitted() {
        let records = parse(b"P:tail\nS:7").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "tail");
        assert_eq!(records[0].size, 7);
    }

    #[test]
    fn repeated_blank_lines_emit_no_empty_records() {
        let records = parse(b"\n\nP:a\n\n\n\nP:b\n\n\n").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn unknown_tags_and_malformed_lines_are_ignored() {
        let text = b"C:h\nP:zlib\nD:so:libc.musl-x86_64.so.1\nX\nPzlib-dev\nV:1.3-r2\nS:53000\nt:1690000000\n\n";
        let records = parse(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], PackageRecord::new("h", "zlib", 53000, "1.3-r2"));
    }

    #[test]
    fn stanza_of_only_unknown_tags_yields_default_record() {
        let records = parse(b"D:foo\nt:1\n\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], PackageRecord::default());
    }

    #[test]
    fn trailing_whitespace_is_trimmed() {
        let records = parse(b"C:abc  \r\nP:pkgA\t\r\nV:1.0-r0 \r\nS:42 \r\n\r\n").unwrap();
        assert_eq!(records, [PackageRecord::new("abc", "pkgA", 42, "1.0-r0")]);
    }

    #[test]
    fn whitespace_only_line_separates_stanzas() {
        let records = parse(b"P:a\n   \nP:b\n").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn informational_fields_are_captured() {
        let records = parse(b"P:openssl\nA:x86_64\nT:Toolkit for TLS\no:openssl\n\n").unwrap();
        let r = &records[0];
        assert_eq!(r.arch.as_deref(), Some("x86_64"));
        assert_eq!(r.description.as_deref(), Some("Toolkit for TLS"));
        assert_eq!(r.origin.as_deref(), Some("openssl"));
    }

    #[test]
    fn bad_size_is_fatal() {
        let err = parse(b"P:ok\nS:1\n\nP:bad\nS:notanumber\n\n").unwrap_err();
        match err {
            IndexError::FieldFormat { line, value } => {
                assert_eq!(line, 5);
                assert_eq!(value, "notanumber");
            }
            other => panic!("expected FieldFormat, got {other:?}"),
        }
    }

    #[test]
    fn reader_stops_after_error() {
        let mut reader = StanzaReader::new(b"P:a\n\nS:x\n\nP:c\n\n".as_slice());
        assert_eq!(reader.next().unwrap().unwrap().name, "a");
        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }

    #[test]
    fn reader_is_lazy() {
        let mut reader = StanzaReader::new(b"P:a\n\nP:b\n\n".as_slice());
        reader.next();
        assert_eq!(reader.lines_read(), 2);
    }

    #[test]
    fn empty_text_has_no_records() {
        assert!(parse(b"").unwrap().is_empty());
        assert!(parse(b"\n\n").unwrap().is_empty());
    }
}
