//! Voucher document output
//!
//! Vouchers are written to whatever response the host is building. Headers
//! may only be sent while nothing has been written yet; once output has
//! started the document bytes are appended on their own.

use std::io::{self, Write};

/// Headers announcing an inline PDF document
pub const PDF_HEADERS: [(&str, &str); 2] = [
    ("Content-type", "application/pdf"),
    ("Content-Disposition", "inline; filename=filename.pdf"),
];

/// Response being produced by the embedding host
pub trait OutputChannel {
    /// Whether output has started, after which headers can no longer be sent
    fn headers_sent(&self) -> bool;

    fn send_header(&mut self, name: &str, value: &str) -> io::Result<()>;

    fn write_body(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// Emit a PDF document, preceded by its headers if output has not started
pub fn emit_pdf<O: OutputChannel + ?Sized>(out: &mut O, document: &[u8]) -> io::Result<()> {
    if !out.headers_sent() {
        for (name, value) in PDF_HEADERS {
            out.send_header(name, value)?;
        }
    }
    out.write_body(document)
}

fn headers_already_sent() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "headers already sent")
}

/// In-memory response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferedResponse {
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    started: bool,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// A response whose output was already started elsewhere
    pub fn started() -> Self {
        Self {
            started: true,
            ..Self::default()
        }
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

impl OutputChannel for BufferedResponse {
    fn headers_sent(&self) -> bool {
        self.started
    }

    fn send_header(&mut self, name: &str, value: &str) -> io::Result<()> {
        if self.started {
            return Err(headers_already_sent());
        }
        self.headers.push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn write_body(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.started = true;
        self.body.extend_from_slice(bytes);
        Ok(())
    }
}

/// Response written to a byte stream as `Name: value` lines, a blank line,
/// then the body
#[derive(Debug)]
pub struct StreamOutput<W: Write> {
    writer: W,
    started: bool,
    wrote_headers: bool,
}

impl<W: Write> StreamOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            started: false,
            wrote_headers: false,
        }
    }

    /// Wrap a stream that already carries output; headers will be skipped
    pub fn started(writer: W) -> Self {
        Self {
            writer,
            started: true,
            wrote_headers: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputChannel for StreamOutput<W> {
    fn headers_sent(&self) -> bool {
        self.started
    }

    fn send_header(&mut self, name: &str, value: &str) -> io::Result<()> {
        if self.started {
            return Err(headers_already_sent());
        }
        write!(self.writer, "{name}: {value}\r\n")?;
        self.wrote_headers = true;
        Ok(())
    }

    fn write_body(&mut self, bytes: &[u8]) -> io::Result<()> {
        if !self.started && self.wrote_headers {
            self.writer.write_all(b"\r\n")?;
        }
        self.started = true;
        self.writer.write_all(bytes)?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_emitted_once_when_not_started() {
        let mut out = BufferedResponse::new();
        emit_pdf(&mut out, b"%PDF-1.4").unwrap();

        assert_eq!(out.headers().len(), 2);
        assert_eq!(out.header("content-type"), Some("application/pdf"));
        assert_eq!(
            out.header("Content-Disposition"),
            Some("inline; filename=filename.pdf")
        );
        assert_eq!(out.body(), b"%PDF-1.4");

        // Second document on the same response: body only
        emit_pdf(&mut out, b"more").unwrap();
        assert_eq!(out.headers().len(), 2);
        assert_eq!(out.body(), b"%PDF-1.4more");
    }

    #[test]
    fn test_headers_skipped_when_started() {
        let mut out = BufferedResponse::started();
        emit_pdf(&mut out, b"%PDF").unwrap();

        assert!(out.headers().is_empty());
        assert_eq!(out.body(), b"%PDF");
    }

    #[test]
    fn test_stream_output_layout() {
        let mut out = StreamOutput::new(Vec::new());
        emit_pdf(&mut out, b"%PDF").unwrap();

        let written = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(
            written,
            "Content-type: application/pdf\r\n\
             Content-Disposition: inline; filename=filename.pdf\r\n\
             \r\n\
             %PDF"
        );
    }

    #[test]
    fn test_stream_output_started() {
        let mut out = StreamOutput::started(Vec::new());
        emit_pdf(&mut out, b"%PDF").unwrap();
        assert_eq!(out.into_inner(), b"%PDF");
    }

    #[test]
    fn test_send_header_after_start_fails() {
        let mut out = BufferedResponse::new();
        out.write_body(b"x").unwrap();
        assert!(out.send_header("X-Test", "1").is_err());
    }
}
