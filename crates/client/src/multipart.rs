// SPDX-License-Identifier: Apache-2.0

//! Minimal `multipart/form-data` encoder for the extract-text upload.

pub(crate) const BOUNDARY: &str = "textbridge-form-boundary";

pub(crate) struct Body {
    buf: Vec<u8>,
}

impl Body {
    pub(crate) fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub(crate) fn content_type() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    pub(crate) fn text(mut self, name: &str, value: &str) -> Self {
        self.open(name, None, None);
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub(crate) fn file(mut self, name: &str, filename: &str, mime: &str, data: &[u8]) -> Self {
        self.open(name, Some(filename), Some(mime));
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    fn open(&mut self, name: &str, filename: Option<&str>, mime: Option<&str>) {
        self.buf
            .extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{name}\"");
        if let Some(filename) = filename {
            disposition.push_str(&format!("; filename=\"{filename}\""));
        }
        disposition.push_str("\r\n");
        self.buf.extend_from_slice(disposition.as_bytes());
        if let Some(mime) = mime {
            self.buf
                .extend_from_slice(format!("Content-Type: {mime}\r\n").as_bytes());
        }
        self.buf.extend_from_slice(b"\r\n");
    }

    pub(crate) fn finish(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_fields_and_files() {
        let body = Body::new()
            .text("token", "tok")
            .file("image", "scan.png", "application/octet-stream", b"bytes")
            .finish();
        let body = String::from_utf8(body).unwrap();

        assert!(body.starts_with(&format!("--{BOUNDARY}\r\n")));
        assert!(body.contains("Content-Disposition: form-data; name=\"token\"\r\n\r\ntok\r\n"));
        assert!(body.contains("Content-Disposition: form-data; name=\"image\"; filename=\"scan.png\"\r\n"));
        assert!(body.contains("Content-Type: application/octet-stream\r\n\r\nbytes\r\n"));
        assert!(body.ends_with(&format!("--{BOUNDARY}--\r\n")));
    }
}
