//! User-image utilities: data-URI decoding, format sniffing, and the
//! dimension probe used when the host adds an uploaded image.

use base64::Engine as _;

use crate::error::{RenderError, RenderResult};

/// Supported raster formats for user-supplied images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SniffedFormat {
    /// PNG with alpha support.
    Png,
    /// JPEG (no alpha).
    Jpeg,
    /// WebP (alpha support).
    WebP,
    /// Unknown/other format.
    Unknown,
}

impl SniffedFormat {
    /// Detect format from magic bytes.
    #[must_use]
    pub fn from_magic_bytes(data: &[u8]) -> Self {
        if data.len() < 12 {
            return Self::Unknown;
        }
        if data.starts_with(&[0x89, b'P', b'N', b'G']) {
            Self::Png
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Self::Jpeg
        } else if &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            Self::WebP
        } else {
            Self::Unknown
        }
    }
}

/// Decode the payload of a base64 data URI.
///
/// # Errors
///
/// Returns [`RenderError::UnsupportedSource`] if the string is not a
/// data URI and [`RenderError::Decode`] if the base64 payload is
/// malformed.
pub fn decode_data_uri(src: &str) -> RenderResult<Vec<u8>> {
    if !src.starts_with("data:") {
        tracing::warn!("Rejecting image source that is not a data URI");
        return Err(RenderError::UnsupportedSource(
            "expected a data URI".to_string(),
        ));
    }
    let payload = src
        .split_once(";base64,")
        .map(|(_, rest)| rest)
        .ok_or_else(|| {
            tracing::warn!("Rejecting data URI without a base64 payload");
            RenderError::UnsupportedSource("missing base64 payload".to_string())
        })?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| {
            tracing::warn!("Image payload is not valid base64: {e}");
            RenderError::Decode(e.to_string())
        })
}

/// Wrap PNG bytes in a base64 data URI.
#[must_use]
pub fn png_data_uri(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

/// Probe the natural pixel dimensions of a data-URI image.
///
/// Hosts call this before [`design_core::DesignSession::add_image`] so
/// the element's transform carries the image's natural size.
///
/// # Errors
///
/// Returns an error if the source is not a decodable data URI.
pub fn dimensions_of(src: &str) -> RenderResult<(u32, u32)> {
    let bytes = decode_data_uri(src)?;
    let img = image::load_from_memory(&bytes).map_err(|e| RenderError::Decode(e.to_string()))?;
    Ok((img.width(), img.height()))
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex, PoisonError};

    use super::*;

    /// Shared buffer usable as a `tracing` writer for log assertions.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            let buf = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            String::from_utf8_lossy(&buf).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]));
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png)
            .expect("encode");
        buf.into_inner()
    }

    #[test]
    fn test_magic_byte_detection() {
        assert_eq!(
            SniffedFormat::from_magic_bytes(&tiny_png()),
            SniffedFormat::Png
        );
        assert_eq!(
            SniffedFormat::from_magic_bytes(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0]),
            SniffedFormat::Jpeg
        );
        assert_eq!(
            SniffedFormat::from_magic_bytes(b"RIFF\x00\x00\x00\x00WEBP"),
            SniffedFormat::WebP
        );
        assert_eq!(SniffedFormat::from_magic_bytes(b"xx"), SniffedFormat::Unknown);
    }

    #[test]
    fn test_data_uri_round_trip() {
        let png = tiny_png();
        let uri = png_data_uri(&png);
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(decode_data_uri(&uri).expect("decode"), png);
    }

    #[test]
    fn test_dimensions_probe() {
        let uri = png_data_uri(&tiny_png());
        assert_eq!(dimensions_of(&uri).expect("probe"), (3, 2));
    }

    #[test]
    fn test_non_data_uri_rejected() {
        assert!(matches!(
            decode_data_uri("https://example.com/a.png"),
            Err(RenderError::UnsupportedSource(_))
        ));
    }

    #[test]
    fn test_rejected_source_is_logged() {
        let logs = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            assert!(decode_data_uri("https://example.com/a.png").is_err());
            assert!(decode_data_uri("data:image/png;base64,!!!not-base64").is_err());
        });

        let contents = logs.contents();
        assert!(contents.contains("not a data URI"));
        assert!(contents.contains("not valid base64"));
    }
}
