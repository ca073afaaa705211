//! Byte-to-text decoding with encoding detection.

use std::fmt;

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE, WINDOWS_1252};

/// Encoding the input bytes were decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedEncoding {
    Utf8,
    /// UTF-8 with a leading byte-order-mark (stripped).
    Utf8Bom,
    Utf16Le,
    Utf16Be,
    /// Legacy single-byte fallback; also covers ISO-8859-1 input.
    Windows1252,
}

impl DetectedEncoding {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf8Bom => "UTF-8 (BOM)",
            Self::Utf16Le => "UTF-16 LE",
            Self::Utf16Be => "UTF-16 BE",
            Self::Windows1252 => "Windows-1252",
        }
    }
}

impl fmt::Display for DetectedEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decode raw file bytes into text.
///
/// A byte-order-mark decides the encoding when present and is removed from
/// the output. Otherwise strict UTF-8 is tried first, then Windows-1252,
/// which accepts every byte sequence.
pub fn decode_bytes(bytes: &[u8]) -> (String, DetectedEncoding) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let detected = if encoding == UTF_8 {
            DetectedEncoding::Utf8Bom
        } else if encoding == UTF_16LE {
            DetectedEncoding::Utf16Le
        } else if encoding == UTF_16BE {
            DetectedEncoding::Utf16Be
        } else {
            DetectedEncoding::Utf8
        };
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            tracing::warn!(
                encoding = detected.label(),
                "input contains malformed sequences; replaced with U+FFFD"
            );
        }
        return (text.into_owned(), detected);
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), DetectedEncoding::Utf8),
        Err(error) => {
            tracing::debug!(
                valid_up_to = error.valid_up_to(),
                "input is not valid UTF-8, falling back to Windows-1252"
            );
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            (text.into_owned(), DetectedEncoding::Windows1252)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_utf8() {
        let (text, encoding) = decode_bytes("naïve,b\n".as_bytes());
        assert_eq!(text, "naïve,b\n");
        assert_eq!(encoding, DetectedEncoding::Utf8);
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let (text, encoding) = decode_bytes(b"\xEF\xBB\xBFa,b\n");
        assert_eq!(text, "a,b\n");
        assert_eq!(encoding, DetectedEncoding::Utf8Bom);
    }

    #[test]
    fn utf16_le_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "a,b".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let (text, encoding) = decode_bytes(&bytes);
        assert_eq!(text, "a,b");
        assert_eq!(encoding, DetectedEncoding::Utf16Le);
    }

    #[test]
    fn windows_1252_fallback() {
        // "café" with é encoded as 0xE9 (Latin-1 / cp1252)
        let (text, encoding) = decode_bytes(b"caf\xE9,x");
        assert_eq!(text, "café,x");
        assert_eq!(encoding, DetectedEncoding::Windows1252);
    }
}
