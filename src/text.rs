//! Text encodings used by the UTF-16 and UTF-32 string paths.
//!
//! The Unicode forms are laid out here with `zerocopy`'s byte-order integers. Every other
//! encoding (ISO-8859-x, Windows-125x, Shift_JIS, ...) is delegated to `encoding_rs`, which
//! resolves names the way the WHATWG Encoding Standard does; `ISO-8859-1`, for example, is
//! treated as `windows-1252`.
//!
//! Decoding is lossy: malformed input becomes U+FFFD rather than an error, so a damaged string
//! in a binary file does not stop the rest of the file from being read. Encoding never fails;
//! characters a legacy encoding cannot represent are written as HTML numeric character
//! references (`&#8364;`).

use core::fmt;
use core::str::FromStr;

use encoding_rs::Encoding;
use zerocopy::byteorder::{ByteOrder, BE, LE, U16, U32};

use crate::{Endian, Result, StreamError};

/// A character encoding that strings can be converted from or to.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TextEncoding {
    /// UTF-8
    Utf8,
    /// UTF-16, least significant byte first
    Utf16Le,
    /// UTF-16, most significant byte first
    Utf16Be,
    /// UTF-32, least significant byte first
    Utf32Le,
    /// UTF-32, most significant byte first
    Utf32Be,
    /// Any other encoding known to `encoding_rs`, e.g. `encoding_rs::SHIFT_JIS`.
    Other(&'static Encoding),
}

impl TextEncoding {
    /// The UTF-16 encoding for the given byte order.
    pub fn utf16(endian: Endian) -> Self {
        match endian {
            Endian::Big => TextEncoding::Utf16Be,
            Endian::Little => TextEncoding::Utf16Le,
        }
    }

    /// The UTF-32 encoding for the given byte order.
    pub fn utf32(endian: Endian) -> Self {
        match endian {
            Endian::Big => TextEncoding::Utf32Be,
            Endian::Little => TextEncoding::Utf32Le,
        }
    }

    /// Canonical name, e.g. `"UTF-16LE"` or `"Shift_JIS"`.
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Utf16Le => "UTF-16LE",
            TextEncoding::Utf16Be => "UTF-16BE",
            TextEncoding::Utf32Le => "UTF-32LE",
            TextEncoding::Utf32Be => "UTF-32BE",
            TextEncoding::Other(encoding) => encoding.name(),
        }
    }

    /// Decodes `bytes` into a `String`, replacing malformed sequences with U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            TextEncoding::Utf16Le => decode_utf16::<LE>(bytes),
            TextEncoding::Utf16Be => decode_utf16::<BE>(bytes),
            TextEncoding::Utf32Le => decode_utf32::<LE>(bytes),
            TextEncoding::Utf32Be => decode_utf32::<BE>(bytes),
            TextEncoding::Other(encoding) => {
                let (s, _had_errors) = encoding.decode_without_bom_handling(bytes);
                s.into_owned()
            }
        }
    }

    /// Encodes `s` in this encoding. No byte order mark is written.
    pub fn encode(self, s: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => s.as_bytes().to_vec(),
            TextEncoding::Utf16Le => encode_utf16::<LE>(s),
            TextEncoding::Utf16Be => encode_utf16::<BE>(s),
            TextEncoding::Utf32Le => encode_utf32::<LE>(s),
            TextEncoding::Utf32Be => encode_utf32::<BE>(s),
            TextEncoding::Other(encoding) => {
                let (bytes, _actual, _unmappable) = encoding.encode(s);
                bytes.into_owned()
            }
        }
    }
}

/// Converts `bytes` from one encoding to another.
pub fn transcode(bytes: &[u8], from: TextEncoding, to: TextEncoding) -> Vec<u8> {
    if from == to {
        return bytes.to_vec();
    }
    to.encode(&from.decode(bytes))
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = StreamError;

    /// Accepts the usual names, ignoring case. A bare `UTF-16` or `UTF-32` means big endian.
    /// Anything else is looked up as an `encoding_rs` label.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" => return Ok(TextEncoding::Utf8),
            "UTF-16LE" => return Ok(TextEncoding::Utf16Le),
            "UTF-16BE" | "UTF-16" => return Ok(TextEncoding::Utf16Be),
            "UTF-32LE" => return Ok(TextEncoding::Utf32Le),
            "UTF-32BE" | "UTF-32" => return Ok(TextEncoding::Utf32Be),
            _ => {}
        }

        match Encoding::for_label(s.as_bytes()) {
            Some(encoding) if encoding == encoding_rs::UTF_8 => Ok(TextEncoding::Utf8),
            Some(encoding) if encoding == encoding_rs::UTF_16LE => Ok(TextEncoding::Utf16Le),
            Some(encoding) if encoding == encoding_rs::UTF_16BE => Ok(TextEncoding::Utf16Be),
            // The replacement encoding only exists to refuse dangerous labels.
            Some(encoding) if encoding != encoding_rs::REPLACEMENT => {
                Ok(TextEncoding::Other(encoding))
            }
            _ => Err(StreamError::InvalidArgument(format!(
                "unknown text encoding `{s}`"
            ))),
        }
    }
}

fn decode_utf16<O: ByteOrder>(bytes: &[u8]) -> String {
    let chunks = bytes.chunks_exact(2);
    let partial = !chunks.remainder().is_empty();
    let units = chunks.map(|c| U16::<O>::from_bytes([c[0], c[1]]).get());

    let mut s: String = char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if partial {
        s.push(char::REPLACEMENT_CHARACTER);
    }
    s
}

fn decode_utf32<O: ByteOrder>(bytes: &[u8]) -> String {
    let chunks = bytes.chunks_exact(4);
    let partial = !chunks.remainder().is_empty();

    let mut s: String = chunks
        .map(|c| U32::<O>::from_bytes([c[0], c[1], c[2], c[3]]).get())
        .map(|u| char::from_u32(u).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if partial {
        s.push(char::REPLACEMENT_CHARACTER);
    }
    s
}

fn encode_utf16<O: ByteOrder>(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len() * 2);
    for unit in s.encode_utf16() {
        out.extend_from_slice(&U16::<O>::new(unit).to_bytes());
    }
    out
}

fn encode_utf32<O: ByteOrder>(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len() * 4);
    for c in s.chars() {
        out.extend_from_slice(&U32::<O>::new(c as u32).to_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("utf-16le".parse::<TextEncoding>().unwrap(), TextEncoding::Utf16Le);
        assert_eq!("UTF-16".parse::<TextEncoding>().unwrap(), TextEncoding::Utf16Be);
        assert_eq!("UTF-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert!(matches!(
            "EBCDIC-XYZ".parse::<TextEncoding>(),
            Err(StreamError::InvalidArgument(_))
        ));
        assert!("iso-2022-kr".parse::<TextEncoding>().is_err());
    }

    #[test]
    fn parse_legacy_names() {
        assert_eq!(
            "Shift_JIS".parse::<TextEncoding>().unwrap(),
            TextEncoding::Other(encoding_rs::SHIFT_JIS)
        );
        assert_eq!(
            "Windows-1251".parse::<TextEncoding>().unwrap(),
            TextEncoding::Other(encoding_rs::WINDOWS_1251)
        );
        let latin1 = "ISO-8859-1".parse::<TextEncoding>().unwrap();
        assert_eq!(latin1.name(), "windows-1252");
        // Unicode labels resolve to the built-in forms.
        assert_eq!("unicode-1-1-utf-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
    }

    #[test]
    fn utf16_layouts() {
        assert_eq!(TextEncoding::Utf16Le.encode("Hi"), [b'H', 0, b'i', 0]);
        assert_eq!(TextEncoding::Utf16Be.encode("Hi"), [0, b'H', 0, b'i']);
        // Astral characters use a surrogate pair.
        assert_eq!(
            TextEncoding::Utf16Be.encode("\u{1F600}"),
            [0xd8, 0x3d, 0xde, 0x00]
        );
    }

    #[test]
    fn utf32_layouts() {
        assert_eq!(TextEncoding::Utf32Le.encode("A"), [b'A', 0, 0, 0]);
        assert_eq!(
            TextEncoding::Utf32Be.encode("\u{1F600}"),
            [0, 0x01, 0xf6, 0x00]
        );
    }

    #[test]
    fn lossy_decoding() {
        // Unpaired high surrogate.
        assert_eq!(TextEncoding::Utf16Le.decode(&[0x3d, 0xd8]), "\u{FFFD}");
        // Trailing odd byte.
        assert_eq!(TextEncoding::Utf16Le.decode(&[b'A', 0, b'B']), "A\u{FFFD}");
        // Beyond U+10FFFF.
        assert_eq!(TextEncoding::Utf32Be.decode(&[0, 0x11, 0, 0]), "\u{FFFD}");
        // Trailing partial UTF-32 unit.
        assert_eq!(TextEncoding::Utf32Le.decode(&[b'A', 0, 0, 0, 1]), "A\u{FFFD}");
    }

    #[test]
    fn legacy_round_trip() {
        let cp1252 = TextEncoding::Other(encoding_rs::WINDOWS_1252);
        assert_eq!(cp1252.encode("café €5"), b"caf\xe9 \x805");
        assert_eq!(cp1252.decode(b"caf\xe9 \x805"), "café €5");

        let sjis = TextEncoding::Other(encoding_rs::SHIFT_JIS);
        assert_eq!(sjis.decode(&[0x93, 0xfa, 0x96, 0x7b]), "日本");
    }

    #[test]
    fn unmappable_becomes_character_reference() {
        let cp1252 = TextEncoding::Other(encoding_rs::WINDOWS_1252);
        assert_eq!(cp1252.encode("a\u{263A}"), b"a&#9786;");
    }

    #[test]
    fn transcode_between_orders() {
        let le = TextEncoding::Utf16Le.encode("héllo");
        let be = transcode(&le, TextEncoding::Utf16Le, TextEncoding::Utf16Be);
        assert_eq!(be, TextEncoding::Utf16Be.encode("héllo"));
        let utf8 = transcode(&be, TextEncoding::Utf16Be, TextEncoding::Utf8);
        assert_eq!(utf8, "héllo".as_bytes());
    }
}
