//! Transfer syntax screening.
//!
//! Only native (uncompressed) pixel data is decoded here. Encapsulated
//! transfer syntaxes are recognised by UID so they can be rejected before
//! any pixel bytes are touched.

use std::fmt;

use tracing::debug;

use crate::error::{DecodeError, DecodeResult};

const UID_ROOT: &str = "1.2.840.10008.1.2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFamily {
    Jpeg,
    JpegLs,
    Jpeg2000,
    Rle,
    /// Other encapsulated encodings, such as MIME encapsulation.
    Other,
}

impl fmt::Display for CompressionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompressionFamily::Jpeg => "JPEG",
            CompressionFamily::JpegLs => "JPEG-LS",
            CompressionFamily::Jpeg2000 => "JPEG 2000",
            CompressionFamily::Rle => "RLE",
            CompressionFamily::Other => "encapsulated",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferSyntax {
    Native,
    Encapsulated(CompressionFamily),
}

impl TransferSyntax {
    /// Classify a transfer syntax UID. Trailing UI padding is ignored.
    pub fn from_uid(uid: &str) -> Self {
        let uid = uid.trim_end_matches(|c: char| c == '\0' || c == ' ');
        let Some(suffix) = uid
            .strip_prefix(UID_ROOT)
            .and_then(|rest| rest.strip_prefix('.'))
        else {
            return TransferSyntax::Native;
        };

        let mut parts = suffix.split('.');
        let family = match (parts.next(), parts.next()) {
            (Some("4"), Some("80" | "81")) => CompressionFamily::JpegLs,
            (Some("4"), Some("90" | "91" | "92" | "93" | "201" | "202" | "203" | "204")) => {
                CompressionFamily::Jpeg2000
            }
            (Some("4"), Some(_)) => CompressionFamily::Jpeg,
            (Some("5"), None) => CompressionFamily::Rle,
            (Some("6"), Some(_)) => CompressionFamily::Other,
            _ => return TransferSyntax::Native,
        };
        TransferSyntax::Encapsulated(family)
    }

    pub fn is_encapsulated(self) -> bool {
        matches!(self, TransferSyntax::Encapsulated(_))
    }
}

/// Fail with [`DecodeError::UnsupportedEncoding`] if `uid` names a
/// compressed transfer syntax. An absent UID is treated as native.
pub fn ensure_native(uid: Option<&str>) -> DecodeResult<()> {
    let Some(uid) = uid else {
        return Ok(());
    };
    match TransferSyntax::from_uid(uid) {
        TransferSyntax::Native => Ok(()),
        TransferSyntax::Encapsulated(family) => {
            debug!("Rejecting {family} transfer syntax {uid}");
            Err(DecodeError::UnsupportedEncoding(uid.trim_end_matches('\0').to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.2.840.10008.1.2")]
    #[case("1.2.840.10008.1.2.1")]
    #[case("1.2.840.10008.1.2.1.99")]
    #[case("1.2.840.10008.1.2.2")]
    #[case("1.2.840.10008.1.2.1\0")]
    fn native_syntaxes(#[case] uid: &str) {
        assert_eq!(TransferSyntax::from_uid(uid), TransferSyntax::Native);
        assert!(ensure_native(Some(uid)).is_ok());
    }

    #[rstest]
    #[case("1.2.840.10008.1.2.4.50", CompressionFamily::Jpeg)]
    #[case("1.2.840.10008.1.2.4.57", CompressionFamily::Jpeg)]
    #[case("1.2.840.10008.1.2.4.70", CompressionFamily::Jpeg)]
    #[case("1.2.840.10008.1.2.4.80", CompressionFamily::JpegLs)]
    #[case("1.2.840.10008.1.2.4.90", CompressionFamily::Jpeg2000)]
    #[case("1.2.840.10008.1.2.4.91\0", CompressionFamily::Jpeg2000)]
    #[case("1.2.840.10008.1.2.5", CompressionFamily::Rle)]
    #[case("1.2.840.10008.1.2.6.1", CompressionFamily::Other)]
    fn encapsulated_syntaxes(#[case] uid: &str, #[case] family: CompressionFamily) {
        assert_eq!(
            TransferSyntax::from_uid(uid),
            TransferSyntax::Encapsulated(family)
        );
        let err = ensure_native(Some(uid)).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedEncoding(_)));
    }

    #[test]
    fn absent_transfer_syntax_is_native() {
        assert!(ensure_native(None).is_ok());
    }
}
