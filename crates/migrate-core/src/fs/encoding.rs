use std::fs;
use std::path::Path;

use encoding_rs::EUC_KR;
use tracing::debug;

use crate::{MigrationError, Result};

const UTF8_BOM: &str = "\u{feff}";

/// File text plus the encoding it was read with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: &'static str,
}

/// Read a source file as UTF-8 (dropping a BOM), falling back to the legacy
/// Korean code page (EUC-KR / CP949) when the bytes are not valid UTF-8.
pub fn read_source(path: &Path) -> Result<DecodedText> {
    let bytes = fs::read(path).map_err(|err| MigrationError::io(path, err))?;
    let decoded = decode(&bytes).ok_or_else(|| MigrationError::Decode {
        path: path.to_path_buf(),
        encoding: EUC_KR.name(),
    })?;

    if decoded.encoding != "UTF-8" {
        debug!(file = %path.display(), encoding = decoded.encoding, "decoded with fallback encoding");
    }
    Ok(decoded)
}

/// Decode bytes; `None` when neither encoding accepts them.
pub fn decode(bytes: &[u8]) -> Option<DecodedText> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Some(DecodedText {
            text: text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string(),
            encoding: "UTF-8",
        });
    }

    EUC_KR
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| DecodedText {
            text: text.into_owned(),
            encoding: EUC_KR.name(),
        })
}

/// Overwrite a source file with UTF-8 text.
pub fn write_source(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|err| MigrationError::io(path, err))
}
