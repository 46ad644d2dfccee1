use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Read the whole file at `path` as text.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(decode(bytes))
}

/// Decode `bytes` as UTF-8, dropping a leading byte order mark.
///
/// Bytes that are not valid UTF-8 are read as Latin-1 when the file holds no
/// multi-byte UTF-8 sequence at all, which puts å, ä and ö in the lookup
/// table's range. Otherwise only the invalid bytes are replaced.
pub fn decode(bytes: Vec<u8>) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            let bytes = err.into_bytes();
            if has_multibyte_utf8(&bytes) {
                debug!("input has invalid UTF-8, replacing invalid bytes");
                String::from_utf8_lossy(&bytes).into_owned()
            } else {
                debug!("input is not UTF-8, decoding as Latin-1");
                bytes.into_iter().map(char::from).collect()
            }
        }
    };

    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_owned(),
        None => text,
    }
}

/// Whether any valid stretch of `bytes` contains a non-ASCII character.
fn has_multibyte_utf8(mut bytes: &[u8]) -> bool {
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => return !valid.is_ascii(),
            Err(err) => {
                let (valid, rest) = bytes.split_at(err.valid_up_to());
                if !valid.is_ascii() {
                    return true;
                }
                let skip = err.error_len().unwrap_or(rest.len());
                bytes = &rest[skip..];
            }
        }
    }
}

/// Lines of `text`, broken at `\r\n`, `\n` or a bare `\r`. A final line
/// break does not start another line.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text).filter(|text| !text.is_empty());
    std::iter::from_fn(move || {
        let current = rest?;
        match current.find(&['\r', '\n'][..]) {
            Some(idx) => {
                let skip = if current[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&current[idx + skip..]).filter(|tail| !tail.is_empty());
                Some(&current[..idx])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}
