use std::path::PathBuf;

/// Errors raised while loading a text or building an alphabet.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The input file could not be read.
    #[error("could not read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("alphabet cases differ in length ({lower} lower-case vs {upper} upper-case)")]
    AlphabetMismatch { lower: usize, upper: usize },

    /// More letters than a `LetterBitmask` has bits.
    #[error("alphabet has {letters} letters but masks only hold {max}")]
    AlphabetTooLarge { letters: usize, max: usize },

    #[error("letter {0:?} is outside the 256-entry lookup table")]
    UnsupportedLetter(char),
}

pub type Result<T> = std::result::Result<T, Error>;
