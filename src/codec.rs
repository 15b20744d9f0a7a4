//! Translation between displayable strings and digit vectors.
//!
//! Characters outside the alphabet are not enciphered; they are lifted out
//! with their positions during decoding and spliced back verbatim during
//! encoding, so punctuation like the `-` in a formatted card number
//! survives a round-trip untouched.

use crate::alphabet::Alphabet;
use crate::error::Error;
use crate::result::Result;

/// A character of the input that is not part of the alphabet, keyed by its
/// character offset in the original string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatting {
    pub offset: usize,
    pub ch: char,
}

/// Split `s` into the digit values of its alphabet characters and the
/// formatting characters that were skipped over.
pub fn decode(s: &str, alpha: &Alphabet) -> (Vec<u16>, Vec<Formatting>) {
    let mut digits = Vec::with_capacity(s.len());
    let mut fmt = Vec::new();
    for (i, c) in s.chars().enumerate() {
        match alpha.find(c) {
            Some(d) => digits.push(d),
            None => fmt.push(Formatting { offset: i, ch: c }),
        }
    }
    (digits, fmt)
}

/// Rebuild a string from digits and formatting entries; the inverse of
/// [`decode`]. The output is exactly `digits.len() + fmt.len()` characters.
pub fn encode(digits: &[u16], alpha: &Alphabet, fmt: &[Formatting]) -> Result<String> {
    let total = digits.len() + fmt.len();
    let mut out = String::with_capacity(total);
    let mut j = 0;
    let mut k = 0;
    for p in 0..total {
        if k < fmt.len() && fmt[k].offset == p {
            out.push(fmt[k].ch);
            k += 1;
        } else {
            let d = digits
                .get(j)
                .ok_or_else(|| Error::input("formatting offsets do not match digit count"))?;
            out.push(alpha.symbol(*d)?);
            j += 1;
        }
    }
    Ok(out)
}
