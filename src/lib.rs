//! Format-preserving Encryption
//!
//! Provides an implementation of the NIST-specified FF3-1 encryption
//! algorithm, the withdrawn FF3 tweak layout for legacy interoperability,
//! and a CBC-like chained mode for inputs longer than a single FF3 block.
//! Format-preserving encryption, in short, means that both the plaintext
//! and ciphertext will consist of the same alphabet of characters, and the
//! ciphertext keeps the plaintext's length. Characters outside the
//! alphabet (separators, padding, and other formatting) pass through with
//! their positions intact.
//!
//! If no alphabet is supplied, as is the case in the example below, a
//! default alphabet is used, consisting of the characters `0` through `9`,
//! followed by the letters `a` through `z`, and then by the letters `A`
//! through `Z`. The maximum radix supported by this default alphabet is 62,
//! the number of characters in the alphabet; custom alphabets may take the
//! radix up to 65536.
//!
//! # Example
//! ```rust
//! let ff3_1 = fpe3::ff3_1::FF3_1::new(
//!     &[
//!         0xad, 0x41, 0xec, 0x5d, 0x23, 0x56, 0xde, 0xae,
//!         0x53, 0xae, 0x76, 0xf5, 0x0b, 0x4b, 0xa6, 0xd2,
//!     ],    // the encryption key
//!     None, // no default tweak; pass one per call
//!     10,   // radix specifies the number of characters in the alphabet
//!     None, // use (the first 10 characters of) the default alphabet
//! ).unwrap();
//!
//! let tweak = [0xcf, 0x29, 0xda, 0x1e, 0x18, 0xd9, 0x70];
//!
//! let ct = ff3_1.encrypt("6520935496", Some(&tweak)).unwrap();
//! assert!(ct == "4716569208");
//!
//! let pt = ff3_1.decrypt(&ct, Some(&tweak)).unwrap();
//! assert!(pt == "6520935496");
//! ```

pub(crate) mod alphabet;
pub(crate) mod bigint;
pub mod bps;
pub mod cipher;
pub(crate) mod codec;
pub mod ff3_1;
pub(crate) mod ffx;

/// Errors returned by the FPE library
pub mod error {
    use std::fmt;

    /// Which stage rejected the request
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ErrorKind {
        /// Engine construction parameters are unusable
        Config,
        /// A per-call input (text, digits, tweak) is invalid
        Input,
    }

    /// Structure used by the library to convey errors
    #[derive(Debug)]
    pub struct Error {
        kind: ErrorKind,
        why: String,
    }

    impl Error {
        pub(crate) fn config(why: &str) -> Self {
            Error {
                kind: ErrorKind::Config,
                why: why.to_string(),
            }
        }

        pub(crate) fn input(why: &str) -> Self {
            Error {
                kind: ErrorKind::Input,
                why: why.to_string(),
            }
        }

        pub fn kind(&self) -> ErrorKind {
            self.kind
        }
    }

    impl fmt::Display for Error {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.why)
        }
    }

    impl std::error::Error for Error {}
}

/// Results returned by the FPE library
pub mod result {
    /// Short hand to return a result (or an FPE error)
    pub type Result<T> = std::result::Result<T, crate::error::Error>;
}
