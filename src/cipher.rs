//! Raw single-block encryption under a cached key schedule.
//!
//! The Feistel core only ever needs one forward block operation at a time,
//! so there is no mode object here: each variant holds its key schedule and
//! encrypts through `&self`, which keeps the engine shareable across
//! threads.

use aes::cipher::{BlockEncrypt, BlockSizeUser, KeyInit};

use core::fmt;

use crate::error::Error;
use crate::result::Result;

#[derive(Clone)]
enum EcbType {
    Aes128(aes::Aes128),
    Aes192(aes::Aes192),
    Aes256(aes::Aes256),
    TdesEde2(des::TdesEde2),
    TdesEde3(des::TdesEde3),
}

/// A block cipher loaded with a key, restricted to raw single-block
/// encryption.
#[derive(Clone)]
pub struct Cipher {
    enc: EcbType,
    blksz: usize,
}

impl fmt::Debug for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cipher").finish_non_exhaustive()
    }
}

macro_rules! construct_cipher {
    ($crt:ident, $type:ident, $key:expr) => {
        Cipher {
            blksz: $crt::$type::block_size(),
            enc: EcbType::$type(
                $crt::$type::new_from_slice($key)
                    .map_err(|_| Error::config("invalid key length"))?,
            ),
        }
    };
}

impl Cipher {
    /// An AES key schedule; the key length selects AES-128, -192 or -256.
    pub fn new_aes(key: &[u8]) -> Result<Cipher> {
        Ok(match key.len() {
            16 => construct_cipher!(aes, Aes128, key),
            24 => construct_cipher!(aes, Aes192, key),
            32 => construct_cipher!(aes, Aes256, key),
            n => {
                return Err(Error::config(&format!(
                    "invalid AES key length; expected 16, 24 or 32 bytes, got {}",
                    n
                )))
            }
        })
    }

    /// A 3DES (EDE) key schedule; 16 bytes selects the two-key form, 24
    /// bytes the three-key form.
    ///
    /// The 64-bit block disqualifies 3DES from standard FF3-1; it exists
    /// for the chained legacy construction in [`crate::bps`].
    pub fn new_tdes(key: &[u8]) -> Result<Cipher> {
        Ok(match key.len() {
            16 => construct_cipher!(des, TdesEde2, key),
            24 => construct_cipher!(des, TdesEde3, key),
            n => {
                return Err(Error::config(&format!(
                    "invalid 3DES key length; expected 16 or 24 bytes, got {}",
                    n
                )))
            }
        })
    }

    /// Encrypt exactly one block; `src` and `dst` must both be
    /// `block_size()` bytes.
    pub fn encrypt_block(&self, src: &[u8], dst: &mut [u8]) {
        match &self.enc {
            EcbType::Aes128(e) => e.encrypt_block_b2b(src.into(), dst.into()),
            EcbType::Aes192(e) => e.encrypt_block_b2b(src.into(), dst.into()),
            EcbType::Aes256(e) => e.encrypt_block_b2b(src.into(), dst.into()),
            EcbType::TdesEde2(e) => e.encrypt_block_b2b(src.into(), dst.into()),
            EcbType::TdesEde3(e) => e.encrypt_block_b2b(src.into(), dst.into()),
        }
    }

    pub fn block_size(&self) -> usize {
        self.blksz
    }
}

/// Reverse a key buffer in place.
///
/// FF3-family ciphering runs the block cipher under the byte-reversed form
/// of the logical key. The `new(key, ...)` constructors do this themselves;
/// callers building a [`Cipher`] by hand apply it first.
pub fn reverse_key_in_place(key: &mut [u8]) {
    key.reverse();
}
