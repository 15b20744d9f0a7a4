//! The FF3-1 algorithm
//!
//! FF3-1 supports key sizes of 128, 192, and 256 bits and a 56-bit (7-byte)
//! tweak. The original FF3 used a 64-bit (8-byte) tweak; that form was
//! withdrawn but remains widely deployed, so a context created with
//! [`FF3_1::with_legacy_tweaks`] accepts both lengths for interoperability.
//!
//! This implementation contains a "context" structure, called FF3_1, that
//! holds the encryption key, the default tweak, and some other parameters
//! related to the algorithm. Once the structure has been created, it can be
//! used to encrypt and decrypt data. Characters of the input that are not
//! part of the alphabet pass through unchanged, keeping their positions.
//!
//! # Example
//! ```rust
//! let ff3_1 = fpe3::ff3_1::FF3_1::new(
//!     &[
//!         0xad, 0x41, 0xec, 0x5d, 0x23, 0x56, 0xde, 0xae,
//!         0x53, 0xae, 0x76, 0xf5, 0x0b, 0x4b, 0xa6, 0xd2,
//!     ],    // the encryption key
//!     // the default tweak
//!     Some(&[0xcf, 0x29, 0xda, 0x1e, 0x18, 0xd9, 0x70]),
//!     10,   // radix specifies the number of characters in the alphabet
//!     None, // use (the first 10 characters of) the default alphabet
//! ).unwrap();
//!
//! let pt = "6520935496";
//! let ct = "4716569208";
//!
//! let out = ff3_1.encrypt(pt, None).unwrap();
//! assert!(out == ct);
//!
//! let out = ff3_1.decrypt(&ct, None).unwrap();
//! assert!(out == pt);
//! ```

use std::mem;

use byteorder::ByteOrder;
use zeroize::Zeroizing;

use crate::bigint::{Acc128, Acc96, Divisor};
use crate::cipher::Cipher;
use crate::codec;
use crate::error::Error;
use crate::ffx::{CipherType, FFX};
use crate::result::Result;

const ZERO_TWEAK: [u8; 7] = [0; 7];

/// The FF3_1 context structure
pub struct FF3_1 {
    ffx: FFX,
}

impl FF3_1 {
    /// Create a new FF3-1 context
    ///
    /// The supplied key is the logical key; it is byte-reversed internally
    /// before the AES schedule is built, as the algorithm requires. The key
    /// may be any of the lengths supported by AES.
    ///
    /// The default tweak is optional. If supplied, its length must be 7
    /// bytes as per the algorithm specification. If no default is supplied
    /// and none is given per call, the all-zero tweak is used.
    ///
    /// The radix must be less than or equal to the number of characters in
    /// the supplied alphabet (or the default alphabet, if none is supplied
    /// to this function).
    pub fn new(
        key: &[u8],
        opt_twk: Option<&[u8]>,
        radix: usize,
        opt_alpha: Option<&str>,
    ) -> Result<Self> {
        Self::construct(key, opt_twk, radix, opt_alpha, false)
    }

    /// Like [`FF3_1::new`], but 8-byte tweaks from the withdrawn FF3
    /// specification are accepted alongside 7-byte ones.
    pub fn with_legacy_tweaks(
        key: &[u8],
        opt_twk: Option<&[u8]>,
        radix: usize,
        opt_alpha: Option<&str>,
    ) -> Result<Self> {
        Self::construct(key, opt_twk, radix, opt_alpha, true)
    }

    /// Create a context around a caller-built [`Cipher`].
    ///
    /// The cipher must already be loaded with the byte-reversed key (see
    /// [`crate::cipher::reverse_key_in_place`]). Block sizes below 128 bits
    /// are accepted here for the chained legacy construction, but only a
    /// 128-bit block yields standard FF3-1.
    pub fn with_cipher(
        cipher: Cipher,
        opt_twk: Option<&[u8]>,
        radix: usize,
        opt_alpha: Option<&str>,
        legacy_twk: bool,
    ) -> Result<Self> {
        Ok(FF3_1 {
            ffx: FFX::new(cipher, opt_twk, radix, opt_alpha, legacy_twk)?,
        })
    }

    fn construct(
        key: &[u8],
        opt_twk: Option<&[u8]>,
        radix: usize,
        opt_alpha: Option<&str>,
        legacy_twk: bool,
    ) -> Result<Self> {
        // key is reversed for ff3-1
        let mut k = Zeroizing::new(key.to_vec());
        k.reverse();
        let cipher = Cipher::new_aes(&k)?;
        Self::with_cipher(cipher, opt_twk, radix, opt_alpha, legacy_twk)
    }

    pub(crate) fn ffx(&self) -> &FFX {
        &self.ffx
    }

    /// The shortest text this context accepts.
    pub fn min_text_len(&self) -> usize {
        self.ffx.min_text_len()
    }

    /// The longest text this context accepts in one Feistel block.
    pub fn max_text_len(&self) -> usize {
        self.ffx.max_text_len()
    }

    // common function to convert the input String to a digit vector before
    // the cipher operation and back again after
    fn cipher_string(
        &self,
        inp: &str,
        opt_twk: Option<&[u8]>,
        which: CipherType,
    ) -> Result<String> {
        let alpha = self.ffx.alphabet();
        let (digits, fmt) = codec::decode(inp, alpha);
        let mut digits = Zeroizing::new(digits);
        self.cipher_digits(&mut digits, opt_twk, which)?;
        codec::encode(&digits, alpha, &fmt)
    }

    pub(crate) fn cipher_digits(
        &self,
        x: &mut [u16],
        opt_twk: Option<&[u8]>,
        which: CipherType,
    ) -> Result<()> {
        let t = self.ffx.get_tweak(&opt_twk);
        // a missing tweak is the zero tweak
        let t = if t.is_empty() { &ZERO_TWEAK[..] } else { t };
        feistel(&self.ffx, x, t, which)
    }

    /// Encrypt a string
    ///
    /// Characters outside the alphabet keep their positions; everything
    /// else is enciphered in place of itself. If the tweak is not None, the
    /// specified tweak is used instead of the context's default.
    pub fn encrypt(&self, pt: &str, twk: Option<&[u8]>) -> Result<String> {
        self.cipher_string(pt, twk, CipherType::Encrypt)
    }

    /// Decrypt a string
    ///
    /// If the tweak is not None, the specified tweak is used instead of the
    /// context's default. The tweak must match the one used during
    /// encryption.
    pub fn decrypt(&self, ct: &str, twk: Option<&[u8]>) -> Result<String> {
        self.cipher_string(ct, twk, CipherType::Decrypt)
    }

    /// Encrypt a digit vector in place; every digit must be below the
    /// radix.
    pub fn encrypt_digits(&self, x: &mut [u16], twk: Option<&[u8]>) -> Result<()> {
        self.cipher_digits(x, twk, CipherType::Encrypt)
    }

    /// Decrypt a digit vector in place.
    pub fn decrypt_digits(&self, x: &mut [u16], twk: Option<&[u8]>) -> Result<()> {
        self.cipher_digits(x, twk, CipherType::Decrypt)
    }
}

// T_L and T_R. A 7-byte tweak spreads bits of t[3] across both halves; an
// 8-byte legacy tweak splits down the middle.
fn split_tweak(t: &[u8]) -> ([u8; 4], [u8; 4]) {
    match t.len() {
        7 => (
            [t[0], t[1], t[2], t[3] & 0xf0],
            [t[4], t[5], t[6], (t[3] & 0x0f) << 4],
        ),
        8 => ([t[0], t[1], t[2], t[3]], [t[4], t[5], t[6], t[7]]),
        n => unreachable!("tweak length {} slipped past validation", n),
    }
}

// the radix-r value of a half, least-significant digit first
fn num_rev(radix: u32, digits: &[u16]) -> Acc96 {
    let mut acc = Acc96::zero();
    for &d in digits.iter().rev() {
        acc.mul_add(radix, d as u32);
    }
    acc
}

// the inverse of num_rev: decompose c into digits, least significant first
fn str_rev(c: Acc96, radix: u32, dest: &mut [u16]) {
    let d = Acc96::from_u32(radix);
    let mut c = c;
    for slot in dest.iter_mut() {
        let (q, r) = c.divrem(&d);
        *slot = r.low_u32() as u16;
        c = q;
    }
    debug_assert!(c.is_zero(), "value wider than the destination half");
}

// The eight-round Feistel network, in place over x. Both halves live in
// owned slots that swap roles each round; the working buffers are wiped on
// every exit path.
fn feistel(ffx: &FFX, x: &mut [u16], twk: &[u8], which: CipherType) -> Result<()> {
    let radix = ffx.radix() as u32;

    let n = x.len();
    ffx.validate_text_length(n)?;
    ffx.validate_tweak_length(twk.len())?;
    for &d in x.iter() {
        if d as u32 >= radix {
            return Err(Error::input(&format!(
                "digit {} out of range for radix {}",
                d, radix
            )));
        }
    }

    // (step 1)
    let v = n / 2;
    let u = n - v;

    // radix**m where m is either u or v is needed each round. u either
    // equals v or is one more than v, so the divisor can be shared.
    let du = Divisor::radix_pow(radix, u);
    let dv = if u == v {
        du.clone()
    } else {
        Divisor::radix_pow(radix, v)
    };

    // (step 2)
    let mut a = Zeroizing::new(x[..u].to_vec());
    let mut b = Zeroizing::new(x[u..].to_vec());

    // (step 3)
    let (tl, tr) = split_tweak(twk);

    for step in 0..8u32 {
        // decryption runs the schedule backwards
        let i = match which {
            CipherType::Encrypt => step,
            CipherType::Decrypt => 7 - step,
        };

        // (step 4i)
        let (m, w, dm) = if i % 2 == 0 {
            (u, &tr, &du)
        } else {
            (v, &tl, &dv)
        };
        match which {
            CipherType::Encrypt => {
                assert!(a.len() == m, "half length diverged from round modulus")
            }
            CipherType::Decrypt => {
                assert!(b.len() == m, "half length diverged from round modulus")
            }
        }

        // (step 4ii) P = (W xor round index) || 12-byte value of the
        // cipher-input half
        let mut p = Zeroizing::new([0u8; 16]);
        p[..4].copy_from_slice(w);
        let wx = byteorder::BigEndian::read_u32(&p[..4]) ^ i;
        byteorder::BigEndian::write_u32(&mut p[..4], wx);
        let side: &[u16] = match which {
            CipherType::Encrypt => &b,
            CipherType::Decrypt => &a,
        };
        num_rev(radix, side).write_be(&mut p[4..16]);

        // (step 4iii) the cipher runs over byte-reversed blocks
        p.reverse();
        let mut s = Zeroizing::new([0u8; 16]);
        ffx.ciph(&p, &mut s);
        s.reverse();

        // (step 4iv)
        let y = Acc128::from_be_bytes(&s).rem(dm);

        // (step 4v); the extra divisor term keeps the decrypt subtraction
        // from underflowing
        let mut c = match which {
            CipherType::Encrypt => {
                let mut c = num_rev(radix, &a);
                c.add(&y);
                c
            }
            CipherType::Decrypt => {
                let mut c = num_rev(radix, &b);
                c.add(dm.value());
                c.sub(&y);
                c
            }
        };
        dm.rem(&mut c);

        // (step 4vi) write c over the replaced half
        let dest: &mut [u16] = match which {
            CipherType::Encrypt => &mut a,
            CipherType::Decrypt => &mut b,
        };
        str_rev(c, radix, dest);

        // (step 4vii, 4viii) rotate the roles
        mem::swap(&mut a, &mut b);
    }

    assert!(
        a.len() == u && b.len() == v,
        "halves out of position after the final round"
    );

    // (step 5)
    x[..u].copy_from_slice(&a);
    x[u..].copy_from_slice(&b);
    Ok(())
}

fn cipher(
    key: &[u8],
    twk: Option<&[u8]>,
    txt: &str,
    radix: usize,
    alpha: Option<&str>,
    op: fn(&FF3_1, &str, Option<&[u8]>) -> Result<String>,
) -> Result<String> {
    let ff3_1 = FF3_1::new(key, None, radix, alpha)?;
    op(&ff3_1, txt, twk)
}

pub fn encrypt(
    key: &[u8],
    twk: Option<&[u8]>,
    pt: &str,
    radix: usize,
    alpha: Option<&str>,
) -> Result<String> {
    cipher(key, twk, pt, radix, alpha, FF3_1::encrypt)
}

pub fn decrypt(
    key: &[u8],
    twk: Option<&[u8]>,
    ct: &str,
    radix: usize,
    alpha: Option<&str>,
) -> Result<String> {
    cipher(key, twk, ct, radix, alpha, FF3_1::decrypt)
}
