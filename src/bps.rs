//! Chained mode for inputs longer than one Feistel block
//!
//! The Feistel network caps the text length at `max_text_len()`. This
//! module lifts that cap with a CBC-like composition: the input is cut
//! into blocks of exactly `max_text_len()` symbols, each block is added
//! digit-wise (mod radix) to the previous ciphertext block before being
//! enciphered, and a trailing partial block is folded into a window that
//! overlaps the previous block. Per block, a one-byte counter is XORed
//! into tweak bytes 1 and 5.
//!
//! This construction predates FF3-1 and requires the 8-byte legacy tweak
//! layout, which is force-enabled here. It is also the one place where a
//! 64-bit-block cipher (3DES) is meaningful: the block length shrinks to
//! what the smaller cipher can randomize.
//!
//! # Example
//! ```rust
//! let bps = fpe3::bps::BPS::new(&[7u8; 16], None, 10, None).unwrap();
//!
//! // 70 digits is more than one FF3-1 block at radix 10
//! let pt = "4000001234567899000012345678990000123456789900001234567899000012345678";
//! let ct = bps.encrypt(pt, None).unwrap();
//! assert_eq!(ct.len(), pt.len());
//! assert_eq!(bps.decrypt(&ct, None).unwrap(), pt);
//! ```

use zeroize::Zeroizing;

use crate::cipher::Cipher;
use crate::codec;
use crate::error::Error;
use crate::ff3_1::FF3_1;
use crate::ffx::CipherType;
use crate::result::Result;

/// The chained-mode context structure
pub struct BPS {
    ff3: FF3_1,
}

impl BPS {
    /// Create a new chained-mode context over AES.
    ///
    /// The key is the logical key, byte-reversed internally like
    /// [`FF3_1::new`] does. The default tweak, if supplied, must be 8
    /// bytes; a missing tweak is the all-zero tweak.
    pub fn new(
        key: &[u8],
        opt_twk: Option<&[u8]>,
        radix: usize,
        opt_alpha: Option<&str>,
    ) -> Result<Self> {
        check_tweak(opt_twk)?;
        Ok(BPS {
            ff3: FF3_1::with_legacy_tweaks(key, opt_twk, radix, opt_alpha)?,
        })
    }

    /// Create a chained-mode context around a caller-built [`Cipher`]
    /// (typically 3DES), loaded with the byte-reversed key.
    pub fn with_cipher(
        cipher: Cipher,
        opt_twk: Option<&[u8]>,
        radix: usize,
        opt_alpha: Option<&str>,
    ) -> Result<Self> {
        check_tweak(opt_twk)?;
        Ok(BPS {
            ff3: FF3_1::with_cipher(cipher, opt_twk, radix, opt_alpha, true)?,
        })
    }

    /// The block length of the chaining; inputs up to this length are a
    /// single Feistel call.
    pub fn block_len(&self) -> usize {
        self.ff3.max_text_len()
    }

    /// The shortest text this context accepts.
    pub fn min_text_len(&self) -> usize {
        self.ff3.min_text_len()
    }

    /// Encrypt a string of any length from `min_text_len()` upward.
    ///
    /// Characters outside the alphabet keep their positions. If the tweak
    /// is not None it is used instead of the context's default; it must be
    /// 8 bytes and is never modified.
    pub fn encrypt(&self, pt: &str, twk: Option<&[u8]>) -> Result<String> {
        self.cipher_string(pt, twk, CipherType::Encrypt)
    }

    /// Decrypt a string; the inverse of [`BPS::encrypt`] under the same
    /// key and tweak.
    pub fn decrypt(&self, ct: &str, twk: Option<&[u8]>) -> Result<String> {
        self.cipher_string(ct, twk, CipherType::Decrypt)
    }

    /// Encrypt a digit vector in place.
    pub fn encrypt_digits(&self, x: &mut [u16], twk: Option<&[u8]>) -> Result<()> {
        self.cipher_digits(x, twk, CipherType::Encrypt)
    }

    /// Decrypt a digit vector in place.
    pub fn decrypt_digits(&self, x: &mut [u16], twk: Option<&[u8]>) -> Result<()> {
        self.cipher_digits(x, twk, CipherType::Decrypt)
    }

    fn cipher_string(
        &self,
        inp: &str,
        opt_twk: Option<&[u8]>,
        which: CipherType,
    ) -> Result<String> {
        let alpha = self.ff3.ffx().alphabet();
        let (digits, fmt) = codec::decode(inp, alpha);
        let mut digits = Zeroizing::new(digits);
        self.cipher_digits(&mut digits, opt_twk, which)?;
        codec::encode(&digits, alpha, &fmt)
    }

    fn cipher_digits(
        &self,
        x: &mut [u16],
        opt_twk: Option<&[u8]>,
        which: CipherType,
    ) -> Result<()> {
        let ffx = self.ff3.ffx();

        // the caller's tweak is copied into an owned buffer; the chaining
        // perturbs it per block and the caller's bytes stay untouched
        let given = ffx.get_tweak(&opt_twk);
        let mut twk = Zeroizing::new([0u8; 8]);
        if !given.is_empty() {
            if given.len() != 8 {
                return Err(Error::input(&format!(
                    "invalid tweak length; the chained mode requires 8 bytes, got {}",
                    given.len()
                )));
            }
            twk.copy_from_slice(given);
        }

        let maxlen = ffx.max_text_len();
        let radix = ffx.radix() as u32;
        let n = x.len();

        if n <= maxlen {
            return self.ff3.cipher_digits(x, Some(&twk[..]), which);
        }

        // each Feistel call below only sees a maxlen-sized window, and the
        // digit-wise folding wraps values mod radix, so the whole input is
        // validated up front
        for &d in x.iter() {
            if d as u32 >= radix {
                return Err(Error::input(&format!(
                    "digit {} out of range for radix {}",
                    d, radix
                )));
            }
        }

        let full = n / maxlen;
        let rest = n % maxlen;
        let mut tmp = Zeroizing::new(vec![0u16; maxlen]);

        match which {
            CipherType::Encrypt => {
                let mut c = 0;
                for i in 0..full {
                    tmp.copy_from_slice(&x[c..c + maxlen]);
                    if i > 0 {
                        for j in 0..maxlen {
                            tmp[j] = add_mod(tmp[j], x[c - maxlen + j], radix);
                        }
                    }
                    self.block(&mut tmp, &mut twk, i as u8, which)?;
                    x[c..c + maxlen].copy_from_slice(&tmp);
                    c += maxlen;
                }
                if rest > 0 {
                    // fold the tail into a window overlapping the previous
                    // block by maxlen - rest symbols
                    for idx in (n - rest)..n {
                        x[idx] = add_mod(x[idx], x[idx - maxlen], radix);
                    }
                    tmp.copy_from_slice(&x[n - maxlen..]);
                    self.block(&mut tmp, &mut twk, full as u8, which)?;
                    x[n - maxlen..].copy_from_slice(&tmp);
                }
            }
            CipherType::Decrypt => {
                if rest > 0 {
                    tmp.copy_from_slice(&x[n - maxlen..]);
                    self.block(&mut tmp, &mut twk, full as u8, which)?;
                    for idx in 1..=rest {
                        tmp[maxlen - idx] =
                            sub_mod(tmp[maxlen - idx], x[n - idx - maxlen], radix);
                    }
                    x[n - maxlen..].copy_from_slice(&tmp);
                }
                let mut c = n - rest;
                let mut i = full;
                while i > 0 {
                    i -= 1;
                    tmp.copy_from_slice(&x[c - maxlen..c]);
                    self.block(&mut tmp, &mut twk, i as u8, which)?;
                    if i > 0 {
                        for j in 0..maxlen {
                            tmp[j] = sub_mod(tmp[j], x[c - 2 * maxlen + j], radix);
                        }
                    }
                    x[c - maxlen..c].copy_from_slice(&tmp);
                    c -= maxlen;
                }
            }
        }

        Ok(())
    }

    // one Feistel call under the block tweak; bytes 1 and 5 carry the
    // block counter and are restored afterwards
    fn block(
        &self,
        tmp: &mut [u16],
        twk: &mut [u8; 8],
        i: u8,
        which: CipherType,
    ) -> Result<()> {
        twk[1] ^= i;
        twk[5] ^= i;
        let res = self.ff3.cipher_digits(tmp, Some(&twk[..]), which);
        twk[1] ^= i;
        twk[5] ^= i;
        res
    }
}

fn check_tweak(opt_twk: Option<&[u8]>) -> Result<()> {
    match opt_twk {
        Some(t) if t.len() != 8 => Err(Error::config(&format!(
            "invalid tweak length; the chained mode requires 8 bytes, got {}",
            t.len()
        ))),
        _ => Ok(()),
    }
}

fn add_mod(a: u16, b: u16, radix: u32) -> u16 {
    ((a as u32 + b as u32) % radix) as u16
}

fn sub_mod(a: u16, b: u16, radix: u32) -> u16 {
    ((a as u32 + radix - b as u32) % radix) as u16
}

fn cipher(
    key: &[u8],
    twk: Option<&[u8]>,
    txt: &str,
    radix: usize,
    alpha: Option<&str>,
    op: fn(&BPS, &str, Option<&[u8]>) -> Result<String>,
) -> Result<String> {
    let bps = BPS::new(key, None, radix, alpha)?;
    op(&bps, txt, twk)
}

pub fn encrypt(
    key: &[u8],
    twk: Option<&[u8]>,
    pt: &str,
    radix: usize,
    alpha: Option<&str>,
) -> Result<String> {
    cipher(key, twk, pt, radix, alpha, BPS::encrypt)
}

pub fn decrypt(
    key: &[u8],
    twk: Option<&[u8]>,
    ct: &str,
    radix: usize,
    alpha: Option<&str>,
) -> Result<String> {
    cipher(key, twk, ct, radix, alpha, BPS::decrypt)
}
