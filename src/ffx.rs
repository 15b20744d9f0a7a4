use crate::alphabet::Alphabet;
use crate::cipher::Cipher;
use crate::error::Error;
use crate::result::Result;

#[derive(Clone, Copy)]
pub(crate) enum CipherType {
    Encrypt,
    Decrypt,
}

#[derive(Debug)]
struct SizeLimits {
    min: usize,
    max: usize,
}

/// Shared engine context: the keyed cipher, the optional default tweak,
/// the text length limits derived from radix and block size, and the
/// tweak-length policy.
#[derive(Debug)]
pub(crate) struct FFX {
    cipher: Cipher,
    twk: Vec<u8>,
    txt: SizeLimits,
    alpha: Alphabet,
    legacy_twk: bool,
}

impl FFX {
    pub fn new(
        cipher: Cipher,
        opt_twk: Option<&[u8]>,
        radix: usize,
        opt_alpha: Option<&str>,
        legacy_twk: bool,
    ) -> Result<Self> {
        if !(2..=65536).contains(&radix) {
            return Err(Error::config(&format!(
                "invalid radix; must be between 2 and 65536, got {}",
                radix
            )));
        }

        let blksz = cipher.block_size();
        if blksz > 16 {
            return Err(Error::config(
                "cipher block size above 128 bits is not supported",
            ));
        }

        let alpha = Alphabet::new(opt_alpha, radix)?;

        let mintxt = min_text_len(radix);
        let maxtxt = max_text_len(radix, blksz);
        if mintxt < 2 || mintxt > maxtxt {
            return Err(Error::config(&format!(
                "unsupported combination of radix and cipher block size; min required length is {}, max allowed is {}",
                mintxt, maxtxt
            )));
        }

        let twk: Vec<u8>;
        match opt_twk {
            None => twk = Vec::new(),
            Some(t) => {
                // a bad default tweak is a construction error, not a
                // per-call one
                check_tweak_length(t.len(), legacy_twk)
                    .map_err(|e| Error::config(&e.to_string()))?;
                twk = t.to_vec();
            }
        }

        Ok(FFX {
            cipher,
            twk,
            txt: SizeLimits {
                min: mintxt,
                max: maxtxt,
            },
            alpha,
            legacy_twk,
        })
    }

    /// The per-call tweak when one was given, the default otherwise.
    pub fn get_tweak<'a>(&'a self, opt_twk: &Option<&'a [u8]>) -> &'a [u8] {
        match opt_twk {
            None => &self.twk,
            Some(t) => t,
        }
    }

    pub fn radix(&self) -> usize {
        self.alpha.len()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alpha
    }

    pub fn min_text_len(&self) -> usize {
        self.txt.min
    }

    pub fn max_text_len(&self) -> usize {
        self.txt.max
    }

    pub fn validate_text_length(&self, n: usize) -> Result<()> {
        if n < self.txt.min || n > self.txt.max {
            return Err(Error::input(&format!(
                "invalid text length; expected between {} and {} symbols, got {}",
                self.txt.min, self.txt.max, n
            )));
        }

        Ok(())
    }

    pub fn validate_tweak_length(&self, n: usize) -> Result<()> {
        check_tweak_length(n, self.legacy_twk)
    }

    /// One raw ECB pass over a 16-byte buffer: a single block under AES,
    /// two independent blocks under 3DES.
    pub fn ciph(&self, src: &[u8; 16], dst: &mut [u8; 16]) {
        let blksz = self.cipher.block_size();
        for i in (0..16).step_by(blksz) {
            self.cipher
                .encrypt_block(&src[i..i + blksz], &mut dst[i..i + blksz]);
        }
    }
}

fn check_tweak_length(n: usize, legacy: bool) -> Result<()> {
    if n == 7 || (legacy && n == 8) {
        return Ok(());
    }
    if legacy {
        Err(Error::input(&format!(
            "invalid tweak length; expected 7 or 8 bytes, got {}",
            n
        )))
    } else {
        Err(Error::input(&format!(
            "invalid tweak length; expected exactly 7 bytes, got {}",
            n
        )))
    }
}

// the minimum text length is given by the inequality
// radix**minlen >= 1_000_000, with an absolute floor of 2
fn min_text_len(radix: usize) -> usize {
    let mut m = 0;
    let mut v: u64 = 1;
    while v < 1_000_000 {
        v *= radix as u64;
        m += 1;
    }
    m.max(2)
}

// the maximum text length is the largest even 2k with
// 2 * radix**k <= 2**(blockBits - 32); each Feistel half value must carry
// one spare bit below the 12-byte trailer capacity so the modular add
// cannot carry out of the 96-bit accumulator
fn max_text_len(radix: usize, blksz: usize) -> usize {
    let limit: u128 = 1u128 << (8 * blksz - 33);
    let mut k = 0;
    let mut v: u128 = 1;
    while v <= limit / radix as u128 {
        v *= radix as u128;
        k += 1;
    }
    2 * k
}
