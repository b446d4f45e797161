//! `oauth_nonce` generation.

use std::borrow::Cow;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::SignResult;

/// Bytes of entropy drawn for every random nonce.
pub const NONCE_ENTROPY_BYTES: usize = 32;

/// Source of cryptographically secure random bytes.
pub trait RandomSource {
    fn try_fill(&self, dest: &mut [u8]) -> Result<(), rand::Error>;
}

/// The operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn try_fill(&self, dest: &mut [u8]) -> Result<(), rand::Error> {
        OsRng.try_fill_bytes(dest)
    }
}

/// Supplies the `oauth_nonce` value of a request.
pub trait NonceGenerator {
    fn generate(&self) -> SignResult<String>;
}

/// Nonce built from [`NONCE_ENTROPY_BYTES`] random bytes.
///
/// The bytes are read as a big-endian integer, so leading zero bytes are
/// dropped before base64 encoding; every non-alphanumeric character of the
/// encoding is then removed. The result is at most 44 characters long and
/// its length varies from call to call.
#[derive(Debug, Clone, Default)]
pub struct RandomNonce<R = OsRandom> {
    source: R,
}

impl RandomNonce<OsRandom> {
    pub fn new() -> Self {
        Default::default()
    }
}

impl<R> RandomNonce<R>
where
    R: RandomSource,
{
    pub fn with_source(source: R) -> Self {
        RandomNonce { source }
    }
}

impl<R> NonceGenerator for RandomNonce<R>
where
    R: RandomSource,
{
    fn generate(&self) -> SignResult<String> {
        let mut entropy = [0u8; NONCE_ENTROPY_BYTES];
        self.source.try_fill(&mut entropy)?;
        let first = entropy
            .iter()
            .position(|b| *b != 0)
            .unwrap_or(entropy.len());
        let encoded = STANDARD.encode(&entropy[first..]);
        Ok(encoded.chars().filter(char::is_ascii_alphanumeric).collect())
    }
}

/// Always hands out the same nonce. Meant for tests and request replays.
#[derive(Debug, Clone)]
pub struct FixedNonce<'a>(Cow<'a, str>);

impl<'a> FixedNonce<'a> {
    pub fn new<T>(nonce: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        FixedNonce(nonce.into())
    }
}

impl NonceGenerator for FixedNonce<'_> {
    fn generate(&self) -> SignResult<String> {
        Ok(self.0.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io;

    use super::*;
    use crate::SignError;

    struct FailingSource;

    impl RandomSource for FailingSource {
        fn try_fill(&self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new(io::Error::new(
                io::ErrorKind::Other,
                "entropy pool exhausted",
            )))
        }
    }

    /// Fills with a constant byte, counting calls.
    struct ConstantSource {
        byte: u8,
        calls: Cell<usize>,
    }

    impl RandomSource for ConstantSource {
        fn try_fill(&self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.calls.set(self.calls.get() + 1);
            for b in dest.iter_mut() {
                *b = self.byte;
            }
            Ok(())
        }
    }

    #[test]
    fn random_nonce_is_alphanumeric() {
        let generator = RandomNonce::new();
        for _ in 0..64 {
            let nonce = generator.generate().unwrap();
            assert!(!nonce.is_empty());
            assert!(nonce.len() <= 44);
            assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn random_nonce_differs_between_calls() {
        let generator = RandomNonce::new();
        let first = generator.generate().unwrap();
        let second = generator.generate().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn strip_padding_and_symbols() {
        // 0xFF * 32 -> "//////...//8=" in base64; only the trailing "8" survives
        let generator = RandomNonce::with_source(ConstantSource {
            byte: 0xff,
            calls: Cell::new(0),
        });
        assert_eq!(generator.generate().unwrap(), "8");
        assert_eq!(generator.source.calls.get(), 1);
    }

    #[test]
    fn drop_leading_zero_bytes() {
        let generator = RandomNonce::with_source(ConstantSource {
            byte: 0,
            calls: Cell::new(0),
        });
        assert_eq!(generator.generate().unwrap(), "");

        let generator = RandomNonce::with_source(ConstantSource {
            byte: 0x41,
            calls: Cell::new(0),
        });
        let nonce = generator.generate().unwrap();
        assert_eq!(nonce, STANDARD.encode([0x41u8; 32]).trim_end_matches('='));
    }

    #[test]
    fn surface_entropy_failure() {
        let generator = RandomNonce::with_source(FailingSource);
        match generator.generate() {
            Err(SignError::RandomSource(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn fixed_nonce() {
        let generator = FixedNonce::new("kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg");
        assert_eq!(
            generator.generate().unwrap(),
            "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg"
        );
        assert_eq!(generator.generate().unwrap(), generator.generate().unwrap());
    }
}
