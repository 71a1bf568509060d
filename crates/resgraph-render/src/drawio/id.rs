use rand::RngCore;

pub use rand::Error as RandomError;

/// Byte provider for generated cell IDs. Swap in a deterministic source to get stable output.
pub trait RandomSource: Send + Sync {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandomError>;
}

impl<F> RandomSource for F
where
    F: Fn(&mut [u8]) -> Result<(), RandomError> + Send + Sync,
{
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandomError> {
        self(dest)
    }
}

/// Operating system entropy.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandomError> {
        let mut rng = rand::rngs::OsRng;
        rng.try_fill_bytes(dest)
    }
}

pub const BASE_ID_LENGTH: usize = 20;

const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A random `[a-zA-Z0-9]` identifier of `length * 3 / 4` characters, one per random byte.
///
/// Returns an empty string when the random source fails; rendering continues with shorter IDs.
pub fn generate_base_id(random: &dyn RandomSource, length: usize) -> String {
    let mut bytes = vec![0u8; length * 3 / 4];
    if let Err(err) = random.fill_bytes(&mut bytes) {
        tracing::warn!(error = %err, "random source failed; using an empty base id");
        return String::new();
    }
    bytes
        .iter()
        .map(|&b| ALPHABET[usize::from(b) % ALPHABET.len()] as char)
        .collect()
}
