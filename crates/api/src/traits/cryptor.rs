//! Common interface for stateful AES cryptors
//!
//! Both the CENC counter-mode cryptor and the CBC cryptor implement this
//! trait so a packager can hold whichever the protection scheme calls for
//! behind a `Box<dyn Cryptor>`.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::Result;

/// A keyed, stateful encryptor/decryptor
///
/// Every method that consumes data mutates the stream state (counter,
/// keystream offset or chaining block), so calls belonging to one stream
/// must be issued in order. Use one instance per stream.
pub trait Cryptor {
    /// Algorithm and mode, e.g. `"AES-128-CTR"`
    fn name(&self) -> &'static str;

    /// Set the key and IV, replacing any previous key, IV and stream state
    fn initialize_with_iv(&mut self, key: &[u8], iv: &[u8]) -> Result<()>;

    /// Replace the IV and reset the stream state, keeping the key
    fn set_iv(&mut self, iv: &[u8]) -> Result<()>;

    /// The current IV; empty before initialization
    fn iv(&self) -> &[u8];

    /// Whether a valid key and IV have been set
    fn is_initialized(&self) -> bool;

    /// Encrypt `buffer` in place; the buffer may grow by up to one block
    fn encrypt_in_place(&mut self, buffer: &mut Vec<u8>) -> Result<()>;

    /// Decrypt `buffer` in place; the buffer may shrink when padding is removed
    fn decrypt_in_place(&mut self, buffer: &mut Vec<u8>) -> Result<()>;

    /// Encrypt into a freshly allocated buffer
    ///
    /// Produces exactly the bytes [`Cryptor::encrypt_in_place`] would.
    fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut buffer = plaintext.to_vec();
        self.encrypt_in_place(&mut buffer)?;
        Ok(buffer)
    }

    /// Decrypt into a freshly allocated buffer
    fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let mut buffer = ciphertext.to_vec();
        self.decrypt_in_place(&mut buffer)?;
        Ok(buffer)
    }
}
