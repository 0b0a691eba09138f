//! Fuzz target for the Salsa20 streaming cipher
//!
//! Drives a cipher instance through arbitrary encrypt/seek sequences and
//! checks it against the pure block function.
//!
//! # Strategy
//!
//! - Arbitrary key, nonce and extended nonce
//! - Messages of every length, including empty and multi-block
//! - Seeks anywhere, including next to the counter wrap point
//! - Reduced-round and extended-nonce variants
//!
//! # Invariants
//!
//! - Ciphertext length equals plaintext length
//! - Counter advances by exactly ceil(len / 64) on success
//! - Refused requests leave the counter untouched
//! - Ciphertext XOR plaintext equals the block function's output
//! - Seeking back and decrypting recovers the plaintext

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use snuffle_cipher::{
    BLOCK_SIZE, CipherError, R12, R20, Salsa12, Salsa20, XSalsa20, keystream_block,
};

#[derive(Debug, Clone, Arbitrary)]
struct CipherScenario {
    key: [u8; 32],
    nonce: [u8; 8],
    xnonce: [u8; 24],
    operations: Vec<CipherOperation>,
}

#[derive(Debug, Clone, Arbitrary)]
enum CipherOperation {
    /// Encrypt a message with Salsa20/20 and check it block by block
    Encrypt { message: Vec<u8> },
    /// Seek to an arbitrary block
    Seek { block: u64 },
    /// Seek within a few blocks of the wrap point
    SeekNearEnd { distance: u8 },
    /// Round trip through Salsa20/12
    ReducedRounds { message: Vec<u8> },
    /// Round trip through `XSalsa20`
    Extended { message: Vec<u8> },
}

fuzz_target!(|scenario: CipherScenario| {
    let mut cipher = Salsa20::from_parts(&scenario.key, &scenario.nonce);

    for op in scenario.operations {
        match op {
            CipherOperation::Encrypt { message } => {
                let start = cipher.counter();
                let blocks = message.len().div_ceil(BLOCK_SIZE) as u64;

                match cipher.encrypt(&message) {
                    Ok(ciphertext) => {
                        // INVARIANT 1: Length preserved
                        assert_eq!(ciphertext.len(), message.len());

                        // INVARIANT 2: Counter advanced by block count
                        assert_eq!(cipher.counter(), start + blocks);

                        // INVARIANT 3: Keystream matches the block function
                        let chunks = ciphertext.chunks(BLOCK_SIZE).zip(message.chunks(BLOCK_SIZE));
                        for (offset, (c, m)) in chunks.enumerate() {
                            let counter = start + offset as u64;
                            let block =
                                keystream_block::<R20>(&scenario.key, &scenario.nonce, counter);
                            for ((c, m), k) in c.iter().zip(m).zip(&block) {
                                assert_eq!(c ^ m, *k);
                            }
                        }

                        // INVARIANT 4: Seek back and decrypt recovers plaintext
                        cipher.seek(start);
                        let decrypted = cipher.decrypt(&ciphertext);
                        assert_eq!(decrypted.as_deref(), Ok(message.as_slice()));
                    },
                    Err(CipherError::KeystreamExhausted { counter, requested }) => {
                        // INVARIANT 5: Refused only when the counter would wrap
                        assert_eq!(counter, start);
                        assert_eq!(requested, blocks);
                        assert!(start.checked_add(blocks).is_none());
                        assert_eq!(cipher.counter(), start);
                    },
                    Err(other) => unreachable!("unexpected error from encrypt: {other}"),
                }
            },

            CipherOperation::Seek { block } => {
                cipher.seek(block);
                assert_eq!(cipher.counter(), block);
            },

            CipherOperation::SeekNearEnd { distance } => {
                cipher.seek(u64::MAX - u64::from(distance));
                assert_eq!(cipher.remaining_blocks(), u64::from(distance));
            },

            CipherOperation::ReducedRounds { message } => {
                let mut salsa12 = Salsa12::from_parts(&scenario.key, &scenario.nonce);
                let Ok(ciphertext) = salsa12.encrypt(&message) else {
                    unreachable!("fresh instance cannot exhaust");
                };
                if let Some(first) = ciphertext.chunks(BLOCK_SIZE).next() {
                    let block = keystream_block::<R12>(&scenario.key, &scenario.nonce, 0);
                    assert!(first.iter().zip(&message).zip(&block).all(|((c, m), k)| c ^ m == *k));
                }

                salsa12.seek(0);
                assert_eq!(salsa12.decrypt(&ciphertext).as_deref(), Ok(message.as_slice()));
            },

            CipherOperation::Extended { message } => {
                let mut xsalsa = XSalsa20::from_parts(&scenario.key, &scenario.xnonce);
                let Ok(ciphertext) = xsalsa.encrypt(&message) else {
                    unreachable!("fresh instance cannot exhaust");
                };
                assert_eq!(ciphertext.len(), message.len());

                xsalsa.seek(0);
                assert_eq!(xsalsa.decrypt(&ciphertext).as_deref(), Ok(message.as_slice()));
            },
        }
    }
});
