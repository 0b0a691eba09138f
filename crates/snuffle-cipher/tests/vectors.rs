//! Known-answer tests against published Salsa20 and `XSalsa20` vectors

use snuffle_cipher::{
    BLOCK_SIZE, CipherError, Key, Nonce, R20, Salsa20, XSalsa20, keystream_block,
};

const DEMO_KEY: &Key = b"this is 32-byte key for salsa 20";
const DEMO_NONCE: &Nonce = b"rd64bits";

fn demo_message() -> Vec<u8> {
    b"minh nghia iot".repeat(8)
}

#[test]
fn ecrypt_set1_vector0_first_block() {
    let mut key = [0u8; 32];
    key[0] = 0x80;
    let mut cipher = Salsa20::new(&key, &[0u8; 8]).unwrap();

    let keystream = cipher.keystream(BLOCK_SIZE).unwrap();

    assert_eq!(
        hex::encode(keystream.as_slice()),
        "e3be8fdd8beca2e3ea8ef9475b29a6e7003951e1097a5c38d23b7a5fad9f6844\
         b22c97559e2723c7cbbd3fe4fc8d9a0744652a83e72a9c461876af4d7ef1a117"
    );
}

#[test]
fn demo_message_encrypts_to_known_ciphertext() {
    let message = demo_message();
    assert_eq!(message.len(), 112);

    let mut cipher = Salsa20::new(DEMO_KEY, DEMO_NONCE).unwrap();
    let ciphertext = cipher.encrypt(&message).unwrap();

    assert_eq!(ciphertext.len(), 112);
    assert_eq!(cipher.counter(), 2);
    assert_eq!(
        hex::encode(&ciphertext),
        "0c5ffb908aad0bf52ab66cedab1ba9030a3b2249cdbfe3a5358438466c509b99\
         2405fc1d930ed0dfb340ea220ed6522f56668a037a2857fb0c586525020027c2\
         eec3d4cf3da44b0e8666ea9f1a8b5e13915afab66a994d27dc61438660ee6d33\
         10605966aa66e8bb0d6a1ea5acfea148"
    );
}

#[test]
fn demo_message_is_deterministic_and_round_trips() {
    let message = demo_message();

    let first = Salsa20::new(DEMO_KEY, DEMO_NONCE).unwrap().encrypt(&message).unwrap();
    let second = Salsa20::new(DEMO_KEY, DEMO_NONCE).unwrap().encrypt(&message).unwrap();
    assert_eq!(first, second, "fresh instances with equal parameters must agree");

    let recovered = Salsa20::new(DEMO_KEY, DEMO_NONCE).unwrap().decrypt(&first).unwrap();
    assert_eq!(recovered, message);
}

#[test]
fn second_block_of_demo_stream() {
    let block = keystream_block::<R20>(DEMO_KEY, DEMO_NONCE, 1);

    assert_eq!(
        hex::encode(block),
        "87a2f4a652d02667e80ecaf17de33772b13395c207f0234ffc0f24ee098f4d5a\
         7f14340fc40ec8d56a0277c48c97ce3c5d6fcac0653fdfa1789a9962c41022e0"
    );
}

#[test]
fn reduced_round_variants_first_bytes() {
    let mut key = [0u8; 32];
    key[0] = 0x80;

    let salsa8 = keystream_block::<snuffle_cipher::R8>(&key, &[0u8; 8], 0);
    let salsa12 = keystream_block::<snuffle_cipher::R12>(&key, &[0u8; 8], 0);

    assert_eq!(hex::encode(&salsa8[..16]), "b1f599e9b0d96df436ae31f5ef589565");
    assert_eq!(hex::encode(&salsa12[..16]), "afe411ed1c4e07e4d0cde3b33e31ec19");
}

#[test]
fn xsalsa20_hello_world() {
    let mut cipher =
        XSalsa20::new(b"this is 32-byte key for xsalsa20", b"24-byte nonce for xsalsa").unwrap();

    let ciphertext = cipher.encrypt(b"Hello world!").unwrap();
    assert_eq!(hex::encode(ciphertext), "002d4513843fc240c401e541");
}

#[test]
fn construction_errors_report_lengths() {
    let err = Salsa20::new(&[0u8; 16], DEMO_NONCE).unwrap_err();
    assert_eq!(err, CipherError::InvalidKeyLength { expected: 32, actual: 16 });

    let err = XSalsa20::new(DEMO_KEY, &[0u8; 12]).unwrap_err();
    assert_eq!(err, CipherError::InvalidNonceLength { expected: 24, actual: 12 });
}
