//! End-to-end tests for the `snuffle` command driver over real files

use std::fs;

use clap::Parser;
use snuffle_cli::{Cli, CliError, run};
use snuffle_cipher::{CipherError, Salsa20};

const KEY_HEX: &str = "746869732069732033322d62797465206b657920666f722073616c7361203230";
const NONCE_HEX: &str = "7264363462697473";

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("snuffle").chain(args.iter().copied())).unwrap()
}

#[test]
fn encrypt_then_decrypt_files() {
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("plain.bin");
    let sealed = dir.path().join("sealed.bin");
    let opened = dir.path().join("opened.bin");

    // Several chunks plus a ragged tail
    let message: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
    fs::write(&plain, &message).unwrap();

    let encrypt = parse(&[
        "encrypt",
        "-k",
        KEY_HEX,
        "-n",
        NONCE_HEX,
        "-i",
        plain.to_str().unwrap(),
        "-o",
        sealed.to_str().unwrap(),
    ]);
    run(&encrypt.command).unwrap();

    let ciphertext = fs::read(&sealed).unwrap();
    let expected = Salsa20::new(b"this is 32-byte key for salsa 20", b"rd64bits")
        .unwrap()
        .encrypt(&message)
        .unwrap();
    assert_eq!(ciphertext, expected, "chunked file output must match a single call");

    let decrypt = parse(&[
        "decrypt",
        "-k",
        KEY_HEX,
        "-n",
        NONCE_HEX,
        "-i",
        sealed.to_str().unwrap(),
        "-o",
        opened.to_str().unwrap(),
    ]);
    run(&decrypt.command).unwrap();

    assert_eq!(fs::read(&opened).unwrap(), message);
}

#[test]
fn decrypt_with_wrong_counter_does_not_recover_plaintext() {
    let dir = tempfile::tempdir().unwrap();
    let sealed = dir.path().join("sealed.bin");
    let opened = dir.path().join("opened.bin");

    let message = b"minh nghia iot".repeat(8);
    let ciphertext = Salsa20::new(b"this is 32-byte key for salsa 20", b"rd64bits")
        .unwrap()
        .encrypt(&message)
        .unwrap();
    fs::write(&sealed, &ciphertext).unwrap();

    let decrypt = parse(&[
        "decrypt",
        "-k",
        KEY_HEX,
        "-n",
        NONCE_HEX,
        "-c",
        "1",
        "-i",
        sealed.to_str().unwrap(),
        "-o",
        opened.to_str().unwrap(),
    ]);
    run(&decrypt.command).unwrap();

    assert_ne!(fs::read(&opened).unwrap(), message);
}

#[test]
fn missing_input_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.bin");
    let out = dir.path().join("out.bin");

    let encrypt = parse(&[
        "encrypt",
        "-k",
        KEY_HEX,
        "-n",
        NONCE_HEX,
        "-i",
        missing.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);

    assert!(matches!(run(&encrypt.command), Err(CliError::Io(_))));
}

#[test]
fn exhausted_counter_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("plain.bin");
    let out = dir.path().join("out.bin");
    fs::write(&plain, [0u8; 100]).unwrap();

    let counter = u64::MAX.to_string();
    let encrypt = parse(&[
        "encrypt",
        "-k",
        KEY_HEX,
        "-n",
        NONCE_HEX,
        "-c",
        &counter,
        "-i",
        plain.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);

    assert!(matches!(
        run(&encrypt.command),
        Err(CliError::Cipher(CipherError::KeystreamExhausted { requested: 2, .. }))
    ));
}
