//! Known-answer tests through the public facade

use cencrypt::prelude::*;
use cencrypt_tests::vectors::*;
use cencrypt_tests::{cbc_cryptor, ctr_cryptor, unhex};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn cbc_options(padding: PaddingScheme, chaining: ChainingMode) -> CbcOptions {
    CbcOptions { padding, chaining }
}

#[test]
fn ctr_nist_sp800_38a() {
    let mut cryptor = ctr_cryptor(KEY_128, CTR_IV);
    let ciphertext = cryptor.encrypt(&unhex(PLAINTEXT)).unwrap();
    assert_eq!(hex::encode(&ciphertext), CTR_CIPHERTEXT);

    let mut cryptor = ctr_cryptor(KEY_128, CTR_IV);
    assert_eq!(cryptor.decrypt(&ciphertext).unwrap(), unhex(PLAINTEXT));
}

#[test]
fn ctr_subsample_sample() {
    let layout: Vec<Subsample> = SUBSAMPLE_LAYOUT
        .iter()
        .map(|&(clear, protected)| Subsample::new(clear, protected))
        .collect();
    let mut sample: Vec<u8> = (0u8..100).collect();

    let mut cryptor = ctr_cryptor(KEY_128, SUBSAMPLE_IV);
    cryptor.process_subsamples(&mut sample, &layout).unwrap();
    assert_eq!(hex::encode(&sample), SUBSAMPLE_CIPHERTEXT);

    let mut cryptor = ctr_cryptor(KEY_128, SUBSAMPLE_IV);
    cryptor.process_subsamples(&mut sample, &layout).unwrap();
    assert_eq!(sample, (0u8..100).collect::<Vec<u8>>());
}

#[test]
fn ctr_sample_sequence_with_iv_advance() {
    // Two samples, each followed by an IV advance, must decrypt with an
    // independently advanced decryptor.
    let samples: [&[u8]; 3] = [b"first sample", &[7u8; 40], b"third"];
    let mut encryptor = ctr_cryptor(KEY_128, SUBSAMPLE_IV);
    let mut decryptor = ctr_cryptor(KEY_128, SUBSAMPLE_IV);

    for (n, sample) in samples.iter().enumerate() {
        let ciphertext = encryptor.encrypt(sample).unwrap();
        assert_eq!(&decryptor.decrypt(&ciphertext).unwrap()[..], *sample);
        encryptor.update_iv().unwrap();
        decryptor.update_iv().unwrap();

        let mut expected = unhex(SUBSAMPLE_IV);
        expected[7] += n as u8 + 1;
        assert_eq!(encryptor.iv(), &expected[..]);
    }
}

#[test]
fn ctr_random_iv_is_reproducible_from_seed() {
    let key = unhex(KEY_128);
    let plaintext = unhex(PLAINTEXT);
    let mut outputs = Vec::new();

    for _ in 0..2 {
        let mut rng = ChaCha20Rng::seed_from_u64(0x5eed);
        let mut cryptor = CtrModeCryptor::new();
        cryptor
            .initialize_with_random_iv_from(&mut rng, &key, 8)
            .unwrap();
        assert_eq!(cryptor.iv().len(), 8);
        outputs.push((cryptor.iv().to_vec(), cryptor.encrypt(&plaintext).unwrap()));
    }
    assert_eq!(outputs[0], outputs[1]);

    let (iv, ciphertext) = &outputs[0];
    let mut decryptor = CtrModeCryptor::new();
    decryptor.initialize_with_iv(&key, iv).unwrap();
    assert_eq!(decryptor.decrypt(ciphertext).unwrap(), plaintext);

    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let err = CtrModeCryptor::new()
        .initialize_with_random_iv_from(&mut rng, &key, 15)
        .unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn cbc_nopadding_nist_sp800_38a() {
    let options = cbc_options(PaddingScheme::NoPadding, ChainingMode::ResetPerCall);
    let mut cryptor = cbc_cryptor(options, KEY_128, CBC_IV);
    let ciphertext = cryptor.encrypt(&unhex(PLAINTEXT)).unwrap();
    assert_eq!(hex::encode(&ciphertext), CBC_CIPHERTEXT);
    assert_eq!(cryptor.decrypt(&ciphertext).unwrap(), unhex(PLAINTEXT));
}

#[test]
fn cbc_pkcs5_appends_full_block() {
    let mut cryptor = cbc_cryptor(CbcOptions::default(), KEY_128, CBC_IV);
    let ciphertext = cryptor.encrypt(&unhex(PLAINTEXT)).unwrap();
    assert_eq!(hex::encode(&ciphertext), CBC_PKCS5_CIPHERTEXT);
    assert_eq!(cryptor.decrypt(&ciphertext).unwrap(), unhex(PLAINTEXT));
}

#[test]
fn cbc_cts_partial_final_block() {
    let plaintext = &unhex(PLAINTEXT)[..40];
    let options = cbc_options(PaddingScheme::Cts, ChainingMode::ResetPerCall);
    let mut cryptor = cbc_cryptor(options, KEY_128, CBC_IV);
    let ciphertext = cryptor.encrypt(plaintext).unwrap();
    assert_eq!(hex::encode(&ciphertext), CBC_CTS_40_CIPHERTEXT);
    assert_eq!(&cryptor.decrypt(&ciphertext).unwrap()[..], plaintext);
}

#[test]
fn cbc_chained_calls_match_single_call() {
    let options = cbc_options(PaddingScheme::NoPadding, ChainingMode::ChainAcrossCalls);
    let plaintext = unhex(PLAINTEXT);

    let mut cryptor = cbc_cryptor(options, KEY_128, CBC_IV);
    let mut ciphertext = cryptor.encrypt(&plaintext[..32]).unwrap();
    ciphertext.extend(cryptor.encrypt(&plaintext[32..]).unwrap());
    assert_eq!(hex::encode(&ciphertext), CBC_CIPHERTEXT);
    assert_eq!(cryptor.iv(), &ciphertext[48..]);

    let mut cryptor = cbc_cryptor(options, KEY_128, CBC_IV);
    let mut decrypted = cryptor.decrypt(&ciphertext[..16]).unwrap();
    decrypted.extend(cryptor.decrypt(&ciphertext[16..]).unwrap());
    assert_eq!(decrypted, plaintext);
}

#[test]
fn cryptors_behind_trait_objects() {
    let mut cryptors: Vec<Box<dyn Cryptor>> = vec![
        Box::new(CtrModeCryptor::new()),
        Box::new(CbcModeCryptor::default()),
        Box::new(CbcModeCryptor::with_padding(PaddingScheme::Cts)),
    ];
    let key = unhex(KEY_128);
    let plaintext = unhex(PLAINTEXT);

    for cryptor in cryptors.iter_mut() {
        assert!(!cryptor.is_initialized());
        assert!(cryptor.iv().is_empty());
        assert!(matches!(
            cryptor.encrypt(&plaintext),
            Err(Error::NotInitialized { .. })
        ));

        cryptor.initialize_with_iv(&key, &unhex(CBC_IV)).unwrap();
        assert!(cryptor.name().starts_with("AES-128-"));
        let ciphertext = cryptor.encrypt(&plaintext[..37]).unwrap();
        cryptor.set_iv(&unhex(CBC_IV)).unwrap();
        assert_eq!(cryptor.decrypt(&ciphertext).unwrap(), &plaintext[..37]);
    }
}

#[test]
fn facade_errors_carry_context() {
    let mut cryptor: Box<dyn Cryptor> = Box::new(CbcModeCryptor::default());
    let err = cryptor.initialize_with_iv(&[0u8; 15], &[0u8; 16]).unwrap_err();
    assert!(matches!(err, Error::InvalidKey { .. }));

    let err = cryptor.initialize_with_iv(&[0u8; 16], &[0u8; 8]).unwrap_err();
    assert!(matches!(err, Error::InvalidIv { .. }));

    cryptor.initialize_with_iv(&[0u8; 16], &[0u8; 16]).unwrap();
    let err = cryptor.decrypt(&[0u8; 20]).unwrap_err();
    assert!(matches!(err, Error::InvalidLength { .. }));
    assert!(!err.to_string().is_empty());
}
