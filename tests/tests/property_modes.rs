//! Property-based tests for the CTR and CBC cryptors

use cencrypt::prelude::*;
use proptest::prelude::*;

fn aes_key() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![Just(16usize), Just(24usize), Just(32usize)]
        .prop_flat_map(|len| prop::collection::vec(any::<u8>(), len))
}

fn ctr_iv() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![Just(8usize), Just(16usize)]
        .prop_flat_map(|len| prop::collection::vec(any::<u8>(), len))
}

fn padding_scheme() -> impl Strategy<Value = PaddingScheme> {
    prop_oneof![
        Just(PaddingScheme::NoPadding),
        Just(PaddingScheme::Pkcs5),
        Just(PaddingScheme::Cts),
    ]
}

/// Generate data that's a multiple of 16 bytes (AES block size)
fn block_aligned_data() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 16..=256).prop_map(|mut v| {
        v.truncate(v.len() - v.len() % 16);
        v
    })
}

fn ctr(key: &[u8], iv: &[u8]) -> CtrModeCryptor {
    let mut cryptor = CtrModeCryptor::new();
    cryptor.initialize_with_iv(key, iv).unwrap();
    cryptor
}

fn cbc(padding: PaddingScheme, chaining: ChainingMode, key: &[u8], iv: &[u8]) -> CbcModeCryptor {
    let mut cryptor = CbcModeCryptor::new(padding, chaining);
    cryptor.initialize_with_iv(key, iv).unwrap();
    cryptor
}

proptest! {
    #[test]
    fn ctr_roundtrip(
        key in aes_key(),
        iv in ctr_iv(),
        data in prop::collection::vec(any::<u8>(), 0..300)
    ) {
        let ciphertext = ctr(&key, &iv).encrypt(&data).unwrap();
        prop_assert_eq!(ciphertext.len(), data.len());
        prop_assert_eq!(ctr(&key, &iv).decrypt(&ciphertext).unwrap(), data);
    }

    #[test]
    fn ctr_split_invariance(
        key in aes_key(),
        iv in ctr_iv(),
        data in prop::collection::vec(any::<u8>(), 0..300),
        cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..6)
    ) {
        let whole = ctr(&key, &iv).encrypt(&data).unwrap();

        let mut points: Vec<usize> = cuts.iter().map(|c| c.index(data.len() + 1)).collect();
        points.sort_unstable();
        let mut cryptor = ctr(&key, &iv);
        let mut pieces = Vec::with_capacity(data.len());
        let mut start = 0;
        for end in points.into_iter().chain(core::iter::once(data.len())) {
            pieces.extend(cryptor.encrypt(&data[start..end]).unwrap());
            start = end;
        }

        prop_assert_eq!(pieces, whole);
        prop_assert_eq!(cryptor.block_offset(), data.len() % 16);
    }

    #[test]
    fn ctr_subsamples_match_concatenated_protected_ranges(
        key in aes_key(),
        iv in ctr_iv(),
        layout in prop::collection::vec((0usize..40, 0usize..40), 1..6)
    ) {
        let total: usize = layout.iter().map(|(c, p)| c + p).sum();
        let sample: Vec<u8> = (0..total).map(|i| i as u8).collect();
        let subsamples: Vec<Subsample> =
            layout.iter().map(|&(c, p)| Subsample::new(c, p)).collect();

        let mut encrypted = sample.clone();
        ctr(&key, &iv).process_subsamples(&mut encrypted, &subsamples).unwrap();

        // The protected ranges, joined, form one continuous keystream run
        let mut pos = 0;
        let mut protected = Vec::new();
        let mut protected_out = Vec::new();
        for &(clear, prot) in &layout {
            prop_assert_eq!(&encrypted[pos..pos + clear], &sample[pos..pos + clear]);
            pos += clear;
            protected.extend_from_slice(&sample[pos..pos + prot]);
            protected_out.extend_from_slice(&encrypted[pos..pos + prot]);
            pos += prot;
        }
        prop_assert_eq!(ctr(&key, &iv).encrypt(&protected).unwrap(), protected_out);
    }

    #[test]
    fn cbc_roundtrip_every_padding(
        key in aes_key(),
        iv in any::<[u8; 16]>(),
        padding in padding_scheme(),
        data in prop::collection::vec(any::<u8>(), 0..200)
    ) {
        let data = match padding {
            PaddingScheme::NoPadding => data[..data.len() - data.len() % 16].to_vec(),
            _ => data,
        };
        let mut cryptor = cbc(padding, ChainingMode::ResetPerCall, &key, &iv);
        let ciphertext = cryptor.encrypt(&data).unwrap();
        prop_assert_eq!(ciphertext.len(), padding.padded_len(data.len()));
        prop_assert_eq!(cryptor.decrypt(&ciphertext).unwrap(), data);
    }

    #[test]
    fn cbc_copy_and_in_place_agree(
        key in aes_key(),
        iv in any::<[u8; 16]>(),
        padding in padding_scheme(),
        data in block_aligned_data()
    ) {
        let copied = cbc(padding, ChainingMode::ResetPerCall, &key, &iv).encrypt(&data).unwrap();
        let mut buffer = data.clone();
        cbc(padding, ChainingMode::ResetPerCall, &key, &iv)
            .encrypt_in_place(&mut buffer)
            .unwrap();
        prop_assert_eq!(buffer, copied);
    }

    #[test]
    fn cbc_chaining_is_split_invariant_on_block_boundaries(
        key in aes_key(),
        iv in any::<[u8; 16]>(),
        data in block_aligned_data(),
        cut in any::<prop::sample::Index>()
    ) {
        let cut = cut.index(data.len() / 16 + 1) * 16;
        let whole = cbc(PaddingScheme::NoPadding, ChainingMode::ResetPerCall, &key, &iv)
            .encrypt(&data)
            .unwrap();

        let mut cryptor = cbc(PaddingScheme::NoPadding, ChainingMode::ChainAcrossCalls, &key, &iv);
        let mut pieces = cryptor.encrypt(&data[..cut]).unwrap();
        pieces.extend(cryptor.encrypt(&data[cut..]).unwrap());
        prop_assert_eq!(&pieces, &whole);
        prop_assert_eq!(cryptor.iv(), &whole[whole.len() - 16..]);
    }

    #[test]
    fn different_keys_produce_different_ciphertexts(
        key1 in any::<[u8; 16]>(),
        key2 in any::<[u8; 16]>(),
        iv in any::<[u8; 16]>(),
        data in block_aligned_data()
    ) {
        prop_assume!(key1 != key2);

        let ct1 = cbc(PaddingScheme::NoPadding, ChainingMode::ResetPerCall, &key1, &iv)
            .encrypt(&data)
            .unwrap();
        let ct2 = cbc(PaddingScheme::NoPadding, ChainingMode::ResetPerCall, &key2, &iv)
            .encrypt(&data)
            .unwrap();

        prop_assert_ne!(ct1, ct2);
    }

    #[test]
    fn different_ivs_produce_different_ciphertexts(
        key in any::<[u8; 16]>(),
        iv1 in any::<[u8; 16]>(),
        iv2 in any::<[u8; 16]>(),
        data in block_aligned_data()
    ) {
        prop_assume!(iv1 != iv2);

        let ct1 = cbc(PaddingScheme::NoPadding, ChainingMode::ResetPerCall, &key, &iv1)
            .encrypt(&data)
            .unwrap();
        let ct2 = cbc(PaddingScheme::NoPadding, ChainingMode::ResetPerCall, &key, &iv2)
            .encrypt(&data)
            .unwrap();

        prop_assert_ne!(ct1, ct2);
    }

    #[test]
    fn sixteen_byte_iv_advances_by_blocks_touched(
        key in aes_key(),
        iv in any::<[u8; 16]>(),
        len in 0usize..200
    ) {
        let mut cryptor = ctr(&key, &iv);
        cryptor.encrypt(&vec![0u8; len]).unwrap();
        cryptor.update_iv().unwrap();

        let expected = u128::from_be_bytes(iv).wrapping_add(((len + 15) / 16) as u128);
        prop_assert_eq!(cryptor.iv(), &expected.to_be_bytes()[..]);
        prop_assert_eq!(cryptor.block_offset(), 0);
    }
}
