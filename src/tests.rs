use voxell_rng::rng::XorShift128;

use crate::compressor::Compressor;

const SHORT_DATA: &[u8] = b"Hello, World!";
const LONG_DATA: &[u8] =
    b"This is a longer string to test the huffman coding algorithm. It should be able to handle various lengths and characters.";
const REPEATING_DATA: &[u8] = b"a baba da babble da dabble babble doo bee babble dabble dooble dee boo dooble daddle boo";
const SINGLE_SYMBOL_DATA: &[u8] = b"zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz";
const TWO_SYMBOL_DATA: &[u8] = b"aaab";
const EMPTY_DATA: &[u8] = &[];

/// Pseudo-random bytes from a fixed seed.
pub fn rng_data(len: usize, seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(len);
    let mut rng = XorShift128::new(seed);
    for _ in 0..len {
        let next = rng.peek_next_u64();
        data.push((next & 0xFF) as u8);
        rng = XorShift128::new(next);
    }
    data
}

/// Every byte value, weighted so the tree is lopsided.
pub fn binary_data() -> Vec<u8> {
    (0..=255u8)
        .flat_map(|b| std::iter::repeat_n(b, 1 + (b as usize * 37) % 61))
        .collect()
}

pub fn test_cases() -> Vec<(Vec<u8>, &'static str)> {
    vec![
        (REPEATING_DATA.to_vec(), "repeating data"),
        (SHORT_DATA.to_vec(), "short data"),
        (LONG_DATA.to_vec(), "long data"),
        (binary_data(), "binary data"),
        (rng_data(1000, 0xdeadcafe), "rng data"),
        (SINGLE_SYMBOL_DATA.to_vec(), "single symbol data"),
        (TWO_SYMBOL_DATA.to_vec(), "two symbol data"),
        (EMPTY_DATA.to_vec(), "empty data"),
    ]
}

pub fn roundtrip_test<C: Compressor>(mut compressor: C) {
    for (test_case, test_name) in test_cases() {
        match compressor.test_roundtrip(&test_case) {
            Ok(eq) => {
                eprintln!(
                    "Compression ratio for {} with {}: {:.2}%",
                    test_name,
                    compressor.compressor_name(),
                    eq.size_ratio() * 100.0
                );

                assert!(
                    eq.is_successful(),
                    "Roundtrip test for {} failed at {}:\n\tExpected: {:?}\n\tGot: {:?}\n\tCompressed: {:?}",
                    compressor.compressor_name(),
                    test_name,
                    eq.get_original(),
                    eq.get_decompressed(),
                    eq.get_compressed(),
                );
            }
            Err(e) => {
                panic!(
                    "Fatal error while trying to compress/decompress {} with {}: {}",
                    test_name,
                    compressor.compressor_name(),
                    e
                );
            }
        }
    }
}

#[test]
fn rng_data_is_reproducible() {
    assert_eq!(rng_data(64, 7), rng_data(64, 7));
    assert_eq!(rng_data(64, 7).len(), 64);
}
