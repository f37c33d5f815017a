#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Every control byte yields at most 128 output bytes
    let out = zenilbm::body::decompress(data);
    assert!(out.len() <= data.len() * 128);
});
