#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Strict and lenient decode, plus probe — must never panic
    let _ = zenilbm::decode(data, enough::Unstoppable);
    let _ = zenilbm::DecodeRequest::new(data)
        .with_chunk_policy(zenilbm::ChunkPolicy::Lenient)
        .decode(enough::Unstoppable);
    let _ = zenilbm::ImageInfo::from_bytes(data);
});
