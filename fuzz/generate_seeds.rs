#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(tag);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        out.push(0);
    }
}

fn form(sub: &[u8; 4], chunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
    let mut stream = Vec::new();
    for (tag, payload) in chunks {
        chunk(&mut stream, tag, payload);
    }
    let mut out = b"FORM".to_vec();
    out.extend_from_slice(&(4 + stream.len() as u32).to_be_bytes());
    out.extend_from_slice(sub);
    out.extend_from_slice(&stream);
    out
}

fn bmhd(w: u16, h: u16, planes: u8, masking: u8, compression: u8) -> Vec<u8> {
    let mut p = Vec::new();
    p.extend_from_slice(&w.to_be_bytes());
    p.extend_from_slice(&h.to_be_bytes());
    p.extend_from_slice(&[0, 0, 0, 0, planes, masking, compression, 0, 0, 0, 10, 11]);
    p.extend_from_slice(&(w as i16).to_be_bytes());
    p.extend_from_slice(&(h as i16).to_be_bytes());
    p
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // ILBM 2x1, 1 plane, 2-colour CMAP
    let ilbm = form(b"ILBM", &[
        (b"BMHD", &bmhd(2, 1, 1, 0, 0)[..]),
        (b"CMAP", &[0, 0, 0, 255, 255, 255][..]),
        (b"BODY", &[0x80, 0x00][..]),
    ]);
    fs::write(format!("{dir}/ilbm_2x1.iff"), ilbm).unwrap();

    // ILBM 16x2, 2 planes, ByteRun1 (repeat + literal runs)
    let rle = form(b"ILBM", &[
        (b"BMHD", &bmhd(16, 2, 2, 0, 1)[..]),
        (b"CMAP", &[0; 12][..]),
        (b"CAMG", &[0, 0, 0x08, 0][..]),
        (b"BODY", &[0xfd, 0xaa, 0x03, 1, 2, 3, 4][..]),
    ]);
    fs::write(format!("{dir}/ilbm_rle_16x2.iff"), rle).unwrap();

    // ILBM with mask plane
    let masked = form(b"ILBM", &[
        (b"BMHD", &bmhd(8, 1, 1, 1, 0)[..]),
        (b"BODY", &[0xf0, 0x00, 0xff, 0xff][..]),
    ]);
    fs::write(format!("{dir}/ilbm_mask.iff"), masked).unwrap();

    // 24-plane 1x1
    let deep = form(b"ILBM", &[
        (b"BMHD", &bmhd(1, 1, 24, 0, 0)[..]),
        (b"BODY", &[0x80; 48][..]),
    ]);
    fs::write(format!("{dir}/ilbm_24bit_1x1.iff"), deep).unwrap();

    // PBM 3x1
    let pbm = form(b"PBM ", &[
        (b"BMHD", &bmhd(3, 1, 8, 0, 0)[..]),
        (b"BODY", &[1, 2, 3, 0][..]),
    ]);
    fs::write(format!("{dir}/pbm_3x1.lbm"), pbm).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_form.bin"), b"FORM").unwrap();
    fs::write(format!("{dir}/body_first.bin"), form(b"ILBM", &[(b"BODY", &[0, 0][..])])).unwrap();
    fs::write(format!("{dir}/unknown_chunk.bin"), form(b"ILBM", &[(b"XXXX", &[1][..])])).unwrap();

    println!("Generated seed corpus in {dir}/");
}
