#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, bpp: u16, palette: &[[u8; 4]], raster: &[u8]) -> Vec<u8> {
    let offset = 54 + 4 * palette.len() as u32;
    let mut out = vec![0u8; 54];
    out[0] = b'B';
    out[1] = b'M';
    out[2..6].copy_from_slice(&(offset + raster.len() as u32).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&bpp.to_le_bytes());
    out[46..50].copy_from_slice(&(palette.len() as u32).to_le_bytes());
    for entry in palette {
        out.extend_from_slice(entry);
    }
    out.extend_from_slice(raster);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    let mono = [[0, 0, 0, 0], [255, 255, 255, 0]];
    let pal16: Vec<[u8; 4]> = (0..16u8).map(|i| [i * 16, i * 8, i * 4, 0]).collect();

    let seeds = [
        ("pal1_3x2.bmp", bmp(3, 2, 1, &mono, &[0xa0, 0, 0, 0, 0x60, 0, 0, 0])),
        ("pal4_3x1.bmp", bmp(3, 1, 4, &pal16, &[0xf1, 0x70, 0, 0])),
        ("pal8_2x1.bmp", bmp(2, 1, 8, &mono, &[1, 0, 0, 0])),
        ("rgb24_1x1.bmp", bmp(1, 1, 24, &[], &[0xff, 0, 0, 0])),
        ("rgba32_2x1.bmp", bmp(2, 1, 32, &[], &[1, 2, 3, 4, 5, 6, 7, 8])),
        ("pal8_bad_index.bmp", bmp(1, 1, 8, &mono, &[9, 0, 0, 0])),
        ("topdown.bmp", bmp(1, -1, 24, &[], &[0, 0, 0, 0])),
    ];
    for (name, data) in seeds {
        fs::write(format!("{dir}/{name}"), data).unwrap();
    }

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();

    println!("Generated seed corpus in {dir}/");
}
