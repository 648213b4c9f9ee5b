#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::{BmpPermissiveness, DecodeRequest, Limits};

fuzz_target!(|data: &[u8]| {
    // Must never panic, at any validation level.
    let _ = zenbmp::BmpInfo::from_bytes(data);
    let _ = zenbmp::decode_bmp_native(data, enough::Unstoppable);

    let limits = Limits::pixels(1 << 22);
    for level in [
        BmpPermissiveness::Strict,
        BmpPermissiveness::Standard,
        BmpPermissiveness::Permissive,
    ] {
        if let Ok(decoded) = DecodeRequest::new(data)
            .with_limits(&limits)
            .with_permissiveness(level)
            .decode(enough::Unstoppable)
        {
            assert_eq!(
                decoded.pixels().len(),
                decoded.width as usize * decoded.height as usize * 4
            );
        }
    }
});
