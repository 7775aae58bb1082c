#![no_main]
use libfuzzer_sys::fuzz_target;
use trace_pack::Reader;

fuzz_target!(|data: &[u8]| {
    let mut r = Reader::new(data);
    while r.remaining() > 0 {
        let before = r.position();
        let _ = r.read_i64();
        let _ = r.read_compact_utf();
        let _ = r.read_utf();
        if r.position() == before {
            let _ = r.read_u8();
        }
    }
});
