#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(res) = rawhttp::Response::parse(data.to_vec()) else {
        return;
    };
    let _ = res.status();
    for (name, _) in res.headers() {
        assert!(res.header(name).is_some());
    }
    assert!(res.body().len() < data.len());
});
