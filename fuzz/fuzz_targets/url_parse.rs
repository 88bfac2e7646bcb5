#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(u) = rawhttp::decompose(s) else {
        return;
    };
    assert_eq!(u.scheme(), "http");
    assert!(!u.host().is_empty());
    assert!(u.port() > 0);
    assert!(!u.path().is_empty());
    let _ = u.query();
    let _ = rawhttp::url::authority(s).unwrap();
});
