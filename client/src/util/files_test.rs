use super::*;

#[test]
fn blank_mime_falls_back_to_octet_stream() {
    assert_eq!(mime_or_default(""), "application/octet-stream");
    assert_eq!(mime_or_default("  "), "application/octet-stream");
}

#[test]
fn reported_mime_is_kept() {
    assert_eq!(mime_or_default("image/jpeg"), "image/jpeg");
}
