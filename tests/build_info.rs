//! The banner constants generated by build.rs.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

#[test]
fn test_build_stamp_format() {
    // "YYYY-MM-DD HH:MM:SS UTC"
    assert_eq!(BUILD_DATE.len(), 23);
    assert!(BUILD_DATE.ends_with(" UTC"));
    assert_eq!(&BUILD_DATE[4..5], "-");
    assert!(!BUILD_TARGET.is_empty());
    assert_ne!(BUILD_TARGET, "unknown");
}
