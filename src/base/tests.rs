use crate::base::neterror::NetError;

#[test]
fn test_net_error_roundtrip() {
    // Standard Chromium error
    let original = NetError::ConnectionRefused;
    let code = original.as_i32();
    assert_eq!(code, -102);
    let converted = NetError::from(code);
    assert!(matches!(converted, NetError::ConnectionRefused));

    // Custom error
    let custom = NetError::RedirectWithoutLocation;
    let custom_code = custom.as_i32();
    assert_eq!(custom_code, -900);
    let custom_converted = NetError::from(custom_code);
    assert!(matches!(custom_converted, NetError::RedirectWithoutLocation));
}

#[test]
fn test_unknown_error() {
    let err = NetError::from(-9999);
    assert!(matches!(err, NetError::Unknown(-9999)));
}

#[test]
fn test_error_messages_carry_detail() {
    let err = NetError::cookie_file("cookies.txt", "permission denied");
    assert_eq!(
        err.to_string(),
        "Cookie file cookies.txt: permission denied"
    );
    assert_eq!(err.as_i32(), -901);

    let err = NetError::unexpected("status line missing code");
    assert_eq!(err.to_string(), "Unexpected error: status line missing code");
}
