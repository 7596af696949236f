use crate::flash::{Flash, FlashLevel};

#[test]
fn test_flash_constructors_set_level() {
    assert_eq!(Flash::success("ok").level, FlashLevel::Success);
    assert_eq!(Flash::info("hm").level, FlashLevel::Info);
    assert_eq!(Flash::error("no").level, FlashLevel::Error);
}

#[test]
fn test_flash_level_css_class() {
    assert_eq!(FlashLevel::Success.css_class(), "msg success");
    assert_eq!(FlashLevel::Warning.css_class(), "msg warning");
}

#[test]
fn test_flash_serializes_lowercase_level() {
    let json = serde_json::to_value(Flash::info("Web server is not running")).unwrap();

    assert_eq!(json["level"], "info");
    assert_eq!(json["message"], "Web server is not running");
}
