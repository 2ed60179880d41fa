use junit_annotate_cli::output::workflow::{error, format_command, notice};

#[test]
fn error_command() {
    assert_eq!(
        error("Malformed report document a.xml"),
        "::error::Malformed report document a.xml"
    );
}

#[test]
fn notice_command() {
    assert_eq!(notice("no check run"), "::notice::no check run");
}

#[test]
fn escapes_newlines_and_percent() {
    assert_eq!(
        format_command("error", "100% broken\r\nsecond line"),
        "::error::100%25 broken%0D%0Asecond line"
    );
}
