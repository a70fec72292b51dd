use syntax::{Element, ParseError};

/// Parse a source snippet under the file label the test suites match
/// error messages against.
pub fn parse_str(contents: &str) -> Result<Element, ParseError> {
    syntax::parse_source(contents, "test.txt")
}

/// Parse a snippet that is expected to be well-formed.
pub fn parse_str_ok(contents: &str) -> Element {
    match parse_str(contents) {
        Ok(element) => element,
        Err(err) => panic!("expected {contents:?} to parse: {err}"),
    }
}

/// The display string of the error a snippet is expected to produce.
pub fn parse_str_err(contents: &str) -> String {
    match parse_str(contents) {
        Ok(element) => panic!(
            "expected {contents:?} to fail, parsed:\n{}",
            element.get_diagnostic_string()
        ),
        Err(err) => err.to_string(),
    }
}
