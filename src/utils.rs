pub fn object_uri(scheme: &str, bucket: &str, key: &str) -> String {
    format!("{scheme}://{bucket}/{key}")
}

/// Only a bare `y` or `Y` counts as yes. The line terminator is dropped,
/// any other whitespace is kept.
pub fn is_confirmed(answer: &str) -> bool {
    answer.trim_end_matches(['\r', '\n']).eq_ignore_ascii_case("y")
}
