/// The file being hunted for: a name that may sit directly under `prefix`
/// or as the last path segment of any deeper key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    prefix: String,
    filename: String,
    exact_key: String,
    suffix: String,
}

impl Target {
    pub fn new(prefix: &str, filename: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            filename: filename.to_string(),
            exact_key: format!("{prefix}{filename}"),
            suffix: format!("/{filename}"),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Exact name match only. `uploads/cat.jpgx` and `uploads/xcat.jpg` do
    /// not match `cat.jpg`.
    pub fn matches(&self, key: &str) -> bool {
        key == self.exact_key || key.ends_with(&self.suffix)
    }
}
