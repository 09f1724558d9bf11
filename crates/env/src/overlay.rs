use indexmap::IndexMap;

/// Ordered environment overlay built from repeated `key=value` command-line
/// arguments.
///
/// Tokens split on the first `=` only, so values may themselves contain `=`.
/// A token without `=` becomes a key (trimmed) mapped to the empty string.
/// Repeated keys accumulate: later values append to the first with a comma,
/// and the key keeps its first-seen position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgEnv {
    values: IndexMap<String, String>,
}

impl ArgEnv {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    /// Build the overlay from the full token list. Total: malformed syntax
    /// is rejected earlier, at the command-line boundary.
    #[must_use]
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut env = Self::new();
        for token in tokens {
            env.insert_token(token.as_ref());
        }
        env
    }

    pub fn insert_token(&mut self, token: &str) {
        match token.split_once('=') {
            Some((key, value)) => self.append(key, value),
            None => self.append(token.trim(), ""),
        }
    }

    fn append(&mut self, key: &str, value: &str) {
        if let Some(existing) = self.values.get_mut(key) {
            existing.push(',');
            existing.push_str(value);
        } else {
            self.values.insert(key.to_string(), value.to_string());
        }
    }

    /// Overlay value for a key, if one was supplied.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Overlay value if present, otherwise the ambient process environment.
    /// Absent in both is a defined "not found", not an error.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(value) => Some(value.to_string()),
            None => std::env::var(key).ok(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
