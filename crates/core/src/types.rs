use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

/// The environment handed to a workflow step, composed from layered sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariables(HashMap<String, String>);

impl EnvironmentVariables {
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Capture the ambient process environment
    #[must_use]
    pub fn from_process() -> Self {
        Self(std::env::vars().collect())
    }

    /// Insert a variable, returning the previous value if any
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&String> {
        self.0.get(key)
    }

    /// Merge another set of variables into this one; `other` wins on clashes
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::collections::hash_map::Iter<String, String> {
        self.0.iter()
    }
}

impl Deref for EnvironmentVariables {
    type Target = HashMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for EnvironmentVariables {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<HashMap<String, String>> for EnvironmentVariables {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl IntoIterator for EnvironmentVariables {
    type Item = (String, String);
    type IntoIter = std::collections::hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overwrites_existing_values() {
        let mut env = EnvironmentVariables::new();
        env.insert("HOME", "/home/user");
        env.insert("LANG", "C");

        let mut other = EnvironmentVariables::new();
        other.insert("LANG", "en_US.UTF-8");
        env.merge(other);

        assert_eq!(env.get("LANG").map(String::as_str), Some("en_US.UTF-8"));
        assert_eq!(env.get("HOME").map(String::as_str), Some("/home/user"));
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn from_process_sees_the_ambient_environment() {
        std::env::set_var("FLOWENV_TYPES_TEST", "captured");
        let env = EnvironmentVariables::from_process();
        std::env::remove_var("FLOWENV_TYPES_TEST");

        assert!(!env.is_empty());
        assert_eq!(
            env.get("FLOWENV_TYPES_TEST").map(String::as_str),
            Some("captured")
        );
    }
}
