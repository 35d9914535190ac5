/// Reads an environment variable that the caller can do without.
///
/// Surrounding whitespace is trimmed; unset, blank and non-unicode values
/// all yield `None`.
pub fn get_optional_env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_variable_is_none() {
        assert!(get_optional_env_var("SHARED_UTILS_TEST_DEFINITELY_UNSET_VARIABLE").is_none());
    }

    #[test]
    fn test_path_is_readable() {
        // PATH is set in every environment the tests run in.
        assert!(get_optional_env_var("PATH").is_some());
    }
}
