/// Reads an optional override from the environment.
///
/// Returns `None` when the variable is unset, not valid unicode, or blank.
/// The value is returned trimmed.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
