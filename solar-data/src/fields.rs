use serde::{Deserialize, Deserializer};

/// Reads a yes/no cell. `true`, `1`, `yes`, `y` and `%` (any case) are
/// true; anything else, including a blank cell, is false.
pub(crate) fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.is_some_and(|s| {
        matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "y" | "%"
        )
    }))
}
