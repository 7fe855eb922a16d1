/// Dispatch policies. `Default` gives the recoverable behavior: `-v` is a
/// terminal branch and malformed flags come back as errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchConfig {
    /// After logging the version for `-v`, keep going and look `-v` up as a
    /// command name.
    pub version_fallthrough: bool,
    /// Print the usage error and exit the process (code 2) on malformed flags
    /// instead of returning [`DispatchError::Parse`](crate::DispatchError::Parse).
    pub exit_on_parse_error: bool,
}

impl DispatchConfig {
    /// The behavior of older releases: version fall-through and hard exit on
    /// bad flags.
    pub fn legacy() -> Self {
        DispatchConfig {
            version_fallthrough: true,
            exit_on_parse_error: true,
        }
    }
}
