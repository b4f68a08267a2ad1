//! Conversion settings.

/// Prefix of synthesized auxiliary variable names.
pub const DEFAULT_AUX_PREFIX: &str = "converter_aux_var_";

/// What to do when a variable id is declared twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail with `DuplicateVariable`.
    #[default]
    Reject,
    /// Last declaration wins.
    Overwrite,
}

/// Configuration for a conversion session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Prefix for auxiliary variable names (default: `converter_aux_var_`).
    pub aux_prefix: String,
    pub duplicates: DuplicatePolicy,
    /// Broadcast a single instantiation value over every listed variable.
    pub broadcast_instantiation: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            aux_prefix: DEFAULT_AUX_PREFIX.to_string(),
            duplicates: DuplicatePolicy::default(),
            broadcast_instantiation: true,
        }
    }
}
