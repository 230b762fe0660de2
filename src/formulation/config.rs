//! Model builder configuration.

/// Configuration for [`SubpartitionBuilder`](super::SubpartitionBuilder).
///
/// All caps default to unbounded. When a cap is hit the build fails with
/// `ResourceLimitExceeded` naming the pair being processed; no model is
/// returned and nothing is truncated.
///
/// # Examples
///
/// ```
/// use u_subpartition::formulation::FormulationConfig;
///
/// let config = FormulationConfig::default()
///     .with_max_separators_per_pair(10_000)
///     .with_memoize(true)
///     .with_model_name("claw_k3");
/// assert_eq!(config.max_separators_per_pair, Some(10_000));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormulationConfig {
    /// Maximum minimal separators per vertex pair (None for unbounded).
    pub max_separators_per_pair: Option<usize>,
    /// Maximum separator constraints in the whole model (None for unbounded).
    pub max_separator_constraints: Option<usize>,
    /// Whether to enumerate pairs in parallel using rayon. Takes effect
    /// only when the crate is built with the `parallel` feature.
    pub parallel: bool,
    /// Whether the builder keeps separator families between builds of
    /// the same graph.
    pub memoize: bool,
    /// Model name written to the LP header (None for a name derived from
    /// the vertex and colour counts).
    pub model_name: Option<String>,
}

impl Default for FormulationConfig {
    fn default() -> Self {
        Self {
            max_separators_per_pair: None,
            max_separator_constraints: None,
            parallel: false,
            memoize: false,
            model_name: None,
        }
    }
}

impl FormulationConfig {
    /// Caps the number of separators enumerated for a single pair.
    pub fn with_max_separators_per_pair(mut self, n: usize) -> Self {
        self.max_separators_per_pair = Some(n);
        self
    }

    /// Caps the total number of separator constraints.
    pub fn with_max_separator_constraints(mut self, n: usize) -> Self {
        self.max_separator_constraints = Some(n);
        self
    }

    /// Removes both caps.
    pub fn unbounded(mut self) -> Self {
        self.max_separators_per_pair = None;
        self.max_separator_constraints = None;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_separators_per_pair == Some(0) {
            return Err("max_separators_per_pair must be at least 1".into());
        }
        if self.max_separator_constraints == Some(0) {
            return Err("max_separator_constraints must be at least 1".into());
        }
        if let Some(name) = &self.model_name {
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                return Err(format!("model_name must be a non-empty word, got {name:?}"));
            }
        }
        Ok(())
    }
}
