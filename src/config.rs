//! Builder configuration.

/// What to do with an argument whose shape the builder does not recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnrecognizedPolicy {
    /// Drop it, log at debug level and record [`Handling::Ignored`].
    ///
    /// [`Handling::Ignored`]: crate::builder::Handling::Ignored
    #[default]
    Ignore,
    /// Fail the build with [`BuildError::Unrecognized`].
    ///
    /// [`BuildError::Unrecognized`]: crate::error::BuildError::Unrecognized
    Reject,
}

/// Configuration shared by every build through one builder.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Tag used when a selector starts with a class or id (`".panel"`).
    pub default_tag: String,
    pub unrecognized: UnrecognizedPolicy,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            default_tag: "div".to_owned(),
            unrecognized: UnrecognizedPolicy::Ignore,
        }
    }
}

impl BuilderConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default container tag (builder).
    pub fn with_default_tag(mut self, tag: impl Into<String>) -> Self {
        self.default_tag = tag.into();
        self
    }

    /// Set the unrecognized-argument policy (builder).
    pub fn with_unrecognized(mut self, policy: UnrecognizedPolicy) -> Self {
        self.unrecognized = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BuilderConfig::new();
        assert_eq!(config.default_tag, "div");
        assert_eq!(config.unrecognized, UnrecognizedPolicy::Ignore);
    }

    #[test]
    fn builder_methods() {
        let config = BuilderConfig::new()
            .with_default_tag("span")
            .with_unrecognized(UnrecognizedPolicy::Reject);
        assert_eq!(config.default_tag, "span");
        assert_eq!(config.unrecognized, UnrecognizedPolicy::Reject);
    }
}
