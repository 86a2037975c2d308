//! Keep predicates over driver values

/// Decides whether a driver value is kept
pub trait KeepPredicate: Send + Sync {
    /// Whether the position holding `value` survives the filter
    fn keep(&self, value: &str) -> bool;
}

impl<F> KeepPredicate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn keep(&self, value: &str) -> bool {
        self(value)
    }
}

/// Keeps values that contain at least one of a set of codes
///
/// Used for diagnosis texts, where the code can sit anywhere in the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainsAnyCode {
    codes: Vec<String>,
}

impl ContainsAnyCode {
    /// Create the predicate from a code whitelist
    #[must_use]
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// The whitelisted codes
    #[must_use]
    pub fn codes(&self) -> &[String] {
        &self.codes
    }
}

impl KeepPredicate for ContainsAnyCode {
    fn keep(&self, value: &str) -> bool {
        self.codes.iter().any(|code| value.contains(code.as_str()))
    }
}

/// Keeps values that start with one of a set of prefixes
///
/// Used for sample/specimen type columns such as `Blod` or `Urin`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartsWithAnyPrefix {
    prefixes: Vec<String>,
}

impl StartsWithAnyPrefix {
    /// Create the predicate from a prefix whitelist
    #[must_use]
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl KeepPredicate for StartsWithAnyPrefix {
    fn keep(&self, value: &str) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| value.starts_with(prefix.as_str()))
    }
}
