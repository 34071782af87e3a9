//! Configurable values with a conventional default.

/// A settable value that falls back to its convention until set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property<T> {
    convention: T,
    value: Option<T>,
}

impl<T> Property<T> {
    /// Create a property whose value is `convention` until explicitly set.
    pub fn new(convention: impl Into<T>) -> Self {
        Self {
            convention: convention.into(),
            value: None,
        }
    }

    /// The explicit value if one was set, otherwise the convention.
    #[must_use]
    pub fn get(&self) -> &T {
        self.value.as_ref().unwrap_or(&self.convention)
    }

    pub fn set(&mut self, value: impl Into<T>) {
        self.value = Some(value.into());
    }

    /// Drop the explicit value, falling back to the convention again.
    pub fn unset(&mut self) {
        self.value = None;
    }

    /// Returns true if a value was explicitly set.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    #[must_use]
    pub fn convention(&self) -> &T {
        &self.convention
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}
