/// How `create` treats an extender that overrides an earlier field or extra
/// with a value of a different type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverrideCheck {
    /// Fail `create` in builds with debug assertions, log otherwise.
    #[default]
    DebugOnly,
    /// Always fail `create`.
    Always,
    /// Never fail. The override is logged and kept as an extra, leaving any
    /// field of the same name untouched.
    Never,
}

impl OverrideCheck {
    pub fn enabled(self) -> bool {
        match self {
            OverrideCheck::DebugOnly => cfg!(debug_assertions),
            OverrideCheck::Always => true,
            OverrideCheck::Never => false,
        }
    }
}

/// Per-definition settings.
#[derive(Debug, Clone, Default)]
pub struct ModelOptions {
    /// Label used in log events.
    pub name: Option<String>,
    pub override_check: OverrideCheck,
}

impl ModelOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn override_check(mut self, check: OverrideCheck) -> Self {
        self.override_check = check;
        self
    }
}
