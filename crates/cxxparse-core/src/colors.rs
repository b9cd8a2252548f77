//! ANSI colors for tree dumps and CLI reports.

/// Palette used by the tree printer.
///
/// Rule names are blue, token text is green, positions are dimmed and
/// recovered (skipped) input is red. Standard 16-color codes only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub rule: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub recovered: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        rule: "\x1b[34m",
        text: "\x1b[32m",
        muted: "\x1b[2m",
        recovered: "\x1b[31m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        rule: "",
        text: "",
        muted: "",
        recovered: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}
