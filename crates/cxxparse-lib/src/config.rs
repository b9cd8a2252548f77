//! Parser configuration and the grammar key derived from it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Source language of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    C,
    Cxx,
}

/// Dialect extensions layered on top of ISO C++.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Extensions {
    /// Statement expressions, `?:` with omitted operand, case ranges,
    /// designated range initializers, extended `asm`.
    pub gnu: bool,
    /// C++/CLI: handles, `gcnew`, properties, events, delegates, generics,
    /// `for each`, `finally`, `[attribute]` sections.
    pub managed: bool,
    /// Microsoft attributed ATL: `[ ... ]` attribute blocks on declarations.
    pub attributed_atl: bool,
}

impl Default for Extensions {
    fn default() -> Self {
        Self {
            gnu: true,
            managed: true,
            attributed_atl: true,
        }
    }
}

impl Extensions {
    /// Only ISO C++ (plus the always-on C99 constructs).
    pub const NONE: Self = Self {
        gnu: false,
        managed: false,
        attributed_atl: false,
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Configuration {
    /// Skip unparseable top-level input instead of failing the whole file.
    pub error_recovery_enabled: bool,
    /// File name suffixes (e.g. `.c`) that select C mode. Case-sensitive.
    pub c_file_extensions: BTreeSet<String>,
    pub extensions: Extensions,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            error_recovery_enabled: true,
            c_file_extensions: BTreeSet::new(),
            extensions: Extensions::default(),
        }
    }
}

impl Configuration {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::Config)
    }

    pub fn with_error_recovery(mut self, enabled: bool) -> Self {
        self.error_recovery_enabled = enabled;
        self
    }

    pub fn with_c_file_extension(mut self, suffix: impl Into<String>) -> Self {
        self.c_file_extensions.insert(suffix.into());
        self
    }

    pub fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }

    /// C when the file name ends with one of the configured suffixes.
    pub fn language_for(&self, file_name: &str) -> Language {
        if self
            .c_file_extensions
            .iter()
            .any(|suffix| file_name.ends_with(suffix.as_str()))
        {
            Language::C
        } else {
            Language::Cxx
        }
    }

    /// C has no managed or ATL constructs, so those are forced off for C.
    pub fn grammar_key(&self, language: Language) -> GrammarKey {
        let mut extensions = self.extensions;
        if language == Language::C {
            extensions.managed = false;
            extensions.attributed_atl = false;
        }
        GrammarKey {
            error_recovery: self.error_recovery_enabled,
            language,
            extensions,
        }
    }
}

/// Everything a grammar graph depends on. Equal keys yield identical graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrammarKey {
    pub error_recovery: bool,
    pub language: Language,
    pub extensions: Extensions,
}

impl Default for GrammarKey {
    fn default() -> Self {
        Configuration::default().grammar_key(Language::Cxx)
    }
}
