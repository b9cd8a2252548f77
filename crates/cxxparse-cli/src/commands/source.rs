//! Loading sources and configuration for the parse commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use cxxparse_lib::{Configuration, Language};

use crate::cli::ParseArgs;

/// Reads the `--config` file if given, then applies command-line overrides.
pub fn load_configuration(args: &ParseArgs) -> Result<Configuration, String> {
    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
            Configuration::from_json(&text).map_err(|e| format!("{}: {}", path.display(), e))?
        }
        None => Configuration::default(),
    };

    Ok(if args.no_recovery {
        config.with_error_recovery(false)
    } else {
        config
    })
}

/// `--lang` wins; otherwise the file suffix decides.
pub fn resolve_language(args: &ParseArgs, config: &Configuration, path: &Path) -> Language {
    match args.lang {
        Some(lang) => lang.into(),
        None => config.language_for(&path.to_string_lossy()),
    }
}

/// Loads source code from a file, or from stdin when the path is `-`.
pub fn load_source(path: &Path) -> Result<String, String> {
    if is_stdin(path) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}

/// Name used for `path` in reports.
pub fn display_name(path: &Path) -> String {
    if is_stdin(path) {
        return "<stdin>".to_owned();
    }
    path.display().to_string()
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}
