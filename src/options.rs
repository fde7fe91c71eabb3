//! Generator options.
//!
//! Options can be built in code or loaded from YAML, using the same
//! kebab-case keys the command line accepts:
//!
//! ```yaml
//! root-name: piece
//! terminal-barline: light-heavy
//! write:
//!   path: out.musicxml
//! ```

use crate::error::GenError;
use crate::python;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Name bound to the root node
    pub root_name: String,
    /// Barline style of the terminal boundary marker
    pub terminal_barline: String,
    /// Ends the program with a well-formedness check and a write call
    pub write: Option<WriteTarget>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            root_name: "score".to_string(),
            terminal_barline: "final".to_string(),
            write: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct WriteTarget {
    pub path: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "musicxml".to_string()
}

impl WriteTarget {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            format: default_format(),
        }
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = format.to_string();
        self
    }
}

impl GeneratorOptions {
    /// Parse options from a YAML document. Missing keys keep their defaults.
    pub fn from_yaml(source: &str) -> Result<Self, GenError> {
        let options: GeneratorOptions =
            serde_yaml::from_str(source).map_err(|e| GenError::ConfigError(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn with_root_name(mut self, name: &str) -> Self {
        self.root_name = name.to_string();
        self
    }

    pub fn with_write(mut self, target: WriteTarget) -> Self {
        self.write = Some(target);
        self
    }

    /// Check that the root name is a valid Python identifier.
    ///
    /// Collisions with imported module names are checked by the generator,
    /// which knows the vocabulary.
    pub fn validate(&self) -> Result<(), GenError> {
        if !python::is_identifier(&self.root_name) {
            return Err(GenError::ConfigError(format!(
                "Root name '{}' is not a valid identifier",
                self.root_name
            )));
        }
        if self.terminal_barline.is_empty() {
            return Err(GenError::ConfigError(
                "Terminal barline style must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
