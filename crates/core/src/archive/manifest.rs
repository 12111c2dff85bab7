//! Index descriptor (JAR manifest) parsing.
//!
//! Only the main section is read. Lines are `Name: value` pairs; a line
//! starting with a single space continues the previous value (writers wrap
//! at 72 bytes). The first empty line ends the main section.

use crate::error::{FathomError, Result};
use crate::naming::CROSS_REFERENCE_ATTRIBUTE;
use indexmap::IndexMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    main: IndexMap<String, String>,
}

impl Manifest {
    pub fn parse(content: &str) -> Result<Self> {
        let mut main: IndexMap<String, String> = IndexMap::new();
        let mut last_key: Option<String> = None;

        for (line_no, raw) in content.lines().enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);

            if line.is_empty() {
                break;
            }

            if let Some(continuation) = line.strip_prefix(' ') {
                let key = last_key.as_ref().ok_or_else(|| {
                    FathomError::Manifest(format!(
                        "continuation without attribute at line {}",
                        line_no + 1
                    ))
                })?;
                if let Some(value) = main.get_mut(key) {
                    value.push_str(continuation);
                }
                continue;
            }

            let (name, value) = line.split_once(':').ok_or_else(|| {
                FathomError::Manifest(format!("malformed attribute at line {}", line_no + 1))
            })?;
            let key = name.trim().to_ascii_lowercase();
            if key.is_empty() {
                return Err(FathomError::Manifest(format!(
                    "empty attribute name at line {}",
                    line_no + 1
                )));
            }
            main.insert(key.clone(), value.strip_prefix(' ').unwrap_or(value).to_string());
            last_key = Some(key);
        }

        Ok(Self { main })
    }

    /// Attribute names compare case-insensitively.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.main
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Raw cross-reference list, if declared.
    pub fn class_path(&self) -> Option<&str> {
        self.attribute(CROSS_REFERENCE_ATTRIBUTE)
    }
}
