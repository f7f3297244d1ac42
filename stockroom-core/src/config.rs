//! Menu model configuration: loading, saving and validation

use crate::error::{ErrorContext, StockroomError, StockroomResult};
use crate::invalid_menu_error;
use crate::menu::MenuModel;

use std::collections::HashSet;
use std::path::Path;
use tracing::info;

impl MenuModel {
    /// Parse a menu model from TOML and validate it
    pub fn from_toml_str(content: &str) -> StockroomResult<Self> {
        let model: MenuModel = toml::from_str(content).map_err(|e| StockroomError::Config {
            message: format!("Failed to parse menu: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("menu")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in the menu file"),
        })?;

        model.validate()?;
        Ok(model)
    }

    /// Load a menu model from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> StockroomResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| StockroomError::Config {
            message: format!("Failed to read menu file {}: {}", path.display(), e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("menu")
                .with_operation("read_file")
                .with_suggestion("Check if the menu file exists and is readable"),
        })?;

        let model = Self::from_toml_str(&content)?;
        info!(
            path = %path.display(),
            sections = model.sections.len(),
            "loaded menu model"
        );
        Ok(model)
    }

    /// Save the menu model as TOML
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> StockroomResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| StockroomError::Config {
            message: format!("Failed to serialize menu: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("menu").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| StockroomError::Config {
            message: format!("Failed to write menu file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("menu")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Ids must be non-empty and unique among siblings
    pub fn validate(&self) -> StockroomResult<()> {
        let mut section_ids = HashSet::new();

        for section in &self.sections {
            if section.id.trim().is_empty() {
                return Err(invalid_menu_error!("section id must not be empty", section.label));
            }
            if !section_ids.insert(section.id.as_str()) {
                return Err(invalid_menu_error!("duplicate section id", section.id));
            }

            let mut entry_ids = HashSet::new();
            for entry in &section.entries {
                if entry.id.trim().is_empty() {
                    return Err(invalid_menu_error!(
                        format!("entry id must not be empty in section '{}'", section.id),
                        entry.label
                    ));
                }
                if !entry_ids.insert(entry.id.as_str()) {
                    return Err(invalid_menu_error!(
                        format!("duplicate entry id in section '{}'", section.id),
                        entry.id
                    ));
                }
            }
        }

        Ok(())
    }
}
