//! Crop template registry.
//!
//! The registry is an immutable lookup table from exact crop display name to
//! [`CropTemplate`]. It is built once (from the compiled-in template set, a
//! JSON file, or fabricated templates in tests) and handed to whatever needs
//! it, usually behind an `Arc`. Lookups are exact and case-sensitive.
//!
//! ```rust
//! use tilth_core::templates::TemplateRegistry;
//!
//! let registry = TemplateRegistry::builtin()?;
//! let wheat = registry.lookup("Wheat")?;
//! assert_eq!(wheat.duration.max_days, 150);
//! assert!(registry.lookup("wheat").is_err());
//! # Ok::<(), tilth_core::ScheduleError>(())
//! ```

use std::{
    collections::{BTreeMap, HashSet},
    path::Path,
};

use log::debug;

use crate::{
    error::{Result, ScheduleError},
    models::CropTemplate,
};


const BUILTIN_TEMPLATES: &str = include_str!("../../assets/crop_templates.json");

/// Read-only set of crop templates keyed by crop name.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, CropTemplate>,
}

impl TemplateRegistry {
    /// Loads the template set compiled into the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_TEMPLATES)
    }

    /// Parses the template configuration format: a JSON object mapping crop
    /// display names to `{duration, stages}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, CropTemplate> = serde_json::from_str(json)?;
        Self::from_templates(raw.into_iter().map(|(name, mut template)| {
            template.crop_name = name;
            template
        }))
    }

    /// Reads and parses a template configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ScheduleError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        let registry = Self::from_json(&json)?;
        debug!(
            "Loaded {} crop templates from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Builds a registry from already-constructed templates, validating each.
    pub fn from_templates<I>(templates: I) -> Result<Self>
    where
        I: IntoIterator<Item = CropTemplate>,
    {
        let mut map = BTreeMap::new();
        for template in templates {
            validate(&template)?;
            let name = template.crop_name.clone();
            if map.insert(name.clone(), template).is_some() {
                return Err(ScheduleError::template_config(format!(
                    "crop '{name}' is defined more than once"
                )));
            }
        }
        Ok(Self { templates: map })
    }

    /// Finds the template for an exact crop name.
    pub fn lookup(&self, crop_name: &str) -> Result<&CropTemplate> {
        self.templates
            .get(crop_name)
            .ok_or_else(|| ScheduleError::UnknownCropTemplate {
                crop: crop_name.to_string(),
            })
    }

    /// Supported crop names in sorted order.
    pub fn crop_names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Iterates over all templates in crop-name order.
    pub fn iter(&self) -> impl Iterator<Item = &CropTemplate> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn validate(template: &CropTemplate) -> Result<()> {
    let crop = &template.crop_name;
    if crop.trim().is_empty() {
        return Err(ScheduleError::template_config("crop name must not be empty"));
    }

    let duration = template.duration;
    if duration.min_days > duration.max_days {
        return Err(ScheduleError::template_config(format!(
            "crop '{crop}': duration min ({}) exceeds max ({})",
            duration.min_days, duration.max_days
        )));
    }

    // Activity IDs are derived from (stage name, index), so stage names must
    // not repeat within a crop.
    let mut seen = HashSet::new();
    for stage in &template.stages {
        if stage.name.trim().is_empty() {
            return Err(ScheduleError::template_config(format!(
                "crop '{crop}': stage name must not be empty"
            )));
        }
        if !seen.insert(stage.name.as_str()) {
            return Err(ScheduleError::template_config(format!(
                "crop '{crop}': stage '{}' is declared more than once",
                stage.name
            )));
        }
    }

    Ok(())
}
