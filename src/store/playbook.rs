//! File-backed playbook option lists: one flat JSON array per category.
//! Every mutation persists immediately; there is no batching and no cache
//! beyond what the caller holds.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{JournalError, Result};
use crate::models::Category;

/// The options of one category, plus whether the persisted file had to be
/// reset to defaults because it was corrupted. The caller notifies the
/// user; loading itself never halts on corruption.
#[derive(Debug, Clone)]
pub struct CategoryOptions {
    pub options: Vec<String>,
    pub recovered: bool,
}

pub struct PlaybookStore {
    dir: PathBuf,
}

impl PlaybookStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        PlaybookStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_path(&self, category: Category) -> PathBuf {
        self.dir.join(category.file_name())
    }

    /// Load a category, seeding the default list on first use and
    /// replacing a corrupted file with the defaults.
    pub fn load_or_create(&self, category: Category) -> Result<CategoryOptions> {
        let path = self.file_path(category);
        if !path.exists() {
            let defaults = category.default_options();
            self.persist(category, &defaults)?;
            return Ok(CategoryOptions {
                options: defaults,
                recovered: false,
            });
        }

        let data = fs::read_to_string(&path)?;
        match serde_json::from_str::<Vec<String>>(&data) {
            Ok(options) => Ok(CategoryOptions {
                options,
                recovered: false,
            }),
            Err(e) => {
                log::warn!(
                    "Corrupted playbook file {}: {e}. Resetting to defaults.",
                    path.display()
                );
                let defaults = category.default_options();
                self.persist(category, &defaults)?;
                Ok(CategoryOptions {
                    options: defaults,
                    recovered: true,
                })
            }
        }
    }

    fn persist(&self, category: Category, options: &[String]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let payload = serde_json::to_vec_pretty(options)?;
        fs::write(self.file_path(category), payload)?;
        Ok(())
    }

    /// Append a new option and re-sort. Exact-match duplicates (case
    /// sensitive) are rejected and the stored list is left unchanged.
    pub fn add(&self, category: Category, item: &str) -> Result<Vec<String>> {
        let item = item.trim();
        if item.is_empty() {
            return Err(JournalError::InvalidInput(
                "Please enter an item to add.".to_string(),
            ));
        }

        let mut options = self.load_or_create(category)?.options;
        if options.iter().any(|o| o == item) {
            return Err(JournalError::DuplicateOption(item.to_string()));
        }

        options.push(item.to_string());
        options.sort();
        self.persist(category, &options)?;
        Ok(options)
    }

    /// Replace an existing option and re-sort.
    pub fn edit(&self, category: Category, old: &str, new: &str) -> Result<Vec<String>> {
        let new = new.trim();
        if new.is_empty() {
            return Err(JournalError::InvalidInput(
                "Please enter a new value for the selected item.".to_string(),
            ));
        }
        if new == old {
            return Err(JournalError::InvalidInput(
                "The new item is the same as the old one.".to_string(),
            ));
        }

        let mut options = self.load_or_create(category)?.options;
        let Some(pos) = options.iter().position(|o| o == old) else {
            return Err(JournalError::OptionNotFound(old.to_string()));
        };
        if options.iter().any(|o| o == new) {
            return Err(JournalError::DuplicateOption(new.to_string()));
        }

        options[pos] = new.to_string();
        options.sort();
        self.persist(category, &options)?;
        Ok(options)
    }

    pub fn delete(&self, category: Category, item: &str) -> Result<Vec<String>> {
        let mut options = self.load_or_create(category)?.options;
        let Some(pos) = options.iter().position(|o| o == item) else {
            return Err(JournalError::OptionNotFound(item.to_string()));
        };

        options.remove(pos);
        self.persist(category, &options)?;
        Ok(options)
    }
}
