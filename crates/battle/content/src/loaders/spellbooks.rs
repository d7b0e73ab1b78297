//! Spellbook catalog loader.
//!
//! Spellbooks are named spell lists shared between monster templates so a
//! bestiary does not repeat the same litany per caster.

use std::path::Path;

use battle_core::{BattleConfig, Spell};

use crate::loaders::{LoadResult, read_file};

/// Named spellbooks resolved against when a template references one.
#[derive(Debug, Clone, Default)]
pub struct Spellbooks {
    books: Vec<(String, Vec<Spell>)>,
}

impl Spellbooks {
    /// Looks up a spellbook by name.
    pub fn get(&self, name: &str) -> Option<&[Spell]> {
        self.books
            .iter()
            .find(|(id, _)| id == name)
            .map(|(_, spells)| spells.as_slice())
    }

    /// Returns the number of loaded spellbooks.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Returns true if no spellbooks are loaded.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// Loader for spellbook catalogs from RON files.
pub struct SpellbookLoader;

impl SpellbookLoader {
    /// Parse a spellbook catalog from RON text.
    ///
    /// RON format: `Vec<(String, Vec<Spell>)>`.
    pub fn parse(text: &str) -> LoadResult<Spellbooks> {
        let books: Vec<(String, Vec<Spell>)> = ron::from_str(text)
            .map_err(|e| anyhow::anyhow!("Failed to parse spellbook catalog RON: {}", e))?;

        for (i, (name, spells)) in books.iter().enumerate() {
            if spells.len() > BattleConfig::MAX_SPELLS {
                return Err(anyhow::anyhow!(
                    "Spellbook '{}' holds {} spells, combatants carry at most {}",
                    name,
                    spells.len(),
                    BattleConfig::MAX_SPELLS
                ));
            }
            if books[..i].iter().any(|(earlier, _)| earlier == name) {
                return Err(anyhow::anyhow!("Spellbook '{}' is defined twice", name));
            }
        }

        Ok(Spellbooks { books })
    }

    /// Load a spellbook catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Spellbooks> {
        Self::parse(&read_file(path)?)
    }
}
