//! Data-driven battle content and its loaders.
//!
//! This crate turns RON data files into engine-ready definitions:
//! - Monster templates (stats, kit, archetype) via [`MonsterLoader`]
//! - Named spellbooks referenced by templates via [`SpellbookLoader`]
//! - Arena terrain (walls, rough ground, props) via [`ArenaLoader`]
//!
//! Content is consumed once at encounter setup and never appears in battle
//! state. Initial placement of combatants stays with the caller; an arena
//! file describes terrain only.

pub mod loaders;

pub use loaders::{
    ArenaLoader, ArenaSpec, LoadResult, MonsterLoader, MonsterTemplate, SpellbookLoader,
    Spellbooks, builtin_catalog,
};
