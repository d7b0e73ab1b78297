//! Monster catalog loader.
//!
//! Loads monster templates from RON files and instantiates them into
//! [`Combatant`]s at encounter setup.

use std::path::Path;

use battle_core::{
    Archetype, BattleConfig, CombatStats, Combatant, CombatantId, CombatantKind, MonsterTraits,
    RangedProfile, Side, Size, Spell, SpecialAbility,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file, spellbooks::Spellbooks};

/// Everything needed to stamp out one kind of monster.
///
/// Innate traits are flat booleans here so catalog files stay readable; they
/// collapse into [`MonsterTraits`] when the template is instantiated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub archetype: Archetype,
    pub hp: u32,
    pub ap: u32,
    pub movement: u32,
    #[serde(default)]
    pub stats: CombatStats,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub incorporeal: bool,
    #[serde(default)]
    pub fearless: bool,
    #[serde(default)]
    pub abilities: Vec<SpecialAbility>,
    /// Inline spells. When non-empty, they win over `spellbook`.
    #[serde(default)]
    pub spells: Vec<Spell>,
    /// Named spellbook to resolve from the spellbook catalog.
    #[serde(default)]
    pub spellbook: Option<String>,
    #[serde(default)]
    pub ranged: Option<RangedProfile>,
}

impl MonsterTemplate {
    /// Builds a fielded-ready combatant from this template.
    ///
    /// The combatant comes back `Removed`; placing it on the grid stays with
    /// the caller.
    pub fn instantiate(&self, id: CombatantId, name: impl Into<String>) -> Combatant {
        let mut traits = MonsterTraits::empty();
        traits.set(MonsterTraits::INCORPOREAL, self.incorporeal);
        traits.set(MonsterTraits::FEARLESS, self.fearless);

        let mut combatant =
            Combatant::new(id, name, Side::Monsters, CombatantKind::Monster(self.archetype))
                .with_hp(self.hp)
                .with_ap(self.ap)
                .with_movement(self.movement)
                .with_stats(self.stats)
                .with_size(self.size)
                .with_traits(traits)
                .with_abilities(self.abilities.iter().copied())
                .with_spells(self.spells.iter().cloned());
        if let Some(profile) = self.ranged {
            combatant = combatant.with_ranged(profile);
        }
        combatant
    }
}

/// Loader for monster catalogs from RON files.
pub struct MonsterLoader;

impl MonsterLoader {
    /// Parse a monster catalog from RON text.
    ///
    /// RON format: `Vec<(String, MonsterTemplate)>`.
    ///
    /// # Spellbook resolution
    ///
    /// - Non-empty inline `spells`: used directly (`spellbook` ignored)
    /// - `spellbook: Some(name)`: resolved from `books`, unknown names fail
    /// - Neither: the monster casts nothing
    pub fn parse(text: &str, books: &Spellbooks) -> LoadResult<Vec<(String, MonsterTemplate)>> {
        let raw: Vec<(String, MonsterTemplate)> = ron::from_str(text)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster catalog RON: {}", e))?;

        let mut catalog = Vec::new();
        for (monster_id, mut template) in raw {
            if template.hp == 0 {
                return Err(anyhow::anyhow!("Monster '{}' has zero hit points", monster_id));
            }
            if template.ap == 0 {
                return Err(anyhow::anyhow!("Monster '{}' has zero action points", monster_id));
            }
            if template.abilities.len() > BattleConfig::MAX_ABILITIES {
                return Err(anyhow::anyhow!(
                    "Monster '{}' carries {} abilities, the cap is {}",
                    monster_id,
                    template.abilities.len(),
                    BattleConfig::MAX_ABILITIES
                ));
            }

            if template.spells.is_empty()
                && let Some(book) = &template.spellbook
            {
                let spells = books.get(book).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Monster '{}' references unknown spellbook '{}'",
                        monster_id,
                        book
                    )
                })?;
                template.spells = spells.to_vec();
            }
            if template.spells.len() > BattleConfig::MAX_SPELLS {
                return Err(anyhow::anyhow!(
                    "Monster '{}' ends up with {} spells, the cap is {}",
                    monster_id,
                    template.spells.len(),
                    BattleConfig::MAX_SPELLS
                ));
            }

            catalog.push((monster_id, template));
        }

        Ok(catalog)
    }

    /// Load a monster catalog from a RON file.
    pub fn load(path: &Path, books: &Spellbooks) -> LoadResult<Vec<(String, MonsterTemplate)>> {
        Self::parse(&read_file(path)?, books)
    }
}

/// The bestiary shipped with the engine, one entry per archetype.
pub fn builtin_catalog() -> LoadResult<Vec<(String, MonsterTemplate)>> {
    let books = crate::loaders::SpellbookLoader::parse(include_str!("../../data/spellbooks.ron"))?;
    MonsterLoader::parse(include_str!("../../data/monsters.ron"), &books)
}
