//! # Filter Engine
//!
//! Narrows a character list down to what the user asked to see.
//!
//! A [`FilterSelection`] combines a name search with four category choices
//! (favorites scope, species, status, gender). Every predicate must hold for
//! a character to stay in the list, and the result keeps the input order.
//!
//! Category edits are two-phase. [`FilterState`] holds a `pending` selection
//! that the filter UI edits freely and an `applied` selection that the list
//! actually uses; [`FilterState::commit`] copies one onto the other. The
//! search text is the exception: it filters as you type, so it is written to
//! both copies at once.
//!
//! Soft-deleted characters are removed by [`visible`] after filtering,
//! whatever the selection says.

use crate::error::DexError;
use crate::model::Character;
use crate::store::membership::MembershipStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generates a category enum whose first variant is the `all` wildcard and
/// whose other variants carry the exact catalog value they match.
macro_rules! category {
    ($(#[$meta:meta])* $name:ident, label = $label:literal { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub enum $name {
            #[default]
            #[serde(rename = "all")]
            All,
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every choice, `all` first, in menu order.
            pub const CHOICES: &'static [$name] = &[$name::All, $($name::$variant),+];

            /// The catalog value this choice matches, `None` for `all`.
            pub fn value(&self) -> Option<&'static str> {
                match self {
                    $name::All => None,
                    $($name::$variant => Some($value),)+
                }
            }

            pub fn as_str(&self) -> &'static str {
                self.value().unwrap_or("all")
            }

            pub fn is_all(&self) -> bool {
                matches!(self, $name::All)
            }

            fn matches(&self, field: &str) -> bool {
                self.value().map_or(true, |value| value == field)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::CHOICES
                    .iter()
                    .find(|choice| choice.as_str().eq_ignore_ascii_case(s.trim()))
                    .copied()
                    .ok_or_else(|| {
                        let options: Vec<&str> = Self::CHOICES.iter().map(|c| c.as_str()).collect();
                        DexError::Validation(format!(
                            "Unknown {} filter '{}' (expected one of: {})",
                            $label,
                            s,
                            options.join(", ")
                        ))
                    })
            }
        }
    };
}

category!(
    /// Which side of the favorites set to show.
    MembershipScope, label = "character" {
        Starred => "starred",
        Others => "others",
    }
);

category!(SpeciesFilter, label = "species" {
    Human => "Human",
    Alien => "Alien",
});

category!(StatusFilter, label = "status" {
    Alive => "Alive",
    Dead => "Dead",
    Unknown => "unknown",
});

category!(GenderFilter, label = "gender" {
    Male => "Male",
    Female => "Female",
    Genderless => "Genderless",
    Unknown => "unknown",
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub scope: MembershipScope,
    pub species: SpeciesFilter,
    pub status: StatusFilter,
    pub gender: GenderFilter,
    pub search: String,
}

impl FilterSelection {
    /// True when any category is narrowed. Search text does not count.
    pub fn has_active_filters(&self) -> bool {
        !(self.scope.is_all()
            && self.species.is_all()
            && self.status.is_all()
            && self.gender.is_all())
    }

    /// Whether `character` passes every predicate.
    pub fn matches(&self, character: &Character, favorites: &MembershipStore) -> bool {
        let matches_search = self.search.is_empty()
            || character
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase());

        let matches_scope = match self.scope {
            MembershipScope::All => true,
            MembershipScope::Starred => favorites.contains(character.id),
            MembershipScope::Others => !favorites.contains(character.id),
        };

        matches_search
            && matches_scope
            && self.species.matches(&character.species)
            && self.status.matches(character.status.as_str())
            && self.gender.matches(character.gender.as_str())
    }

    /// Short human-readable description of the narrowed categories.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if !self.scope.is_all() {
            parts.push(format!("character={}", self.scope));
        }
        if !self.species.is_all() {
            parts.push(format!("species={}", self.species));
        }
        if !self.status.is_all() {
            parts.push(format!("status={}", self.status));
        }
        if !self.gender.is_all() {
            parts.push(format!("gender={}", self.gender));
        }
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// A partial edit of the pending selection. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct FilterEdit {
    pub scope: Option<MembershipScope>,
    pub species: Option<SpeciesFilter>,
    pub status: Option<StatusFilter>,
    pub gender: Option<GenderFilter>,
}

impl FilterEdit {
    pub fn is_empty(&self) -> bool {
        self.scope.is_none()
            && self.species.is_none()
            && self.status.is_none()
            && self.gender.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub pending: FilterSelection,
    pub applied: FilterSelection,
}

impl FilterState {
    pub fn edit(&mut self, edit: &FilterEdit) {
        if let Some(scope) = edit.scope {
            self.pending.scope = scope;
        }
        if let Some(species) = edit.species {
            self.pending.species = species;
        }
        if let Some(status) = edit.status {
            self.pending.status = status;
        }
        if let Some(gender) = edit.gender {
            self.pending.gender = gender;
        }
    }

    pub fn set_search(&mut self, text: &str) {
        self.pending.search = text.to_string();
        self.applied.search = text.to_string();
    }

    /// Make the pending selection the one the list uses.
    pub fn commit(&mut self) {
        self.applied = self.pending.clone();
    }

    /// Reset both selections, search included.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether the filter menu currently has anything narrowed.
    pub fn has_active_filters(&self) -> bool {
        self.pending.has_active_filters()
    }

    /// True when pending edits have not been committed yet.
    pub fn has_uncommitted_changes(&self) -> bool {
        self.pending != self.applied
    }
}

/// Characters passing every predicate of `selection`, in input order.
pub fn apply(
    characters: &[Character],
    selection: &FilterSelection,
    favorites: &MembershipStore,
) -> Vec<Character> {
    characters
        .iter()
        .filter(|c| selection.matches(c, favorites))
        .cloned()
        .collect()
}

/// The primary list: filtered, then stripped of soft-deleted characters.
pub fn visible(
    characters: &[Character],
    selection: &FilterSelection,
    favorites: &MembershipStore,
    deleted: &MembershipStore,
) -> Vec<Character> {
    deleted.filter_non_members(&apply(characters, selection, favorites))
}

/// The deleted view: only soft-deleted characters, in input order.
pub fn deleted_view(characters: &[Character], deleted: &MembershipStore) -> Vec<Character> {
    deleted.filter_members(characters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, Status};
    use crate::store::memory::MemBackend;

    fn rick_and_morty() -> Vec<Character> {
        vec![
            Character::new(1, "Rick", "Human", Status::Alive, Gender::Male),
            Character::new(2, "Morty", "Human", Status::Alive, Gender::Male),
        ]
    }

    fn cast() -> Vec<Character> {
        vec![
            Character::new(1, "Rick Sanchez", "Human", Status::Alive, Gender::Male),
            Character::new(2, "Morty Smith", "Human", Status::Alive, Gender::Male),
            Character::new(3, "Summer Smith", "Human", Status::Alive, Gender::Female),
            Character::new(4, "Birdperson", "Alien", Status::Dead, Gender::Male),
            Character::new(5, "Mr. Poopybutthole", "Poopybutthole", Status::Alive, Gender::Male),
            Character::new(6, "Abadango Cluster Princess", "Alien", Status::Alive, Gender::Female),
            Character::new(7, "Fleeb", "Alien", Status::Unknown, Gender::Genderless),
        ]
    }

    fn ids(list: &[Character]) -> Vec<u32> {
        list.iter().map(|c| c.id).collect()
    }

    #[test]
    fn default_selection_returns_input_unchanged() {
        let backend = MemBackend::new();
        let favorites = MembershipStore::favorites(&backend);
        let list = cast();
        assert_eq!(apply(&list, &FilterSelection::default(), &favorites), list);
    }

    #[test]
    fn starred_scope_keeps_only_favorites() {
        let backend = MemBackend::new();
        let mut favorites = MembershipStore::favorites(&backend);
        favorites.toggle(&backend, 1).unwrap();

        let selection = FilterSelection {
            scope: MembershipScope::Starred,
            ..Default::default()
        };
        let result = apply(&rick_and_morty(), &selection, &favorites);
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn others_scope_excludes_favorites() {
        let backend = MemBackend::new();
        let mut favorites = MembershipStore::favorites(&backend);
        favorites.toggle(&backend, 1).unwrap();
        favorites.toggle(&backend, 4).unwrap();

        let selection = FilterSelection {
            scope: MembershipScope::Others,
            ..Default::default()
        };
        assert_eq!(ids(&apply(&cast(), &selection, &favorites)), vec![2, 3, 5, 6, 7]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let backend = MemBackend::new();
        let favorites = MembershipStore::favorites(&backend);
        let selection = FilterSelection {
            search: "SMITH".into(),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&cast(), &selection, &favorites)), vec![2, 3]);
    }

    #[test]
    fn category_filters_are_exact_and_combined() {
        let backend = MemBackend::new();
        let favorites = MembershipStore::favorites(&backend);

        let aliens = FilterSelection {
            species: SpeciesFilter::Alien,
            ..Default::default()
        };
        assert_eq!(ids(&apply(&cast(), &aliens, &favorites)), vec![4, 6, 7]);

        let living_alien_women = FilterSelection {
            species: SpeciesFilter::Alien,
            status: StatusFilter::Alive,
            gender: GenderFilter::Female,
            ..Default::default()
        };
        assert_eq!(ids(&apply(&cast(), &living_alien_women, &favorites)), vec![6]);

        let unknown_status = FilterSelection {
            status: StatusFilter::Unknown,
            ..Default::default()
        };
        assert_eq!(ids(&apply(&cast(), &unknown_status, &favorites)), vec![7]);
    }

    #[test]
    fn species_match_is_case_sensitive() {
        let backend = MemBackend::new();
        let favorites = MembershipStore::favorites(&backend);
        let list = vec![Character::new(9, "Lowercase", "human", Status::Alive, Gender::Male)];
        let selection = FilterSelection {
            species: SpeciesFilter::Human,
            ..Default::default()
        };
        assert!(apply(&list, &selection, &favorites).is_empty());
    }

    #[test]
    fn soft_deleted_never_visible_even_when_starred() {
        let backend = MemBackend::new();
        let mut favorites = MembershipStore::favorites(&backend);
        let mut deleted = MembershipStore::deleted(&backend);
        favorites.toggle(&backend, 2).unwrap();
        deleted.toggle(&backend, 2).unwrap();

        let starred = FilterSelection {
            scope: MembershipScope::Starred,
            ..Default::default()
        };
        for selection in [FilterSelection::default(), starred] {
            let shown = visible(&cast(), &selection, &favorites, &deleted);
            assert!(!ids(&shown).contains(&2));
        }
        assert_eq!(ids(&deleted_view(&cast(), &deleted)), vec![2]);
    }

    #[test]
    fn active_filters_ignore_search_text() {
        let mut selection = FilterSelection {
            search: "rick".into(),
            ..Default::default()
        };
        assert!(!selection.has_active_filters());
        selection.gender = GenderFilter::Genderless;
        assert!(selection.has_active_filters());
        assert_eq!(selection.describe(), "gender=Genderless");
    }

    #[test]
    fn pending_edits_apply_only_on_commit() {
        let mut state = FilterState::default();
        state.edit(&FilterEdit {
            species: Some(SpeciesFilter::Alien),
            ..Default::default()
        });
        assert!(state.has_active_filters());
        assert!(state.has_uncommitted_changes());
        assert_eq!(state.applied.species, SpeciesFilter::All);

        state.commit();
        assert_eq!(state.applied.species, SpeciesFilter::Alien);
        assert!(!state.has_uncommitted_changes());
    }

    #[test]
    fn search_applies_immediately_and_clear_resets_everything() {
        let mut state = FilterState::default();
        state.set_search("morty");
        assert_eq!(state.applied.search, "morty");

        state.edit(&FilterEdit {
            scope: Some(MembershipScope::Starred),
            ..Default::default()
        });
        state.commit();
        state.clear();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn parses_choices_case_insensitively() {
        assert_eq!("STARRED".parse::<MembershipScope>().unwrap(), MembershipScope::Starred);
        assert_eq!("Unknown".parse::<StatusFilter>().unwrap(), StatusFilter::Unknown);
        assert_eq!("all".parse::<GenderFilter>().unwrap(), GenderFilter::All);
        assert!(matches!(
            "Robot".parse::<SpeciesFilter>(),
            Err(DexError::Validation(_))
        ));
    }

    #[test]
    fn selection_serializes_with_catalog_values() {
        let selection = FilterSelection {
            scope: MembershipScope::Others,
            status: StatusFilter::Unknown,
            ..Default::default()
        };
        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json["scope"], "others");
        assert_eq!(json["status"], "unknown");
        assert_eq!(json["species"], "all");
    }
}
