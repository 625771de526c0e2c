// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Codex API Contributors

//! In-memory catalogue store.
//!
//! Collections are plain `HashMap`s with per-collection id counters, held
//! behind the `RwLock` in [`crate::state::AppState`]. Ids are assigned
//! sequentially starting at 1 and never reused within a process lifetime.

use std::collections::HashMap;

use crate::error::ApiError;
use crate::models::{
    Character, CharacterView, CreateCharacterRequest, CreateGenderRequest, CreateSpeciesRequest,
    Gender, GenderRef, Species, SpeciesRef, UpdateCharacterRequest, UpdateGenderRequest,
};

#[derive(Default)]
pub struct InMemoryStore {
    characters: HashMap<i64, Character>,
    species: HashMap<i64, Species>,
    genders: HashMap<i64, Gender>,
    next_character_id: i64,
    next_species_id: i64,
    next_gender_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Characters
    // -------------------------------------------------------------------------

    /// List all characters with species and gender references resolved.
    ///
    /// A reference to a missing lookup entry resolves to `None`.
    pub fn character_views(&self, base_url: &str) -> Vec<CharacterView> {
        let mut views: Vec<CharacterView> = self
            .characters
            .values()
            .map(|character| CharacterView {
                id: character.id,
                name: character.name.clone(),
                class: character.class.clone(),
                species: self.species.get(&character.species).map(|s| SpeciesRef {
                    id: s.id,
                    name: s.name.clone(),
                    url: format!("{base_url}/api/species/{}", s.id),
                }),
                gender: self.genders.get(&character.gender).map(|g| GenderRef {
                    id: g.id,
                    name: g.name.clone(),
                    url: format!("{base_url}/api/genders/{}", g.id),
                }),
            })
            .collect();
        views.sort_by_key(|view| view.id);
        views
    }

    pub fn character(&self, id: i64) -> Result<Character, ApiError> {
        self.characters
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Character not found"))
    }

    pub fn create_character(&mut self, request: CreateCharacterRequest) -> Character {
        let id = next_id(&mut self.next_character_id);
        let character = Character {
            id,
            name: request.name,
            species: request.species,
            gender: request.gender,
            class: request.class,
        };
        self.characters.insert(id, character.clone());
        character
    }

    pub fn update_character(
        &mut self,
        id: i64,
        request: UpdateCharacterRequest,
    ) -> Result<Character, ApiError> {
        let character = self
            .characters
            .get_mut(&id)
            .ok_or_else(|| ApiError::not_found("Character not found"))?;
        character.name = request.name;
        character.species = request.species;
        character.gender = request.gender;
        character.class = request.class;
        Ok(character.clone())
    }

    pub fn delete_character(&mut self, id: i64) -> Result<(), ApiError> {
        if self.characters.remove(&id).is_some() {
            Ok(())
        } else {
            Err(ApiError::not_found("Character not found"))
        }
    }

    // -------------------------------------------------------------------------
    // Species
    // -------------------------------------------------------------------------

    pub fn list_species(&self) -> Vec<Species> {
        let mut list: Vec<Species> = self.species.values().cloned().collect();
        list.sort_by_key(|species| species.id);
        list
    }

    pub fn species(&self, id: i64) -> Result<Species, ApiError> {
        self.species
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Species not found"))
    }

    pub fn create_species(&mut self, request: CreateSpeciesRequest) -> Species {
        let id = next_id(&mut self.next_species_id);
        let species = Species {
            id,
            name: request.name,
        };
        self.species.insert(id, species.clone());
        species
    }

    pub fn delete_species(&mut self, id: i64) -> Result<(), ApiError> {
        if self.species.remove(&id).is_some() {
            Ok(())
        } else {
            Err(ApiError::not_found("Species not found"))
        }
    }

    // -------------------------------------------------------------------------
    // Genders
    // -------------------------------------------------------------------------

    pub fn list_genders(&self) -> Vec<Gender> {
        let mut list: Vec<Gender> = self.genders.values().cloned().collect();
        list.sort_by_key(|gender| gender.id);
        list
    }

    pub fn gender(&self, id: i64) -> Result<Gender, ApiError> {
        self.genders
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Gender not found"))
    }

    pub fn create_gender(&mut self, request: CreateGenderRequest) -> Gender {
        let id = next_id(&mut self.next_gender_id);
        let gender = Gender {
            id,
            name: request.name,
        };
        self.genders.insert(id, gender.clone());
        gender
    }

    pub fn update_gender(&mut self, id: i64, request: UpdateGenderRequest) -> Result<Gender, ApiError> {
        let gender = self
            .genders
            .get_mut(&id)
            .ok_or_else(|| ApiError::not_found("Gender not found"))?;
        gender.name = request.name;
        Ok(gender.clone())
    }

    pub fn delete_gender(&mut self, id: i64) -> Result<(), ApiError> {
        if self.genders.remove(&id).is_some() {
            Ok(())
        } else {
            Err(ApiError::not_found("Gender not found"))
        }
    }
}
