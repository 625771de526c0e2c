// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Codex API Contributors

//! # API Data Models
//!
//! Request and response data structures for the catalogue API. All types
//! derive `Serialize`, `Deserialize`, and `ToSchema` for JSON handling and
//! OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Characters**: catalogue entries referencing a species and a gender
//! - **Species / Genders**: lookup collections referenced by characters
//!
//! A character's `species` and `gender` fields hold ids into the lookup
//! collections. A reference to a deleted entry is allowed and renders as
//! `null` in the joined [`CharacterView`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Character Models
// =============================================================================

/// A catalogue character as stored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Character {
    /// Unique identifier for this character.
    pub id: i64,
    /// Character name.
    pub name: String,
    /// Id of the character's species.
    pub species: i64,
    /// Id of the character's gender.
    pub gender: i64,
    /// Character class (e.g. "Vanguard").
    pub class: String,
}

/// A character with its species and gender references resolved.
///
/// Returned by the list endpoint. An unresolvable reference is `null`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CharacterView {
    pub id: i64,
    pub name: String,
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<SpeciesRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<GenderRef>,
}

/// A resolved species reference inside a [`CharacterView`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SpeciesRef {
    pub id: i64,
    pub name: String,
    /// Link to the species resource on this API.
    pub url: String,
}

/// A resolved gender reference inside a [`CharacterView`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct GenderRef {
    pub id: i64,
    pub name: String,
    /// Link to the gender resource on this API.
    pub url: String,
}

/// Request to create a new character.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCharacterRequest {
    pub name: String,
    pub species: i64,
    pub gender: i64,
    pub class: String,
}

/// Request to replace an existing character.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateCharacterRequest {
    pub name: String,
    pub species: i64,
    pub gender: i64,
    pub class: String,
}

// =============================================================================
// Species Models
// =============================================================================

/// A species lookup entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Species {
    pub id: i64,
    pub name: String,
}

/// Request to create a new species.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateSpeciesRequest {
    pub name: String,
}

// =============================================================================
// Gender Models
// =============================================================================

/// A gender lookup entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Gender {
    pub id: i64,
    pub name: String,
}

/// Request to create a new gender.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateGenderRequest {
    pub name: String,
}

/// Request to rename an existing gender.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateGenderRequest {
    pub name: String,
}
