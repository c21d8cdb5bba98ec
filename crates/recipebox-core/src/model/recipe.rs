use serde::{Deserialize, Serialize};

use crate::errors::{RecipeError, Result};

/// Recipe - a persisted recipe row
///
/// Values of this type always carry the storage-assigned identifier. Callers
/// that have not written a recipe yet hold a [`RecipeDraft`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Storage-assigned identifier (SQLite rowid)
    pub id: i64,

    /// Display name, stored as given
    pub name: String,

    /// Ingredients in the order they were entered
    pub ingredients: Vec<String>,
}

impl Recipe {
    pub fn new(id: i64, name: impl Into<String>, ingredients: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ingredients,
        }
    }
}

/// A recipe that has never been written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
}

impl NewRecipe {
    pub fn new(name: impl Into<String>, ingredients: Vec<String>) -> Self {
        Self {
            name: name.into(),
            ingredients,
        }
    }

    /// Attach the identifier assigned by storage
    pub fn into_recipe(self, id: i64) -> Recipe {
        Recipe {
            id,
            name: self.name,
            ingredients: self.ingredients,
        }
    }
}

/// A recipe whose row already exists and is being rewritten
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingRecipe {
    pub id: i64,
    pub name: String,
    pub ingredients: Vec<String>,
}

impl ExistingRecipe {
    pub fn new(id: i64, name: impl Into<String>, ingredients: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ingredients,
        }
    }

    pub fn into_recipe(self) -> Recipe {
        Recipe {
            id: self.id,
            name: self.name,
            ingredients: self.ingredients,
        }
    }
}

impl From<Recipe> for ExistingRecipe {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            ingredients: recipe.ingredients,
        }
    }
}

/// Candidate recipe handed to the upsert coordinator
///
/// The variant decides the write path: `New` inserts a row and receives a
/// fresh identifier, `Existing` rewrites the row with the given identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeDraft {
    New(NewRecipe),
    Existing(ExistingRecipe),
}

impl RecipeDraft {
    /// Build a draft from the wire shape, where an absent id means "create"
    pub fn from_parts(id: Option<i64>, name: impl Into<String>, ingredients: Vec<String>) -> Self {
        match id {
            Some(id) => RecipeDraft::Existing(ExistingRecipe::new(id, name, ingredients)),
            None => RecipeDraft::New(NewRecipe::new(name, ingredients)),
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            RecipeDraft::New(_) => None,
            RecipeDraft::Existing(r) => Some(r.id),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            RecipeDraft::New(r) => &r.name,
            RecipeDraft::Existing(r) => &r.name,
        }
    }

    pub fn ingredients(&self) -> &[String] {
        match self {
            RecipeDraft::New(r) => &r.ingredients,
            RecipeDraft::Existing(r) => &r.ingredients,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, RecipeDraft::New(_))
    }
}

impl From<NewRecipe> for RecipeDraft {
    fn from(recipe: NewRecipe) -> Self {
        RecipeDraft::New(recipe)
    }
}

impl From<ExistingRecipe> for RecipeDraft {
    fn from(recipe: ExistingRecipe) -> Self {
        RecipeDraft::Existing(recipe)
    }
}

/// Parse an optional recipe id from a form value
///
/// Blank input means "no id". Anything else must be a positive integer.
pub fn parse_recipe_id(raw: &str) -> Result<Option<i64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let id: i64 = trimmed.parse().map_err(|_| RecipeError::InvalidRecipeId {
        reason: format!("'{}' is not an integer", trimmed),
    })?;

    if id <= 0 {
        return Err(RecipeError::InvalidRecipeId {
            reason: format!("{} is not a storage-assigned id", id),
        });
    }

    Ok(Some(id))
}
