pub mod ingredients;
pub mod recipe;

pub use recipe::{parse_recipe_id, ExistingRecipe, NewRecipe, Recipe, RecipeDraft};
