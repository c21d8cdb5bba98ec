//! Ingredient list codec
//!
//! Ingredients are stored in a single text column, joined with `|`.
//! The format cannot represent an element that contains the separator, nor
//! an empty element (it would vanish or merge on decode), so `encode`
//! refuses such lists instead of writing something that reads back differently.

use crate::errors::{RecipeError, Result};

/// Separator between ingredients in the stored column
pub const SEPARATOR: char = '|';

/// Join ingredients into the stored column value
pub fn encode(ingredients: &[String]) -> Result<String> {
    for (index, item) in ingredients.iter().enumerate() {
        if item.is_empty() {
            return Err(RecipeError::IngredientNotEncodable {
                index,
                reason: "empty ingredient".to_string(),
            });
        }
        if item.contains(SEPARATOR) {
            return Err(RecipeError::IngredientNotEncodable {
                index,
                reason: format!("contains separator '{}'", SEPARATOR),
            });
        }
    }

    let mut buf = String::new();
    for (i, item) in ingredients.iter().enumerate() {
        if i > 0 {
            buf.push(SEPARATOR);
        }
        buf.push_str(item);
    }
    Ok(buf)
}

/// Split a stored column value back into ingredients
///
/// The empty string is the empty list.
pub fn decode(stored: &str) -> Vec<String> {
    if stored.is_empty() {
        return Vec::new();
    }
    stored.split(SEPARATOR).map(str::to_string).collect()
}

/// Split free-form user input on `|`, trimming whitespace and dropping blanks
pub fn split_input(raw: &str) -> Vec<String> {
    raw.split(SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
