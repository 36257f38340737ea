use std::fmt;
use std::ops::Deref;

use log::debug;

/// A trimmed, non-empty ingredient name typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient(String);

impl Ingredient {
    /// Trims `text`, returning `None` when nothing is left
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Ingredient(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Ingredient {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered list of ingredients plus the text currently being typed.
///
/// Order is insertion order and duplicates are kept. The collection only
/// changes through [`add`](Self::add), [`submit_input`](Self::submit_input)
/// and [`remove`](Self::remove).
#[derive(Debug, Clone, Default)]
pub struct IngredientCollection {
    items: Vec<Ingredient>,
    input: String,
}

impl IngredientCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text` if it is not blank and clears the pending input.
    ///
    /// Returns whether an ingredient was added. Blank text is ignored
    /// without touching the input buffer.
    pub fn add(&mut self, text: &str) -> bool {
        match Ingredient::parse(text) {
            Some(ingredient) => {
                debug!("Adding ingredient '{}'", ingredient);
                self.items.push(ingredient);
                self.input.clear();
                true
            }
            None => false,
        }
    }

    /// Replaces the pending input buffer
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether the pending input would produce an ingredient
    pub fn can_add(&self) -> bool {
        !self.input.trim().is_empty()
    }

    /// Adds the pending input as an ingredient
    pub fn submit_input(&mut self) -> bool {
        let input = std::mem::take(&mut self.input);
        let added = self.add(&input);
        if !added {
            self.input = input;
        }
        added
    }

    /// Removes and returns the ingredient at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds. Callers only offer removal for
    /// ingredients that are listed.
    pub fn remove(&mut self, index: usize) -> Ingredient {
        let removed = self.items.remove(index);
        debug!("Removed ingredient '{}' at {}", removed, index);
        removed
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Ingredient> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Ingredient] {
        &self.items
    }

    /// Ingredient names in insertion order, comma separated
    pub fn joined(&self) -> String {
        self.items
            .iter()
            .map(Ingredient::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl<'a> IntoIterator for &'a IngredientCollection {
    type Item = &'a Ingredient;
    type IntoIter = std::slice::Iter<'a, Ingredient>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
