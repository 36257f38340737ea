use std::fmt;

use html_escape::encode_text;
use scraper::Html;
use serde::{Deserialize, Serialize};

/// Identifier the recipe service assigns to a recipe
pub type RecipeId = u64;

/// Text supplied by the recipe service that may contain HTML.
///
/// The raw value is only reachable through [`UntrustedMarkup::as_untrusted_str`];
/// anything that renders it should go through [`UntrustedMarkup::to_plain_text`]
/// or [`UntrustedMarkup::to_escaped_html`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UntrustedMarkup(String);

impl UntrustedMarkup {
    pub fn new(raw: impl Into<String>) -> Self {
        UntrustedMarkup(raw.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The markup exactly as the service sent it
    pub fn as_untrusted_str(&self) -> &str {
        &self.0
    }

    /// Text content with all tags removed and entities decoded
    pub fn to_plain_text(&self) -> String {
        let fragment = Html::parse_fragment(&self.0);
        let mut text = String::new();
        for node in fragment.root_element().descendants() {
            let Some(chunk) = node.value().as_text() else {
                continue;
            };
            // script and style bodies are not content
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| matches!(el.name(), "script" | "style"))
            });
            if !hidden {
                text.push_str(chunk);
            }
        }
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// The markup escaped so it renders as literal text inside HTML
    pub fn to_escaped_html(&self) -> String {
        encode_text(&self.0).into_owned()
    }
}

/// Lightweight search result describing how well a recipe matches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub title: String,
    pub image: String,
    /// Number of the user's ingredients the recipe uses
    pub used_ingredient_count: u32,
    /// Number of additional ingredients the recipe needs
    pub missed_ingredient_count: u32,
    pub used_ingredients: Vec<String>,
    pub missed_ingredients: Vec<String>,
}

/// Which set of measurements to show for an ingredient
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureSystem {
    #[default]
    Us,
    Metric,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Measure {
    pub amount: f64,
    pub unit: String,
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Trim float noise such as 0.33333334 down to two decimals
        let rounded = (self.amount * 100.0).round() / 100.0;
        if self.unit.is_empty() {
            write!(f, "{}", rounded)
        } else {
            write!(f, "{} {}", rounded, self.unit)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtendedIngredient {
    pub name: String,
    pub us: Measure,
    pub metric: Measure,
}

impl ExtendedIngredient {
    pub fn measure(&self, system: MeasureSystem) -> &Measure {
        match system {
            MeasureSystem::Us => &self.us,
            MeasureSystem::Metric => &self.metric,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionStep {
    pub number: u32,
    pub step: String,
}

/// How a recipe's preparation is described
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Instructions {
    /// Numbered steps from the first structured instruction set
    Steps(Vec<InstructionStep>),
    /// Free-text fallback when no structured set exists (may be empty)
    Markup(UntrustedMarkup),
}

impl Default for Instructions {
    fn default() -> Self {
        Instructions::Markup(UntrustedMarkup::default())
    }
}

/// Full record for a single recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeDetail {
    pub id: RecipeId,
    pub title: String,
    pub image: String,
    pub ready_in_minutes: u32,
    pub servings: u32,
    pub summary: UntrustedMarkup,
    pub ingredients: Vec<ExtendedIngredient>,
    pub instructions: Instructions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_strips_tags_and_entities() {
        let markup = UntrustedMarkup::new(
            "<b>Pasta</b> takes about <a href=\"x\">30 minutes</a> &amp; serves 4.<script>alert(1)</script>",
        );
        let text = markup.to_plain_text();
        assert_eq!(text, "Pasta takes about 30 minutes & serves 4.");
    }

    #[test]
    fn test_escaped_html() {
        let markup = UntrustedMarkup::new("<img src=x onerror=alert(1)>");
        let escaped = markup.to_escaped_html();
        assert!(!escaped.contains('<'));
        assert!(escaped.contains("&lt;img"));
    }

    #[test]
    fn test_blank_markup_is_empty() {
        assert!(UntrustedMarkup::new("  \n").is_empty());
        assert!(!UntrustedMarkup::new("<p>x</p>").is_empty());
    }

    #[test]
    fn test_measure_display() {
        let measure = Measure {
            amount: 0.333333,
            unit: "cups".to_string(),
        };
        assert_eq!(measure.to_string(), "0.33 cups");

        let bare = Measure {
            amount: 2.0,
            unit: String::new(),
        };
        assert_eq!(bare.to_string(), "2");
    }

    #[test]
    fn test_measure_system_selection() {
        let ingredient = ExtendedIngredient {
            name: "flour".to_string(),
            us: Measure {
                amount: 1.0,
                unit: "cup".to_string(),
            },
            metric: Measure {
                amount: 125.0,
                unit: "g".to_string(),
            },
        };
        assert_eq!(ingredient.measure(MeasureSystem::Us).unit, "cup");
        assert_eq!(ingredient.measure(MeasureSystem::Metric).unit, "g");
    }
}
