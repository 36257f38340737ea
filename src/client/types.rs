//! Wire payloads returned by the recipe service and their mapping into
//! [`crate::model`] records.

use serde::{Deserialize, Deserializer};

use crate::model::{
    ExtendedIngredient, InstructionStep, Instructions, Measure, RecipeDetail, RecipeId,
    RecipeSummary, UntrustedMarkup,
};

/// Treats an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SummaryPayload {
    pub id: RecipeId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub used_ingredient_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missed_ingredient_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub used_ingredients: Vec<NamedIngredient>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missed_ingredients: Vec<NamedIngredient>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NamedIngredient {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DetailPayload {
    pub id: RecipeId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ready_in_minutes: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub servings: u32,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extended_ingredients: Vec<ExtendedIngredientPayload>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub analyzed_instructions: Vec<InstructionSetPayload>,
    #[serde(default)]
    pub instructions: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExtendedIngredientPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub measures: MeasuresPayload,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MeasuresPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub us: MeasurePayload,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metric: MeasurePayload,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MeasurePayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit_short: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InstructionSetPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<StepPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StepPayload {
    pub number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub step: String,
}

impl From<SummaryPayload> for RecipeSummary {
    fn from(payload: SummaryPayload) -> Self {
        RecipeSummary {
            id: payload.id,
            title: payload.title,
            image: payload.image.unwrap_or_default(),
            used_ingredient_count: payload.used_ingredient_count,
            missed_ingredient_count: payload.missed_ingredient_count,
            used_ingredients: payload.used_ingredients.into_iter().map(|i| i.name).collect(),
            missed_ingredients: payload
                .missed_ingredients
                .into_iter()
                .map(|i| i.name)
                .collect(),
        }
    }
}

impl From<MeasurePayload> for Measure {
    fn from(payload: MeasurePayload) -> Self {
        Measure {
            amount: payload.amount,
            unit: payload.unit_short,
        }
    }
}

impl From<ExtendedIngredientPayload> for ExtendedIngredient {
    fn from(payload: ExtendedIngredientPayload) -> Self {
        ExtendedIngredient {
            name: payload.name,
            us: payload.measures.us.into(),
            metric: payload.measures.metric.into(),
        }
    }
}

impl From<DetailPayload> for RecipeDetail {
    fn from(payload: DetailPayload) -> Self {
        // Only the first structured set is shown; the free-text field is the
        // fallback when the service did not analyze the instructions
        let instructions = match payload.analyzed_instructions.into_iter().next() {
            Some(set) => Instructions::Steps(
                set.steps
                    .into_iter()
                    .map(|s| InstructionStep {
                        number: s.number,
                        step: s.step,
                    })
                    .collect(),
            ),
            None => Instructions::Markup(UntrustedMarkup::new(
                payload.instructions.unwrap_or_default(),
            )),
        };

        RecipeDetail {
            id: payload.id,
            title: payload.title,
            image: payload.image.unwrap_or_default(),
            ready_in_minutes: payload.ready_in_minutes,
            servings: payload.servings,
            summary: UntrustedMarkup::new(payload.summary.unwrap_or_default()),
            ingredients: payload
                .extended_ingredients
                .into_iter()
                .map(ExtendedIngredient::from)
                .collect(),
            instructions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_mapping() {
        let json = r#"{
            "id": 42,
            "title": "Chicken Fried Rice",
            "image": "https://img.spoonacular.com/recipes/42-312x231.jpg",
            "imageType": "jpg",
            "usedIngredientCount": 2,
            "missedIngredientCount": 3,
            "usedIngredients": [{"id": 1, "name": "chicken", "amount": 1.0}, {"name": "rice"}],
            "missedIngredients": [{"name": "soy sauce"}, {"name": "egg"}, {"name": "peas"}],
            "likes": 10
        }"#;

        let payload: SummaryPayload = serde_json::from_str(json).unwrap();
        let summary = RecipeSummary::from(payload);
        assert_eq!(summary.id, 42);
        assert_eq!(summary.title, "Chicken Fried Rice");
        assert_eq!(summary.used_ingredient_count, 2);
        assert_eq!(summary.missed_ingredient_count, 3);
        assert_eq!(summary.used_ingredients, vec!["chicken", "rice"]);
        assert_eq!(summary.missed_ingredients, vec!["soy sauce", "egg", "peas"]);
    }

    #[test]
    fn test_summary_missing_lists_default_to_empty() {
        let payload: SummaryPayload =
            serde_json::from_str(r#"{"id": 7, "title": "Toast"}"#).unwrap();
        let summary = RecipeSummary::from(payload);
        assert!(summary.used_ingredients.is_empty());
        assert!(summary.missed_ingredients.is_empty());
        assert_eq!(summary.image, "");
    }

    #[test]
    fn test_detail_prefers_structured_steps() {
        let json = r#"{
            "id": 42,
            "title": "X",
            "image": "https://example.com/42.jpg",
            "readyInMinutes": 25,
            "servings": 4,
            "summary": "<b>Tasty</b>",
            "extendedIngredients": [
                {"name": "rice", "measures": {
                    "us": {"amount": 2.0, "unitShort": "cups", "unitLong": "cups"},
                    "metric": {"amount": 370.0, "unitShort": "g", "unitLong": "grams"}
                }}
            ],
            "analyzedInstructions": [
                {"name": "", "steps": [{"number": 1, "step": "Boil rice."}, {"number": 2, "step": "Fry."}]},
                {"name": "Sauce", "steps": [{"number": 1, "step": "Ignored."}]}
            ],
            "instructions": "<ol><li>Boil rice.</li></ol>"
        }"#;

        let payload: DetailPayload = serde_json::from_str(json).unwrap();
        let detail = RecipeDetail::from(payload);
        assert_eq!(detail.title, "X");
        assert_eq!(detail.ready_in_minutes, 25);
        assert_eq!(detail.servings, 4);
        assert_eq!(detail.summary.as_untrusted_str(), "<b>Tasty</b>");
        assert_eq!(detail.ingredients.len(), 1);
        assert_eq!(detail.ingredients[0].us.unit, "cups");
        assert_eq!(detail.ingredients[0].metric.amount, 370.0);
        match detail.instructions {
            Instructions::Steps(steps) => {
                assert_eq!(steps.len(), 2);
                assert_eq!(steps[0].number, 1);
                assert_eq!(steps[1].step, "Fry.");
            }
            other => panic!("Expected steps, got {:?}", other),
        }
    }

    #[test]
    fn test_detail_falls_back_to_free_text() {
        let json = r#"{
            "id": 9,
            "title": "Soup",
            "analyzedInstructions": [],
            "instructions": "<p>Simmer everything.</p>"
        }"#;

        let detail = RecipeDetail::from(serde_json::from_str::<DetailPayload>(json).unwrap());
        assert_eq!(
            detail.instructions,
            Instructions::Markup(UntrustedMarkup::new("<p>Simmer everything.</p>"))
        );
    }

    #[test]
    fn test_detail_null_fields_default() {
        let json = r#"{"id": 3, "title": "Plain", "image": null, "summary": null, "instructions": null}"#;
        let detail = RecipeDetail::from(serde_json::from_str::<DetailPayload>(json).unwrap());
        assert_eq!(detail.image, "");
        assert!(detail.summary.is_empty());
        assert_eq!(detail.instructions, Instructions::default());
    }

    #[test]
    fn test_detail_null_scalars_default() {
        let json = r#"{
            "id": 5,
            "title": null,
            "readyInMinutes": null,
            "servings": null,
            "extendedIngredients": [
                {"name": null, "measures": {"us": {"amount": null, "unitShort": null}, "metric": null}}
            ],
            "analyzedInstructions": null
        }"#;

        let detail = RecipeDetail::from(serde_json::from_str::<DetailPayload>(json).unwrap());
        assert_eq!(detail.id, 5);
        assert_eq!(detail.title, "");
        assert_eq!(detail.ready_in_minutes, 0);
        assert_eq!(detail.servings, 0);
        assert_eq!(detail.ingredients.len(), 1);
        assert_eq!(detail.ingredients[0].us.amount, 0.0);
        assert_eq!(detail.ingredients[0].metric.unit, "");
        assert_eq!(detail.instructions, Instructions::default());
    }

    #[test]
    fn test_summary_null_counts_default() {
        let json = r#"{"id": 8, "title": "Toast", "usedIngredientCount": null,
                       "missedIngredientCount": null, "usedIngredients": null}"#;
        let summary = RecipeSummary::from(serde_json::from_str::<SummaryPayload>(json).unwrap());
        assert_eq!(summary.used_ingredient_count, 0);
        assert_eq!(summary.missed_ingredient_count, 0);
        assert!(summary.used_ingredients.is_empty());
    }
}
