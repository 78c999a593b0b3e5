use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Number of positional ingredient/measure slots in a lookup record
pub const INGREDIENT_SLOTS: usize = 20;

/// A meal as it appears in the result list of an ingredient search
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MealSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    /// Empty when the API sends no thumbnail or `null`
    #[serde(rename = "strMealThumb", default, deserialize_with = "null_as_empty")]
    pub thumbnail: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One positional (ingredient, measure) slot; either half may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSlot {
    pub ingredient: Option<String>,
    pub measure: Option<String>,
}

impl IngredientSlot {
    /// A slot is used when its ingredient is present and not blank
    pub fn is_used(&self) -> bool {
        self.ingredient
            .as_deref()
            .is_some_and(|ingredient| !ingredient.trim().is_empty())
    }

    /// Display line for a used slot, e.g. "Chicken - 500g"
    pub fn line(&self) -> Option<String> {
        if !self.is_used() {
            return None;
        }
        Some(format!(
            "{} - {}",
            self.ingredient.as_deref().unwrap_or_default(),
            self.measure.as_deref().unwrap_or_default()
        ))
    }
}

/// The full record returned by a lookup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawMealDetail")]
pub struct MealDetail {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    pub instructions: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub tags: Vec<String>,
    pub youtube: Option<String>,
    pub source: Option<String>,
    /// Always `INGREDIENT_SLOTS` long, slot 1 first
    pub slots: Vec<IngredientSlot>,
}

impl MealDetail {
    /// Rendered lines for every used slot, in slot order
    pub fn ingredient_lines(&self) -> Vec<String> {
        self.slots.iter().filter_map(IngredientSlot::line).collect()
    }
}

/// Lookup records spread the ingredient list over numbered fields, so the
/// remainder of the object is kept as a map and folded into slots.
#[derive(Deserialize)]
struct RawMealDetail {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(rename = "strTags", default)]
    tags: Option<String>,
    #[serde(rename = "strYoutube", default)]
    youtube: Option<String>,
    #[serde(rename = "strSource", default)]
    source: Option<String>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl From<RawMealDetail> for MealDetail {
    fn from(raw: RawMealDetail) -> Self {
        let slots = (1..=INGREDIENT_SLOTS)
            .map(|n| IngredientSlot {
                ingredient: string_field(&raw.rest, &format!("strIngredient{}", n)),
                measure: string_field(&raw.rest, &format!("strMeasure{}", n)),
            })
            .collect();

        let tags = raw
            .tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        MealDetail {
            id: raw.id,
            name: raw.name,
            thumbnail: raw.thumbnail.unwrap_or_default(),
            instructions: raw.instructions.unwrap_or_default(),
            category: non_blank(raw.category),
            area: non_blank(raw.area),
            tags,
            youtube: non_blank(raw.youtube),
            source: non_blank(raw.source),
            slots,
        }
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Envelope shared by both endpoints; `meals` is null when nothing matched
#[derive(Debug, Deserialize)]
pub(crate) struct MealsEnvelope<T> {
    pub meals: Option<Vec<T>>,
}

impl<T> MealsEnvelope<T> {
    pub fn into_meals(self) -> Vec<T> {
        self.meals.unwrap_or_default()
    }
}
