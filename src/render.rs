use crate::model::{MealDetail, MealSummary};

/// Shown in place of the grid when a search produced nothing
pub const NO_MEALS_MESSAGE: &str = "No meals found. Try a different ingredient.";

/// One line per meal: id, name and thumbnail
pub fn render_results(meals: &[MealSummary]) -> String {
    if meals.is_empty() {
        return format!("{}\n", NO_MEALS_MESSAGE);
    }

    let id_width = meals.iter().map(|m| m.id.len()).max().unwrap_or(0);
    meals
        .iter()
        .map(|meal| {
            format!(
                "{:>width$}  {}\n{:>width$}  {}\n",
                meal.id,
                meal.name,
                "",
                meal.thumbnail,
                width = id_width
            )
        })
        .collect()
}

/// Instructions split into display lines; the API uses both \r\n and \n
pub fn instruction_lines(instructions: &str) -> Vec<&str> {
    instructions.lines().map(|line| line.trim_end_matches('\r')).collect()
}

/// Full recipe as plain text
pub fn render_detail(meal: &MealDetail) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", meal.name));
    if !meal.thumbnail.is_empty() {
        out.push_str(&format!("Image: {}\n", meal.thumbnail));
    }
    if let Some(category) = &meal.category {
        out.push_str(&format!("Category: {}\n", category));
    }
    if let Some(area) = &meal.area {
        out.push_str(&format!("Area: {}\n", area));
    }
    if !meal.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", meal.tags.join(", ")));
    }
    if let Some(youtube) = &meal.youtube {
        out.push_str(&format!("Video: {}\n", youtube));
    }
    if let Some(source) = &meal.source {
        out.push_str(&format!("Source: {}\n", source));
    }

    out.push_str("\nIngredients:\n");
    for line in meal.ingredient_lines() {
        out.push_str(&format!("  - {}\n", line));
    }

    out.push_str("\nInstructions:\n");
    for line in instruction_lines(&meal.instructions) {
        out.push_str(line);
        out.push('\n');
    }

    out
}
