//! Prompt builders for the feature flows
//!
//! Feature callers contribute only a prompt and a shape descriptor.
//! These builders produce the instruction text; the schema skeleton in
//! each prompt mirrors the feature's [`crate::shape::Shape`].

/// Templates for generating prompts for each feature flow
pub struct PromptTemplate;

const MEAL_SCHEMA: &str = r#"{
  "foodName": string,
  "description": string,
  "quantity": string,
  "isVegetarian": boolean,
  "nutritionInfo": {"calories": number, "protein": number, "carbs": number, "fat": number, "fiber": number, "sugar": number},
  "itemBreakdown": {"totalItems": number, "items": [{"name": string, "quantity": string, "nutrition": {"calories": number, "protein": number, "carbs": number, "fat": number, "fiber": number, "sugar": number}}]}
}"#;

impl PromptTemplate {
    /// Prompt for analyzing a meal described in free text
    pub fn meal_text(description: &str) -> String {
        format!(
            "Analyze the following meal and estimate its nutrition.\n\
             Meal: {description}\n\n\
             Itemize each distinct food with its own quantity and nutrition.\n\
             Respond with only a JSON object in exactly this structure, no prose:\n{MEAL_SCHEMA}"
        )
    }

    /// Prompt accompanying a meal photo
    pub fn meal_image() -> String {
        format!(
            "Identify the food in this image and estimate its nutrition.\n\
             Itemize each distinct food with its own quantity and nutrition.\n\
             Respond with only a JSON object in exactly this structure, no prose:\n{MEAL_SCHEMA}"
        )
    }

    /// Prompt for generating a workout plan
    pub fn workout(goal: &str, level: &str, days_per_week: u32) -> String {
        format!(
            "Create a {days_per_week}-day-per-week workout plan.\n\
             Goal: {goal}\n\
             Experience level: {level}\n\n\
             Respond with only a JSON object in exactly this structure, no prose:\n\
             {{\n  \"planName\": string,\n  \"description\": string,\n  \"daysPerWeek\": number,\n  \
             \"days\": [{{\"day\": string, \"focus\": string, \"exercises\": \
             [{{\"name\": string, \"sets\": number, \"reps\": string, \"restSeconds\": number, \"instructions\": string}}]}}]\n}}"
        )
    }
}
