use crate::outfit::Conditions;

fn wardrobe_line(items: &[String]) -> String {
    items.join(", ")
}

fn inputs_block(c: &Conditions, items: &[String]) -> String {
    format!(
"- Weather: {weather}
- Season: {season}
- Mood: {mood}
- Event: {event}
- Style Preference: {style}
- Color Preference: {color}
- Wardrobe: {wardrobe}",
weather = c.weather,
season = c.season,
mood = c.mood,
event = c.event,
style = c.style,
color = c.color,
wardrobe = wardrobe_line(items),
)
}

/// First-pass prompt: pick an outfit from the wardrobe for the given conditions.
///
/// Item text is embedded as-is; nothing is escaped.
pub fn build_initial_prompt(conditions: &Conditions, items: &[String]) -> String {
    format!(
r#"You are an expert fashion stylist with a keen eye for creativity and trends. Based on the following:
{inputs}

Suggest a complete, stylish outfit from the wardrobe, including accessories (e.g., scarves, hats, belts, jewelry) suitable for the weather, season, and event.
Ensure the outfit matches the user's mood, style, and color preferences.
Provide a creative description of how the outfit looks together, including color coordination and styling tips.
Format the response in markdown with sections:
- **Outfit**: List the selected items with emojis (e.g., 👖 for pants, 👕 for shirt).
- **Visual Preview**: A creative text-based representation of the outfit.
- **Explanation**: Why this outfit suits the weather, season, mood, event, style, and colors.
- **Styling Tips**: Tips to enhance the look (e.g., how to accessorize or style hair).
"#,
inputs = inputs_block(conditions, items),
)
}

/// Follow-up prompt: revise the outfit according to the user's feedback.
pub fn build_refinement_prompt(conditions: &Conditions, items: &[String], feedback: &str) -> String {
    format!(
r#"You are a fashion stylist refining an outfit based on user feedback. Original inputs:
{inputs}
- User Feedback: {feedback}

Suggest a revised outfit that addresses the feedback while staying true to the original inputs.
Format the response in markdown with sections: Outfit, Visual Preview, Explanation, and Styling Tips.
"#,
inputs = inputs_block(conditions, items),
feedback = feedback,
)
}
