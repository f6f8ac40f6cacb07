use serde_json::json;

pub const FOOD_ANALYSIS_PROMPT: &str = "Analyze the food in this image. Identify each distinct food item, estimate its portion size, and calculate the estimated grams of carbohydrates, protein, fat, and total calories for each item. Respond in a JSON array format. Each object in the array should represent a food item and have six keys: \"foodName\", \"size\", \"carbohydrates\", \"protein\", \"fat\", and \"calories\". If no food is identifiable, return an empty array.";

/// Returns the JSON schema for food analysis LLM responses
pub fn get_food_analysis_schema() -> serde_json::Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "foodName": {
                    "type": "string",
                    "description": "Name of the food item."
                },
                "size": {
                    "type": "string",
                    "description": "Estimated size or portion of the food item (e.g., \"1 medium apple\", \"1 cup of rice\")."
                },
                "carbohydrates": {
                    "type": "number",
                    "description": "Estimated carbohydrates in grams."
                },
                "protein": {
                    "type": "number",
                    "description": "Estimated protein in grams."
                },
                "fat": {
                    "type": "number",
                    "description": "Estimated fat in grams."
                },
                "calories": {
                    "type": "number",
                    "description": "Estimated total calories."
                }
            },
            "required": ["foodName", "size", "carbohydrates", "protein", "fat", "calories"]
        }
    })
}
