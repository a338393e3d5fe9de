use super::types::Recipe;

/// Titles of the demo recipes, used when suggesting what to ask for.
pub const SAMPLE_TITLES: [&str; 3] = [
    "Hearty Veggie Pasta",
    "Citrus Herb Salmon",
    "Golden Mango Smoothie Bowl",
];

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The demo cookbook, stamped with `created_at`.
pub fn sample_recipes(created_at: i64) -> Vec<Recipe> {
    vec![
        Recipe {
            title: SAMPLE_TITLES[0].to_string(),
            subtitle: "A rainbow of roasted vegetables with herbed tomato sauce".to_string(),
            slug: "hearty-veggie-pasta".to_string(),
            hero_image: "recipes/images/hearty_veggie_pasta.svg".to_string(),
            uploaded_image: None,
            prep_time: 20,
            cook_time: 25,
            servings: 4,
            short_description:
                "A comforting pasta bowl packed with colorful veggies and fresh basil.".to_string(),
            ingredients: lines(&[
                "12 oz whole-wheat penne",
                "1 zucchini, sliced",
                "1 bell pepper, sliced",
                "1 cup cherry tomatoes",
                "2 cups marinara sauce",
                "Fresh basil leaves",
            ]),
            directions: lines(&[
                "Roast vegetables with olive oil, salt, and pepper at 400°F (200°C) for 15 minutes.",
                "Cook pasta according to package instructions until al dente.",
                "Warm marinara sauce in a saucepan and stir in roasted vegetables.",
                "Toss cooked pasta with the sauce and garnish with fresh basil.",
            ]),
            created_at,
        },
        Recipe {
            title: SAMPLE_TITLES[1].to_string(),
            subtitle: "Bright flavors with a buttery finish".to_string(),
            slug: "citrus-herb-salmon".to_string(),
            hero_image: "recipes/images/citrus_herb_salmon.svg".to_string(),
            uploaded_image: None,
            prep_time: 15,
            cook_time: 18,
            servings: 2,
            short_description: "Oven-baked salmon with zesty citrus butter and fragrant herbs."
                .to_string(),
            ingredients: lines(&[
                "2 salmon fillets",
                "1 lemon, sliced",
                "2 tbsp butter, melted",
                "2 cloves garlic, minced",
                "Fresh dill and parsley",
                "Salt and pepper",
            ]),
            directions: lines(&[
                "Preheat oven to 375°F (190°C) and line a baking sheet with parchment.",
                "Arrange salmon on the sheet, drizzle with melted butter, garlic, salt, and pepper.",
                "Top with lemon slices and herbs; bake for 15-18 minutes until flaky.",
            ]),
            created_at,
        },
        Recipe {
            title: SAMPLE_TITLES[2].to_string(),
            subtitle: "Sunshine in a bowl with crunchy toppings".to_string(),
            slug: "golden-mango-smoothie-bowl".to_string(),
            hero_image: "recipes/images/golden_mango_smoothie_bowl.svg".to_string(),
            uploaded_image: None,
            prep_time: 10,
            cook_time: 0,
            servings: 1,
            short_description: "Creamy mango smoothie topped with toasted coconut and granola."
                .to_string(),
            ingredients: lines(&[
                "1 cup frozen mango chunks",
                "1/2 banana",
                "1/2 cup coconut milk",
                "1/4 cup Greek yogurt",
                "Granola, coconut flakes, and chia seeds for topping",
            ]),
            directions: lines(&[
                "Blend mango, banana, coconut milk, and yogurt until thick and smooth.",
                "Pour into a bowl and arrange toppings to your liking.",
            ]),
            created_at,
        },
    ]
}
