/// Descriptive facts about one ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientFact {
    /// Lowercase canonical name, matched against queries.
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub storage: &'static str,
    pub uses: &'static str,
}

/// Words in a query shorter than this never count as a loose match.
const MIN_LOOSE_WORD_LEN: usize = 4;

/// Look up an ingredient by free-text term.
///
/// Entries are tried in declaration order. An entry matches when its key
/// and `term` contain one another, or when any word of `term` with at least
/// four characters appears inside the key. The first match wins.
pub fn find(term: &str) -> Option<&'static IngredientFact> {
    INGREDIENTS.iter().find(|fact| {
        fact.key.contains(term)
            || term.contains(fact.key)
            || term
                .split_whitespace()
                .filter(|word| word.chars().count() >= MIN_LOOSE_WORD_LEN)
                .any(|word| fact.key.contains(word))
    })
}

pub static INGREDIENTS: &[IngredientFact] = &[
    IngredientFact {
        key: "tomato",
        name: "Tomato",
        description: "Tomatoes are rich in vitamin C, potassium, and lycopene. They add acidity and umami to dishes.",
        storage: "Store at room temperature until ripe, then refrigerate.",
        uses: "Great in salads, sauces, soups, and as a base for many dishes.",
    },
    IngredientFact {
        key: "garlic",
        name: "Garlic",
        description: "Garlic is a powerful flavor enhancer with antimicrobial properties. It contains allicin, which provides health benefits.",
        storage: "Keep in a cool, dry place with good air circulation.",
        uses: "Essential in many cuisines. Use minced, crushed, or sliced for different flavor intensities.",
    },
    IngredientFact {
        key: "onion",
        name: "Onion",
        description: "Onions add sweetness and depth when cooked. They're rich in antioxidants and vitamin C.",
        storage: "Store in a cool, dry, well-ventilated area away from potatoes.",
        uses: "Base for many dishes. Can be caramelized, sautéed, or used raw in salads.",
    },
    IngredientFact {
        key: "bell pepper",
        name: "Bell Pepper",
        description: "Bell peppers are rich in vitamin C and come in various colors. They add crunch and sweetness.",
        storage: "Refrigerate in the crisper drawer for up to a week.",
        uses: "Great raw in salads, roasted, stuffed, or sautéed in stir-fries.",
    },
    IngredientFact {
        key: "zucchini",
        name: "Zucchini",
        description: "Zucchini is a summer squash low in calories and high in water content. It's rich in vitamin A and C.",
        storage: "Refrigerate in a plastic bag for up to a week.",
        uses: "Can be grilled, sautéed, baked, or spiralized into noodles.",
    },
    IngredientFact {
        key: "salmon",
        name: "Salmon",
        description: "Salmon is rich in omega-3 fatty acids, protein, and vitamin D. It's a heart-healthy fish.",
        storage: "Keep refrigerated and cook within 1-2 days of purchase.",
        uses: "Can be baked, grilled, pan-seared, or poached. Pairs well with citrus and herbs.",
    },
    IngredientFact {
        key: "chicken",
        name: "Chicken",
        description: "Chicken is a lean protein source rich in B vitamins and selenium. It's versatile and widely used.",
        storage: "Refrigerate and use within 1-2 days, or freeze for longer storage.",
        uses: "Can be roasted, grilled, sautéed, or braised. Works with many flavor profiles.",
    },
    IngredientFact {
        key: "pasta",
        name: "Pasta",
        description: "Pasta is a carbohydrate-rich food made from wheat. Whole grain versions offer more fiber.",
        storage: "Store in a cool, dry place in an airtight container.",
        uses: "Base for many dishes. Cook al dente for best texture.",
    },
    IngredientFact {
        key: "basil",
        name: "Basil",
        description: "Basil is an aromatic herb with a sweet, slightly peppery flavor. It's rich in antioxidants.",
        storage: "Keep fresh basil in water like flowers, or store in the refrigerator wrapped in damp paper towels.",
        uses: "Essential in Italian cuisine. Use fresh in salads, pesto, or as a garnish.",
    },
    IngredientFact {
        key: "mango",
        name: "Mango",
        description: "Mangoes are tropical fruits rich in vitamin C, vitamin A, and fiber. They're sweet and juicy.",
        storage: "Ripen at room temperature, then refrigerate to slow further ripening.",
        uses: "Great in smoothies, salads, desserts, or eaten fresh.",
    },
    IngredientFact {
        key: "coconut",
        name: "Coconut",
        description: "Coconut provides healthy fats, fiber, and minerals. Coconut milk adds creaminess to dishes.",
        storage: "Store coconut milk in the refrigerator after opening. Fresh coconut should be refrigerated.",
        uses: "Used in curries, desserts, smoothies, and as a dairy alternative.",
    },
    IngredientFact {
        key: "yogurt",
        name: "Yogurt",
        description: "Yogurt is rich in probiotics, protein, and calcium. Greek yogurt has more protein.",
        storage: "Keep refrigerated and check expiration date.",
        uses: "Great in smoothies, as a marinade, in dips, or eaten plain with fruit.",
    },
    IngredientFact {
        key: "lemon",
        name: "Lemon",
        description: "Lemons are rich in vitamin C and add bright acidity to dishes. The zest contains aromatic oils.",
        storage: "Store at room temperature or in the refrigerator for longer storage.",
        uses: "Adds flavor to dressings, marinades, desserts, and beverages.",
    },
    IngredientFact {
        key: "butter",
        name: "Butter",
        description: "Butter adds richness and flavor. It's made from cream and contains saturated fats.",
        storage: "Refrigerate butter, but let it soften at room temperature for baking.",
        uses: "Used for sautéing, baking, spreading, and finishing dishes.",
    },
    IngredientFact {
        key: "olive oil",
        name: "Olive Oil",
        description: "Olive oil is rich in monounsaturated fats and antioxidants. Extra virgin is the highest quality.",
        storage: "Store in a cool, dark place away from heat and light.",
        uses: "Used for cooking, dressings, marinades, and finishing dishes.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_exact_key() {
        assert_eq!(find("tomato").map(|f| f.name), Some("Tomato"));
    }

    #[test]
    fn test_find_key_inside_term() {
        assert_eq!(find("tomatoes").map(|f| f.name), Some("Tomato"));
        assert_eq!(find("fresh garlic cloves").map(|f| f.name), Some("Garlic"));
    }

    #[test]
    fn test_find_term_inside_key() {
        assert_eq!(find("pepper").map(|f| f.name), Some("Bell Pepper"));
        assert_eq!(find("olive").map(|f| f.name), Some("Olive Oil"));
    }

    #[test]
    fn test_find_loose_word_overlap() {
        // "olive" is a word of the term and a substring of "olive oil"
        assert_eq!(find("kalamata olive").map(|f| f.name), Some("Olive Oil"));
        // Short words never match loosely
        assert!(find("oil xyz").is_none());
    }

    #[test]
    fn test_find_declaration_order_wins() {
        // Both "onion" and "garlic" appear; garlic is declared first
        assert_eq!(find("onion and garlic").map(|f| f.name), Some("Garlic"));
    }

    #[test]
    fn test_find_missing() {
        assert!(find("xyz123").is_none());
        assert!(find("kale").is_none());
    }

    #[test]
    fn test_keys_are_lowercase_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for fact in INGREDIENTS {
            assert_eq!(fact.key, fact.key.to_lowercase());
            assert!(seen.insert(fact.key), "duplicate key {}", fact.key);
        }
        assert_eq!(INGREDIENTS.len(), 15);
    }
}
