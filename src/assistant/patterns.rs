//! Phrase tables for query classification. Order matters: the first
//! phrase found in a query is the one stripped from it.

/// Phrases that mark a request for a recipe's ingredient list.
pub const RECIPE_PHRASES: &[&str] = &[
    "what are the ingredients for",
    "what ingredients for",
    "ingredients for",
    "what do i need for",
    "what do you need for",
    "ingredients needed for",
    "ingredients required for",
    "what are the ingredients to make",
    "ingredients to make",
    "what ingredients to make",
];

/// Question openers stripped before an ingredient lookup.
pub const QUESTION_PHRASES: &[&str] = &[
    "what is",
    "tell me about",
    "information about",
    "what about",
    "explain",
    "describe",
    "know about",
    "learn about",
];

/// Dropped from an extracted recipe name.
pub const RECIPE_FILLER: &[&str] = &["the", "a", "an", "making", "to make", "recipe"];

/// Dropped from an extracted ingredient term.
pub const INGREDIENT_FILLER: &[&str] = &["the", "a", "an", "ingredient", "food"];

/// First phrase of `phrases` that occurs anywhere in `text`.
pub fn first_match(text: &str, phrases: &[&'static str]) -> Option<&'static str> {
    phrases.iter().copied().find(|p| text.contains(p))
}

/// Remove every occurrence of `phrase` and trim what is left.
pub fn strip_phrase(text: &str, phrase: &str) -> String {
    text.replace(phrase, "").trim().to_string()
}

/// Drop whole words listed in `filler` and rejoin with single spaces.
pub fn drop_filler(text: &str, filler: &[&str]) -> String {
    text.split_whitespace()
        .filter(|word| !filler.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_respects_order() {
        let q = "what are the ingredients for pasta";
        assert_eq!(
            first_match(q, RECIPE_PHRASES),
            Some("what are the ingredients for")
        );
        assert_eq!(
            first_match("ingredients for pasta", RECIPE_PHRASES),
            Some("ingredients for")
        );
        assert_eq!(first_match("hello there", RECIPE_PHRASES), None);
    }

    #[test]
    fn test_specific_make_phrase_before_generic() {
        assert_eq!(
            first_match("what are the ingredients to make soup", RECIPE_PHRASES),
            Some("what are the ingredients to make")
        );
    }

    #[test]
    fn test_strip_phrase_removes_all_occurrences() {
        assert_eq!(strip_phrase("explain explain basil", "explain"), "basil");
        assert_eq!(strip_phrase("  tell me about garlic ", "tell me about"), "garlic");
    }

    #[test]
    fn test_drop_filler() {
        assert_eq!(
            drop_filler("the  making of a pasta recipe", RECIPE_FILLER),
            "of pasta"
        );
        assert_eq!(drop_filler("the ingredient", INGREDIENT_FILLER), "");
    }
}
