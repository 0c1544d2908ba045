use crate::models::Category;

/// Keyword substrings per category, checked in order. The first category with
/// any matching keyword wins, so order is the tie-break.
///
/// Matching is plain substring search on the lower-cased text, with no word
/// boundaries: "carpet" matches "car" and lands in Transport.
pub(crate) const KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &["grocery", "groceries", "food", "restaurant", "eat", "cafe", "coffee"],
    ),
    (
        Category::Transport,
        &["taxi", "uber", "transport", "bus", "train", "gas", "petrol", "car"],
    ),
    (
        Category::Housing,
        &["rent", "mortgage", "utility", "electricity", "water"],
    ),
    (Category::Shopping, &["shop", "clothes", "shopping", "mall"]),
    (
        Category::Entertainment,
        &["movie", "netflix", "entertain", "game"],
    ),
];

/// Map a free-text description to a category. Unmatched text is `Other`.
pub(crate) fn classify(text: &str) -> Category {
    let text_lower = text.to_lowercase();

    for (category, keywords) in KEYWORDS {
        if keywords.iter().any(|kw| text_lower.contains(kw)) {
            return *category;
        }
    }

    Category::Other
}

pub(crate) fn classify_all<S: AsRef<str>>(texts: &[S]) -> Vec<Category> {
    texts.iter().map(|t| classify(t.as_ref())).collect()
}

#[cfg(test)]
mod tests;
