//! Static writing-prompt catalog with uniform random selection.

use rand::Rng;

use crate::models::Category;

const CHILDHOOD: &[&str] = &[
    "What was your favorite hiding spot as a child?",
    "Describe a childhood friend who made a lasting impact on you.",
    "What was the most trouble you ever got into as a kid?",
    "Tell about a family tradition from your childhood.",
    "What was your favorite toy and why?",
];

const CAREER: &[&str] = &[
    "Describe your first job and what you learned from it.",
    "Tell about a mentor who shaped your career.",
    "What was your biggest professional challenge?",
    "Describe a moment when you felt proud of your work.",
    "What career advice would you give your younger self?",
];

const RELATIONSHIPS: &[&str] = &[
    "How did you meet your best friend?",
    "Describe a moment when someone showed you unexpected kindness.",
    "Tell about a relationship that changed your perspective on life.",
    "What's the best advice about relationships you've ever received?",
    "Describe a time when you had to forgive someone.",
];

const ADVENTURES: &[&str] = &[
    "Tell about the most spontaneous thing you've ever done.",
    "Describe a time when you stepped out of your comfort zone.",
    "What's the most beautiful place you've ever visited?",
    "Tell about an adventure that didn't go as planned.",
    "Describe a moment when you felt truly alive.",
];

const FAMILY: &[&str] = &[
    "What's a family story that gets told at every gathering?",
    "Describe a tradition your family has.",
    "Tell about a lesson you learned from a family member.",
    "What's something unique about your family?",
    "Describe a family member who influenced you greatly.",
];

/// The prompt list for a category, if one is defined. Only a subset of
/// categories carries curated prompts.
fn prompts_for(category: Category) -> Option<&'static [&'static str]> {
    match category {
        Category::Childhood => Some(CHILDHOOD),
        Category::Career => Some(CAREER),
        Category::Relationships => Some(RELATIONSHIPS),
        Category::Adventures => Some(ADVENTURES),
        Category::Family => Some(FAMILY),
        _ => None,
    }
}

fn all_prompts() -> Vec<&'static str> {
    [CHILDHOOD, CAREER, RELATIONSHIPS, ADVENTURES, FAMILY]
        .iter()
        .flat_map(|list| list.iter().copied())
        .collect()
}

/// Pick one prompt uniformly at random. With a category filter the pick
/// comes from that category's list; without one, or when the category has
/// no curated list, it comes from the union of all lists.
pub fn pick_prompt<R: Rng>(category: Option<Category>, rng: &mut R) -> &'static str {
    let pool: Vec<&'static str> = match category.and_then(prompts_for) {
        Some(list) => list.to_vec(),
        None => all_prompts(),
    };
    pool[rng.gen_range(0..pool.len())]
}

/// Convenience wrapper over the thread RNG.
pub fn random_prompt(category: Option<Category>) -> &'static str {
    pick_prompt(category, &mut rand::thread_rng())
}
