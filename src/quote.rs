use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

impl Quote {
    pub const fn new(text: &'static str, author: &'static str) -> Self {
        Self { text, author }
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "“{}”\n— {}", self.text, self.author)
    }
}

// Longer excerpts kept short of full poems.
pub const QUOTES: [Quote; 11] = [
    Quote::new(
        "Peace comes from within. Do not seek it without. When the mind is calm, clarity appears, and compassion follows naturally.",
        "Buddha",
    ),
    Quote::new(
        "Where there is ruin, there is hope for a treasure. Try not to turn away from what troubles you; remain curious.",
        "Rumi",
    ),
    Quote::new(
        "The world always seems brighter when you’ve just made something, and truer when you’ve made it with care.",
        "Neil Gaiman",
    ),
    Quote::new(
        "Understanding is love’s other name. When you understand someone, you cannot help but love them, even when it is difficult.",
        "Thích Nhất Hạnh (How to Love)",
    ),
    Quote::new(
        "Trying to define yourself is like trying to bite your own teeth. You are not a thing; you are a process.",
        "Alan Watts",
    ),
    Quote::new(
        "Those who have a “why” can bear almost any “how.” Meaning does not arise from comfort, but from responsibility.",
        "Viktor Frankl",
    ),
    Quote::new(
        "Be patient toward all that is unsolved in your heart and try to love the questions themselves. Live the questions now.",
        "Rainer Maria Rilke",
    ),
    Quote::new(
        "The best way out is always through. Somewhere, walking takes you somewhere worth going.",
        "Robert Frost",
    ),
    Quote::new(
        "You only have to let the soft animal of your body love what it loves. Tell me about your despair, yours, and I will tell you mine.",
        "Mary Oliver",
    ),
    Quote::new(
        "When despair grows in me and I wake in the night at the least sound, I go and lie down where the wood drake rests in his beauty on the water.",
        "Wendell Berry — “The Peace of Wild Things”",
    ),
    Quote::new(
        "The time will come when, with elation, you will greet yourself arriving at your own door, and each will smile at the other’s welcome.",
        "Derek Walcott — “Love After Love”",
    ),
];

/// Immutable, non-empty, ordered list of quotes.
#[derive(Debug, Clone, Copy)]
pub struct QuoteStore {
    quotes: &'static [Quote],
}

impl QuoteStore {
    pub fn new(quotes: &'static [Quote]) -> anyhow::Result<Self> {
        anyhow::ensure!(!quotes.is_empty(), "quote store must not be empty");
        Ok(Self { quotes })
    }

    pub fn builtin() -> Self {
        Self { quotes: &QUOTES }
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    // Always false; pairs with `len` for clippy::len_without_is_empty.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static Quote> {
        self.quotes.get(index)
    }

    pub fn first(&self) -> &'static Quote {
        &self.quotes[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Quote> {
        self.quotes.iter()
    }

    pub fn contains(&self, quote: &Quote) -> bool {
        self.quotes.contains(quote)
    }
}
