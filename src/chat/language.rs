//! Reply-language heuristic.
//!
//! Known to be weak: a short English prompt without one of the listed
//! question words is classified as German.

const ENGLISH_CUES: &[&str] = &[
    "how",
    "what",
    "can",
    "improve",
    "help",
    "recommend",
    "search",
];

const GERMAN_LETTERS: &[char] = &['ä', 'ö', 'ü', 'ß', 'ẞ'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    German,
}

impl Language {
    /// Guess the language a user wrote in.
    ///
    /// English requires an ASCII letter, no German umlaut or sharp s, and at
    /// least one English cue word appearing anywhere in the text. Everything
    /// else is German.
    pub fn detect(text: &str) -> Self {
        let lower = text.to_lowercase();
        let has_ascii_letter = lower.chars().any(|c| c.is_ascii_alphabetic());
        let has_german_letter = lower.chars().any(|c| GERMAN_LETTERS.contains(&c));
        let has_cue = ENGLISH_CUES.iter().any(|cue| lower.contains(cue));

        if has_ascii_letter && !has_german_letter && has_cue {
            Language::English
        } else {
            Language::German
        }
    }

    /// Instruction telling the model which language to answer in.
    pub fn instruction(self) -> &'static str {
        match self {
            Language::English => {
                "IMPORTANT: The user is asking in ENGLISH. You MUST respond in ENGLISH only."
            }
            Language::German => {
                "WICHTIG: Der Nutzer fragt auf DEUTSCH. Du MUSST auf DEUTSCH antworten."
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
        }
    }
}
