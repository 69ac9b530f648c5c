//! Local suggestion generator used when no upstream reply is available.
//!
//! Picks three strategies from a fixed pedagogical pool and frames them with
//! an intro that echoes the prompt and a closing invitation. It cannot fail.

use super::language::Language;
use rand::seq::SliceRandom;
use std::sync::Arc;

/// Number of strategies in every fallback reply.
pub const STRATEGY_COUNT: usize = 3;

pub const GERMAN_STRATEGIES: &[&str] = &[
    "Starte mit einer Mini-Retrospektive: Was lief bei der letzten Stunde gut, was wollen wir verbessern? Halte die Antworten sichtbar fest.",
    "Nutze ein 3-2-1 Exit Ticket (3 Erkenntnisse, 2 Fragen, 1 nächste Handlung) um gezielte Anschlussaufträge zu planen.",
    "Lass Schüler:innen ihre Vorgehensweise laut denken und von einem Peer protokollieren – daraus entsteht sofortiges Feedbackmaterial.",
    "Plane ein Mikro-Experiment: 10-Minuten-Stationen mit einem klaren Beobachtungsfokus, danach Blitz-Auswertung im Kreis.",
    "Arbeite mit Kompetenzspektrum-Karten, auf denen Lernende markieren, wo sie sich aktuell einordnen – das steuert deine Differenzierung.",
    "Verankere jede Strategie an einem konkreten Schüler-Zitat oder Beobachtungspunkt, um Wirkung regelmäßig zu prüfen.",
];

pub const ENGLISH_STRATEGIES: &[&str] = &[
    "Start with a mini retrospective: what went well in the last lesson and what do we want to improve? Keep the answers visible.",
    "Use a 3-2-1 exit ticket (3 insights, 2 questions, 1 next step) to plan targeted follow-up tasks.",
    "Have students think their approach aloud while a peer takes notes, which gives you instant feedback material.",
    "Plan a micro-experiment: 10-minute stations with a clear observation focus, followed by a quick debrief in a circle.",
    "Work with competency spectrum cards on which learners mark where they currently stand, and let that steer your differentiation.",
    "Anchor every strategy to a concrete student quote or observation point so you can check its impact regularly.",
];

/// Source of randomness for strategy selection.
pub trait StrategyPicker: Send + Sync {
    /// Choose `count` distinct entries of `pool`.
    fn pick(&self, pool: &[&'static str], count: usize) -> Vec<&'static str>;
}

/// Uniform random selection, reseeded from the thread RNG on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl StrategyPicker for RandomPicker {
    fn pick(&self, pool: &[&'static str], count: usize) -> Vec<&'static str> {
        let mut picks = pool.to_vec();
        picks.shuffle(&mut rand::rng());
        picks.truncate(count);
        picks
    }
}

/// The strategy pool for a language.
pub fn strategy_pool(language: Language) -> &'static [&'static str] {
    match language {
        Language::English => ENGLISH_STRATEGIES,
        Language::German => GERMAN_STRATEGIES,
    }
}

#[derive(Clone)]
pub struct FallbackGenerator {
    picker: Arc<dyn StrategyPicker>,
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self::new(Arc::new(RandomPicker))
    }
}

impl FallbackGenerator {
    pub fn new(picker: Arc<dyn StrategyPicker>) -> Self {
        Self { picker }
    }

    /// Build a reply for `prompt` in `language`.
    pub fn generate(&self, prompt: &str, language: Language) -> String {
        let mut picks = self.picker.pick(strategy_pool(language), STRATEGY_COUNT);
        picks.truncate(STRATEGY_COUNT);

        let list = picks
            .iter()
            .enumerate()
            .map(|(index, idea)| format!("{}. {idea}", index + 1))
            .collect::<Vec<_>>()
            .join("\n");

        [intro(prompt, language), list, closing(language).to_string()].join("\n\n")
    }
}

fn intro(prompt: &str, language: Language) -> String {
    match (language, prompt.trim().is_empty()) {
        (Language::English, true) => "Here are three quick ideas for your planning:".to_string(),
        (Language::English, false) => format!("Here are three quick ideas for \"{prompt}\":"),
        (Language::German, true) => "Hier sind drei schnelle Ideen für deine Planung:".to_string(),
        (Language::German, false) => format!("Hier sind drei schnelle Ideen zu \"{prompt}\":"),
    }
}

fn closing(language: Language) -> &'static str {
    match language {
        Language::English => {
            "If you describe more specifically which learning group or subject is affected, Scolaia AI can answer even more precisely."
        }
        Language::German => {
            "Wenn du genauer beschreibst, welche Lerngruppe oder welches Fach betroffen ist, kann Scolaia AI noch präziser antworten."
        }
    }
}
