//! Greeting shortcut.
//!
//! An optional hook that answers small talk without touching the
//! similarity index. The random source is seedable so replies are
//! reproducible in tests.

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const GREETING_INPUTS: &[&str] = &[
    "hello",
    "hi",
    "greetings",
    "sup",
    "what's up",
    "hey",
    "hello there",
    "yo",
    "oy",
    "hello lspu",
];

pub const GREETING_RESPONSES: &[&str] = &[
    "hi",
    "hey",
    "im here!",
    "hi there",
    "hello",
    "i am glad! you are talking to me",
];

pub struct GreetingShortcut {
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for GreetingShortcut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreetingShortcut").finish_non_exhaustive()
    }
}

impl GreetingShortcut {
    /// `seed = None` draws from system entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// True when any whitespace-delimited token is a greeting word.
    pub fn is_greeting(sentence: &str) -> bool {
        sentence
            .split_whitespace()
            .any(|word| GREETING_INPUTS.contains(&word.to_lowercase().as_str()))
    }

    /// A random greeting reply, or `None` when the sentence is not a greeting.
    pub fn reply(&self, sentence: &str) -> Option<String> {
        if !Self::is_greeting(sentence) {
            return None;
        }
        let mut rng = self.rng.lock();
        GREETING_RESPONSES
            .choose(&mut *rng)
            .map(|reply| reply.to_string())
    }
}
