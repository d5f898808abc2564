//! Lines the pet says while playing.

use rand::seq::SliceRandom;

/// The pet's built-in lines.
pub const FUN_FACTS: [&str; 7] = [
    "Hello, my name is Fig Stew! Nice to meet you, kind human!.",
    "Do you like my orange fur?",
    "Hey do you know where Beagle Coconut is?",
    "I like the food you gave to me! Thanks",
    "Don't understimate me okay! I can fight too",
    "The garden is so nice...",
    "There's many other chimeras in this garden",
];

/// Source of the line picked when the pet starts playing.
///
/// The engine depends on this trait rather than on a random generator so
/// tests can supply a deterministic source.
pub trait FunFactSource: Send + Sync {
    fn pick(&self) -> String;
}

/// Samples uniformly from a fixed list.
#[derive(Clone, Debug)]
pub struct RandomFunFacts {
    facts: Vec<String>,
}

impl RandomFunFacts {
    pub fn new(facts: Vec<String>) -> Self {
        Self { facts }
    }

    pub fn facts(&self) -> &[String] {
        &self.facts
    }
}

impl Default for RandomFunFacts {
    fn default() -> Self {
        Self::new(FUN_FACTS.iter().map(|f| f.to_string()).collect())
    }
}

impl FunFactSource for RandomFunFacts {
    fn pick(&self) -> String {
        self.facts
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_default()
    }
}

/// Always returns the same line.
#[derive(Clone, Debug)]
pub struct FixedFunFact(pub String);

impl FunFactSource for FixedFunFact {
    fn pick(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_pick_comes_from_the_list() {
        let source = RandomFunFacts::default();
        for _ in 0..50 {
            let fact = source.pick();
            assert!(FUN_FACTS.contains(&fact.as_str()));
        }
    }

    #[test]
    fn empty_list_yields_empty_line() {
        assert_eq!(RandomFunFacts::new(Vec::new()).pick(), "");
    }

    #[test]
    fn fixed_source_is_deterministic() {
        let source = FixedFunFact("purr".to_string());
        assert_eq!(source.pick(), "purr");
        assert_eq!(source.pick(), "purr");
    }
}
