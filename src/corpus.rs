use rand::{rngs::StdRng, Rng, SeedableRng};

pub const SAMPLE_TEXTS: [&str; 5] = [
    "The quick brown fox jumps over the lazy dog near the sparkling blue ocean waves.",
    "Swimming through coral reefs, colorful fish dance in the warm tropical waters below.",
    "Deep sea adventures await those brave enough to explore the mysterious ocean depths.",
    "Sharks patrol the waters while schools of fish move in perfect synchronized harmony.",
    "Ocean currents carry ancient secrets from distant shores to unexplored territories.",
];

/// Supplies the target passage for each new session
pub trait TextSource {
    fn next_text(&mut self) -> String;
}

/// Uniform pick from a fixed list of passages
#[derive(Debug)]
pub struct RandomCorpus {
    rng: StdRng,
}

impl RandomCorpus {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomCorpus {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for RandomCorpus {
    fn next_text(&mut self) -> String {
        let index = self.rng.gen_range(0..SAMPLE_TEXTS.len());
        SAMPLE_TEXTS[index].to_string()
    }
}

/// Always hands out the same passage
#[derive(Clone, Debug)]
pub struct FixedText(String);

impl FixedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl TextSource for FixedText {
    fn next_text(&mut self) -> String {
        self.0.clone()
    }
}

impl<T: TextSource + ?Sized> TextSource for Box<T> {
    fn next_text(&mut self) -> String {
        (**self).next_text()
    }
}
