//! Seed data: built-in assessment words and sentence-building prompts that keep the
//! app useful without any external configuration.

use crate::assessment::WordBank;
use crate::domain::SentencePrompt;

/// Default assessment word bank, five words per level.
pub fn seed_word_bank() -> WordBank {
  WordBank {
    simple: to_owned(&["cat", "dog", "ball", "book", "house"]),
    moderate: to_owned(&["elephant", "butterfly", "telephone", "banana", "umbrella"]),
    complex: to_owned(&["refrigerator", "helicopter", "rhinoceros", "octopus", "dinosaur"]),
  }
}

/// Default sentence/picture pairs for the sentence-building activity.
pub fn seed_sentences() -> Vec<SentencePrompt> {
  [
    ("The cat is sleeping", "/sentence-images/sleeping-cat.png"),
    ("A dog plays with ball", "/sentence-images/dog-ball.png"),
    ("Birds fly in sky", "/sentence-images/birds-sky.png"),
  ]
  .into_iter()
  .map(|(text, image_url)| SentencePrompt { text: text.into(), image_url: image_url.into() })
  .collect()
}

fn to_owned(words: &[&str]) -> Vec<String> {
  words.iter().map(|w| w.to_string()).collect()
}
