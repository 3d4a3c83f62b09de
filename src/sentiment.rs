//! Lexical polarity scoring.
//!
//! A small weighted lexicon stands in for a full sentiment model: each
//! recognized word carries a valence in [-1, 1], a leading negator
//! flips and dampens the word that follows, and the final score is the
//! mean valence of the recognized words. Text with no recognized words
//! scores 0.0. Deterministic, no network.

/// (word, valence). Matched against lowercased whole words.
const LEXICON: &[(&str, f32)] = &[
    // positive
    ("love", 0.6),
    ("loved", 0.6),
    ("awesome", 1.0),
    ("amazing", 0.8),
    ("great", 0.8),
    ("excellent", 1.0),
    ("fantastic", 0.9),
    ("perfect", 1.0),
    ("best", 1.0),
    ("brilliant", 0.9),
    ("wonderful", 1.0),
    ("beautiful", 0.85),
    ("good", 0.7),
    ("nice", 0.6),
    ("incredible", 0.9),
    ("favorite", 0.6),
    ("helpful", 0.5),
    ("enjoyed", 0.5),
    ("interesting", 0.5),
    ("thank", 0.4),
    ("thanks", 0.4),
    ("cool", 0.35),
    ("fun", 0.3),
    ("useful", 0.3),
    // negative
    ("terrible", -1.0),
    ("awful", -1.0),
    ("worst", -1.0),
    ("horrible", -1.0),
    ("hate", -0.8),
    ("trash", -0.8),
    ("garbage", -0.8),
    ("bad", -0.7),
    ("stupid", -0.7),
    ("disappointing", -0.65),
    ("disappointed", -0.65),
    ("boring", -0.6),
    ("waste", -0.6),
    ("useless", -0.6),
    ("annoying", -0.6),
    ("cringe", -0.6),
    ("dislike", -0.5),
    ("misleading", -0.5),
    ("wrong", -0.5),
    ("poor", -0.4),
    ("confusing", -0.4),
];

/// Words that flip and dampen the valence of the word that follows.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "dont", "don't", "cant", "can't", "isnt", "isn't", "wasnt", "wasn't",
    "wont", "won't",
];

fn valence(word: &str) -> Option<f32> {
    LEXICON.iter().find(|(w, _)| *w == word).map(|(_, v)| *v)
}

/// Polarity of `text` in [-1, 1].
pub fn polarity(text: &str) -> f32 {
    let lower = text.to_lowercase();
    let tokens: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .collect();

    let mut sum = 0.0_f32;
    let mut hits = 0_usize;
    for (i, token) in tokens.iter().enumerate() {
        if let Some(mut v) = valence(token) {
            if i > 0 && NEGATORS.contains(&tokens[i - 1]) {
                v = -v * 0.5;
            }
            sum += v;
            hits += 1;
        }
    }

    if hits == 0 {
        0.0
    } else {
        (sum / hits as f32).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_text_scores_above_threshold() {
        assert!(polarity("I love this!") > 0.1);
        assert!(polarity("Awesome video, thanks!") > 0.1);
    }

    #[test]
    fn negative_text_scores_below_threshold() {
        assert!(polarity("This is terrible") < -0.1);
        assert!(polarity("worst video I have seen, total garbage") < -0.1);
    }

    #[test]
    fn unrecognized_text_is_neutral() {
        assert_eq!(polarity("How do I fix the bug?"), 0.0);
        assert_eq!(polarity("meh"), 0.0);
        assert_eq!(polarity(""), 0.0);
    }

    #[test]
    fn negation_flips_valence() {
        assert!(polarity("not good") < 0.0);
        assert!(polarity("never boring") > 0.0);
    }

    #[test]
    fn opposing_words_cancel_out() {
        let score = polarity("great but terrible");
        assert!(score.abs() <= 0.1, "expected near-zero, got {score}");
    }

    #[test]
    fn score_is_deterministic_and_bounded() {
        let text = "awesome awesome awesome";
        assert_eq!(polarity(text), polarity(text));
        assert!(polarity(text) <= 1.0);
        assert!(polarity("terrible awful worst") >= -1.0);
    }
}
