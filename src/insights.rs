//! Aggregation and insight synthesis building blocks.
//!
//! The numeric aggregates feed the final report under both strategies.
//! The Markdown template here is the local synthesizer, and doubles as
//! the fallback whenever the remote summarizer is unavailable.

use indexmap::IndexMap;
use std::collections::BTreeMap;

use crate::types::comment::{ClassifiedComment, Sentiment};

/// Sentiment label -> percentage of all classified comments, rounded to
/// two decimals. Only labels that actually occur are present.
pub fn sentiment_distribution(comments: &[ClassifiedComment]) -> BTreeMap<Sentiment, f64> {
    let mut counts: BTreeMap<Sentiment, usize> = BTreeMap::new();
    for comment in comments {
        *counts.entry(comment.sentiment).or_default() += 1;
    }

    let total = comments.len() as f64;
    counts
        .into_iter()
        .map(|(sentiment, count)| (sentiment, round2(count as f64 / total * 100.0)))
        .collect()
}

/// Category -> comment count, largest first (ties keep first-seen order).
pub fn category_distribution(comments: &[ClassifiedComment]) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for comment in comments {
        *counts.entry(comment.category.clone()).or_default() += 1;
    }
    counts.sort_by(|_, a, _, b| b.cmp(a));
    counts
}

/// Comment texts per sentiment group, in the fixed label order. Empty
/// groups are present so callers can render explicit "no comments"
/// lines instead of omitting them.
pub fn sentiment_groups(comments: &[ClassifiedComment]) -> IndexMap<Sentiment, Vec<&str>> {
    let mut groups: IndexMap<Sentiment, Vec<&str>> = Sentiment::ALL
        .iter()
        .map(|sentiment| (*sentiment, Vec::new()))
        .collect();

    for comment in comments {
        if let Some(group) = groups.get_mut(&comment.sentiment) {
            group.push(comment.text.as_str());
        }
    }

    groups
}

/// Build the one-shot synthesis prompt for the remote strategy:
/// exemplars per sentiment group plus the exact group counts, which
/// stay accurate even when the exemplar lists are truncated.
pub fn insight_prompt(comments: &[ClassifiedComment], exemplars_per_group: usize) -> String {
    let groups = sentiment_groups(comments);

    let mut prompt = String::from(
        "Based on the following categorized YouTube comments, provide an overall summary \
         of the audience sentiment and key insights.\n\
         Consider the distribution of positive, neutral, negative, and mixed comments. \
         Highlight common themes or recurring feedback within each sentiment group.\n\
         Focus on actionable insights that creators, marketers, or researchers could use.\n\n",
    );

    for (sentiment, texts) in &groups {
        prompt.push_str(&format!("{} Comments ({} comments):\n", sentiment, texts.len()));
        if texts.is_empty() {
            prompt.push_str(&format!(
                "No {} comments.\n",
                sentiment.as_str().to_lowercase()
            ));
        } else {
            for text in texts.iter().take(exemplars_per_group) {
                prompt.push_str(&format!("- {text}\n"));
            }
        }
        prompt.push('\n');
    }

    prompt.push_str("Overall Sentiment Distribution:\n");
    for (sentiment, texts) in &groups {
        prompt.push_str(&format!("{}: {}\n", sentiment, texts.len()));
    }

    prompt.push_str("\nProvide a concise summary and actionable insights in Markdown format.");
    prompt
}

/// Deterministic Markdown report.
///
/// Used by the local strategy, and as the fallback when the remote
/// summarizer fails after classification already succeeded.
pub fn render_local_summary(comments: &[ClassifiedComment]) -> String {
    if comments.is_empty() {
        return "No comments available to generate insights.".to_string();
    }

    let distribution = sentiment_distribution(comments);
    let categories = category_distribution(comments);

    let mut summary = String::from("### Comment Analysis Summary\n\n");
    summary.push_str("This analysis was produced with the built-in lexicon and keyword rules.\n\n");

    summary.push_str("**Overall Sentiment Distribution:**\n");
    for sentiment in Sentiment::ALL {
        match distribution.get(&sentiment) {
            Some(share) => summary.push_str(&format!("- {}: {:.2}%\n", sentiment, share)),
            None => summary.push_str(&format!("- {}: no comments\n", sentiment)),
        }
    }

    summary.push_str("\n**Top Comment Categories:**\n");
    for (category, count) in categories.iter().take(5) {
        summary.push_str(&format!("- {}: {} comments\n", category, count));
    }

    summary.push_str("\n**General Observations:**\n");
    let positive = distribution
        .get(&Sentiment::Positive)
        .copied()
        .unwrap_or(0.0);
    let negative = distribution
        .get(&Sentiment::Negative)
        .copied()
        .unwrap_or(0.0);
    if positive > 50.0 {
        summary.push_str("- The overall sentiment appears to be largely positive.\n");
    } else if negative > 30.0 {
        summary.push_str("- There is a notable amount of negative feedback.\n");
    } else {
        summary.push_str("- Sentiment is mixed or predominantly neutral.\n");
    }

    if categories.get("Suggestion").copied().unwrap_or(0) > 0 {
        summary.push_str("- Viewers are actively suggesting improvements.\n");
    }
    if categories.get("Help").copied().unwrap_or(0) > 0 {
        summary.push_str("- Some viewers are asking for help or reporting issues.\n");
    }

    summary.push_str("\n*Configure a classification API key for more detailed insights.*");
    summary
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classified(entries: &[(&str, Sentiment, &str)]) -> Vec<ClassifiedComment> {
        entries
            .iter()
            .map(|(text, sentiment, category)| {
                ClassifiedComment::new(*text, *sentiment, *category)
            })
            .collect()
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let comments = classified(&[
            ("a", Sentiment::Positive, "Positive"),
            ("b", Sentiment::Positive, "Positive"),
            ("c", Sentiment::Neutral, "Neutral/Other"),
        ]);

        let distribution = sentiment_distribution(&comments);
        let total: f64 = distribution.values().sum();
        assert!((total - 100.0).abs() < 0.1, "got {total}");
        assert_eq!(distribution[&Sentiment::Positive], 66.67);
        assert_eq!(distribution[&Sentiment::Neutral], 33.33);
    }

    #[test]
    fn distribution_of_empty_input_is_empty() {
        assert!(sentiment_distribution(&[]).is_empty());
    }

    #[test]
    fn categories_are_ordered_by_count() {
        let comments = classified(&[
            ("a", Sentiment::Neutral, "Help"),
            ("b", Sentiment::Neutral, "Suggestion"),
            ("c", Sentiment::Neutral, "Help"),
            ("d", Sentiment::Neutral, "Help"),
            ("e", Sentiment::Neutral, "Suggestion"),
        ]);

        let categories = category_distribution(&comments);
        let ordered: Vec<_> = categories.keys().map(String::as_str).collect();
        assert_eq!(ordered, vec!["Help", "Suggestion"]);
        assert_eq!(categories["Help"], 3);
        assert_eq!(categories.values().sum::<usize>(), comments.len());
    }

    #[test]
    fn prompt_carries_counts_and_empty_group_lines() {
        let comments = classified(&[
            ("love it", Sentiment::Positive, "Positive"),
            ("works fine", Sentiment::Positive, "Positive"),
            ("so-so", Sentiment::Neutral, "Neutral"),
        ]);

        let prompt = insight_prompt(&comments, 5);
        assert!(prompt.contains("Positive Comments (2 comments):"));
        assert!(prompt.contains("- love it"));
        assert!(prompt.contains("No negative comments."));
        assert!(prompt.contains("No mixed comments."));
        assert!(prompt.contains("Positive: 2"));
        assert!(prompt.contains("Mixed: 0"));
    }

    #[test]
    fn prompt_truncates_exemplars_but_keeps_exact_counts() {
        let comments: Vec<_> = (0..8)
            .map(|i| {
                ClassifiedComment::new(format!("positive {i}"), Sentiment::Positive, "Positive")
            })
            .collect();

        let prompt = insight_prompt(&comments, 2);
        assert!(prompt.contains("Positive Comments (8 comments):"));
        assert!(prompt.contains("- positive 0"));
        assert!(prompt.contains("- positive 1"));
        assert!(!prompt.contains("- positive 2"));
        assert!(prompt.contains("Positive: 8"));
    }

    #[test]
    fn local_summary_renders_all_four_sentiment_lines() {
        let comments = classified(&[("fine", Sentiment::Neutral, "Neutral/Other")]);
        let summary = render_local_summary(&comments);

        assert!(summary.contains("- Neutral: 100.00%"));
        assert!(summary.contains("- Positive: no comments"));
        assert!(summary.contains("- Negative: no comments"));
        assert!(summary.contains("- Mixed: no comments"));
    }

    #[test]
    fn local_summary_observations_follow_thresholds() {
        let mostly_positive = classified(&[
            ("a", Sentiment::Positive, "Positive"),
            ("b", Sentiment::Positive, "Positive"),
            ("c", Sentiment::Neutral, "Neutral/Other"),
        ]);
        assert!(render_local_summary(&mostly_positive).contains("largely positive"));

        let notable_negative = classified(&[
            ("a", Sentiment::Negative, "Negative"),
            ("b", Sentiment::Negative, "Negative"),
            ("c", Sentiment::Positive, "Positive"),
            ("d", Sentiment::Neutral, "Neutral/Other"),
            ("e", Sentiment::Neutral, "Neutral/Other"),
        ]);
        assert!(render_local_summary(&notable_negative).contains("notable amount of negative"));

        let balanced = classified(&[
            ("a", Sentiment::Neutral, "Neutral/Other"),
            ("b", Sentiment::Positive, "Positive"),
        ]);
        assert!(render_local_summary(&balanced).contains("mixed or predominantly neutral"));
    }

    #[test]
    fn local_summary_flags_suggestion_and_help_presence() {
        let comments = classified(&[
            ("please add X", Sentiment::Neutral, "Suggestion"),
            ("it broke", Sentiment::Negative, "Help"),
        ]);

        let summary = render_local_summary(&comments);
        assert!(summary.contains("suggesting improvements"));
        assert!(summary.contains("asking for help"));
    }

    #[test]
    fn empty_input_yields_the_no_comments_message() {
        assert!(render_local_summary(&[]).contains("No comments available"));
    }
}
