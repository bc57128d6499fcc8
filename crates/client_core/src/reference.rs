//! Startup loaders for the syllabary and worked-example reference lists.

use std::time::{Duration, Instant};

use shared::{
    domain::Endpoint,
    protocol::{ReferenceSign, WorkedExample},
};

use crate::{ClientError, DecoderApi};

pub const SYLLABARY_ERROR_MESSAGE: &str = "Error loading syllabary";

/// Worked examples in delivery order.
pub async fn load_examples<A: DecoderApi + ?Sized>(
    api: &A,
) -> Result<Vec<WorkedExample>, ClientError> {
    let examples = api.examples().await?;
    if examples.is_empty() {
        return Err(ClientError::EmptyCollection {
            endpoint: Endpoint::Examples.name(),
        });
    }
    Ok(examples)
}

/// Syllabary signs sorted by transliteration.
pub async fn load_syllabary<A: DecoderApi + ?Sized>(
    api: &A,
) -> Result<Vec<ReferenceSign>, ClientError> {
    let mut signs = api.syllabary().await?;
    if signs.is_empty() {
        return Err(ClientError::EmptyCollection {
            endpoint: Endpoint::Syllabary.name(),
        });
    }
    sort_by_transliteration(&mut signs);
    Ok(signs)
}

/// Case-insensitive order; spellings that differ only in case put lowercase
/// first, so the result is a total order and re-sorting is a no-op.
pub fn sort_by_transliteration(signs: &mut [ReferenceSign]) {
    signs.sort_by(|a, b| {
        a.transliteration
            .to_lowercase()
            .cmp(&b.transliteration.to_lowercase())
            .then_with(|| b.transliteration.cmp(&a.transliteration))
    });
}

pub fn insert_hint(sign: &ReferenceSign) -> String {
    match sign.phonetic.as_deref().filter(|p| !p.is_empty()) {
        Some(phonetic) if phonetic != sign.transliteration => format!(
            "Add \"{}\" to input (pronounced /{phonetic}/)",
            sign.transliteration
        ),
        _ => format!("Add \"{}\" to input", sign.transliteration),
    }
}

/// Transient highlight of a clicked syllabary card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardHighlight {
    index: usize,
    expires_at: Instant,
}

impl CardHighlight {
    pub fn start(index: usize, now: Instant, duration: Duration) -> Self {
        Self {
            index,
            expires_at: now + duration,
        }
    }

    pub fn is_active(&self, now: Instant) -> bool {
        now < self.expires_at
    }

    pub fn highlights(&self, index: usize, now: Instant) -> bool {
        self.index == index && self.is_active(now)
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .checked_duration_since(now)
            .filter(|d| !d.is_zero())
    }
}

/// Highlights of clicked syllabary cards, each reverting on its own deadline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardHighlights {
    active: Vec<CardHighlight>,
}

impl CardHighlights {
    /// Starts (or restarts) the highlight for `index` and drops expired ones.
    pub fn start(&mut self, index: usize, now: Instant, duration: Duration) {
        self.active.retain(|h| h.index != index && h.is_active(now));
        self.active.push(CardHighlight::start(index, now, duration));
    }

    pub fn is_highlighted(&self, index: usize, now: Instant) -> bool {
        self.active.iter().any(|h| h.highlights(index, now))
    }

    /// Time until the next highlight reverts.
    pub fn next_expiry(&self, now: Instant) -> Option<Duration> {
        self.active.iter().filter_map(|h| h.remaining(now)).min()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(sign: &str, transliteration: &str) -> ReferenceSign {
        ReferenceSign {
            sign: sign.to_string(),
            transliteration: transliteration.to_string(),
            phonetic: None,
            unicode: None,
        }
    }

    fn order(signs: &[ReferenceSign]) -> Vec<&str> {
        signs.iter().map(|s| s.transliteration.as_str()).collect()
    }

    #[test]
    fn sorts_by_transliteration() {
        let mut signs = vec![
            sign("𐀳", "te"),
            sign("𐀀", "a"),
            sign("𐀷", "wa"),
            sign("𐀁", "e"),
            sign("𐀂", "i"),
        ];
        sort_by_transliteration(&mut signs);
        assert_eq!(order(&signs), vec!["a", "e", "i", "te", "wa"]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let mut signs = vec![
            sign("𐀒", "qo"),
            sign("x", "A"),
            sign("𐀀", "a"),
            sign("𐀙", "na"),
            sign("𐁀", "a2"),
        ];
        sort_by_transliteration(&mut signs);
        let once = signs.clone();
        sort_by_transliteration(&mut signs);
        assert_eq!(signs, once);
        assert_eq!(order(&signs), vec!["a", "A", "a2", "na", "qo"]);
    }

    #[test]
    fn lowercase_sorts_before_uppercase_of_same_spelling() {
        let mut signs = vec![sign("𐀀", "a"), sign("x", "A"), sign("𐀅", "b")];
        sort_by_transliteration(&mut signs);
        assert_eq!(order(&signs), vec!["a", "A", "b"]);

        let mut signs = vec![sign("x", "Ka"), sign("y", "kA"), sign("z", "ka")];
        sort_by_transliteration(&mut signs);
        assert_eq!(order(&signs), vec!["ka", "kA", "Ka"]);
    }

    #[test]
    fn each_highlight_keeps_its_own_deadline() {
        let start = Instant::now();
        let duration = Duration::from_millis(200);
        let mut highlights = CardHighlights::default();

        highlights.start(0, start, duration);
        let later = start + Duration::from_millis(120);
        highlights.start(4, later, duration);

        assert!(highlights.is_highlighted(0, later));
        assert!(highlights.is_highlighted(4, later));
        assert_eq!(
            highlights.next_expiry(later),
            Some(Duration::from_millis(80))
        );

        let after_first = start + duration;
        assert!(!highlights.is_highlighted(0, after_first));
        assert!(highlights.is_highlighted(4, after_first));
        assert_eq!(
            highlights.next_expiry(after_first),
            Some(Duration::from_millis(120))
        );
        assert_eq!(highlights.next_expiry(later + duration), None);
    }

    #[test]
    fn restarting_a_highlight_extends_it() {
        let start = Instant::now();
        let duration = Duration::from_millis(200);
        let mut highlights = CardHighlights::default();

        highlights.start(2, start, duration);
        highlights.start(2, start + Duration::from_millis(150), duration);
        assert!(highlights.is_highlighted(2, start + Duration::from_millis(300)));
        assert!(!highlights.is_highlighted(2, start + Duration::from_millis(350)));
    }

    #[test]
    fn highlight_reverts_after_duration() {
        let now = Instant::now();
        let highlight = CardHighlight::start(3, now, Duration::from_millis(200));

        assert!(highlight.highlights(3, now));
        assert!(!highlight.highlights(2, now));
        assert!(highlight.highlights(3, now + Duration::from_millis(199)));
        assert!(!highlight.is_active(now + Duration::from_millis(200)));
        assert_eq!(highlight.remaining(now + Duration::from_millis(250)), None);
        assert_eq!(
            highlight.remaining(now + Duration::from_millis(50)),
            Some(Duration::from_millis(150))
        );
    }

    #[test]
    fn hint_mentions_pronunciation_only_when_it_differs() {
        let mut qa = sign("𐀣", "qa");
        assert_eq!(insert_hint(&qa), "Add \"qa\" to input");
        qa.phonetic = Some("kʷa".into());
        assert_eq!(insert_hint(&qa), "Add \"qa\" to input (pronounced /kʷa/)");
        qa.phonetic = Some("qa".into());
        assert_eq!(insert_hint(&qa), "Add \"qa\" to input");
    }
}
