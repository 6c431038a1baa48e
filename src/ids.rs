//! Section Identifier allocation
//!
//! Deterministic ids come from titles (`slugify` + type prefix). Components
//! without a title get a fallback id from `IdGenerator`.
//!
//! Two components with the same title and prefix share an id. Repeated
//! "Home" sections across pages rely on this, so it is kept.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 5;

/// Lowercase, keep only `[a-z0-9\s-]`, whitespace runs to `-`, collapse
/// repeated `-`, trim `-` at both ends.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            in_whitespace = true;
            continue;
        }
        if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
            continue;
        }
        if in_whitespace {
            if !slug.ends_with('-') {
                slug.push('-');
            }
            in_whitespace = false;
        }
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }
    // a trailing whitespace run would have produced a trailing hyphen
    slug.trim_matches('-').to_string()
}

/// Section id for a titled region, `"<prefix>-<slug>"` (or just the slug
/// when the prefix is empty). Titles that are absent or empty fall back to
/// a freshly generated id.
pub fn section_id(title: Option<&str>, prefix: &str, ids: &IdGenerator) -> String {
    match title {
        Some(t) if !t.is_empty() => titled_id(t, prefix),
        _ => ids.next_id(),
    }
}

/// The deterministic half of `section_id`.
pub fn titled_id(title: &str, prefix: &str) -> String {
    let slug = slugify(title);
    if prefix.is_empty() {
        slug
    } else {
        format!("{}-{}", prefix, slug)
    }
}

/// Fallback id source: `id-<unix millis>-<sequence><random suffix>`.
///
/// The sequence makes ids from one generator unique; the timestamp and
/// suffix keep ids from separate generators (separate page loads) apart.
#[derive(Debug, Default)]
pub struct IdGenerator {
    sequence: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let millis = chrono::Utc::now().timestamp_millis();

        let mut rng = rand::thread_rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
            .collect();

        format!("id-{}-{}{}", millis, seq, suffix)
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }
}
