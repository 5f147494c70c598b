// Live Draw Engine - Participant normalization
use std::collections::HashSet;
use std::ops::Deref;

/// Trimmed, deduplicated participant roster.
///
/// Only [`normalize`] builds one, so any value of this type holds no two
/// entries that compare equal after trimming and lowercasing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizedParticipants(Vec<String>);

impl NormalizedParticipants {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    pub fn contains(&self, participant: &str) -> bool {
        let key = dedup_key(participant);
        self.0.iter().any(|entry| dedup_key(entry) == key)
    }
}

impl Deref for NormalizedParticipants {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

fn dedup_key(entry: &str) -> String {
    entry.trim().to_lowercase()
}

/// Trim every entry, drop blanks and keep the first occurrence of each
/// case-insensitive duplicate, in roster order.
pub fn normalize<I, S>(raw_entries: I) -> NormalizedParticipants
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut participants = Vec::new();

    for entry in raw_entries {
        let trimmed = entry.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            participants.push(trimmed.to_string());
        }
    }

    NormalizedParticipants(participants)
}

/// Split pasted roster text into raw entries (newline, comma or semicolon separated)
pub fn split_entries(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| matches!(c, '\n' | '\r' | ',' | ';'))
}

pub fn normalize_text(text: &str) -> NormalizedParticipants {
    normalize(split_entries(text))
}
