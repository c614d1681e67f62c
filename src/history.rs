use crate::translate::TranslationRecord;

const ENTRY_SEPARATOR: &str = "---";

/// Append-only log of the translations made during one session.
#[derive(Debug, Clone, Default)]
pub struct TranslationHistory {
    records: Vec<TranslationRecord>,
}

impl TranslationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: TranslationRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent first
    pub fn iter_recent_first(&self) -> impl Iterator<Item = &TranslationRecord> {
        self.records.iter().rev()
    }

    /// Plain-text rendering, most recent first, with a separator line between entries.
    pub fn render_all(&self) -> String {
        let mut out = String::new();
        let total = self.records.len();

        for (i, record) in self.iter_recent_first().enumerate() {
            out.push_str(&format!("**{}**\n", record.language_pair));
            out.push_str("Original:\n");
            out.push_str(&record.source);
            out.push('\n');
            out.push_str("Translation:\n");
            out.push_str(&record.translation);
            out.push('\n');
            if i + 1 < total {
                out.push_str(ENTRY_SEPARATOR);
                out.push('\n');
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: &str, translation: &str) -> TranslationRecord {
        TranslationRecord::new(
            source.to_string(),
            translation.to_string(),
            "Auto Detect → Spanish".to_string(),
        )
    }

    #[test]
    fn iterates_newest_first() {
        let mut history = TranslationHistory::new();
        history.append(record("one", "uno"));
        history.append(record("two", "dos"));
        history.append(record("three", "tres"));

        let sources: Vec<&str> = history
            .iter_recent_first()
            .map(|r| r.source.as_str())
            .collect();
        assert_eq!(sources, ["three", "two", "one"]);
    }

    #[test]
    fn render_separates_entries_but_not_after_last() {
        let mut history = TranslationHistory::new();
        history.append(record("one", "uno"));
        history.append(record("two", "dos"));

        let rendered = history.render_all();
        assert_eq!(
            rendered,
            "**Auto Detect → Spanish**\nOriginal:\ntwo\nTranslation:\ndos\n---\n\
             **Auto Detect → Spanish**\nOriginal:\none\nTranslation:\nuno\n"
        );
        assert_eq!(rendered.matches(ENTRY_SEPARATOR).count(), 1);
    }

    #[test]
    fn empty_history_renders_nothing() {
        let history = TranslationHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.render_all(), "");
    }
}
