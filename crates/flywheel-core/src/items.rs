//! Item sources that feed text into wheels.

/// Supplies the items a wheel scrolls through.
///
/// Implementations only need to answer how many items exist and what
/// each one reads as. Indices outside `0..count()` return `None`.
pub trait ItemSource {
    /// Number of items.
    fn count(&self) -> usize;

    /// Text for the item at `index`, or `None` when out of range.
    fn text(&self, index: usize) -> Option<String>;

    /// Length in characters of the widest item. Used for layout.
    fn max_text_len(&self) -> usize {
        (0..self.count())
            .filter_map(|i| self.text(i))
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// Consecutive integers from `min` to `max` inclusive, optionally
/// zero-padded to a fixed width.
#[derive(Debug, Clone)]
pub struct NumericSource {
    min: i32,
    max: i32,
    pad_width: Option<usize>,
}

impl NumericSource {
    pub fn new(min: i32, max: i32) -> Self {
        Self {
            min,
            max,
            pad_width: None,
        }
    }

    /// Like [`NumericSource::new`] but values render zero-padded, e.g.
    /// `07` for 7 at width 2.
    pub fn zero_padded(min: i32, max: i32, width: usize) -> Self {
        Self {
            min,
            max,
            pad_width: Some(width),
        }
    }

    /// The integer value at `index`, or `None` when out of range.
    pub fn value_at(&self, index: usize) -> Option<i32> {
        if index < self.count() {
            Some(self.min + index as i32)
        } else {
            None
        }
    }
}

impl ItemSource for NumericSource {
    fn count(&self) -> usize {
        // An inverted range is empty, not negative
        (self.max as i64 - self.min as i64 + 1).max(0) as usize
    }

    fn text(&self, index: usize) -> Option<String> {
        let value = self.value_at(index)?;
        Some(match self.pad_width {
            Some(width) => format!("{:0width$}", value, width = width),
            None => value.to_string(),
        })
    }

    fn max_text_len(&self) -> usize {
        if self.count() == 0 {
            return 0;
        }
        let min_len = self.text(0).map(|s| s.chars().count()).unwrap_or(0);
        let max_len = self
            .text(self.count() - 1)
            .map(|s| s.chars().count())
            .unwrap_or(0);
        min_len.max(max_len)
    }
}

/// A fixed list of labels, e.g. month or weekday names.
#[derive(Debug, Clone)]
pub struct LabelSource {
    labels: Vec<String>,
}

impl LabelSource {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }
}

impl ItemSource for LabelSource {
    fn count(&self) -> usize {
        self.labels.len()
    }

    fn text(&self, index: usize) -> Option<String> {
        self.labels.get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_source_range() {
        let source = NumericSource::new(1970, 2100);
        assert_eq!(source.count(), 131);
        assert_eq!(source.text(0), Some("1970".to_string()));
        assert_eq!(source.text(130), Some("2100".to_string()));
        assert_eq!(source.text(131), None);
        assert_eq!(source.value_at(30), Some(2000));
    }

    #[test]
    fn test_numeric_source_zero_padded() {
        let source = NumericSource::zero_padded(1, 12, 2);
        assert_eq!(source.count(), 12);
        assert_eq!(source.text(0), Some("01".to_string()));
        assert_eq!(source.text(11), Some("12".to_string()));
        assert_eq!(source.max_text_len(), 2);
    }

    #[test]
    fn test_numeric_source_inverted_range_is_empty() {
        let source = NumericSource::new(10, 5);
        assert_eq!(source.count(), 0);
        assert_eq!(source.text(0), None);
        assert_eq!(source.max_text_len(), 0);
    }

    #[test]
    fn test_numeric_source_negative_values() {
        let source = NumericSource::new(-5, 5);
        assert_eq!(source.count(), 11);
        assert_eq!(source.text(0), Some("-5".to_string()));
        assert_eq!(source.text(10), Some("5".to_string()));
    }

    #[test]
    fn test_label_source() {
        let source = LabelSource::new(vec!["Jan".to_string(), "Feb".to_string()]);
        assert_eq!(source.count(), 2);
        assert_eq!(source.text(1), Some("Feb".to_string()));
        assert_eq!(source.text(2), None);
        assert_eq!(source.max_text_len(), 3);
    }
}
