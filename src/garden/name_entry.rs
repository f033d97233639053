use crate::constants::LABELS;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameEntry {
    text: String,
}

impl NameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn push(&mut self, c: char) {
        if c.is_control() || self.text.chars().count() >= LABELS.max_label_chars {
            return;
        }
        self.text.push(c);
    }

    pub fn pop(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_backspace() {
        let mut entry = NameEntry::new();
        for c in "walk!".chars() {
            entry.push(c);
        }
        entry.pop();
        entry.push('\n');
        assert_eq!(entry.text(), "walk");

        assert_eq!(entry.take(), "walk");
        assert_eq!(entry.text(), "");
        entry.pop();
        assert_eq!(entry.text(), "");
    }

    #[test]
    fn test_length_is_capped() {
        let mut entry = NameEntry::new();
        for _ in 0..100 {
            entry.push('é');
        }
        assert_eq!(entry.text().chars().count(), LABELS.max_label_chars);
    }
}
