/// Text of the single-line input field. The stored value is kept verbatim;
/// only [`InputSurface::read`] trims, for submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSurface {
    text: String,
}

impl InputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> String {
        self.text.trim().to_string()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn raw(&self) -> &str {
        &self.text
    }

    /// Binding for the text widget that edits the value in place.
    pub fn raw_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn append(&mut self, fragment: &str) {
        self.text.push_str(fragment);
    }

    pub fn replace(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::InputSurface;

    #[test]
    fn read_trims_but_storage_does_not() {
        let mut input = InputSurface::new();
        input.append("  𐀀𐀁 ");
        assert_eq!(input.read(), "𐀀𐀁");
        assert_eq!(input.raw(), "  𐀀𐀁 ");
    }

    #[test]
    fn append_concatenates_and_replace_overwrites() {
        let mut input = InputSurface::new();
        input.append("te");
        input.append("𐀀");
        assert_eq!(input.raw(), "te𐀀");

        input.replace("𐀀𐀁𐀂");
        assert_eq!(input.raw(), "𐀀𐀁𐀂");
    }

    #[test]
    fn whitespace_only_is_blank_and_clear_empties() {
        let mut input = InputSurface::new();
        input.append(" \t ");
        assert!(input.is_blank());
        assert_eq!(input.read(), "");

        input.append("𐀀");
        assert!(!input.is_blank());
        input.clear();
        assert_eq!(input.raw(), "");
    }
}
