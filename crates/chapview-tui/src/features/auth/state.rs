/// API key input on the login screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    input: String,
}

impl LoginForm {
    pub fn with_key(key: Option<String>) -> Self {
        Self {
            input: key.unwrap_or_default(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push(&mut self, ch: char) {
        self.input.push(ch);
    }

    /// Appends pasted text; line breaks are dropped since keys are one line.
    pub fn paste(&mut self, text: &str) {
        self.input
            .extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }
}
