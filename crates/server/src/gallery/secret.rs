use std::collections::VecDeque;

/// Rolling window over the last keystrokes, matched against a secret word.
#[derive(Debug)]
pub struct SecretSequence {
    secret: String,
    window: VecDeque<String>,
    capacity: usize,
}

impl SecretSequence {
    pub fn new(secret: &str) -> Self {
        let secret = secret.to_lowercase();
        let capacity = secret.chars().count();
        Self {
            secret,
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records one key press. Returns true when the window spells the secret.
    pub fn push(&mut self, key: &str) -> bool {
        if self.capacity == 0 {
            return false;
        }
        self.window.push_back(key.to_lowercase());
        if self.window.len() > self.capacity {
            self.window.pop_front();
        }
        self.window.iter().map(String::as_str).collect::<String>() == self.secret
    }
}
