/// Last-in-first-out stack of strings shared by the elements of one pipeline
/// run. Created empty for every path and dropped afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueStack {
    values: Vec<String>,
}

impl ValueStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.values.pop()
    }

    pub fn peek(&self) -> Option<&str> {
        self.values.last().map(String::as_str)
    }

    /// Exchange the two topmost values. Returns false, leaving the stack
    /// untouched, when fewer than two values are present.
    pub fn swap_top(&mut self) -> bool {
        let len = self.values.len();
        if len < 2 {
            return false;
        }
        self.values.swap(len - 1, len - 2);
        true
    }

    /// Push a copy of the top value. Returns false on an empty stack.
    pub fn duplicate_top(&mut self) -> bool {
        match self.values.last().cloned() {
            Some(top) => {
                self.values.push(top);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_needs_two_values() {
        let mut stack = ValueStack::new();
        stack.push("a");
        assert!(!stack.swap_top());
        assert_eq!(stack.peek(), Some("a"));

        stack.push("b");
        assert!(stack.swap_top());
        assert_eq!(stack.pop().as_deref(), Some("a"));
        assert_eq!(stack.pop().as_deref(), Some("b"));
    }

    #[test]
    fn test_duplicate_top() {
        let mut stack = ValueStack::new();
        assert!(!stack.duplicate_top());
        stack.push("x");
        assert!(stack.duplicate_top());
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop().as_deref(), Some("x"));
        assert_eq!(stack.pop().as_deref(), Some("x"));
        assert!(stack.is_empty());
    }
}
