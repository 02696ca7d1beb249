/// Position in a single source line.
///
/// `Copy` on purpose: a matcher tries an alternative on a copy and writes it
/// back only on success, so a failed alternative consumes nothing.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Text consumed since `start`.
    pub fn since(&self, start: usize) -> &'a str {
        &self.src[start..self.pos]
    }

    pub fn is_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }
}

// ----------------------------------------------------------------------------
// Consumers

impl<'a> Cursor<'a> {
    pub fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Consume the longest prefix whose chars all satisfy `cond`.
    pub fn take_while<F: Fn(char) -> bool>(&mut self, cond: F) -> &'a str {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, ch)| !cond(ch))
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Consume everything up to the end of the line.
    pub fn take_rest(&mut self) -> &'a str {
        let rest = self.rest();
        self.pos = self.src.len();
        rest
    }

    /// Returns whether any whitespace was consumed.
    pub fn skip_ws(&mut self) -> bool {
        !self.take_while(char::is_whitespace).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_while() {
        let mut cur = Cursor::new("abc123 rest");
        assert_eq!(cur.take_while(|c| c.is_ascii_alphabetic()), "abc");
        assert_eq!(cur.take_while(|c| c.is_ascii_alphabetic()), "");
        assert_eq!(cur.take_while(|c| c.is_ascii_digit()), "123");
        assert!(cur.skip_ws());
        assert!(!cur.skip_ws());
        assert_eq!(cur.rest(), "rest");
        assert_eq!(cur.take_rest(), "rest");
        assert!(cur.is_end());
        assert_eq!(cur.peek(), None);
    }

    #[test]
    fn test_backtrack_by_copy() {
        let mut cur = Cursor::new("r1,x");
        let mut ahead = cur;
        assert!(ahead.eat('r'));
        assert!(!ahead.eat(';'));
        assert_eq!(cur.pos(), 0);
        cur = ahead;
        assert_eq!(cur.since(0), "r");
        assert!(cur.eat_str("1,"));
        assert_eq!(cur.rest(), "x");
    }

    #[test]
    fn test_multibyte_whitespace() {
        let mut cur = Cursor::new("\u{3000}# note");
        assert!(cur.skip_ws());
        assert!(cur.eat('#'));
    }
}
