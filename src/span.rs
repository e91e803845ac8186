use derive_more::Display;

/// Byte range into the source text, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("[{}:{}]", start, end)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn empty(start: usize) -> Self {
        Span { start, end: start }
    }

    pub fn str_from_source<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start..self.end]
    }

    pub fn string_from_source(&self, input: &str) -> String {
        self.str_from_source(input).to_string()
    }

    pub fn to_start_row_col(self, input: &str) -> (usize, usize) {
        let mut row = 1;
        let mut col = 1;
        for (offset, c) in input.char_indices() {
            if offset >= self.start {
                break;
            }
            match c {
                '\n' => {
                    row += 1;
                    col = 1;
                }
                _ => {
                    col += 1;
                }
            }
        }
        (row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_col_counts_lines() {
        let input = "1 +\n  foo";
        let span = Span::new(6, 9);
        assert_eq!(span.to_start_row_col(input), (2, 3));
        assert_eq!(span.str_from_source(input), "foo");
    }
}
