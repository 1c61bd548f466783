//! Line-oriented code builder
//!
//! Generated runtime text is assembled line by line with explicit
//! indentation bookkeeping, so spliced fragments stay well-formed no
//! matter how deeply they nest.

/// Indentation unit for generated code
const INDENT: &str = "  ";

/// Accumulates lines of generated code at a tracked indentation depth
#[derive(Debug, Default)]
pub struct CodeBuilder {
    lines: Vec<String>,
    depth: usize,
}

impl CodeBuilder {
    /// Create a new empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single line at the current depth
    ///
    /// An empty line is kept blank rather than indented.
    pub fn line(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        if line.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", INDENT.repeat(self.depth), line));
        }
    }

    /// Append a blank line
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Append a pre-rendered fragment, re-indenting each of its lines
    pub fn lines(&mut self, fragment: &str) {
        for line in fragment.lines() {
            self.line(line);
        }
    }

    /// Increase indentation depth by one level
    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decrease indentation depth by one level
    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Join the accumulated lines into the final text
    pub fn build(self) -> String {
        let capacity = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut out = String::with_capacity(capacity);
        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(line);
        }
        out
    }
}
