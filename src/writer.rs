//! Indentation-aware text sink used by the generator.

const INDENT: &str = "    ";

/// Accumulates generated source line by line.
///
/// Lines are terminated with `\n` and indented with four spaces per level, so the
/// output matches `rustfmt` defaults for the shapes the generator emits.
#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
    depth: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        CodeWriter::default()
    }

    /// Writes one line at the current depth. Empty input writes an empty line.
    pub fn line(&mut self, s: impl AsRef<str>) {
        let s = s.as_ref();
        if !s.is_empty() {
            for _ in 0..self.depth {
                self.buf.push_str(INDENT);
            }
            self.buf.push_str(s);
        }
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Writes `s` (usually ending in `{`) and indents what follows.
    pub fn open(&mut self, s: impl AsRef<str>) {
        self.line(s);
        self.depth += 1;
    }

    /// Dedents, then writes `s` (usually `}`).
    pub fn close(&mut self, s: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(s);
    }

    pub fn doc(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.line("///");
        } else {
            self.line(format!("/// {text}"));
        }
    }

    /// Drops trailing empty lines, keeping the final newline.
    pub fn trim_blank_lines(&mut self) {
        while self.buf.ends_with("\n\n") {
            self.buf.pop();
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
