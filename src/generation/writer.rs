//! Line-oriented writer for generated Dart source

const INDENT: &str = "  ";

/// Accumulates generated source text with two-space indentation.
#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one indented line.
    pub fn line(&mut self, indent: usize, text: &str) {
        for _ in 0..indent {
            self.buf.push_str(INDENT);
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Append one indented `///` doc-comment line.
    pub fn doc(&mut self, indent: usize, text: &str) {
        if text.is_empty() {
            self.line(indent, "///");
        } else {
            self.line(indent, &format!("/// {text}"));
        }
    }

    /// Append an empty line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_and_docs() {
        let mut w = CodeWriter::new();
        w.doc(0, "A class.");
        w.line(0, "class Foo {");
        w.doc(1, "");
        w.line(1, "int x;");
        w.line(0, "}");

        assert_eq!(w.finish(), "/// A class.\nclass Foo {\n  ///\n  int x;\n}\n");
    }
}
