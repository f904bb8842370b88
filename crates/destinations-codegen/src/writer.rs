use destinations_schema::types::Importable;
use std::collections::BTreeSet;

const INDENT: &str = "    ";

///
/// KotlinFile
///
/// Line-oriented Kotlin source builder. Imports are collected while the
/// body is written and rendered sorted, so output only depends on content.
///

pub(crate) struct KotlinFile {
    package: String,
    imports: BTreeSet<String>,
    body: String,
    depth: usize,
}

impl KotlinFile {
    pub(crate) fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            imports: BTreeSet::new(),
            body: String::new(),
            depth: 0,
        }
    }

    /// Import a declaration and return the name to use for it.
    pub(crate) fn import(&mut self, importable: &Importable) -> String {
        let package = importable.package_name();
        if !package.is_empty() && package != self.package && package != "kotlin" {
            self.imports.insert(importable.qualified_name.clone());
        }

        importable.simple_name.clone()
    }

    pub(crate) fn import_qualified(&mut self, qualified_name: &str) -> String {
        self.import(&Importable::from_qualified(qualified_name))
    }

    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.body.push_str(INDENT);
            }
            self.body.push_str(text);
        }
        self.body.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.body.push('\n');
    }

    /// Write `header {` and indent.
    pub(crate) fn open(&mut self, header: impl AsRef<str>) {
        let header = header.as_ref();
        if header.is_empty() {
            self.line("{");
        } else {
            self.line(format!("{header} {{"));
        }
        self.depth += 1;
    }

    /// Dedent and write `}` followed by `suffix`.
    pub(crate) fn close(&mut self, suffix: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(format!("}}{suffix}"));
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn finish(self) -> String {
        let mut out = String::new();
        out.push_str(crate::GENERATED_HEADER);
        out.push('\n');
        if !self.package.is_empty() {
            out.push_str(&format!("package {}\n\n", self.package));
        }
        if !self.imports.is_empty() {
            for import in &self.imports {
                out.push_str(&format!("import {import}\n"));
            }
            out.push('\n');
        }
        out.push_str(&self.body);

        out
    }
}

/// Quote a Kotlin string literal, escaping template and control characters.
pub(crate) fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');

    out
}
