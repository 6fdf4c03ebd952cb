//! Output templates.
//!
//! A template is literal text plus substitutions: `%p` path, `%P` short
//! path, `%l` line count, `%b` byte size, and the escapes `\t` and `\n`.
//! Any other `%x` or `\x` pair is written back unchanged.

use std::io::{self, Write};

use crate::record::PathRecord;
use crate::traits::RecordSink;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Path,
    ShortPath,
    Lines,
    Bytes,
}

/// A parsed output template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(format: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = format.chars();

        while let Some(c) = chars.next() {
            let substitution = match c {
                '\\' => match chars.next() {
                    Some('t') => {
                        literal.push('\t');
                        None
                    }
                    Some('n') => {
                        literal.push('\n');
                        None
                    }
                    other => {
                        literal.push('\\');
                        literal.extend(other);
                        None
                    }
                },
                '%' => match chars.next() {
                    Some('p') => Some(Segment::Path),
                    Some('P') => Some(Segment::ShortPath),
                    Some('l') => Some(Segment::Lines),
                    Some('b') => Some(Segment::Bytes),
                    other => {
                        literal.push('%');
                        literal.extend(other);
                        None
                    }
                },
                c => {
                    literal.push(c);
                    None
                }
            };

            if let Some(segment) = substitution {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(segment);
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// `"<path> <line_count>\n"`, with the path shortened when `short`.
    pub fn default_line(short: bool) -> Self {
        let path = if short {
            Segment::ShortPath
        } else {
            Segment::Path
        };
        Self {
            segments: vec![
                path,
                Segment::Literal(" ".into()),
                Segment::Lines,
                Segment::Literal("\n".into()),
            ],
        }
    }

    /// Write the expansion of this template for `record`. Nothing is
    /// appended beyond what the template says.
    pub fn render<W: Write + ?Sized>(&self, record: &PathRecord, out: &mut W) -> io::Result<()> {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.write_all(text.as_bytes())?,
                Segment::Path => out.write_all(record.path.as_os_str().as_encoded_bytes())?,
                Segment::ShortPath => {
                    out.write_all(shorten_path(&record.path.to_string_lossy()).as_bytes())?
                }
                Segment::Lines => write!(out, "{}", record.line_count)?,
                Segment::Bytes => write!(out, "{}", record.byte_size)?,
            }
        }
        Ok(())
    }

    pub fn render_to_string(&self, record: &PathRecord) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.render(record, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Shorten every directory component to its first character.
///
/// `.` and `..` stay whole, the final component stays whole, empty
/// components are dropped and a leading `/` is kept.
pub fn shorten_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    if path.starts_with('/') {
        out.push('/');
    }

    let mut components = path.split('/').filter(|c| !c.is_empty()).peekable();
    while let Some(component) = components.next() {
        if components.peek().is_none() {
            out.push_str(component);
            break;
        }
        match component {
            "." | ".." => out.push_str(component),
            _ => out.extend(component.chars().next()),
        }
        out.push('/');
    }
    out
}

/// A [`RecordSink`] that renders each record through a [`Template`].
pub struct TemplateWriter<W: Write> {
    template: Template,
    out: W,
}

impl<W: Write> TemplateWriter<W> {
    pub fn new(template: Template, out: W) -> Self {
        Self { template, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for TemplateWriter<W> {
    fn accept(&mut self, record: &PathRecord) -> io::Result<()> {
        self.template.render(record, &mut self.out)
    }
}
