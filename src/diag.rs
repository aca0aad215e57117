//! Diagnostics for lexical and syntax errors.
//!
//! The lexer and the parser report problems as [`Diag`] values that carry
//! spans but no source text. [`convert_diag_to_report`] pairs a diagnostic
//! with its [`SourceFile`] and produces a [`miette::Report`] for display.

use crate::ast::Span;
use miette::{Diagnostic, LabeledSpan, Report, Severity};
use std::fmt;

/// A span with explanatory text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagLabel {
    pub span: Span,
    pub message: String,
}

/// An error found while lexing or parsing a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    pub message: String,
    /// Source locations; the first one is rendered as the primary label.
    pub labels: Vec<DiagLabel>,
    /// Suggestion for fixing the query.
    pub help: Option<String>,
    pub notes: Vec<String>,
    /// Stable code such as `iql::syntax`.
    pub code: Option<&'static str>,
}

impl Diag {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            labels: Vec::new(),
            help: None,
            notes: Vec::new(),
            code: None,
        }
    }

    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(DiagLabel {
            span,
            message: message.into(),
        });
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    /// Span of the primary label, if any.
    pub fn primary_span(&self) -> Option<&Span> {
        self.labels.first().map(|label| &label.span)
    }
}

impl fmt::Display for Diag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{code}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Query text being diagnosed, optionally with a display name.
#[derive(Debug, Clone)]
pub struct SourceFile {
    content: String,
    name: Option<String>,
}

impl SourceFile {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            name: None,
        }
    }

    pub fn with_name(content: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            name: Some(name.into()),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Clamps `span` into the bounds of the content. An inverted span
    /// collapses onto its start.
    pub fn clamp_span(&self, span: &Span) -> Span {
        let len = self.content.len();
        let start = span.start.min(len);
        let end = span.end.min(len).max(start);
        start..end
    }

    /// Span a label is drawn on. An empty span at the end of the content
    /// moves onto the last character, since an empty label there renders
    /// without its text.
    pub fn label_span(&self, span: &Span) -> Span {
        let span = self.clamp_span(span);
        let len = self.content.len();
        if span.is_empty() && span.start == len {
            if let Some((last, _)) = self.content.char_indices().next_back() {
                return last..len;
            }
        }
        span
    }
}

/// Converts diagnostics to miette reports over the same source.
pub fn convert_diagnostics_to_reports(diagnostics: &[Diag], source: &SourceFile) -> Vec<Report> {
    diagnostics
        .iter()
        .map(|diag| convert_diag_to_report(diag, source))
        .collect()
}

/// Converts a diagnostic to a miette report with the query text attached.
///
/// Spans are clamped to the source first, and a diagnostic pointing at the
/// end of input is labelled on the last character.
pub fn convert_diag_to_report(diag: &Diag, source: &SourceFile) -> Report {
    let report = Report::new(RenderedDiag::new(diag, source));
    match source.name() {
        Some(name) => report.with_source_code(miette::NamedSource::new(
            name,
            source.content().to_string(),
        )),
        None => report.with_source_code(source.content().to_string()),
    }
}

#[derive(Debug)]
struct RenderedDiag {
    message: String,
    code: Option<&'static str>,
    help: Option<String>,
    labels: Vec<LabeledSpan>,
}

impl RenderedDiag {
    fn new(diag: &Diag, source: &SourceFile) -> Self {
        let labels = diag
            .labels
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let span = source.label_span(&label.span);
                let offset_len = (span.start, span.end - span.start);
                let text = Some(label.message.clone());
                if index == 0 {
                    LabeledSpan::new_primary_with_span(text, offset_len)
                } else {
                    LabeledSpan::new_with_span(text, offset_len)
                }
            })
            .collect();

        let mut help_lines: Vec<&str> = diag.help.iter().map(String::as_str).collect();
        help_lines.extend(diag.notes.iter().map(String::as_str));
        let help = (!help_lines.is_empty()).then(|| help_lines.join("\n"));

        Self {
            message: diag.message.clone(),
            code: diag.code,
            help,
            labels,
        }
    }
}

impl fmt::Display for RenderedDiag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RenderedDiag {}

impl Diagnostic for RenderedDiag {
    fn severity(&self) -> Option<Severity> {
        Some(Severity::Error)
    }

    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.code.map(|code| Box::new(code) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            None
        } else {
            Some(Box::new(self.labels.iter().cloned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::{GraphicalReportHandler, GraphicalTheme};

    fn render(report: &Report) -> String {
        let mut out = String::new();
        GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
            .render_report(&mut out, &**report)
            .unwrap();
        out
    }

    #[test]
    fn builder() {
        let diag = Diag::error("expected `]`, found end of input")
            .with_label(4..4, "input ends here")
            .with_code("iql::unexpected_eof")
            .with_help("close the node with `]`");

        assert_eq!(diag.labels.len(), 1);
        assert_eq!(diag.primary_span(), Some(&(4..4)));
        assert_eq!(diag.code, Some("iql::unexpected_eof"));
        assert_eq!(
            diag.to_string(),
            "iql::unexpected_eof: expected `]`, found end of input"
        );
    }

    #[test]
    fn clamp_span() {
        let src = SourceFile::new("[a]");
        assert_eq!(src.clamp_span(&(0..10)), 0..3);
        let inverted = std::ops::Range { start: 2, end: 1 };
        assert_eq!(src.clamp_span(&inverted), 2..2);
        assert_eq!(src.clamp_span(&(10..20)), 3..3);
    }

    #[test]
    fn end_of_input_label_span() {
        let src = SourceFile::new("[a é");
        assert_eq!(src.label_span(&(5..5)), 3..5);
        assert_eq!(src.label_span(&(1..1)), 1..1);
        assert_eq!(SourceFile::new("").label_span(&(0..0)), 0..0);
    }

    #[test]
    fn end_of_input_label_is_rendered() {
        let source = SourceFile::new("FIND [a");
        let diag = Diag::error("expected `]`, found end of input")
            .with_label(7..7, "input ends here")
            .with_code("iql::unexpected_eof");

        let report = convert_diag_to_report(&diag, &source);
        let label = report.labels().and_then(|mut labels| labels.next());
        assert_eq!(label.map(|l| (l.offset(), l.len())), Some((6, 1)));
        let rendered = render(&report);
        assert!(rendered.contains("input ends here"), "{rendered}");
    }

    #[test]
    fn source_file_name() {
        assert_eq!(SourceFile::new("ALL").name(), None);
        assert_eq!(
            SourceFile::with_name("ALL", "query.iql").name(),
            Some("query.iql")
        );
    }

    #[test]
    fn report_message_and_metadata() {
        let source = SourceFile::with_name("FIND [a", "query.iql");
        let diag = Diag::error("expected `]`, found end of input")
            .with_label(7..7, "input ends here")
            .with_code("iql::unexpected_eof")
            .with_note("nodes are closed with `]`");

        let report = convert_diag_to_report(&diag, &source);
        assert_eq!(report.to_string(), "expected `]`, found end of input");
        assert_eq!(
            report.code().map(|code| code.to_string()).as_deref(),
            Some("iql::unexpected_eof")
        );
        assert_eq!(
            report.help().map(|h| h.to_string()).as_deref(),
            Some("nodes are closed with `]`")
        );
        assert_eq!(report.labels().map(|labels| labels.count()), Some(1));
    }

    #[test]
    fn rendered_report_shows_label() {
        let source = SourceFile::new("FIND [a] +");
        let diag = Diag::error("expected end of input, found `+`")
            .with_label(9..10, "unexpected token")
            .with_code("iql::syntax");

        let rendered = render(&convert_diag_to_report(&diag, &source));
        assert!(rendered.contains("iql::syntax"), "{rendered}");
        assert!(rendered.contains("unexpected token"), "{rendered}");
        assert!(rendered.contains("FIND [a] +"), "{rendered}");
    }

    #[test]
    fn out_of_bounds_spans_do_not_panic() {
        let source = SourceFile::new("ALL");
        let diag = Diag::error("late")
            .with_label(50..60, "past the end")
            .with_label(1..2, "secondary");
        let reports = convert_diagnostics_to_reports(&[diag.clone(), diag], &source);
        assert_eq!(reports.len(), 2);
        let _ = render(&reports[0]);
    }
}
