//! Indenting line writer on top of a [`LineSink`].

use mapgen_core::LineSink;

const INDENT: &str = "  ";

/// Emits TypeScript lines with two-space indentation.
///
/// ```
/// use mapgen_core::LineBuffer;
/// use mapgen_mavlink::writer::TsWriter;
///
/// let mut buffer = LineBuffer::new();
/// let mut w = TsWriter::new(&mut buffer);
/// w.line("export enum MavState {")
///     .indent()
///     .line("UNINIT = 0,")
///     .dedent()
///     .line("}");
///
/// assert_eq!(buffer.drain(), vec!["export enum MavState {", "  UNINIT = 0,", "}"]);
/// ```
pub struct TsWriter<'a> {
    sink: &'a mut dyn LineSink,
    level: usize,
}

impl<'a> TsWriter<'a> {
    pub fn new(sink: &'a mut dyn LineSink) -> Self {
        Self { sink, level: 0 }
    }

    /// Add a line at the current indentation.
    pub fn line(&mut self, s: &str) -> &mut Self {
        if s.is_empty() {
            self.sink.append_line("");
        } else {
            self.sink
                .append_line(&format!("{}{}", INDENT.repeat(self.level), s));
        }
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.sink.append_line("");
        self
    }

    pub fn indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// Add a JSDoc block; nothing is written when every line is empty.
    pub fn jsdoc<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<String> = lines
            .into_iter()
            .flat_map(|l| {
                l.as_ref()
                    .lines()
                    .map(|s| s.trim().to_string())
                    .collect::<Vec<_>>()
            })
            .filter(|l| !l.is_empty())
            .collect();

        if lines.is_empty() {
            return self;
        }

        self.line("/**");
        for l in &lines {
            self.line(&format!(" * {}", l.replace("*/", "*\\/")));
        }
        self.line(" */")
    }
}
