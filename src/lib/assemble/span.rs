use std::fmt;

/// Byte range of a token within the line it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanBounds {
    pub start: usize,
    pub end: usize,
}
impl SpanBounds {
    /// `span` must be a subslice of `source`.
    pub fn new(span: &str, source: &str) -> Self {
        let start = span.as_ptr() as usize - source.as_ptr() as usize;
        assert!(start <= source.len());
        let end = start + span.len();
        assert!(end <= source.len());
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    msg: String,
    span: Option<SpanBounds>,
}
impl SyntaxError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            span: None,
        }
    }

    pub fn s<T>(msg: impl Into<String>) -> Result<T, SyntaxError> {
        Err(Self::new(msg))
    }

    /// Attach a location unless a more precise one was already recorded.
    pub fn at(mut self, span: SpanBounds) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }

    pub fn span(&self) -> Option<SpanBounds> {
        self.span
    }
}
impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.msg)
    }
}
impl std::error::Error for SyntaxError {}

struct ErrorPrinter<'a> {
    fname: &'a str,
    lines: Vec<&'a str>,
}
impl<'a> ErrorPrinter<'a> {
    fn new(fname: &'a str, source: &'a str) -> Self {
        Self {
            fname,
            lines: source.lines().collect(),
        }
    }

    fn print(&self, line_no: usize, msg: &str, span: Option<SpanBounds>) {
        const TABWIDTH: usize = 8;

        let line = self.lines.get(line_no).copied().unwrap_or("");
        let span = span.unwrap_or(SpanBounds { start: 0, end: line.len() });

        // convert byte positions to character positions (within the line)
        let mut start_ci = None;
        let mut end_ci = None;
        let mut ci = 0;
        for (byte_offset, c) in line.char_indices() {
            if span.start == byte_offset {
                start_ci = Some(ci);
            }
            if span.end == byte_offset {
                end_ci = Some(ci);
            }
            ci += if c == '\t' { TABWIDTH } else { 1 };
        }
        let start_ci = start_ci.unwrap_or(ci);
        let end_ci = end_ci.unwrap_or(ci);

        let underline: String = (0..ci + 1)
            .map(|i| {
                if i == start_ci {
                    '^'
                } else if i > start_ci && i < end_ci {
                    '~'
                } else {
                    ' '
                }
            })
            .collect();

        fn trim(s: &str) -> &str {
            match s.char_indices().nth(115) {
                Some((i, _)) => &s[..i],
                None => s,
            }
        }

        eprintln!("{}:{}:{} {}", self.fname, line_no + 1, start_ci + 1, msg);
        eprintln!("{}", trim(line));
        eprintln!("{}", trim(underline.trim_end()));
    }
}

/// All syntax errors found in a listing, keyed by zero based line number.
#[derive(Debug)]
pub struct Error(pub Vec<(usize, SyntaxError)>);
impl Error {
    pub fn display(&self, fname: &str, source: &str) {
        let printer = ErrorPrinter::new(fname, source);
        for (line_no, err) in self.0.iter() {
            printer.print(*line_no, &format!("Error: {}", err.msg()), err.span());
        }
    }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, (line_no, err)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "line {}: {}", line_no + 1, err)?;
        }
        Ok(())
    }
}
impl std::error::Error for Error {}
