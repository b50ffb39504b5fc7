// src/printer/printers.rs

//! Specialized printer struct [`PrinterLine`] and helper functions
//! for printing matched lines.
//!
//! [`PrinterLine`]: self::PrinterLine

use crate::common::NLu8a;
use crate::debug::printers::de_err;

use std::io::{
    Result,
    Write, // for `std::io::Stdout.flush`
};

#[allow(unused_imports)]
use ::more_asserts::{debug_assert_le, debug_assert_lt};
#[doc(hidden)]
pub use ::termcolor::{Color, ColorChoice, ColorSpec, WriteColor};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// globals and constants
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// [`Color`] for printing plain line text.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_DEFAULT: Color = Color::White;

/// [`Color`] for printing matched keyword terms within a line.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_HIGHLIGHT: Color = Color::Yellow;

/// [`Color`] for printing the summary.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_SUMMARY: Color = Color::Cyan;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A `[begin, end)` byte range within a line.
pub type MatchRange = (usize, usize);

/// Return the sorted, merged byte ranges of each case-insensitive occurrence
/// of each of the lowercase `terms` within `line`.
///
/// Only ASCII lines are searched; lowercasing other text may change byte
/// offsets so non-ASCII lines return no ranges.
pub fn match_ranges(
    line: &str,
    terms: &[String],
) -> Vec<MatchRange> {
    if terms.is_empty() || !line.is_ascii() {
        return Vec::with_capacity(0);
    }
    let line_lower: String = line.to_ascii_lowercase();
    let mut ranges: Vec<MatchRange> = Vec::new();
    for term in terms.iter() {
        if term.is_empty() {
            continue;
        }
        let mut at: usize = 0;
        while let Some(index) = line_lower[at..].find(term.as_str()) {
            let begin: usize = at + index;
            let end: usize = begin + term.len();
            ranges.push((begin, end));
            at = begin + 1;
            if at >= line_lower.len() {
                break;
            }
        }
    }
    ranges.sort_unstable();
    let mut merged: Vec<MatchRange> = Vec::with_capacity(ranges.len());
    for (begin, end) in ranges.into_iter() {
        match merged.last_mut() {
            Some(last) if begin <= last.1 => {
                last.1 = std::cmp::max(last.1, end);
            }
            _ => merged.push((begin, end)),
        }
    }

    merged
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PrinterLine
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A printer of matched lines to stdout, highlighting the keyword terms.
pub struct PrinterLine {
    /// termcolor handle to stdout
    stdout_color: termcolor::StandardStream,
    /// should printing be in color?
    do_color: bool,
    /// color settings for line text
    color_spec_text: ColorSpec,
    /// color settings for matched terms
    color_spec_highlight: ColorSpec,
    /// last value passed to `self.stdout_color.set_color()`
    ///
    /// used by macro `setcolor_or_return`
    color_spec_last: ColorSpec,
    /// lowercase terms to highlight
    terms: Vec<String>,
}

/// Result of printing a line; the count of bytes printed.
pub type PrinterLineResult = Result<usize>;

/// Macro to write to given stdout. If there is an error then
/// `return PrinterLineResult::Err`.
macro_rules! write_or_return {
    ($stdout:expr, $slice_:expr, $printed:expr) => {
        match $stdout.write_all($slice_) {
            Ok(_) => {
                $printed += $slice_.len();
            }
            Err(err) => {
                // XXX: this will print when this program stdout is truncated, like when piping
                //      to `head`, e.g. `rlsearch file.log | head`
                //          Broken pipe (os error 32)
                de_err!(
                    "{}.write({}@{:p}) (len {})) error {}",
                    stringify!($stdout),
                    stringify!($slice_),
                    $slice_,
                    $slice_.len(),
                    err
                );
                #[allow(clippy::match_single_binding)]
                match $stdout.flush() {
                    _ => {}
                }
                return PrinterLineResult::Err(err);
            }
        }
    };
}

/// Macro that sets output color, only changed if needed.
///
/// Unnecessary changes to `set_color` may cause errant formatting bytes to
/// print to the terminal.
macro_rules! setcolor_or_return {
    ($stdout:expr, $color_spec:expr, $color_spec_last:expr) => {
        if $color_spec != $color_spec_last {
            if let Err(err) = $stdout.set_color(&$color_spec) {
                de_err!("{}.set_color({:?}) returned error {}", stringify!($stdout), $color_spec, err);
                return PrinterLineResult::Err(err);
            };
            $color_spec_last = $color_spec.clone();
        }
    };
}

impl PrinterLine {
    /// Create a new `PrinterLine`.
    ///
    /// `terms` are the lowercase terms of the keyword, see
    /// [`MatchPredicate::terms`].
    ///
    /// [`MatchPredicate::terms`]: crate::data::predicate::MatchPredicate::terms
    pub fn new(
        color_choice: ColorChoice,
        color_text: Color,
        color_highlight: Color,
        terms: Vec<String>,
    ) -> PrinterLine {
        let stdout_color = termcolor::StandardStream::stdout(color_choice);
        let do_color: bool = match color_choice {
            ColorChoice::Never => false,
            ColorChoice::Always | ColorChoice::AlwaysAnsi => true,
            ColorChoice::Auto => stdout_color.supports_color(),
        };
        let mut color_spec_text = ColorSpec::new();
        color_spec_text.set_fg(Some(color_text));
        let mut color_spec_highlight = ColorSpec::new();
        color_spec_highlight
            .set_fg(Some(color_highlight))
            .set_bold(true);

        PrinterLine {
            stdout_color,
            do_color,
            color_spec_text,
            color_spec_highlight,
            color_spec_last: ColorSpec::new(),
            terms,
        }
    }

    /// Print `line` and a line terminator.
    pub fn print_line(
        &mut self,
        line: &str,
    ) -> PrinterLineResult {
        let mut printed: usize = 0;
        let stdout = std::io::stdout();
        let _stdout_lock = stdout.lock();
        if !self.do_color {
            write_or_return!(self.stdout_color, line.as_bytes(), printed);
            write_or_return!(self.stdout_color, &NLu8a, printed);
            return PrinterLineResult::Ok(printed);
        }
        let bytes: &[u8] = line.as_bytes();
        let mut at: usize = 0;
        for (begin, end) in match_ranges(line, &self.terms).into_iter() {
            debug_assert_le!(at, begin, "unsorted ranges");
            debug_assert_lt!(begin, end, "empty range");
            if at < begin {
                setcolor_or_return!(self.stdout_color, self.color_spec_text, self.color_spec_last);
                write_or_return!(self.stdout_color, &bytes[at..begin], printed);
            }
            setcolor_or_return!(self.stdout_color, self.color_spec_highlight, self.color_spec_last);
            write_or_return!(self.stdout_color, &bytes[begin..end], printed);
            at = end;
        }
        if at < bytes.len() {
            setcolor_or_return!(self.stdout_color, self.color_spec_text, self.color_spec_last);
            write_or_return!(self.stdout_color, &bytes[at..], printed);
        }
        if let Err(err) = self.stdout_color.reset() {
            de_err!("stdout_color.reset() returned error {}", err);
            return PrinterLineResult::Err(err);
        }
        self.color_spec_last = ColorSpec::new();
        write_or_return!(self.stdout_color, &NLu8a, printed);

        PrinterLineResult::Ok(printed)
    }

    /// Flush stdout.
    pub fn flush(&mut self) -> Result<()> {
        self.stdout_color.flush()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// other printer functions (no use of PrinterLine)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Print colored output to terminal if possible using passed stream,
/// otherwise, print plain output.
///
/// See an example <https://docs.rs/termcolor/1.4.1/termcolor/#detecting-presence-of-a-terminal>.
pub fn print_colored(
    color: Color,
    value: &[u8],
    out: &mut termcolor::StandardStream,
) -> Result<()> {
    if let Err(err) = out.set_color(ColorSpec::new().set_fg(Some(color))) {
        de_err!("print_colored: std.set_color({:?}) returned error {}", color, err);
        return Err(err);
    }
    if let Err(err) = out.write_all(value) {
        de_err!("print_colored: out.write_all(…) returned error {}", err);
        return Err(err);
    }
    if let Err(err) = out.reset() {
        de_err!("print_colored: out.reset() returned error {}", err);
        return Err(err);
    }
    out.flush()?;

    Ok(())
}

/// Print colored output to terminal on stderr.
pub fn print_colored_stderr(
    color: Color,
    color_choice_opt: Option<ColorChoice>,
    value: &[u8],
) -> Result<()> {
    let choice: ColorChoice = color_choice_opt.unwrap_or(ColorChoice::Auto);
    let mut stderr = termcolor::StandardStream::stderr(choice);
    let _stderr_lock = std::io::stderr().lock();

    print_colored(color, value, &mut stderr)
}

/// Safely write the `buffer` to stdout with help of [`StdoutLock`].
///
/// [`StdoutLock`]: std::io::StdoutLock
pub fn write_stdout(buffer: &[u8]) {
    let stdout = std::io::stdout();
    let mut stdout_lock = stdout.lock();
    if let Err(_err) = stdout_lock.write_all(buffer) {
        // XXX: this will print when this program stdout is truncated, like to due to `head`
        //          Broken pipe (os error 32)
        de_err!("stdout_lock.write(buffer@{:p} (len {})) error {}", buffer, buffer.len(), _err);
    }
    if let Err(_err) = stdout_lock.flush() {
        de_err!("stdout_lock.flush() error {}", _err);
    }
}
