// src/bin/rlsearch.rs

//! Driver program _rlsearch_.
//!
//! Processes user-passed command-line arguments.
//! Then searches the passed file for the most recent lines matching the
//! keyword, or lists a search directory.
//!
//! Most of the search logic is in the _rlslib_ library; see
//! [`rlslib::readers::searchprocessor::search_with_canceller`].

#![allow(non_camel_case_types)]

use std::process::ExitCode;

use ::clap::{Parser, ValueEnum};
use ::const_format::concatcp;
use ::rlslib::common::{Canceller, Count, FPath};
use ::rlslib::data::predicate::MatchPredicate;
use ::rlslib::data::request::{SearchRequest, SearchResponse, SearchResult, Strategy};
#[allow(unused_imports)]
use ::rlslib::debug::printers::{de_err, de_wrn, e_err, e_wrn};
use ::rlslib::printer::printers::{
    print_colored_stderr,
    write_stdout,
    Color,
    ColorChoice,
    PrinterLine,
    COLOR_DEFAULT,
    COLOR_HIGHLIGHT,
    COLOR_SUMMARY,
};
use ::rlslib::readers::chunkreader::{ChunkSz, CHUNKSZ_DEF};
use ::rlslib::readers::filelister::{list_all, list_files_only, ListEntry};
use ::rlslib::readers::filepreprocessor::{process_path, ProcessPathResult};
use ::rlslib::readers::searchprocessor::search_with_canceller;
use ::si_trace_print::stack::stack_offset_set;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// --------------------
// command-line parsing

/// CLI enum that maps to [`termcolor::ColorChoice`].
///
/// [`termcolor::ColorChoice`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.ColorChoice.html
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    ValueEnum, // from `clap`
)]
enum CLI_Color_Choice {
    always,
    auto,
    never,
}

/// CLI enum that maps to [`Strategy`].
///
/// [`Strategy`]: rlslib::data::request::Strategy
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    ValueEnum, // from `clap`
)]
enum CLI_Strategy {
    backward,
    forward,
    load_all,
    auto,
}

const CLI_HELP_AFTER: &str = concatcp!(
    "\
KEYWORD may join terms with the standalone word AND (or and), e.g.
\"error AND disk\". A line matches if it has every term. Matching ignores
case. Without a KEYWORD every non-empty line matches.

Lines are printed most recent first.

CHUNKSZ is between 1 and 67108864 (0x4000000). Default is ",
    CHUNKSZ_DEF,
    ".

Given --root, FILENAME is resolved within ROOT and may not leave it.
"
);

#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "rlsearch",
    // write expanded information for the `--version` output
    version = concatcp!(
        "(Reverse Log Searcher)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Author: ", env!("CARGO_PKG_AUTHORS"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Path of the log file to search.
    #[clap(
        required_unless_present_any = &["list_files", "list_all"],
        verbatim_doc_comment,
    )]
    filename: Option<FPath>,

    /// Print only lines with all of the keyword terms.
    #[clap(
        short = 'k',
        long,
        verbatim_doc_comment,
    )]
    keyword: Option<String>,

    /// Print at most this many of the most recent matching lines.
    /// 0 prints all matching lines.
    #[clap(
        short = 'n',
        long,
        default_value_t = 0,
        verbatim_doc_comment,
    )]
    count: Count,

    /// Read the file in chunks of this many bytes.
    #[clap(
        short = 'z',
        long,
        default_value_t = CHUNKSZ_DEF,
        verbatim_doc_comment,
    )]
    chunksz: ChunkSz,

    /// Search strategy.
    /// "backward" reads only as much of the end of the file as needed.
    /// "forward" and "load-all" read the entire file.
    /// "auto" picks a strategy based on the file size and COUNT.
    #[clap(
        short = 's',
        long,
        value_enum,
        default_value_t = CLI_Strategy::backward,
        verbatim_doc_comment,
    )]
    strategy: CLI_Strategy,

    /// Search directory. FILENAME is resolved within this directory.
    /// Also the directory listed by --list-files and --list-all,
    /// default is the current directory.
    #[clap(
        short = 'r',
        long,
        verbatim_doc_comment,
    )]
    root: Option<FPath>,

    /// File extension to skip in --list-all. May be passed more than once.
    #[clap(
        short = 'x',
        long = "exclude-ext",
        verbatim_doc_comment,
    )]
    exclude_ext: Vec<String>,

    /// List the names of files in the search directory.
    #[clap(
        long = "list-files",
        conflicts_with = "list_all",
        verbatim_doc_comment,
    )]
    list_files: bool,

    /// List the files and folders of the search directory, smallest first.
    /// Files of size zero are not listed.
    #[clap(
        long = "list-all",
        verbatim_doc_comment,
    )]
    list_all: bool,

    /// Choose to print to terminal using colors.
    #[clap(
        short = 'c',
        long = "color",
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Color_Choice::auto,
    )]
    color_choice: CLI_Color_Choice,

    /// Print statistics about the search to stderr.
    #[clap(
        long,
        verbatim_doc_comment,
    )]
    summary: bool,
}

impl From<CLI_Strategy> for Strategy {
    fn from(strategy: CLI_Strategy) -> Strategy {
        match strategy {
            CLI_Strategy::backward => Strategy::Backward,
            CLI_Strategy::forward => Strategy::Forward,
            CLI_Strategy::load_all => Strategy::LoadAll,
            CLI_Strategy::auto => Strategy::Auto,
        }
    }
}

const fn cli_color_choice(color_choice: CLI_Color_Choice) -> ColorChoice {
    match color_choice {
        CLI_Color_Choice::always => ColorChoice::Always,
        CLI_Color_Choice::auto => ColorChoice::Auto,
        CLI_Color_Choice::never => ColorChoice::Never,
    }
}

// --------------------
// signals

/// Set a process signal handler that raises the `canceller`.
/// An in-progress search returns at the next chunk read.
pub fn set_signal_handler(canceller: Canceller) -> anyhow::Result<(), ctrlc::Error> {
    defn!();
    ctrlc::set_handler(move || {
        defñ!("cancel");
        canceller.cancel();
    })?;
    defx!();

    Ok(())
}

// --------------------
// main

/// Process the user-passed command-line arguments.
/// List the search directory or search the file.
/// Determine a process return code.
pub fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();
    let args = CLI_Args::parse();
    defo!("args {:?}", args);
    let color_choice: ColorChoice = cli_color_choice(args.color_choice);
    let root: FPath = args
        .root
        .clone()
        .unwrap_or_else(|| FPath::from("."));

    let exitcode: ExitCode = if args.list_files {
        print_list_files(&root)
    } else if args.list_all {
        print_list_all(&root, &args.exclude_ext)
    } else {
        match &args.filename {
            Some(filename) => search_and_print(&args, filename, color_choice),
            None => {
                e_err!("FILENAME is required");
                ExitCode::FAILURE
            }
        }
    };
    defx!("exitcode {:?}", exitcode);

    exitcode
}

fn print_list_files(root: &FPath) -> ExitCode {
    match list_files_only(root) {
        Ok(names) => {
            for name in names.iter() {
                write_stdout(format!("{}\n", name).as_bytes());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            e_err!("list {:?}: {}", root, err);
            ExitCode::FAILURE
        }
    }
}

fn print_list_all(
    root: &FPath,
    exclude_exts: &[String],
) -> ExitCode {
    match list_all(root, exclude_exts) {
        Ok(entries) => {
            for entry in entries.iter() {
                write_stdout(list_entry_to_string(entry).as_bytes());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            e_err!("list {:?}: {}", root, err);
            ExitCode::FAILURE
        }
    }
}

/// One tab-separated line for a `ListEntry`.
fn list_entry_to_string(entry: &ListEntry) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\n",
        entry.entry_type,
        entry.name,
        entry.size.as_deref().unwrap_or("-"),
        entry.byte_size,
        entry.extension.as_deref().unwrap_or("-"),
        match entry.read_access {
            Some(true) => "readable",
            Some(false) => "unreadable",
            None => "-",
        },
    )
}

/// Resolve the path, run the search, print the results.
fn search_and_print(
    args: &CLI_Args,
    filename: &FPath,
    color_choice: ColorChoice,
) -> ExitCode {
    defn!("({:?})", filename);
    let path: FPath = match &args.root {
        Some(root) => match process_path(root, filename) {
            ProcessPathResult::FileValid(path) => path,
            ProcessPathResult::FileErrNoPermissions(path) => {
                e_err!("not readable {:?}", path);
                return ExitCode::FAILURE;
            }
            ProcessPathResult::FileErrNotAFile(path) => {
                e_err!("not a file {:?}", path);
                return ExitCode::FAILURE;
            }
            ProcessPathResult::FileErrNotExist(path) => {
                e_err!("File does not exist. {:?}", path);
                return ExitCode::FAILURE;
            }
            ProcessPathResult::FileErrOutsideRoot(path) => {
                e_err!("path {:?} is not within {:?}", path, root);
                return ExitCode::FAILURE;
            }
        },
        None => filename.clone(),
    };

    let mut request: SearchRequest = SearchRequest::new(&path)
        .with_count(args.count)
        .with_chunksz(args.chunksz)
        .with_strategy(Strategy::from(args.strategy));
    if let Some(keyword) = &args.keyword {
        request = request.with_keyword(keyword);
    }

    let canceller = Canceller::new();
    if let Err(err) = set_signal_handler(canceller.clone()) {
        e_wrn!("failed to set signal handler: {}", err);
    }

    let result: SearchResult = match search_with_canceller(&request, &canceller) {
        Ok(val) => val,
        Err(err) => {
            let response = SearchResponse::from_result(Err(err));
            e_err!("{} (error code {})", response.message, response.error_code);
            defx!("return FAILURE");
            return ExitCode::FAILURE;
        }
    };

    let terms: Vec<String> = MatchPredicate::new(request.keyword.as_deref())
        .terms()
        .to_vec();
    let mut printer = PrinterLine::new(color_choice, COLOR_DEFAULT, COLOR_HIGHLIGHT, terms);
    for line in result.lines.iter() {
        if let Err(_err) = printer.print_line(line) {
            // likely a broken pipe
            de_err!("print_line failed {}", _err);
            break;
        }
    }
    _ = printer.flush();

    if args.summary {
        print_summary(&result, color_choice, COLOR_SUMMARY);
    }
    defx!("return SUCCESS");

    ExitCode::SUCCESS
}

/// Print the `SummarySearch` of `result` to stderr.
fn print_summary(
    result: &SearchResult,
    color_choice: ColorChoice,
    color: Color,
) {
    let text: String = format!("\nSummary:\n{}\nLines printed : {}\n", result.summary, result.lines.len());
    if let Err(_err) = print_colored_stderr(color, Some(color_choice), text.as_bytes()) {
        de_err!("print_colored_stderr failed {}", _err);
    }
}
