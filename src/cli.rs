//! Command-line surface: argument parsing, seed validation, choice of
//! lazy or eager traversal, and exit statuses.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser, ValueEnum};
use log::error;

use crate::cancel::{drain, CancellationToken};
use crate::collect::collect;
use crate::error::{DirlocError, FailureKind};
use crate::format::{Template, TemplateWriter};
use crate::iter::Files;
use crate::sort::{SortKey, SortOrder, SortSpec};

/// Sort argument values; `r` flips the direction of the chosen key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Path, byte-wise
    Path,
    /// Line count
    Loc,
    /// Byte size
    Byte,
    /// Reverse (descending); line count when no key is given
    R,
}

#[derive(Parser, Debug)]
#[command(name = "dirloc")]
#[command(about = "Count lines of the given files and folders")]
#[command(version)]
pub struct Args {
    /// Files and folders to count
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Collect files recursively
    #[arg(short = 'r')]
    pub recursive: bool,

    /// Shorten path to one letter per directory, except the file name
    #[arg(short = 'c')]
    pub short_path: bool,

    /// Sort list by path, loc or byte; `r` reverses (can be repeated)
    #[arg(
        short = 's',
        value_name = "KIND",
        num_args = 0..=1,
        default_missing_value = "loc",
        action = ArgAction::Append
    )]
    pub sort: Vec<SortArg>,

    /// Long form of -s; a value must be attached as --sort=KIND
    #[arg(
        long = "sort",
        value_name = "KIND",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "loc",
        action = ArgAction::Append
    )]
    pub sort_long: Vec<SortArg>,

    /// Custom output format: %p path, %P short path, %l lines, %b bytes,
    /// \t tab, \n newline
    #[arg(short = 'f', long = "format", value_name = "FORMAT")]
    pub format: Option<String>,
}

impl Args {
    /// Every sort value from both `-s` and `--sort`.
    pub fn sort_kinds(&self) -> Vec<SortArg> {
        self.sort.iter().chain(&self.sort_long).copied().collect()
    }
}

/// Validated run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub paths: Vec<PathBuf>,
    pub recursive: bool,
    pub sort: Option<SortSpec>,
    pub template: Template,
}

impl Config {
    /// Validate `args`. Missing seed paths are each reported on stderr
    /// before the whole run is rejected.
    pub fn from_args(args: Args) -> Result<Self, DirlocError> {
        let sort = resolve_sort(&args.sort_kinds())?;

        let missing: Vec<_> = args
            .paths
            .iter()
            .filter(|p| fs::metadata(p).is_err())
            .collect();
        for path in &missing {
            eprintln!("file does not exist '{}'", path.display());
        }
        if !missing.is_empty() {
            return Err(DirlocError::InvalidArgument(format!(
                "{} path(s) do not exist",
                missing.len()
            )));
        }

        let template = match &args.format {
            Some(format) => Template::parse(format),
            None => Template::default_line(args.short_path),
        };

        Ok(Self {
            paths: args.paths,
            recursive: args.recursive,
            sort,
            template,
        })
    }
}

/// Fold repeated `--sort` values into one spec. A second key other than
/// `r` is rejected.
pub fn resolve_sort(values: &[SortArg]) -> Result<Option<SortSpec>, DirlocError> {
    if values.is_empty() {
        return Ok(None);
    }

    let mut key = None;
    let mut order = SortOrder::Ascending;
    for value in values {
        let next = match value {
            SortArg::Path => SortKey::Path,
            SortArg::Loc => SortKey::Lines,
            SortArg::Byte => SortKey::Bytes,
            SortArg::R => {
                order = SortOrder::Descending;
                continue;
            }
        };
        if key.replace(next).is_some() {
            return Err(DirlocError::InvalidArgument(
                "only one sort kind may be given".into(),
            ));
        }
    }

    Ok(Some(SortSpec::new(key.unwrap_or(SortKey::Lines), order)))
}

/// Run a validated configuration, writing records to `out`.
///
/// Without sorting the walk is streamed and a failure mid-walk only ends
/// output early. With sorting everything is collected first and any
/// failure aborts before anything is written.
pub fn execute<W: Write>(
    config: &Config,
    token: &CancellationToken,
    out: W,
) -> Result<(), DirlocError> {
    if config.paths.is_empty() {
        return Ok(());
    }

    let mut writer = TemplateWriter::new(config.template.clone(), out);
    let written = match config.sort {
        None => {
            let mut files = Files::new(config.paths.iter().cloned(), config.recursive);
            drain(&mut files, &mut writer, token)
        }
        Some(spec) => {
            let mut collection = collect(config.paths.iter().cloned(), config.recursive)?;
            collection.sort(spec);
            drain(collection.into_records(), &mut writer, token)
        }
    };

    match written.and_then(|_| writer.into_inner().flush()) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(DirlocError::Write(err)),
    }
}

/// Process status for a failure class, the two's complement of its small
/// negative code.
pub fn exit_status(kind: FailureKind) -> ExitCode {
    ExitCode::from(kind.exit_code() as u8)
}

/// Parse `argv`, run, and map the outcome to an exit status.
pub fn main_with_args<I, T>(argv: I, token: &CancellationToken) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Args::try_parse_from(argv) {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => exit_status(FailureKind::InvalidArgument),
            };
        }
    };

    let result = Config::from_args(args)
        .and_then(|config| execute(&config, token, io::stdout().lock()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !matches!(err, DirlocError::InvalidArgument(_)) {
                error!("{err}");
            }
            exit_status(err.kind())
        }
    }
}
