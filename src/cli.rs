use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(long, value_parser, default_value_t = false, global = true)]
    pub verbose: bool,

    /// Write logs to this file instead of stderr
    #[clap(long, value_parser, global = true)]
    pub log: Option<PathBuf>,

    /// Configuration file (defaults to the first of the standard locations that exists)
    #[clap(long, value_parser, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding local repository checkouts, used with --repo
    #[clap(long, value_parser, env = "CODESCAN_REPO_DIR", global = true)]
    pub repo_dir: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Literal keyword search, line by line
    Keyword {
        pattern: String,

        #[clap(flatten)]
        target: TargetArgs,

        #[clap(flatten)]
        search: SearchArgs,

        #[clap(flatten)]
        case: CaseArgs,
    },
    /// Literal snippet search; the snippet may span several lines
    Snippet {
        snippet: String,

        #[clap(flatten)]
        target: TargetArgs,

        #[clap(flatten)]
        search: SearchArgs,

        #[clap(flatten)]
        case: CaseArgs,

        /// Interpret \n, \t and \\ escape sequences in the snippet
        #[clap(short, long, value_parser, default_value_t = false)]
        escapes: bool,
    },
    /// Regular expression search; `.` matches newlines, `^`/`$` anchor at every line
    Regex {
        pattern: String,

        #[clap(flatten)]
        target: TargetArgs,

        #[clap(flatten)]
        search: SearchArgs,
    },
    /// Show the directory structure
    Tree {
        #[clap(flatten)]
        target: TargetArgs,

        #[clap(short = 't', long = "type", value_parser, use_value_delimiter = true)]
        types: Option<Vec<String>>,

        #[clap(long, value_parser)]
        max_depth: Option<usize>,

        #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the known file type tags
    Types,
    /// Generate shell completion scripts
    Completions {
        #[clap(value_enum)]
        shell: Shell,
    },
}

/// Where to search: a path, or a repository checkout under the repository directory.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    #[clap(conflicts_with = "repo")]
    pub path: Option<PathBuf>,

    /// Repository as OWNER/REPO
    #[clap(long, value_parser)]
    pub repo: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// File type tags to restrict the search to (e.g. python,rust)
    #[clap(short = 't', long = "type", value_parser, use_value_delimiter = true)]
    pub types: Option<Vec<String>>,

    /// Lines of context around each match
    #[clap(short = 'C', long, value_parser)]
    pub context: Option<usize>,

    /// Stop after this many matches in total
    #[clap(short = 'm', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_results: Option<u64>,

    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Case handling for literal searches; without either flag the configured default applies.
#[derive(Args, Debug, Clone, Default)]
pub struct CaseArgs {
    #[clap(short = 's', long, value_parser, default_value_t = false)]
    pub case_sensitive: bool,

    #[clap(
        short = 'i',
        long,
        value_parser,
        default_value_t = false,
        conflicts_with = "case_sensitive"
    )]
    pub ignore_case: bool,
}

impl CaseArgs {
    pub fn resolve(&self, configured: bool) -> bool {
        if self.case_sensitive {
            true
        } else if self.ignore_case {
            false
        } else {
            configured
        }
    }
}

/// Expand `\n`, `\t`, `\r` and `\\`; other sequences are kept as written.
pub fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_keyword_with_filters() {
        let cli = Cli::parse_from([
            "codescan", "keyword", "TODO", "src", "-t", "rust,python", "-C", "1", "-m", "5",
        ]);
        match cli.command {
            Commands::Keyword {
                pattern,
                target,
                search,
                case,
            } => {
                assert_eq!(pattern, "TODO");
                assert_eq!(target.path, Some(PathBuf::from("src")));
                assert_eq!(
                    search.types,
                    Some(vec!["rust".to_string(), "python".to_string()])
                );
                assert_eq!(search.context, Some(1));
                assert_eq!(search.max_results, Some(5));
                assert!(!case.case_sensitive);
                assert!(!case.ignore_case);
            }
            other => panic!("Expected Keyword, got {other:?}"),
        }
    }

    #[test]
    fn test_path_and_repo_conflict() {
        let result = Cli::try_parse_from(["codescan", "tree", "src", "--repo", "a/b"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_case_flags_override_configured_default() {
        let parse = |flags: &[&str]| {
            let mut args = vec!["codescan", "keyword", "x"];
            args.extend_from_slice(flags);
            Cli::parse_from(args).command
        };
        let case_of = |flags: &[&str]| match parse(flags) {
            Commands::Keyword { case, .. } => case,
            other => panic!("Expected Keyword, got {other:?}"),
        };

        assert!(case_of(&[]).resolve(true));
        assert!(!case_of(&[]).resolve(false));
        assert!(!case_of(&["--ignore-case"]).resolve(true));
        assert!(case_of(&["-s"]).resolve(false));
        assert!(Cli::try_parse_from(["codescan", "keyword", "x", "-s", "-i"]).is_err());
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"a\nb"), "a\nb");
        assert_eq!(unescape(r"tab\there"), "tab\there");
        assert_eq!(unescape(r"keep\d"), r"keep\d");
        assert_eq!(unescape(r"slash\\n"), r"slash\n");
    }
}
