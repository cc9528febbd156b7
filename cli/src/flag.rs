use bpaf::{OptionParser, Parser, construct, long, positional};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Source {
    Inline(String),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct CliArgs {
    pub no_report: bool,
    pub verbose: bool,
    pub source: Source,
}

fn options() -> OptionParser<CliArgs> {
    let no_report = long("no-report")
        .help("Run the code for its side effects and discard the outcome")
        .switch();
    let verbose = long("verbose")
        .short('v')
        .help("Enable debug logging (includes the sandbox console)")
        .switch();
    let file = long("file")
        .short('f')
        .help("Read the code from a file instead of the command line")
        .argument::<PathBuf>("FILE")
        .map(Source::File);
    let inline = positional::<String>("CODE")
        .help("JavaScript source to evaluate as an async function body")
        .map(Source::Inline);
    let source = construct!([file, inline]);

    construct!(CliArgs {
        no_report,
        verbose,
        source
    })
    .to_options()
    .descr("Evaluate a JavaScript snippet in an embedded widget and print the reported value")
}

pub fn parse_args() -> CliArgs {
    options().run()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code: unwrap is acceptable
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        options().run_inner(args).unwrap()
    }

    #[test]
    fn test_inline_code() {
        let args = parse(&["return 1 + 1"]);
        assert!(matches!(args.source, Source::Inline(code) if code == "return 1 + 1"));
        assert!(!args.no_report);
        assert!(!args.verbose);
    }

    #[test]
    fn test_file_source() {
        let args = parse(&["--file", "snippet.js"]);
        assert!(
            matches!(args.source, Source::File(path) if path == PathBuf::from("snippet.js"))
        );
    }

    #[test]
    fn test_flags() {
        let args = parse(&["--no-report", "-v", "console.log('hi')"]);
        assert!(args.no_report);
        assert!(args.verbose);
    }

    #[test]
    fn test_missing_source_is_rejected() {
        let empty: &[&str] = &[];
        assert!(options().run_inner(empty).is_err());
    }
}
