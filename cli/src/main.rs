use deno_terminal::colors;
use jsbridge_widget::{EvalRequest, Widget};
use std::error::Error;

mod flag;
mod host;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", colors::red_bold("error"), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = flag::parse_args();

    simple_logger::SimpleLogger::new()
        .with_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init()?;

    let code = match args.source {
        flag::Source::Inline(code) => code,
        flag::Source::File(path) => std::fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?,
    };

    let request = EvalRequest {
        code,
        expect_result: !args.no_report,
    };

    let widget = Widget::new(host::StdoutHost);
    widget.mount_blocking(&request)?;

    Ok(())
}
