/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::{
    env,
    path::{self, PathBuf},
    process::ExitCode,
};

use tracing::info;

use mdconv_rs::{
    args::{OptKind, Options},
    errors::{ParseError, UsageError},
    render::{self, ParagraphRenderer, Render, RenderConfig},
};

struct OptionHelp {
    name: &'static str,
    /// Placeholder shown after '=' for value options
    value: &'static str,
    description: &'static str,
}

static OPTION_HELP: [OptionHelp; 3] = [
    OptionHelp {
        name: "noemphasizedtext",
        value: "",
        description: "Disables emphasized text support '_emphasized text_'.",
    },
    OptionHelp {
        name: "nowraphtmlinparagraph",
        value: "",
        description: "If line starts with '<', line wont be wrapped inside '<p>'.",
    },
    OptionHelp {
        name: "output",
        value: "file",
        description: "Write html to file instead of stdout.",
    },
];

/// Everything the command line asked for
#[derive(Debug, Default)]
struct Invocation {
    config: RenderConfig,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    help: bool,
}

struct Cli {
    invocation: Invocation,
    verdict: Result<(), ParseError>,
    usage: String,
}

fn absolute(raw: &str) -> PathBuf {
    path::absolute(raw).unwrap_or_else(|_| PathBuf::from(raw))
}

fn usage(opts: &Options) -> String {
    let mut text = String::from("Usage mdconv [FILE] [OPTIONS...]\n\nOptions:\n");
    for opt in opts.options() {
        let Some(help) = OPTION_HELP.iter().find(|i| i.name == opt.name()) else {
            continue;
        };
        let syntax = match opt.kind() {
            OptKind::Flag => format!("--{}", opt.name()),
            OptKind::Value => format!("--{}=<{}>", opt.name(), help.value),
        };
        text.push_str(&format!("{syntax:<31}{}\n", help.description));
    }
    text.push('\n');
    text
}

fn parse_cli(args: &[String]) -> Cli {
    let mut invocation = Invocation::default();
    let emphasized_text = &mut invocation.config.emphasized_text;
    let wrap_html = &mut invocation.config.wrap_html_in_paragraph;
    let input_file = &mut invocation.input_file;
    let output_file = &mut invocation.output_file;
    let help = &mut invocation.help;

    let mut opts = Options::new();
    opts.register_flag("noemphasizedtext", || *emphasized_text = false)
        .register_flag("nowraphtmlinparagraph", || *wrap_html = false)
        .register_value_option("output", |value| *output_file = Some(absolute(value)))
        .register_flag("help", || *help = true)
        .register_positional(|token| *input_file = Some(absolute(token)));

    let usage = usage(&opts);
    let verdict = opts.try_parse(args);
    drop(opts);

    Cli {
        invocation,
        verdict,
        usage,
    }
}

fn check(cli: &Cli) -> Result<(), UsageError> {
    cli.verdict.clone()?;
    if cli.invocation.help {
        return Err(UsageError::HelpRequested);
    }
    if cli.invocation.input_file.is_none() {
        return Err(UsageError::MissingInput);
    }
    Ok(())
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let args = env::args().skip(1).collect::<Vec<String>>();
    let cli = parse_cli(&args);
    match check(&cli) {
        Ok(()) => {}
        Err(UsageError::HelpRequested) => {
            print!("{}", cli.usage);
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            print!("{}", cli.usage);
            return err.into();
        }
    }

    let Invocation {
        config,
        input_file: Some(input_file),
        output_file,
        ..
    } = cli.invocation
    else {
        return ExitCode::FAILURE;
    };

    info!(?config, "render options");
    info!(input = %input_file.display(), "input file");
    if let Some(output_file) = &output_file {
        info!(output = %output_file.display(), "option --output");
    }

    let source = match render::read_source(&input_file) {
        Ok(source) => source,
        Err(err) => return err.into(),
    };
    let html = ParagraphRenderer::new(config).render(&source);
    match render::write_html(output_file.as_deref(), &html) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        parse_cli(&args)
    }

    #[test]
    fn flags_update_config() {
        let cli = cli(&["--noemphasizedtext", "--nowraphtmlinparagraph", "in.md"]);
        assert!(check(&cli).is_ok());
        assert_eq!(
            cli.invocation.config,
            RenderConfig {
                emphasized_text: false,
                wrap_html_in_paragraph: false,
            }
        );
    }

    #[test]
    fn paths_are_made_absolute() {
        let cli = cli(&["in.md", "--output=out.html"]);
        let input = cli.invocation.input_file.unwrap();
        let output = cli.invocation.output_file.unwrap();
        assert!(input.is_absolute());
        assert!(input.ends_with("in.md"));
        assert!(output.is_absolute());
        assert!(output.ends_with("out.html"));
    }

    #[test]
    fn later_positional_replaces_earlier() {
        let cli = cli(&["a.md", "b.md"]);
        assert!(cli.invocation.input_file.unwrap().ends_with("b.md"));
    }

    #[test]
    fn missing_input_is_a_usage_error() {
        let cli = cli(&["--noemphasizedtext"]);
        assert!(matches!(check(&cli), Err(UsageError::MissingInput)));
    }

    #[test]
    fn unknown_option_is_a_usage_error() {
        let cli = cli(&["in.md", "--bogus"]);
        assert!(matches!(
            check(&cli),
            Err(UsageError::Parse(ParseError::UnknownOption(_)))
        ));
        // side effects before the failure remain
        assert!(cli.invocation.input_file.is_some());
    }

    #[test]
    fn usage_lists_documented_options() {
        let cli = cli(&[]);
        assert!(cli.usage.starts_with("Usage mdconv [FILE] [OPTIONS...]\n\nOptions:\n"));
        assert!(cli.usage.contains(
            "--output=<file>                Write html to file instead of stdout.\n"
        ));
        assert!(cli.usage.contains(
            "--noemphasizedtext             Disables emphasized text support"
        ));
        assert!(!cli.usage.contains("--help"));
    }

    #[test]
    fn usage_shows_value_placeholder_only_for_value_options() {
        let cli = cli(&[]);
        let lines: Vec<&str> = cli.usage.lines().filter(|l| l.starts_with("--")).collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("--noemphasizedtext "));
        assert!(lines[1].starts_with("--nowraphtmlinparagraph "));
        assert!(lines[2].starts_with("--output=<file> "));
    }
}
