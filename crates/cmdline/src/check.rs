//! Parse-and-check: the decision a program makes right after parsing.
//!
//! Nothing here prints or exits; the caller acts on the [`Verdict`].

use crate::option::OptionEntry;
use crate::parser::Parser;

const HELP_NAME: &str = "help";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Parsing succeeded and help was not requested.
    Proceed,
    /// Help was requested, or nothing but the program name was given and that
    /// was not enough. Holds the usage text.
    Help(String),
    /// Parsing failed. Holds the first error and the usage text.
    Fail { error: String, usage: String },
}

impl Verdict {
    /// Conventional process exit code for this verdict, if the program should stop.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Proceed => None,
            Self::Help(_) => Some(0),
            Self::Fail { .. } => Some(1),
        }
    }
}

impl Parser {
    /// Make sure a `help`/`-h` flag exists, parse `args`, then decide.
    pub fn parse_check<I, S>(&mut self, args: I) -> Verdict
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ensure_help();
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let ok = self.parse(args.iter().cloned());
        self.verdict(args.len(), ok)
    }

    /// Like [`Parser::parse_check`] for a single command line.
    pub fn parse_check_str(&mut self, line: &str) -> Verdict {
        self.ensure_help();
        let ok = self.parse_str(line);
        self.verdict(0, ok)
    }

    fn ensure_help(&mut self) {
        if !self.contains(HELP_NAME) {
            self.insert(OptionEntry::flag(
                HELP_NAME.to_string(),
                Some('h'),
                "print this message".to_string(),
            ));
        }
    }

    fn verdict(&self, argc: usize, ok: bool) -> Verdict {
        let wants_help = self.exists(HELP_NAME).unwrap_or(false);
        if (argc == 1 && !ok) || wants_help {
            return Verdict::Help(self.usage());
        }
        if !ok {
            return Verdict::Fail {
                error: self.error(),
                usage: self.usage(),
            };
        }
        Verdict::Proceed
    }
}
