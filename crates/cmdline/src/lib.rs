//! Declarative command-line option parsing.
//!
//! Declare flags and typed valued options on a [`Parser`], then parse process
//! arguments, an already split argument list, or a single command line. A parse
//! never stops at the first problem: every error is collected so callers can
//! report all of them at once.
//!
//! ```
//! use cmdline::{Parser, one_of, range};
//!
//! let mut parser = Parser::new();
//! parser.add::<String>("host", None, "host name", true, String::new()).unwrap();
//! parser.add_with_reader("port", 'p', "port number", false, 80, range(1, 65535)).unwrap();
//! parser
//!     .add_with_reader("type", 't', "protocol type", false, "http".to_string(),
//!         one_of(["http", "https"].map(String::from)))
//!     .unwrap();
//! parser.add_flag("gzip", None, "gzip when transfer").unwrap();
//!
//! assert!(parser.parse(["prog", "--host", "a.com", "--gzip", "extra1"]));
//! assert_eq!(parser.get::<String>("host").unwrap(), "a.com");
//! assert_eq!(*parser.get::<i32>("port").unwrap(), 80);
//! assert!(parser.exists("gzip").unwrap());
//! assert_eq!(parser.rest(), ["extra1"]);
//! ```
//!
//! The crate does no I/O. Printing usage/errors and choosing an exit status is
//! left to the program; [`Parser::parse_check`] returns a [`Verdict`] to make
//! that decision in one place.

mod check;
mod error;
mod option;
mod parser;
mod reader;
mod report;
mod tokenize;
mod usage;

pub use check::Verdict;
pub use error::{Error, ReadError, Result};
pub use option::OptionValue;
pub use parser::{Parser, ValuedBuilder};
pub use reader::{DefaultReader, OneOf, Range, Reader, one_of, range};
pub use report::{OptionReport, ParseReport};
pub use tokenize::tokenize;
