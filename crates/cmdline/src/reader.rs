//! Readers turn the raw text of an option value into a typed value.
//!
//! Any `Fn(&str) -> Result<T, ReadError>` is a reader, so custom validation
//! needs no new types:
//!
//! ```
//! use cmdline::{Parser, ReadError};
//!
//! let mut parser = Parser::new();
//! parser
//!     .add_with_reader("even", 'e', "an even number", false, 0u32, |raw: &str| -> Result<u32, ReadError> {
//!         let n: u32 = raw.parse().map_err(|_| ReadError::custom("not a number"))?;
//!         if n % 2 == 0 { Ok(n) } else { Err(ReadError::custom("odd")) }
//!     })
//!     .unwrap();
//! assert!(parser.parse(["prog", "--even=4"]));
//! assert!(!parser.parse(["prog", "--even=5"]));
//! ```

use crate::error::ReadError;
use crate::option::OptionValue;

pub trait Reader<T> {
    fn read(&self, raw: &str) -> Result<T, ReadError>;
}

impl<T, F> Reader<T> for F
where
    F: Fn(&str) -> Result<T, ReadError>,
{
    fn read(&self, raw: &str) -> Result<T, ReadError> {
        self(raw)
    }
}

/// Converts with the type's `FromStr`. The whole input has to parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultReader;

impl<T: OptionValue> Reader<T> for DefaultReader {
    fn read(&self, raw: &str) -> Result<T, ReadError> {
        raw.parse().map_err(|_| ReadError::Conversion {
            input: raw.to_string(),
            type_name: T::TYPE_NAME.to_string(),
        })
    }
}

/// Accepts values in `low..=high`.
#[derive(Debug, Clone)]
pub struct Range<T> {
    low: T,
    high: T,
}

impl<T: OptionValue + PartialOrd> Reader<T> for Range<T> {
    fn read(&self, raw: &str) -> Result<T, ReadError> {
        let value: T = DefaultReader.read(raw)?;
        if value < self.low || value > self.high {
            return Err(ReadError::OutOfRange {
                value: value.to_string(),
                low: self.low.to_string(),
                high: self.high.to_string(),
            });
        }
        Ok(value)
    }
}

pub fn range<T: OptionValue + PartialOrd>(low: T, high: T) -> Range<T> {
    Range { low, high }
}

/// Accepts only values equal to one of the candidates.
#[derive(Debug, Clone)]
pub struct OneOf<T> {
    candidates: Vec<T>,
}

impl<T: OptionValue + PartialEq> Reader<T> for OneOf<T> {
    fn read(&self, raw: &str) -> Result<T, ReadError> {
        let value: T = DefaultReader.read(raw)?;
        if self.candidates.contains(&value) {
            return Ok(value);
        }
        let candidates: Vec<String> = self.candidates.iter().map(|c| c.to_string()).collect();
        Err(ReadError::NotOneOf {
            value: value.to_string(),
            candidates: candidates.join(", "),
        })
    }
}

pub fn one_of<T, I>(candidates: I) -> OneOf<T>
where
    T: OptionValue + PartialEq,
    I: IntoIterator<Item = T>,
{
    OneOf {
        candidates: candidates.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reader_requires_full_input() {
        assert_eq!(Reader::<i32>::read(&DefaultReader, "42"), Ok(42));
        assert!(Reader::<i32>::read(&DefaultReader, "42abc").is_err());
        assert!(Reader::<i32>::read(&DefaultReader, "abc").is_err());
        assert_eq!(
            Reader::<String>::read(&DefaultReader, "two words"),
            Ok("two words".to_string())
        );
    }

    #[test]
    fn conversion_error_names_the_type() {
        let err = Reader::<u16>::read(&DefaultReader, "-1").unwrap_err();
        assert_eq!(
            err,
            ReadError::Conversion {
                input: "-1".to_string(),
                type_name: "u16".to_string()
            }
        );
    }

    #[test]
    fn range_is_inclusive() {
        let r = range(1, 65535);
        assert_eq!(r.read("1"), Ok(1));
        assert_eq!(r.read("65535"), Ok(65535));
        assert!(matches!(r.read("0"), Err(ReadError::OutOfRange { .. })));
        assert!(matches!(r.read("70000"), Err(ReadError::OutOfRange { .. })));
        assert!(matches!(r.read("x"), Err(ReadError::Conversion { .. })));
    }

    #[test]
    fn range_over_floats() {
        let r = range(0.0f64, 1.0);
        assert_eq!(r.read("0.5"), Ok(0.5));
        assert!(r.read("1.5").is_err());
    }

    #[test]
    fn one_of_checks_membership() {
        let r = one_of(["http", "https"].map(String::from));
        assert_eq!(r.read("https"), Ok("https".to_string()));
        let err = r.read("ftp").unwrap_err();
        assert_eq!(err.to_string(), "ftp is not one of: http, https");
    }

    #[test]
    fn closures_are_readers() {
        let upper = |raw: &str| -> Result<String, ReadError> {
            if raw.chars().all(|c| c.is_ascii_uppercase()) {
                Ok(raw.to_string())
            } else {
                Err(ReadError::custom("expected uppercase"))
            }
        };
        assert_eq!(upper.read("ABC"), Ok("ABC".to_string()));
        assert_eq!(upper.read("abc"), Err(ReadError::Custom("expected uppercase".to_string())));
    }
}
