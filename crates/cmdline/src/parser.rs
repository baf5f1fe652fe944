use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::option::{OptionEntry, OptionValue, Valued};
use crate::reader::{DefaultReader, Reader};
use crate::tokenize::tokenize;

/// Option registry and resolution engine.
///
/// Options are declared once, then any number of `parse*` calls resolve an
/// argument list against them. Each parse clears the error and positional
/// lists and the presence of every option; values from earlier parses are
/// kept until overwritten (see [`Parser::reset_values`]).
#[derive(Default)]
pub struct Parser {
    options: IndexMap<String, OptionEntry>,
    footer: String,
    program_name: String,
    rest: Vec<String>,
    errors: Vec<Error>,
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("options", &self.options.keys().collect::<Vec<_>>())
            .field("program_name", &self.program_name)
            .field("rest", &self.rest)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a presence-only flag.
    pub fn add_flag(
        &mut self,
        name: impl Into<String>,
        short: impl Into<Option<char>>,
        description: impl Into<String>,
    ) -> Result<()> {
        let name = self.check_new_name(name.into())?;
        let entry = OptionEntry::flag(name, short.into(), description.into());
        self.insert(entry);
        Ok(())
    }

    /// Declare a valued option converted with [`DefaultReader`].
    pub fn add<T: OptionValue>(
        &mut self,
        name: impl Into<String>,
        short: impl Into<Option<char>>,
        description: &str,
        required: bool,
        default: T,
    ) -> Result<()> {
        self.add_with_reader(name, short, description, required, default, DefaultReader)
    }

    /// Declare a valued option with its own reader (`range`, `one_of`, a closure...).
    pub fn add_with_reader<T, R>(
        &mut self,
        name: impl Into<String>,
        short: impl Into<Option<char>>,
        description: &str,
        required: bool,
        default: T,
        reader: R,
    ) -> Result<()>
    where
        T: OptionValue,
        R: Reader<T> + Send + Sync + 'static,
    {
        self.declare_valued(
            name.into(),
            short.into(),
            description,
            T::TYPE_NAME.to_string(),
            required,
            default,
            Box::new(reader),
        )
    }

    /// Start a builder for a valued option.
    ///
    /// ```
    /// use cmdline::{Parser, range};
    ///
    /// let mut parser = Parser::new();
    /// parser
    ///     .valued::<u16>("port")
    ///     .short('p')
    ///     .description("port number")
    ///     .default_value(80)
    ///     .reader(range(1, 65535))
    ///     .declare()
    ///     .unwrap();
    /// assert!(parser.parse(["prog", "-p", "8080"]));
    /// assert_eq!(*parser.get::<u16>("port").unwrap(), 8080);
    /// ```
    pub fn valued<T: OptionValue + Default>(
        &mut self,
        name: impl Into<String>,
    ) -> ValuedBuilder<'_, T> {
        ValuedBuilder {
            parser: self,
            name: name.into(),
            short: None,
            description: String::new(),
            required: false,
            default: None,
            type_name: None,
            reader: None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn declare_valued<T: OptionValue>(
        &mut self,
        name: String,
        short: Option<char>,
        description: &str,
        type_name: String,
        required: bool,
        default: T,
        reader: Box<dyn Reader<T> + Send + Sync>,
    ) -> Result<()> {
        let name = self.check_new_name(name)?;
        let slot = Valued::new(type_name, required, default, reader);
        let entry = OptionEntry::valued(name, short, description, slot);
        self.insert(entry);
        Ok(())
    }

    fn check_new_name(&self, name: String) -> Result<String> {
        if name.is_empty() {
            return Err(Error::EmptyOptionName);
        }
        if self.options.contains_key(&name) {
            return Err(Error::DuplicateOption(name));
        }
        Ok(name)
    }

    pub(crate) fn insert(&mut self, entry: OptionEntry) {
        trace!(option = entry.name(), "declared option");
        self.options.insert(entry.name().to_string(), entry);
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = &OptionEntry> {
        self.options.values()
    }

    /// Text appended to the first usage line, e.g. `filename ...`.
    pub fn footer(&mut self, footer: impl Into<String>) {
        self.footer = footer.into();
    }

    pub(crate) fn footer_text(&self) -> &str {
        &self.footer
    }

    /// Name shown in usage. If unset, the first argument of the next parse is used.
    pub fn set_program_name(&mut self, name: impl Into<String>) {
        self.program_name = name.into();
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// Parse an argv-like list. The first element is the program name and is
    /// never treated as an option.
    pub fn parse<I, S>(&mut self, args: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        self.resolve(&args)
    }

    /// Tokenize a single command line, then parse it like [`Parser::parse`].
    ///
    /// A quoting error is recorded as the only error and nothing is resolved.
    pub fn parse_str(&mut self, line: &str) -> bool {
        match tokenize(line) {
            Ok(args) => self.resolve(&args),
            Err(err) => {
                self.begin();
                self.record(err);
                false
            }
        }
    }

    /// Clear the per-parse state: errors, positionals and presence.
    fn begin(&mut self) {
        self.errors.clear();
        self.rest.clear();
        for entry in self.options.values_mut() {
            entry.set_present(false);
        }
    }

    fn resolve(&mut self, args: &[String]) -> bool {
        self.begin();
        debug!(tokens = args.len(), "parsing arguments");

        let Some(program) = args.first() else {
            self.record(Error::EmptyArguments);
            return false;
        };
        if self.program_name.is_empty() {
            self.program_name = program.clone();
        }

        let lookup = match self.short_lookup() {
            Ok(lookup) => lookup,
            Err(err) => {
                warn!(error = %err, "aborting parse");
                self.record(err);
                return false;
            }
        };

        let mut i = 1;
        while i < args.len() {
            let arg = args[i].as_str();
            let next = args.get(i + 1).map(String::as_str);

            if let Some(long) = arg.strip_prefix("--") {
                trace!(token = arg, "long option");
                if self.resolve_long(long, next) {
                    i += 1;
                }
            } else if let Some(cluster) = arg.strip_prefix('-') {
                trace!(token = arg, "short option cluster");
                if self.resolve_cluster(cluster, &lookup, next) {
                    i += 1;
                }
            } else {
                trace!(token = arg, "positional argument");
                self.rest.push(arg.to_string());
            }
            i += 1;
        }

        let missing: Vec<String> = self
            .options
            .values()
            .filter(|entry| !entry.satisfied())
            .map(|entry| entry.name().to_string())
            .collect();
        for name in missing {
            self.record(Error::MissingRequiredOption(name));
        }

        let ok = self.errors.is_empty();
        debug!(ok, errors = self.errors.len(), rest = self.rest.len(), "parse finished");
        ok
    }

    /// Short name to long name. Fails on the first short name declared twice.
    fn short_lookup(&self) -> Result<HashMap<char, String>> {
        let mut lookup = HashMap::new();
        for entry in self.options.values() {
            let Some(short) = entry.short() else {
                continue;
            };
            if lookup.insert(short, entry.name().to_string()).is_some() {
                return Err(Error::AmbiguousShortName(short));
            }
        }
        Ok(lookup)
    }

    /// Handle `--name=value` or `--name`. Returns true if `next` was consumed.
    fn resolve_long(&mut self, long: &str, next: Option<&str>) -> bool {
        if let Some((name, value)) = long.split_once('=') {
            self.assign(name, value);
            return false;
        }

        let Some(entry) = self.options.get_mut(long) else {
            self.record(Error::UndefinedOption(long.to_string()));
            return false;
        };
        if !entry.takes_value() {
            entry.set_present(true);
            return false;
        }
        match next {
            Some(value) => {
                self.assign(long, value);
                true
            }
            None => {
                self.record(Error::MissingOptionValue(long.to_string()));
                false
            }
        }
    }

    /// Handle `-abc`. Every character but the last has to be a flag; the last
    /// one takes `next` as its value if there is one. Returns true if `next`
    /// was consumed.
    fn resolve_cluster(
        &mut self,
        cluster: &str,
        lookup: &HashMap<char, String>,
        next: Option<&str>,
    ) -> bool {
        let chars: Vec<char> = cluster.chars().collect();
        let Some((&last, init)) = chars.split_last() else {
            trace!("skipping bare '-'");
            return false;
        };

        for &c in init {
            let Some(name) = lookup.get(&c) else {
                self.record(Error::UndefinedShortOption(c));
                continue;
            };
            let entry = &mut self.options[name.as_str()];
            if entry.takes_value() {
                self.record(Error::MissingOptionValue(name.clone()));
                continue;
            }
            entry.set_present(true);
        }

        let Some(name) = lookup.get(&last) else {
            self.record(Error::UndefinedShortOption(last));
            return false;
        };
        let takes_value = self.options[name.as_str()].takes_value();
        match next {
            Some(value) if takes_value => {
                self.assign(name, value);
                true
            }
            // Nothing left to consume: a valued option is marked present and
            // keeps its current value.
            _ => {
                self.options[name.as_str()].set_present(true);
                false
            }
        }
    }

    fn assign(&mut self, name: &str, value: &str) {
        let Some(entry) = self.options.get_mut(name) else {
            self.record(Error::UndefinedOption(name.to_string()));
            return;
        };
        if let Err(source) = entry.assign(value) {
            self.record(Error::InvalidOptionValue {
                name: name.to_string(),
                value: value.to_string(),
                source,
            });
        }
    }

    fn record(&mut self, err: Error) {
        debug!(error = %err, "recorded parse error");
        self.errors.push(err);
    }

    /// Restore every valued option to its default and clear presence.
    pub fn reset_values(&mut self) {
        for entry in self.options.values_mut() {
            entry.restore_default();
        }
    }

    /// Whether `name` was given in the last parse.
    pub fn exists(&self, name: &str) -> Result<bool> {
        self.options
            .get(name)
            .map(OptionEntry::present)
            .ok_or_else(|| Error::UnknownOption(name.to_string()))
    }

    /// Current value of a valued option: the last value read successfully,
    /// or the default.
    pub fn get<T: OptionValue>(&self, name: &str) -> Result<&T> {
        let entry = self
            .options
            .get(name)
            .ok_or_else(|| Error::UnknownOption(name.to_string()))?;
        entry
            .value::<T>()
            .ok_or_else(|| Error::TypeMismatch(name.to_string()))
    }

    /// Positional arguments of the last parse, in order.
    pub fn rest(&self) -> &[String] {
        &self.rest
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// First recorded error, or an empty string.
    pub fn error(&self) -> String {
        self.errors.first().map(ToString::to_string).unwrap_or_default()
    }

    /// Every recorded error, one per line.
    pub fn error_full(&self) -> String {
        let mut out = String::new();
        for err in &self.errors {
            out.push_str(&format!("{err}\n"));
        }
        out
    }
}

/// Builder returned by [`Parser::valued`].
#[must_use = "call `declare()` to register the option"]
pub struct ValuedBuilder<'p, T> {
    parser: &'p mut Parser,
    name: String,
    short: Option<char>,
    description: String,
    required: bool,
    default: Option<T>,
    type_name: Option<String>,
    reader: Option<Box<dyn Reader<T> + Send + Sync>>,
}

impl<'p, T: OptionValue + Default> ValuedBuilder<'p, T> {
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Defaults to `T::default()` when not given.
    pub fn default_value(mut self, default: T) -> Self {
        self.default = Some(default);
        self
    }

    /// Override the type name shown in usage text.
    pub fn type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn reader<R: Reader<T> + Send + Sync + 'static>(mut self, reader: R) -> Self {
        self.reader = Some(Box::new(reader));
        self
    }

    pub fn declare(self) -> Result<()> {
        let reader: Box<dyn Reader<T> + Send + Sync> = match self.reader {
            Some(reader) => reader,
            None => Box::new(DefaultReader),
        };
        self.parser.declare_valued(
            self.name,
            self.short,
            &self.description,
            self.type_name.unwrap_or_else(|| T::TYPE_NAME.to_string()),
            self.required,
            self.default.unwrap_or_default(),
            reader,
        )
    }
}
