//! Declared options and their per-parse state.
//!
//! An option is either a presence-only flag or a typed value slot. Both share
//! the same metadata (long name, optional short name, description, presence);
//! the value slot additionally owns its default, current value and reader.

use std::any::Any;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::ReadError;
use crate::reader::Reader;

/// A type that can be carried by a valued option.
///
/// `TYPE_NAME` is what usage text shows for the option (`--port=i32`).
/// Implement this for your own types to declare options over them.
pub trait OptionValue: FromStr + Display + Clone + Send + Sync + 'static {
    const TYPE_NAME: &'static str;
}

macro_rules! impl_option_value {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl OptionValue for $ty {
                const TYPE_NAME: &'static str = $name;
            }
        )*
    };
}

impl_option_value! {
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
    bool => "bool",
    char => "char",
    String => "string",
}

/// Value-specific half of a valued option, erased over `T`.
pub(crate) trait ValueSlot: Send + Sync {
    fn assign(&mut self, raw: &str) -> Result<(), ReadError>;
    fn restore_default(&mut self);
    fn type_name(&self) -> &str;
    fn required(&self) -> bool;
    fn display_value(&self) -> String;
    fn as_any(&self) -> &dyn Any;
}

pub(crate) struct Valued<T> {
    type_name: String,
    required: bool,
    default: T,
    value: T,
    reader: Box<dyn Reader<T> + Send + Sync>,
}

impl<T: OptionValue> Valued<T> {
    pub(crate) fn new(
        type_name: String,
        required: bool,
        default: T,
        reader: Box<dyn Reader<T> + Send + Sync>,
    ) -> Self {
        Self {
            type_name,
            required,
            value: default.clone(),
            default,
            reader,
        }
    }

    pub(crate) fn value(&self) -> &T {
        &self.value
    }
}

impl<T: OptionValue> ValueSlot for Valued<T> {
    fn assign(&mut self, raw: &str) -> Result<(), ReadError> {
        self.value = self.reader.read(raw)?;
        Ok(())
    }

    fn restore_default(&mut self) {
        self.value = self.default.clone();
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn required(&self) -> bool {
        self.required
    }

    fn display_value(&self) -> String {
        self.value.to_string()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub(crate) enum OptionKind {
    Flag,
    Valued(Box<dyn ValueSlot>),
}

pub(crate) struct OptionEntry {
    name: String,
    short: Option<char>,
    description: String,
    present: bool,
    kind: OptionKind,
}

impl OptionEntry {
    pub(crate) fn flag(name: String, short: Option<char>, description: String) -> Self {
        Self {
            name,
            short,
            description,
            present: false,
            kind: OptionKind::Flag,
        }
    }

    /// Build a valued entry. The displayed description gets the type name and,
    /// for optional entries, the default value appended: `port number (i32 [=80])`.
    pub(crate) fn valued<T: OptionValue>(
        name: String,
        short: Option<char>,
        description: &str,
        slot: Valued<T>,
    ) -> Self {
        let description = if slot.required {
            format!("{description} ({})", slot.type_name)
        } else {
            format!("{description} ({} [={}])", slot.type_name, slot.default)
        };
        Self {
            name,
            short,
            description,
            present: false,
            kind: OptionKind::Valued(Box::new(slot)),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn short(&self) -> Option<char> {
        self.short
    }

    pub(crate) fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn present(&self) -> bool {
        self.present
    }

    pub(crate) fn set_present(&mut self, present: bool) {
        self.present = present;
    }

    pub(crate) fn takes_value(&self) -> bool {
        matches!(self.kind, OptionKind::Valued(_))
    }

    pub(crate) fn required(&self) -> bool {
        match &self.kind {
            OptionKind::Flag => false,
            OptionKind::Valued(slot) => slot.required(),
        }
    }

    /// False only for a required valued option that was not set in the last parse.
    pub(crate) fn satisfied(&self) -> bool {
        !(self.required() && !self.present)
    }

    /// Run `raw` through the reader. On failure the current value is untouched.
    pub(crate) fn assign(&mut self, raw: &str) -> Result<(), ReadError> {
        match &mut self.kind {
            OptionKind::Flag => Err(ReadError::FlagValue),
            OptionKind::Valued(slot) => {
                slot.assign(raw)?;
                self.present = true;
                Ok(())
            }
        }
    }

    pub(crate) fn restore_default(&mut self) {
        self.present = false;
        if let OptionKind::Valued(slot) = &mut self.kind {
            slot.restore_default();
        }
    }

    /// `--name` for flags, `--name=TYPE` for valued options.
    pub(crate) fn usage_token(&self) -> String {
        match &self.kind {
            OptionKind::Flag => format!("--{}", self.name),
            OptionKind::Valued(slot) => format!("--{}={}", self.name, slot.type_name()),
        }
    }

    pub(crate) fn display_value(&self) -> Option<String> {
        match &self.kind {
            OptionKind::Flag => None,
            OptionKind::Valued(slot) => Some(slot.display_value()),
        }
    }

    /// The current value when this entry was declared over `T`.
    pub(crate) fn value<T: OptionValue>(&self) -> Option<&T> {
        match &self.kind {
            OptionKind::Flag => None,
            OptionKind::Valued(slot) => slot.as_any().downcast_ref::<Valued<T>>().map(Valued::value),
        }
    }
}
