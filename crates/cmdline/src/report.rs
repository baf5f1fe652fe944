use serde::Serialize;

use crate::parser::Parser;

/// Snapshot of a parser after its last parse.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ParseReport {
    pub program: String,
    pub success: bool,
    pub errors: Vec<String>,
    pub rest: Vec<String>,
    pub options: Vec<OptionReport>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    pub present: bool,
    pub required: bool,
    /// Current value as text; absent for flags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Parser {
    pub fn report(&self) -> ParseReport {
        ParseReport {
            program: self.program_name().to_string(),
            success: self.errors().is_empty(),
            errors: self.errors().iter().map(ToString::to_string).collect(),
            rest: self.rest().to_vec(),
            options: self
                .entries()
                .map(|entry| OptionReport {
                    name: entry.name().to_string(),
                    short: entry.short(),
                    present: entry.present(),
                    required: entry.required(),
                    value: entry.display_value(),
                })
                .collect(),
        }
    }
}
