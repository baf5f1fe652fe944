use anyhow::Result;
use cmdline::{Parser, one_of, range};

pub const PROTOCOLS: [&str; 4] = ["http", "https", "ssh", "ftp"];

/// Options shared by both demos: required `host`, `port` in 1..=65535 and a
/// protocol `type`.
pub fn connection_parser(program: &str) -> Result<Parser> {
    let mut parser = Parser::new();
    parser.add::<String>("host", None, "host name", true, String::new())?;
    parser.add_with_reader("port", 'p', "port number", false, 80, range(1, 65535))?;
    parser.add_with_reader(
        "type",
        't',
        "protocol type",
        false,
        "http".to_string(),
        one_of(PROTOCOLS.map(String::from)),
    )?;
    parser.set_program_name(program);
    Ok(parser)
}

pub struct Connection<'a> {
    pub protocol: &'a str,
    pub host: &'a str,
    pub port: i32,
}

impl<'a> Connection<'a> {
    pub fn from_parser(parser: &'a Parser) -> Result<Self> {
        Ok(Self {
            protocol: parser.get::<String>("type")?,
            host: parser.get::<String>("host")?,
            port: *parser.get::<i32>("port")?,
        })
    }
}
