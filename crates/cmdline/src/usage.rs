use crate::parser::Parser;

impl Parser {
    /// Render help text from the declared options, in declaration order.
    ///
    /// ```text
    /// usage: simple --host=string [options] ... filename ...
    /// options:
    ///       --host    host name (string)
    ///   -p, --port    port number (i32 [=80])
    /// ```
    pub fn usage(&self) -> String {
        let mut out = format!("usage: {} ", self.program_name());
        for entry in self.entries().filter(|e| e.required()) {
            out.push_str(&entry.usage_token());
            out.push(' ');
        }
        out.push_str(&format!("[options] ... {}\n", self.footer_text()));
        out.push_str("options:\n");

        let width = self
            .entries()
            .map(|e| e.name().chars().count())
            .max()
            .unwrap_or(0)
            + 4;
        for entry in self.entries() {
            match entry.short() {
                Some(short) => out.push_str(&format!("  -{short}, ")),
                None => out.push_str("      "),
            }
            out.push_str(&format!(
                "--{:width$}{}\n",
                entry.name(),
                entry.description(),
                width = width
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;
    use crate::reader::{one_of, range};

    #[test]
    fn usage_lists_required_options_then_every_option() {
        let mut p = Parser::new();
        p.add::<String>("host", None, "host name", true, String::new())
            .unwrap();
        p.add_with_reader("port", 'p', "port number", false, 80, range(1, 65535))
            .unwrap();
        p.add_with_reader(
            "type",
            't',
            "protocol type",
            false,
            "http".to_string(),
            one_of(["http", "https", "ssh", "ftp"].map(String::from)),
        )
        .unwrap();
        p.add_flag("gzip", None, "gzip when transfer").unwrap();
        p.set_program_name("simple");
        p.footer("filename ...");

        let expected = "\
usage: simple --host=string [options] ... filename ...
options:
      --host    host name (string)
  -p, --port    port number (i32 [=80])
  -t, --type    protocol type (string [=http])
      --gzip    gzip when transfer
";
        assert_eq!(p.usage(), expected);
    }

    #[test]
    fn column_width_follows_the_longest_name() {
        let mut p = Parser::new();
        p.add_flag("a", 'a', "short").unwrap();
        p.add_flag("longer-name", None, "long").unwrap();
        p.set_program_name("x");
        let text = p.usage();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "usage: x [options] ... ");
        assert_eq!(lines[2], format!("  -a, --a{}short", " ".repeat(14)));
        assert_eq!(lines[3], "      --longer-name    long");
    }

    #[test]
    fn non_ascii_names_align_by_character() {
        let mut p = Parser::new();
        p.add_flag("größe", None, "size").unwrap();
        p.add_flag("a", None, "all").unwrap();
        p.set_program_name("x");
        let text = p.usage();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "      --größe    size");
        assert_eq!(lines[3], format!("      --a{}all", " ".repeat(8)));
    }

    #[test]
    fn program_name_comes_from_the_first_argument() {
        let mut p = Parser::new();
        p.add_flag("v", 'v', "").unwrap();
        let _ = p.parse(["./tool"]);
        assert!(p.usage().starts_with("usage: ./tool [options] ... \n"));
    }
}
