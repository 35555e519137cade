use std::io::{self, BufRead, Write};

/// Ask for an email address. `None` on an empty line or end of input.
///
/// Only the line terminator is removed; the rest is passed on exactly as typed.
pub fn prompt_email(prompt: &str) -> io::Result<Option<String>> {
    let stdin = io::stdin();
    read_email(prompt, &mut stdin.lock(), &mut io::stdout())
}

fn read_email(
    prompt: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<Option<String>> {
    write!(output, "{} ", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let email = line.trim_end_matches(['\r', '\n']);
    if email.is_empty() {
        Ok(None)
    } else {
        Ok(Some(email.to_string()))
    }
}
