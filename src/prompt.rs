use std::io::{BufRead, Write};

/// Asks a yes/no question until it gets an answer. End of input means "no".
pub fn confirm(question: &str) -> std::io::Result<bool> {
  let stdin = std::io::stdin();
  let stdout = std::io::stdout();
  confirm_with(question, &mut stdin.lock(), &mut stdout.lock())
}

pub fn confirm_with(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> std::io::Result<bool> {
  loop {
    write!(output, "{} [yes/no]: ", question)?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
      writeln!(output)?;
      return Ok(false);
    }

    match answer.trim().to_lowercase().as_str() {
      "y" | "yes" => return Ok(true),
      "n" | "no" => return Ok(false),
      _ => writeln!(output, "please answer yes or no")?,
    }
  }
}
