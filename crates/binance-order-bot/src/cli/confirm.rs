/*
[INPUT]:  Question text and a line typed (or piped) by the user
[OUTPUT]: true for yes/y, false for anything else
[POS]:    CLI layer - confirmation prompt backed by the terminal or stdin
[UPDATE]: When changing how the order confirmation is asked
*/

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use console::Term;
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;

use binance_order_bot::ConfirmPrompt;
use binance_order_bot::orders::is_affirmative;

#[derive(Default)]
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl TerminalPrompt {
    fn interactive() -> bool {
        io::stdin().is_terminal() && Term::stderr().is_term()
    }
}

impl ConfirmPrompt for TerminalPrompt {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        if !Self::interactive() {
            return confirm_from_lines(question, &mut io::stdin().lock(), &mut io::stdout());
        }

        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .context("read answer from terminal")?;
        Ok(is_affirmative(&answer))
    }
}

/// Ask on `out` and read one line from `input`. EOF counts as no.
pub fn confirm_from_lines<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    write!(out, "{question}: ")?;
    out.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("read answer from stdin")?;
    writeln!(out)?;
    Ok(is_affirmative(&answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(input: &str) -> bool {
        let mut out = Vec::new();
        confirm_from_lines("Proceed? (yes/no)", &mut Cursor::new(input), &mut out).unwrap()
    }

    #[test]
    fn test_piped_answers() {
        assert!(answer("yes\n"));
        assert!(answer("Y\r\n"));
        assert!(!answer("no\n"));
        assert!(!answer("\n"));
        assert!(!answer(""));
    }

    #[test]
    fn test_only_first_line_is_read() {
        let mut input = Cursor::new("no\nyes\n");
        let mut out = Vec::new();
        assert!(!confirm_from_lines("Proceed?", &mut input, &mut out).unwrap());
        assert!(String::from_utf8(out).unwrap().starts_with("Proceed?: "));
    }
}
