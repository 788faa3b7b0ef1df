//! Syntax highlighter for the REPL using the tally lexer.

use nu_ansi_term::{Color, Style};
use reedline::StyledText;
use tally_core::parser::{Kind, tokenize};

use super::session::flatten;

fn style_for(kind: Kind) -> Style {
    match kind {
        Kind::Number => Style::new().fg(Color::Cyan),
        Kind::Identifier => Style::new().fg(Color::Red),
        Kind::Assign => Style::new().fg(Color::Magenta),
        Kind::Add
        | Kind::Subtract
        | Kind::Multiply
        | Kind::Divide
        | Kind::Power
        | Kind::OpenBracket
        | Kind::CloseBracket => Style::new().fg(Color::White),
    }
}

fn error_style() -> Style {
    Style::new()
        .fg(Color::White)
        .on(Color::Rgb(0x80, 0x22, 0x3e))
}

#[derive(Debug, Default)]
pub struct Highlighter;

impl Highlighter {
    pub fn new() -> Self {
        Self
    }
}

impl reedline::Highlighter for Highlighter {
    fn highlight(&self, line: &str, _: usize) -> StyledText {
        let mut output = StyledText::new();
        let plain = Style::new().fg(Color::White);

        // Meta-commands are not expressions.
        if line.trim_start().starts_with(':') {
            output.push((Style::new().fg(Color::DarkGray), line.to_string()));
            return output;
        }

        let flat = flatten(line);
        let mut curr_end = 0;
        for token in tokenize(&flat) {
            match token {
                Ok(token) => {
                    let (start, end) = (token.span.start(), token.span.end());
                    if start > curr_end {
                        output.push((plain, line[curr_end..start].to_string()));
                    }
                    output.push((style_for(token.kind), line[start..end].to_string()));
                    curr_end = end;
                }
                Err(err) => {
                    if err.offset > curr_end {
                        output.push((plain, line[curr_end..err.offset].to_string()));
                    }
                    output.push((error_style(), line[err.offset..].to_string()));
                    return output;
                }
            }
        }

        if curr_end < line.len() {
            output.push((plain, line[curr_end..].to_string()));
        }
        output
    }
}
