//! The `repl` command - interactive REPL.

pub mod highlighter;
pub mod session;

use nu_ansi_term::Style;
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, DescriptionMode, EditCommand, Emacs,
    FileBackedHistory, IdeMenu, KeyCode, KeyModifiers, Keybindings, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, ValidationResult, default_emacs_keybindings,
};
use tally::compile;

use crate::cli::ReplArgs;
use crate::common::{CliResult, error::render};
use highlighter::Highlighter;
use session::{COMMANDS, Session, flatten, is_incomplete};

/// A `reedline` validator that uses the compiler to determine input completeness.
///
/// If compilation stops at the very end of the input because an operand or a
/// closing bracket is missing, the expression is incomplete and the REPL
/// waits for more input. Any other result, including a successful compile or
/// a different error, considers the input `Complete` and ready for evaluation.
///
/// # Examples of Incomplete Input
///
/// - `1 +`
/// - `(2 * (3`
///
/// To split a complete expression across multiple lines for readability,
/// users can press `Alt + Enter` to insert a newline manually.
pub struct TallyValidator;

impl reedline::Validator for TallyValidator {
    fn validate(&self, input: &str) -> ValidationResult {
        let flat = flatten(input);
        if flat.trim().is_empty() || flat.trim_start().starts_with(':') {
            return ValidationResult::Complete;
        }
        match compile(&flat) {
            Err(e) if is_incomplete(&e, &flat) => ValidationResult::Incomplete,
            _ => ValidationResult::Complete,
        }
    }
}

fn add_menu_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Enter,
        ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
    );
}

fn setup_reedline(no_color: bool) -> (Reedline, DefaultPrompt) {
    let commands: Vec<String> = COMMANDS
        .iter()
        .filter_map(|(usage, _)| usage.split_whitespace().next())
        .map(str::to_string)
        .collect();

    let completer = Box::new({
        let mut completions = DefaultCompleter::with_inclusions(&[':', '_']);
        completions.insert(commands);
        completions
    });

    // Use the interactive menu to select options from the completer
    let ide_menu = IdeMenu::default()
        .with_name("completion_menu")
        .with_min_completion_width(0)
        .with_max_completion_width(50)
        .with_max_completion_height(u16::MAX)
        .with_padding(0)
        .with_cursor_offset(0)
        .with_description_mode(DescriptionMode::PreferRight)
        .with_min_description_width(0)
        .with_max_description_width(50)
        .with_description_offset(1)
        .with_correct_cursor_pos(false);

    let mut keybindings = default_emacs_keybindings();
    add_menu_keybindings(&mut keybindings);
    let edit_mode = Box::new(Emacs::new(keybindings));

    let mut line_editor = Reedline::create()
        .with_validator(Box::new(TallyValidator))
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(Box::new(ide_menu)))
        .with_edit_mode(edit_mode);

    match dirs::config_dir()
        .map(|p| p.join("tally/history"))
        .and_then(|p| FileBackedHistory::with_file(10000, p).ok())
    {
        Some(history) => line_editor = line_editor.with_history(Box::new(history)),
        None => tracing::warn!("Could not initialize history file, using in-memory history"),
    }
    if !no_color {
        line_editor = line_editor.with_highlighter(Box::new(Highlighter::new()));
    }

    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("  ".into()),
        DefaultPromptSegment::Empty,
    );

    (line_editor, prompt)
}

/// Run the REPL command.
pub fn run(args: ReplArgs, no_color: bool) -> CliResult<()> {
    let (mut line_editor, prompt) = setup_reedline(no_color);
    let mut session = Session::new(args.optimize);

    let style = Style::new().dimmed();
    println!(
        "Tally REPL. {}",
        style.paint("Ctrl+D to exit; Ctrl+C to abort entry; :help for commands")
    );

    loop {
        let sig = match line_editor.read_line(&prompt) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Reedline error: {e}");
                return Ok(());
            }
        };

        match sig {
            Signal::Success(buffer) => match session.handle(&buffer) {
                Ok(output) => print!("{output}"),
                Err(e) => render(&e, no_color),
            },
            Signal::CtrlD => {
                println!("\nGoodbye!");
                return Ok(());
            }
            Signal::CtrlC => {
                continue;
            }
        }
    }
}
