//! Keyboard command handling for the editing session.
//!
//! Keys are first mapped to an [`EditorCommand`] for the active mode, then
//! executed against the session. Two-key chords are resolved by the session
//! before a key gets here.

use linepad_keyboard::{Key, KeyInput};

use crate::chord::Chord;
use crate::core::{EditingSession, Outcome, SessionContext};
use crate::error::EditorError;
use crate::mode::Mode;

/// Editor command representing a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    // Motions
    MoveLeft,
    MoveDown,
    MoveUp,
    MoveRight,
    WordForward,
    WordBackward,
    LineStart,
    LineEnd,
    PrevBlankLine,
    NextBlankLine,
    FirstLine,
    LastLine,

    // Normal-mode edits
    InsertAtFirstNonBlank,
    AppendAtLineEnd,
    OpenLineAbove,
    OpenLineBelow,
    Paste,
    DeleteLine,
    YankLine,
    ChangeLine,

    // Mode switches
    EnterInsert,
    EnterCommand,
    EnterSelection,
    ExitToNormal,

    // Insert mode
    InsertChar(char),
    InsertTab,
    SplitLine,
    Backspace,

    // Command line
    CommandChar(char),
    CommandBackspace,
    ExecuteCommand,

    YankSelection,
    Save,

    /// Key has no meaning in this mode
    None,
}

impl From<Chord> for EditorCommand {
    fn from(chord: Chord) -> Self {
        match chord {
            Chord::FirstLine => Self::FirstLine,
            Chord::DeleteLine => Self::DeleteLine,
            Chord::YankLine => Self::YankLine,
            Chord::ChangeLine => Self::ChangeLine,
        }
    }
}

impl EditorCommand {
    /// Map a key to the command it means in `mode`.
    pub fn from_key(input: KeyInput, mode: Mode) -> Self {
        if input.ctrl {
            return match input.key {
                Key::Char('s') | Key::Char('S') => Self::Save,
                _ => Self::None,
            };
        }

        if let Some(motion) = Self::arrow(input.key) {
            return match mode {
                Mode::Command | Mode::CommandError => Self::None,
                _ => motion,
            };
        }

        match mode {
            Mode::Normal => Self::from_normal_key(input.key),
            Mode::Insert => match input.key {
                Key::Char(ch) => Self::InsertChar(ch),
                Key::Tab => Self::InsertTab,
                Key::Enter => Self::SplitLine,
                Key::Backspace => Self::Backspace,
                Key::Escape => Self::ExitToNormal,
                _ => Self::None,
            },
            Mode::Command => match input.key {
                Key::Char(ch) => Self::CommandChar(ch),
                Key::Backspace => Self::CommandBackspace,
                Key::Enter => Self::ExecuteCommand,
                Key::Escape => Self::ExitToNormal,
                _ => Self::None,
            },
            Mode::CommandError => match input.key {
                Key::Escape => Self::ExitToNormal,
                Key::Char(':') => Self::EnterCommand,
                _ => Self::None,
            },
            Mode::Selection => match input.key {
                Key::Escape | Key::Char('v') => Self::ExitToNormal,
                Key::Char('y') => Self::YankSelection,
                Key::Char(ch) => match Self::selection_motion(ch) {
                    Some(motion) => motion,
                    None => Self::None,
                },
                _ => Self::None,
            },
        }
    }

    fn arrow(key: Key) -> Option<Self> {
        match key {
            Key::Left => Some(Self::MoveLeft),
            Key::Down => Some(Self::MoveDown),
            Key::Up => Some(Self::MoveUp),
            Key::Right => Some(Self::MoveRight),
            _ => None,
        }
    }

    fn selection_motion(ch: char) -> Option<Self> {
        match ch {
            'h' => Some(Self::MoveLeft),
            'j' => Some(Self::MoveDown),
            'k' => Some(Self::MoveUp),
            'l' => Some(Self::MoveRight),
            'w' => Some(Self::WordForward),
            'b' => Some(Self::WordBackward),
            '0' => Some(Self::LineStart),
            '$' => Some(Self::LineEnd),
            'G' => Some(Self::LastLine),
            _ => None,
        }
    }

    fn from_normal_key(key: Key) -> Self {
        let Key::Char(ch) = key else {
            return Self::None;
        };
        if let Some(motion) = Self::selection_motion(ch) {
            return motion;
        }
        match ch {
            '{' => Self::PrevBlankLine,
            '}' => Self::NextBlankLine,
            'I' => Self::InsertAtFirstNonBlank,
            'A' => Self::AppendAtLineEnd,
            'O' => Self::OpenLineAbove,
            'o' => Self::OpenLineBelow,
            'p' => Self::Paste,
            'i' => Self::EnterInsert,
            ':' => Self::EnterCommand,
            'v' => Self::EnterSelection,
            _ => Self::None,
        }
    }

    /// Whether the command only moves the cursor.
    pub fn is_motion(self) -> bool {
        matches!(
            self,
            Self::MoveLeft
                | Self::MoveDown
                | Self::MoveUp
                | Self::MoveRight
                | Self::WordForward
                | Self::WordBackward
                | Self::LineStart
                | Self::LineEnd
                | Self::PrevBlankLine
                | Self::NextBlankLine
                | Self::FirstLine
                | Self::LastLine
        )
    }

    /// Execute this command on the session.
    pub fn execute(
        self,
        session: &mut EditingSession,
        ctx: &mut SessionContext<'_>,
    ) -> Result<Outcome, EditorError> {
        match self {
            Self::MoveLeft => session.move_left(),
            Self::MoveDown => session.move_down(),
            Self::MoveUp => session.move_up(),
            Self::MoveRight => session.move_right(),
            Self::WordForward => session.word_forward(),
            Self::WordBackward => session.word_backward(),
            Self::LineStart => session.line_start(),
            Self::LineEnd => session.line_end(),
            Self::PrevBlankLine => session.prev_blank_line(),
            Self::NextBlankLine => session.next_blank_line(),
            Self::FirstLine => session.first_line(),
            Self::LastLine => session.last_line(),

            Self::InsertAtFirstNonBlank => session.insert_at_first_non_blank(ctx),
            Self::AppendAtLineEnd => session.append_at_line_end(ctx),
            Self::OpenLineAbove => session.open_line_above(ctx),
            Self::OpenLineBelow => session.open_line_below(ctx),
            Self::Paste => session.paste(ctx),
            Self::DeleteLine => session.delete_line(ctx),
            Self::YankLine => session.yank_line(),
            Self::ChangeLine => session.change_line(ctx),

            Self::EnterInsert => session.set_mode(Mode::Insert, ctx),
            Self::EnterCommand => session.enter_command(ctx),
            Self::EnterSelection => session.enter_selection(ctx),
            Self::ExitToNormal => session.exit_to_normal(ctx),

            Self::InsertChar(ch) => session.insert_char(ch, ctx),
            Self::InsertTab => session.insert_tab(ctx),
            Self::SplitLine => session.split_line(ctx),
            Self::Backspace => session.backspace(ctx),

            Self::CommandChar(ch) => session.push_command_char(ch),
            Self::CommandBackspace => session.pop_command_char(),
            Self::ExecuteCommand => return session.execute_command_line(ctx),

            Self::YankSelection => session.yank_selection(ctx),
            Self::Save => session.save(ctx)?,

            Self::None => {}
        }
        Ok(Outcome::Continue)
    }
}
