use crate::engine::word::CategoryId;
use crate::settings::Role;

/// Everything the view can ask the session to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    NewWord,
    PrevWord,
    NextWord,
    MarkSolved,
    UndoLast,
    UndoAll,
    ToggleCategory(CategoryId),
    SetRole(Role),
    ToggleRole,
    SetLanguage(String),
    CycleLanguage,
    SetSecondLanguage(String),
    CycleSecondLanguage,
    SetSecondLanguageEnabled(bool),
    ToggleSecondLanguage,
    StartTimer,
    PauseTimer,
    ResetTimer,
    SetTimerEnabled(bool),
    ToggleTimerEnabled,
    SetTimerMinutes(u32),
}
