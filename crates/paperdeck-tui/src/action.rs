/// Everything the UI can be asked to do, after key mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveDown,
    MoveUp,
    MoveLeft,
    MoveRight,
    PageDown,
    PageUp,
    GoTop,
    GoBottom,
    /// Space/Enter: toggle the keyword under the cursor when the keyword bar has focus.
    Select,
    NavigateBack,
    ToggleFocus,
    CycleSort,
    ClearKeywords,
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    SearchConfirm,
    SearchCancel,
    CopyToClipboard,
    ToggleHelp,
    Resize(u16, u16),
    Tick,
    None,
}
