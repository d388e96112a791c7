/// All possible actions in the application (command pattern)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,

    // Log navigation
    ScrollUp(usize),
    ScrollDown(usize),
    PageUp,
    PageDown,
    ScrollToTop,
    ScrollToBottom,
    ToggleAutoScroll,

    // Search input
    OpenSearch,
    CloseSearch,
    SearchInput(char),
    SearchBackspace,
    SearchClear,
    SubmitSearch,
    ClearSearch,

    // Manual operations
    RequestClear,
    ConfirmClear,
    CancelClear,
    ExportLogs,
    Refresh,
    IncreaseTail,
    DecreaseTail,
    ToggleLive,
    ToggleStats,

    DismissMessage,

    // Render request
    Render,
}
