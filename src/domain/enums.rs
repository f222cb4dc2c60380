/// Top-level screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Countdown gate shown before the app opens
    Pause,
    Today,
    Metrics,
}

/// UI mode for the Today screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    AddingSubtask,
    EditingTitle,
    EditingDescription,
    Detail, // Detail modal for the selected task
}

impl UiMode {
    /// Whether keystrokes go into the input form
    pub fn is_form(&self) -> bool {
        matches!(
            self,
            Self::AddingTask | Self::AddingSubtask | Self::EditingTitle | Self::EditingDescription
        )
    }
}

/// Field of the add-task form currently receiving input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Category,
    Tag,
}

impl FormField {
    /// Next field in tab order
    pub fn next(&self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Category,
            Self::Category => Self::Tag,
            Self::Tag => Self::Title,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Category => "Category",
            Self::Tag => "Tag",
        }
    }
}

/// Lifecycle phase of a task that is still in the active list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPhase {
    Active,
    /// Marked done, waiting out the short delay before removal
    Completing,
}
