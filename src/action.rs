//! The closed set of geometric actions the tool can perform.

use std::fmt;

/// The kind of action to perform on the image.
///
/// The set is closed: every invocation selects exactly one of these four
/// orientation changes, validated at argument-parsing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[cfg_attr(feature = "cli", value(rename_all = "PascalCase"))]
pub enum ActionKind {
    /// Rotate 90 degrees clockwise.
    Clockwise,
    /// Rotate 90 degrees counter-clockwise.
    CounterClockwise,
    /// Mirror the image left-to-right.
    Mirror,
    /// Flip the image top-to-bottom.
    Flip,
}

impl ActionKind {
    /// Every action, in declaration order.
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Clockwise,
        ActionKind::CounterClockwise,
        ActionKind::Mirror,
        ActionKind::Flip,
    ];

    /// The command-line spelling of this action.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Clockwise => "Clockwise",
            ActionKind::CounterClockwise => "CounterClockwise",
            ActionKind::Mirror => "Mirror",
            ActionKind::Flip => "Flip",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
