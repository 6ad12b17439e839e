//! Reserved slot names and slot values shared by every dialogue component.
//!
//! The string values are part of the data format (goal files, knowledge base
//! files, act catalogs) and must not change.

/// Placeholder value for a slot whose value is being requested.
pub const UNKNOWN_SLOT_VALUE: &str = "UNK";

/// Placeholder value carried by agent inform templates before KB filling.
pub const PLACEHOLDER_SLOT_VALUE: &str = "PLACEHOLDER";

/// The user accepts any value for the slot.
pub const I_DO_NOT_CARE: &str = "I do not care";

/// The knowledge base has no value satisfying the current constraints.
pub const NO_VALUE_MATCH: &str = "NO VALUE MATCHES!!!";

/// At least one entity satisfies the current constraints.
pub const TICKET_AVAILABLE: &str = "Ticket Available";

/// Slot the agent informs to signal that it considers the task complete.
pub const TASK_COMPLETE_SLOT: &str = "taskcomplete";

/// Pseudo-slot that never resolves against the knowledge base.
pub const CLOSING_SLOT: &str = "closing";

/// Key of the aggregate count in KB match statistics.
pub const MATCHING_ALL_CONSTRAINTS: &str = "matching_all_constraints";

/// Separator between options in a multiple-choice slot value.
pub const MULTIPLE_CHOICE_SEPARATOR: char = '|';
