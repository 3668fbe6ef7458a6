/// A round-modifying event, picked ahead of time and started at the next
/// round boundary.
pub trait SpecialDay: Send + Sync {
    /// Display name; selection matches it case-insensitively.
    fn name(&self) -> &str;

    /// Broadcast to everyone when the day starts.
    fn description(&self) -> &str;

    /// Apply the day's effects.
    fn start(&self);

    /// Undo the day's effects.
    fn end(&self);
}
