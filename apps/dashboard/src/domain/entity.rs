/// Anything held in an entity store
///
/// Identity is a string key. Stores never generate ids themselves, callers
/// do (see [`crate::domain::new_id`]).
pub trait Entity: Clone {
    /// Short name used in log lines
    const KIND: &'static str;

    fn id(&self) -> &str;
}
