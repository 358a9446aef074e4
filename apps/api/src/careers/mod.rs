// Career matching: static catalog, quiz answers, and the weighted matcher.
// The matcher is pure; persistence of the top match lives in the handlers.

pub mod answers;
pub mod catalog;
pub mod education;
pub mod handlers;
pub mod matcher;
pub mod text;
