//! Validation domain services.

mod social_rules;

pub use social_rules::{MIN_TITLE_CHARS, SocialRules};
