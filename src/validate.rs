pub const MAX_NAME_LENGTH: usize = 60;

/// A name is valid when it has between 1 and 60 characters once surrounding
/// whitespace is removed.
pub fn validate_name(name: &str) -> bool {
    let length = name.trim().chars().count();
    length > 0 && length <= MAX_NAME_LENGTH
}

pub fn validate_topic<S: AsRef<str>>(topic: &str, valid_topics: &[S]) -> bool {
    valid_topics.iter().any(|t| t.as_ref() == topic)
}
