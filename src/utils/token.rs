use rand::{distributions::Alphanumeric, thread_rng, Rng};

/// Random lowercase alphanumeric identifier for short apply links.
pub fn generate_short_id(length: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_ids_have_requested_length_and_charset() {
        let id = generate_short_id(6);
        assert_eq!(id.len(), 6);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
