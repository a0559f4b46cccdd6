use crate::constants::MAX_ESSAY_BYTES;

/// Validate the essay submitted for analysis: non-empty after trimming,
/// and within the accepted byte limit.
pub fn validate_essay(essay: &str) -> Result<(), &'static str> {
    if essay.trim().is_empty() {
        return Err("essay must not be empty");
    }
    if essay.len() > MAX_ESSAY_BYTES {
        return Err("essay exceeds the maximum accepted length");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_essay_accepted() {
        assert!(validate_essay("The committee met on Tuesday.").is_ok());
    }

    #[test]
    fn empty_essay_rejected() {
        assert!(validate_essay("").is_err());
    }

    #[test]
    fn whitespace_only_essay_rejected() {
        assert!(validate_essay(" \n\t  ").is_err());
    }

    #[test]
    fn oversized_essay_rejected() {
        let essay = "word ".repeat(MAX_ESSAY_BYTES / 4);
        assert!(validate_essay(&essay).is_err());
    }

    #[test]
    fn essay_at_the_cap_accepted() {
        let essay = "a".repeat(MAX_ESSAY_BYTES);
        assert!(validate_essay(&essay).is_ok());
    }
}
