//! Human-in-the-loop decisions
//!
//! The engine never reads from a terminal itself. Whenever a run needs a
//! yes/no answer (continuing after a failed backup, for instance) it asks an
//! injected [`Confirm`] implementation, so tests can script the answers.

/// Capability for answering yes/no questions during a run
pub trait Confirm {
    /// Ask `prompt`; `true` means proceed.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        (*self)(prompt)
    }
}

/// Interpret a typed answer the way the prompts document it (`yes`/`y`).
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmative_answers() {
        assert!(is_affirmative("yes"));
        assert!(is_affirmative(" Y\n"));
        assert!(is_affirmative("YES"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yess"));
    }

    #[test]
    fn test_closure_confirm_sees_prompt() {
        let mut seen = Vec::new();
        let mut confirm = |prompt: &str| {
            seen.push(prompt.to_string());
            false
        };
        assert!(!confirm.confirm("Continue?"));
        assert_eq!(seen, vec!["Continue?".to_string()]);
    }
}
