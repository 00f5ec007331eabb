//! Evaluation resource limits (§10.3): a configurable recursion ceiling so
//! an embedder can't be taken down by a runaway `function` blowing the
//! Rust stack. The core spec only names the depth-10 cap on `to_string`
//! (§4.1); this generalizes the same idea to call depth.

#[derive(Debug, Clone, Copy)]
pub struct ResourceLimits {
    pub max_recursion: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self { max_recursion: 512 }
    }
}
