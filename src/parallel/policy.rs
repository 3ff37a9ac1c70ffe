//! Runtime execution policy, standing in for the original's
//! `std::execution::sequenced_policy` / `parallel_policy` tag-dispatch
//! overloads. The spec allows either a compile-time generic policy or a
//! runtime enum dispatched at entry points; we take the runtime enum, since
//! `SearchServer` is a single concrete type embedders hold behind one name
//! and pick a policy for at the call site, not at construction.

/// Selects between the sequential and `rayon`-parallel code paths exposed
/// by operations that support both (`find_top_documents`, `match_document`,
/// `remove_document`, batch query processing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    Parallel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_sequential() {
        assert_eq!(ExecutionPolicy::default(), ExecutionPolicy::Sequential);
    }
}
