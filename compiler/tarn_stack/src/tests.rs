use super::*;

#[test]
fn nested_sum_runs_on_small_depth() {
    fn sum_to(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { n + sum_to(n - 1) })
    }

    assert_eq!(sum_to(100), 5050);
}

#[test]
fn deep_chain_does_not_overflow() {
    fn chain_depth(n: u32) -> u32 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { chain_depth(n - 1) + 1 })
    }

    assert_eq!(chain_depth(200_000), 200_000);
}

#[test]
fn passes_result_through() {
    let ok: Result<&str, String> = ensure_sufficient_stack(|| Ok("done"));
    assert_eq!(ok, Ok("done"));

    let err: Result<(), String> = ensure_sufficient_stack(|| Err("boom".to_string()));
    assert_eq!(err, Err("boom".to_string()));
}

#[cfg(not(target_arch = "wasm32"))]
#[test]
fn remaining_stack_is_reported() {
    let remaining = ensure_sufficient_stack(remaining_stack);
    assert!(remaining.is_some_and(|bytes| bytes > 0));
}
