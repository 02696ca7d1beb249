pub mod op;
pub mod reg;

/// Word address. Every instruction and every data word occupies one.
pub type Addr = u32;

/// Signed distance, in words, from `here` to `target`.
pub fn pc_relative(target: Addr, here: Addr) -> i64 {
    i64::from(target) - i64::from(here)
}

#[test]
fn test_pc_relative() {
    assert_eq!(pc_relative(5, 3), 2);
    assert_eq!(pc_relative(3, 5), -2);
    assert_eq!(pc_relative(4, 4), 0);
    assert_eq!(pc_relative(0, Addr::MAX), -i64::from(Addr::MAX));
}
