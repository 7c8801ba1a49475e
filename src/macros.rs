/// Compile-time assertion over constant expressions.
/// Each invocation expands to an anonymous const, so several may share a module.
macro_rules! static_assert {
    ($cond:expr, $msg:expr) => {
        const _: () = assert!($cond, $msg);
    };
    ($cond:expr) => {
        static_assert!($cond, "Static assertion failed");
    };
}

pub(crate) use static_assert;
