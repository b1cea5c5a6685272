pub mod frame;
pub mod rng;

#[cfg(not(target_arch = "wasm32"))]
pub mod logs;

/// Builds a `HashMap` from `key => value` pairs, mostly used for asset tables.
#[macro_export]
macro_rules! bmap {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut map = ::std::collections::HashMap::new();
        $( let _ = map.insert($key.into(), $value); )*
        map
    }};
}
