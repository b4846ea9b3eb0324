#[macro_export]
macro_rules! shon {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::shon!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Value::Object($crate::ShonMap::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::ShonMap::new();
        $(
            object.insert($key.to_string(), $crate::shon!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Fallback for any expression with a From impl (integers, strings,
    // references, maps). Decimals and timestamps carry literal text and are
    // built explicitly with their Value variants.
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
