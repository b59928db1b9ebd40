// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // String-type concatenation shorthand!
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

/// Cleaned text of a named capture group; `None` if the group did not
/// match or holds nothing but markup and whitespace.
#[macro_export]
macro_rules! cell {
    ($caps:expr, $name:expr) => {
        $caps
            .name($name)
            .and_then(|m| $crate::core::sanitize::clean_cell(m.as_str()))
    };
}

/// Free-text group flattened to one line and capped in length, or `None`
/// when comments were not asked for. The optional last argument rewrites
/// the raw text first.
#[macro_export]
macro_rules! comment {
    ($caps:expr, $name:expr, $wanted:expr) => {
        $crate::comment!($caps, $name, $wanted, |t: &str| ::std::string::String::from(t))
    };
    ($caps:expr, $name:expr, $wanted:expr, $rewrite:expr) => {
        if $wanted {
            $caps.name($name).and_then(|m| {
                $crate::core::sanitize::flatten_comment(
                    &($rewrite)(m.as_str()),
                    $crate::config::consts::COMMENT_MAX_CHARS,
                )
            })
        } else {
            None
        }
    };
}
