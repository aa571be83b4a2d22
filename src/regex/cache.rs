/// Compile a regular expression once, on first use, and hand back a
/// `&'static Regex` thereafter. Only for patterns that are constants in the
/// source; an invalid one is a programming error.
#[macro_export]
macro_rules! regex {
    ($pattern:expr) => {{
        use std::sync::OnceLock;
        static REGEX: OnceLock<::regex::Regex> = OnceLock::new();
        REGEX.get_or_init(|| ::regex::Regex::new($pattern).unwrap_or_else(|e| panic!("{}", e)))
    }};
}
