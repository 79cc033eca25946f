/// Arguments split into the leading positional run and everything after it.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Tokens<'a> {
    pub positional: Vec<&'a str>,
    pub named: Vec<&'a str>,
}

/// Splits `args` at the first token starting with `-`.
///
/// Every token from that point on, dashed or not, belongs to the named
/// stream. Bare tokens there are either values of the preceding flag or inert.
pub(crate) fn tokenize<S: AsRef<str>>(args: &[S]) -> Tokens<'_> {
    let mut tokens = Tokens::default();
    let mut named_section = false;

    for arg in args {
        let arg = arg.as_ref();
        if arg.starts_with('-') {
            named_section = true;
        }
        if named_section {
            tokens.named.push(arg);
        } else {
            tokens.positional.push(arg);
        }
    }

    tokens
}
