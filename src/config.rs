/// Knobs for the lexer/parser stage.
///
/// The defaults accept every input the attribute syntax has historically accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject a number that runs straight into an identifier (`1234xxx`)
    /// instead of splitting it into a NUMBER followed by an IDENT.
    pub strict_numbers: bool,
}

impl ParseOptions {
    pub fn strict() -> Self {
        ParseOptions {
            strict_numbers: true,
        }
    }
}
