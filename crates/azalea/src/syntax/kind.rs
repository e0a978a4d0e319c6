/// Trait for token kind identifiers.
///
/// Users implement this for the enum that tags their tokens. The lexer only
/// needs to know which kinds are trivia: trivia is consumed like any other
/// token but never emitted.
///
/// ## Example
///
/// ```rust
/// use azalea::syntax::SyntaxKind;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Kind {
///     Number,
///     Plus,
///     Whitespace,
/// }
///
/// impl SyntaxKind for Kind {
///     fn is_trivia(self) -> bool {
///         matches!(self, Kind::Whitespace)
///     }
/// }
/// ```
pub trait SyntaxKind: Copy + PartialEq + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync + 'static {
    /// Whitespace, comments and other kinds the lexer consumes silently.
    fn is_trivia(self) -> bool;

    /// Display name used in diagnostics and CLI output.
    ///
    /// Defaults to the `Debug` rendering.
    fn name(self) -> String {
        format!("{self:?}")
    }
}
