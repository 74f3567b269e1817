/// The syntax tree the parser (C0a) hands to the reader (C3). Node kinds
/// mirror spec.md §1's {number, string, symbol, sexpr, qexpr, comment, root}
/// set; bracket punctuation is never represented here (the parser consumes
/// it as a delimiter, as any recursive-descent parser would), while comments
/// are kept as real sibling nodes so the reader's "comments are dropped"
/// rule (spec.md §4.3) has something to actually drop.
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    Number(String),
    Symbol(String),
    Str(String),
    Comment(String),
    SExpr(Vec<Ast>),
    QExpr(Vec<Ast>),
    Root(Vec<Ast>),
}
