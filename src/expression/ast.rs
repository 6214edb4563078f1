#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Lit(Lit),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        func: String,
        args: Vec<Expr>,
    },
    /// Reference to a row column (or the `panel` / `group` pseudo-columns).
    Column(String),
}

impl Expr {
    /// Distinct column names referenced by this expression, in first-use order.
    pub(crate) fn columns(&self) -> Vec<String> {
        fn walk(e: &Expr, out: &mut Vec<String>) {
            match e {
                Expr::Lit(_) => {}
                Expr::Column(name) => {
                    if !out.iter().any(|c| c == name) {
                        out.push(name.clone());
                    }
                }
                Expr::Unary { expr, .. } => walk(expr, out),
                Expr::Binary { left, right, .. } => {
                    walk(left, out);
                    walk(right, out);
                }
                Expr::Call { args, .. } => {
                    for a in args {
                        walk(a, out);
                    }
                }
            }
        }

        let mut out = Vec::new();
        walk(self, &mut out);
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Lit {
    Num(f64),
    Bool(bool),
    Text(String),
    Na,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}
