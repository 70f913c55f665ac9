use sovran_variant::{Handle, OneOf, VariantError, Visitor};

// Each node is one of: a literal, a sum of child nodes, or a named variable.
// The children live in heap slots, so `Node` needs no Box or Option of its own.
#[derive(Clone)]
struct Node {
    kind: OneOf<(f64, Sum, String)>,
}

#[derive(Clone)]
struct Sum {
    terms: Vec<Node>,
}

impl Node {
    fn literal(value: f64) -> Self {
        Self {
            kind: OneOf::of::<0>(value),
        }
    }

    fn sum(terms: Vec<Node>) -> Self {
        Self {
            kind: OneOf::of::<1>(Sum { terms }),
        }
    }

    fn variable(name: &str) -> Self {
        Self {
            kind: OneOf::of::<2>(name.to_string()),
        }
    }
}

struct Evaluate<'a> {
    bindings: &'a [(&'a str, f64)],
}

impl Visitor for Evaluate<'_> {
    type Result = Result<f64, String>;
}

impl Handle<f64> for Evaluate<'_> {
    fn handle(&mut self, value: &f64) -> Self::Result {
        Ok(*value)
    }
}

impl Handle<Sum> for Evaluate<'_> {
    fn handle(&mut self, value: &Sum) -> Self::Result {
        let mut total = 0.0;
        for term in &value.terms {
            total += term.kind.visit(self).map_err(|e| e.to_string())??;
        }
        Ok(total)
    }
}

impl Handle<String> for Evaluate<'_> {
    fn handle(&mut self, value: &String) -> Self::Result {
        self.bindings
            .iter()
            .find(|(name, _)| *name == value.as_str())
            .map(|(_, bound)| *bound)
            .ok_or_else(|| format!("unbound variable {}", value))
    }
}

fn main() -> Result<(), VariantError> {
    let mut tree = Node::sum(vec![
        Node::literal(1.5),
        Node::variable("x"),
        Node::sum(vec![Node::literal(2.0), Node::variable("y")]),
    ]);

    let mut env = Evaluate {
        bindings: &[("x", 10.0), ("y", 0.25)],
    };
    println!("Result: {:?}", tree.kind.visit(&mut env)?);

    // Collapse the whole tree into a literal; the old Sum stays retained
    tree.kind.set::<0>(99.0);
    println!("After rewrite: {:?}", tree.kind.visit(&mut env)?);
    println!(
        "Retained terms: {}",
        tree.kind.retained::<1>().map(|s| s.terms.len()).unwrap_or(0)
    );

    let mut unbound = Evaluate { bindings: &[] };
    println!("Unbound: {:?}", Node::variable("z").kind.visit(&mut unbound)?);

    Ok(())
}
